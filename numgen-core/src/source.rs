// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value sources feeding the notify loop.
//!
//! The notifier only relies on the output contract: one [`Value`] per call.
//! [`RandomSource`] draws uniformly from a closed interval using
//! [`fastrand`]; seed it for reproducible runs.
//!
//! ```rust
//! use numgen_core::{RandomSource, ValueSource};
//!
//! let mut source = RandomSource::with_seed(10, 20, 42).unwrap();
//! let value = source.next_value();
//! assert!((10..=20).contains(&value));
//! ```

use crate::Value;
use numgen_error::{NumGenError, Result};
use std::ops::RangeInclusive;

/// Produces one value per call.
///
/// A source may query the notifier that drives it. Stepping that notifier
/// from inside `next_value` fails with `NumGenError::InvalidOperation`.
pub trait ValueSource {
    fn next_value(&mut self) -> Value;
}

impl<F> ValueSource for F
where
    F: FnMut() -> Value,
{
    fn next_value(&mut self) -> Value {
        self()
    }
}

/// Uniform random integers over `[min, max]`, both inclusive.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: fastrand::Rng,
    min: Value,
    max: Value,
}

impl RandomSource {
    pub const DEFAULT_MIN: Value = 1;
    pub const DEFAULT_MAX: Value = 1000;

    /// Creates an entropy-seeded source over `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidArgument` if `min > max`.
    pub fn new(min: Value, max: Value) -> Result<Self> {
        Self::from_rng(min, max, fastrand::Rng::new())
    }

    /// Creates a source over `[min, max]` that replays the same sequence for
    /// the same `seed`.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidArgument` if `min > max`.
    pub fn with_seed(min: Value, max: Value, seed: u64) -> Result<Self> {
        Self::from_rng(min, max, fastrand::Rng::with_seed(seed))
    }

    fn from_rng(min: Value, max: Value, rng: fastrand::Rng) -> Result<Self> {
        if min > max {
            return Err(NumGenError::invalid_argument(format!(
                "source lower bound {min} exceeds upper bound {max}"
            )));
        }
        Ok(Self { rng, min, max })
    }

    #[must_use]
    pub fn bounds(&self) -> RangeInclusive<Value> {
        self.min..=self.max
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl ValueSource for RandomSource {
    fn next_value(&mut self) -> Value {
        self.rng.i32(self.min..=self.max)
    }
}
