// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Range-hit counting subscriber.

use crate::logging::debug;
use crate::threshold::Threshold;
use numgen_core::{detacher, Detacher, Notifier, Subscriber, Value};
use numgen_error::{NumGenError, Result};
use std::cell::RefCell;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

/// Counts values falling inside a closed interval and detaches itself once
/// `hits_to_wait_for` of them have arrived.
///
/// Values outside the interval never count towards detachment. Every received
/// value is still tallied in [`RangeSubscriber::received_count`].
///
/// ```rust
/// use numgen_core::Notifier;
/// use numgen_subscribers::RangeSubscriber;
///
/// let notifier = Notifier::default();
/// let subscriber = RangeSubscriber::attach_to(&notifier, 1..=100, 2).unwrap();
///
/// notifier.run().unwrap();
/// assert_eq!(subscriber.borrow().hits_in_range(), 2);
/// assert!(subscriber.borrow().received_count() >= 2);
/// ```
pub struct RangeSubscriber {
    lower_bound: Value,
    upper_bound: Value,
    received_count: u64,
    hits: Threshold,
    detacher: Detacher,
}

impl RangeSubscriber {
    /// Builds an unattached subscriber over `range` bound to `notifier`.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidArgument` if the lower bound of `range`
    /// exceeds its upper bound.
    pub fn new(
        notifier: &Notifier,
        range: RangeInclusive<Value>,
        hits_to_wait_for: u64,
    ) -> Result<Rc<RefCell<Self>>> {
        let (lower_bound, upper_bound) = range.into_inner();
        if lower_bound > upper_bound {
            return Err(NumGenError::invalid_argument(format!(
                "range lower bound {lower_bound} exceeds upper bound {upper_bound}"
            )));
        }

        Ok(detacher::bind(notifier, |detacher| Self {
            lower_bound,
            upper_bound,
            received_count: 0,
            hits: Threshold::new(hits_to_wait_for),
            detacher,
        }))
    }

    /// Builds a subscriber and attaches it to `notifier`.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidArgument` for an inverted range, and
    /// propagates the attach failure.
    pub fn attach_to(
        notifier: &Notifier,
        range: RangeInclusive<Value>,
        hits_to_wait_for: u64,
    ) -> Result<Rc<RefCell<Self>>> {
        let subscriber = Self::new(notifier, range, hits_to_wait_for)?;
        notifier.attach(subscriber.clone())?;
        Ok(subscriber)
    }

    #[must_use]
    pub const fn contains(&self, value: Value) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }

    #[must_use]
    pub const fn lower_bound(&self) -> Value {
        self.lower_bound
    }

    #[must_use]
    pub const fn upper_bound(&self) -> Value {
        self.upper_bound
    }

    #[must_use]
    pub const fn hits_in_range(&self) -> u64 {
        self.hits.count()
    }

    #[must_use]
    pub const fn hits_to_wait_for(&self) -> u64 {
        self.hits.target()
    }

    #[must_use]
    pub const fn received_count(&self) -> u64 {
        self.received_count
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.detacher.is_attached()
    }
}

impl Subscriber for RangeSubscriber {
    fn on_next(&mut self, value: Value) -> Result<()> {
        self.received_count = self.received_count.saturating_add(1);
        if self.contains(value) {
            self.hits.advance();
        }

        if self.hits.is_met() {
            debug!(
                hits = self.hits.count(),
                received = self.received_count,
                "range subscriber reached its hits, detaching"
            );
            self.detacher.detach()?;
        }
        Ok(())
    }
}

impl fmt::Display for RangeSubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RangeSubscriber [range='{}..={}', hits='{}', hits_to_wait_for='{}', received='{}']",
            self.lower_bound,
            self.upper_bound,
            self.hits_in_range(),
            self.hits_to_wait_for(),
            self.received_count
        )
    }
}
