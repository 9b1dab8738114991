// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Host configuration, read from TOML.
//!
//! Every field is optional; missing generator fields take the generator
//! defaults.
//!
//! ```toml
//! [generator]
//! min_value = 1
//! max_value = 1000
//! seed = 42
//! delay_ms = 500
//!
//! [subscribers]
//! threshold = 50
//! statistics = 20
//!
//! [subscribers.range]
//! lower = 100
//! upper = 200
//! hits = 5
//! ```

use numgen_core::{RandomSource, Value};
use numgen_error::{NumGenError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Value source and pacing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub min_value: Value,
    pub max_value: Value,
    /// Fixed seed for a reproducible run; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Pause between rounds.
    pub delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_value: RandomSource::DEFAULT_MIN,
            max_value: RandomSource::DEFAULT_MAX,
            seed: None,
            delay_ms: 500,
        }
    }
}

impl GeneratorConfig {
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidArgument` if `min_value > max_value`.
    pub fn validate(&self) -> Result<()> {
        if self.min_value > self.max_value {
            return Err(NumGenError::invalid_argument(format!(
                "generator min_value {} exceeds max_value {}",
                self.min_value, self.max_value
            )));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NumGenError::InvalidArgument` for inverted bounds.
    pub fn build_source(&self) -> Result<RandomSource> {
        match self.seed {
            Some(seed) => RandomSource::with_seed(self.min_value, self.max_value, seed),
            None => RandomSource::new(self.min_value, self.max_value),
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Range subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    pub lower: Value,
    pub upper: Value,
    pub hits: u64,
}

/// Which subscribers the host attaches; an absent entry is not attached.
///
/// A document without a `[subscribers]` table gets the demo set from
/// [`NumGenConfig::default`]; once the table is present only the entries it
/// names are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscribersConfig {
    #[serde(default)]
    pub threshold: Option<u64>,
    #[serde(default)]
    pub statistics: Option<u64>,
    #[serde(default)]
    pub range: Option<RangeConfig>,
}

/// Complete host configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumGenConfig {
    pub generator: GeneratorConfig,
    pub subscribers: SubscribersConfig,
}

impl Default for NumGenConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            subscribers: SubscribersConfig {
                threshold: None,
                statistics: Some(20),
                range: Some(RangeConfig {
                    lower: 100,
                    upper: 200,
                    hits: 5,
                }),
            },
        }
    }
}

impl NumGenConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::Config` if the document does not parse and
    /// `NumGenError::InvalidArgument` if it describes inverted bounds.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| NumGenError::config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// See [`NumGenConfig::from_toml_str`].
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        if let Some(range) = &self.subscribers.range {
            if range.lower > range.upper {
                return Err(NumGenError::invalid_argument(format!(
                    "range lower {} exceeds upper {}",
                    range.lower, range.upper
                )));
            }
        }
        Ok(())
    }
}
