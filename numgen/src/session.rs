// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Host wiring: a notifier plus the subscribers named in the configuration.

use crate::config::NumGenConfig;
use crate::log_sink::LogSink;
use numgen_core::{Notifier, RoundSink};
use numgen_error::Result;
use numgen_subscribers::{RangeSubscriber, StatisticsSubscriber, ThresholdSubscriber};
use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

/// Drives `notifier` one round at a time, pausing `delay` between rounds,
/// until the registry is empty. Returns the number of rounds.
///
/// # Errors
///
/// Propagates the first round failure.
pub fn run_paced(notifier: &Notifier, delay: Duration) -> Result<u64> {
    let mut rounds = 0;
    while notifier.step()?.is_some() {
        rounds += 1;
        if !delay.is_zero() && !notifier.is_empty() {
            thread::sleep(delay);
        }
    }
    Ok(rounds)
}

/// A configured notifier and handles to the subscribers it drives.
pub struct Session {
    notifier: Notifier,
    delay: Duration,
    threshold: Option<Rc<RefCell<ThresholdSubscriber>>>,
    statistics: Option<Rc<RefCell<StatisticsSubscriber>>>,
    range: Option<Rc<RefCell<RangeSubscriber>>>,
}

impl Session {
    /// Builds a session that logs through [`LogSink`].
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidArgument` for inverted bounds.
    pub fn from_config(config: &NumGenConfig) -> Result<Self> {
        Self::with_sink(config, LogSink)
    }

    /// # Errors
    ///
    /// Returns `NumGenError::InvalidArgument` for inverted bounds.
    pub fn with_sink(config: &NumGenConfig, sink: impl RoundSink + 'static) -> Result<Self> {
        config.validate()?;
        let notifier = Notifier::new(config.generator.build_source()?).with_sink(sink);
        let subscribers = &config.subscribers;

        let threshold = subscribers
            .threshold
            .map(|count| ThresholdSubscriber::attach_to(&notifier, count))
            .transpose()?;
        let statistics = subscribers
            .statistics
            .map(|count| StatisticsSubscriber::attach_to(&notifier, count))
            .transpose()?;
        let range = subscribers
            .range
            .as_ref()
            .map(|range| {
                RangeSubscriber::attach_to(&notifier, range.lower..=range.upper, range.hits)
            })
            .transpose()?;

        Ok(Self {
            notifier,
            delay: config.generator.delay(),
            threshold,
            statistics,
            range,
        })
    }

    /// Overrides the configured pause between rounds.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Generates values until every subscriber has detached.
    ///
    /// # Errors
    ///
    /// Propagates the first round failure.
    pub fn run(&self) -> Result<u64> {
        let rounds = if self.delay.is_zero() {
            self.notifier.run()?
        } else {
            run_paced(&self.notifier, self.delay)?
        };
        tracing::debug!(rounds, "session finished");
        Ok(rounds)
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[must_use]
    pub fn threshold(&self) -> Option<&Rc<RefCell<ThresholdSubscriber>>> {
        self.threshold.as_ref()
    }

    #[must_use]
    pub fn statistics(&self) -> Option<&Rc<RefCell<StatisticsSubscriber>>> {
        self.statistics.as_ref()
    }

    #[must_use]
    pub fn range(&self) -> Option<&Rc<RefCell<RangeSubscriber>>> {
        self.range.as_ref()
    }

    /// Terminal summaries of the attached subscribers, in attach order.
    #[must_use]
    pub fn summaries(&self) -> Vec<String> {
        let threshold = self.threshold.iter().map(|s| s.borrow().to_string());
        let statistics = self.statistics.iter().map(|s| s.borrow().to_string());
        let range = self.range.iter().map(|s| s.borrow().to_string());
        threshold.chain(statistics).chain(range).collect()
    }
}
