// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Running min/max/sum/average subscriber.
//!
//! Minimum and maximum start out empty and are seeded by the first received
//! value, so every reported extreme is a value that was actually delivered.
//! Before any delivery [`StatisticsSubscriber::min`],
//! [`StatisticsSubscriber::max`] and both averages are `None`.

use crate::logging::debug;
use crate::threshold::Threshold;
use numgen_core::{detacher, Detacher, Notifier, Subscriber, Value};
use numgen_error::Result;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Aggregates received values and detaches itself after `wait_for_count` of
/// them.
///
/// ```rust
/// use numgen_core::Notifier;
/// use numgen_subscribers::StatisticsSubscriber;
///
/// let notifier = Notifier::new(numgen_core::RandomSource::with_seed(1, 6, 3).unwrap());
/// let stats = StatisticsSubscriber::attach_to(&notifier, 10).unwrap();
///
/// notifier.run().unwrap();
///
/// let stats = stats.borrow();
/// assert_eq!(stats.count(), 10);
/// assert!(stats.min() <= stats.max());
/// assert!((1.0..=6.0).contains(&stats.average().unwrap()));
/// ```
pub struct StatisticsSubscriber {
    received: Threshold,
    min: Option<Value>,
    max: Option<Value>,
    sum: i64,
    detacher: Detacher,
}

impl StatisticsSubscriber {
    /// Builds an unattached subscriber bound to `notifier`.
    pub fn new(notifier: &Notifier, wait_for_count: u64) -> Rc<RefCell<Self>> {
        detacher::bind(notifier, |detacher| Self {
            received: Threshold::new(wait_for_count),
            min: None,
            max: None,
            sum: 0,
            detacher,
        })
    }

    /// Builds a subscriber and attaches it to `notifier`.
    ///
    /// # Errors
    ///
    /// Propagates the attach failure.
    pub fn attach_to(notifier: &Notifier, wait_for_count: u64) -> Result<Rc<RefCell<Self>>> {
        let subscriber = Self::new(notifier, wait_for_count);
        notifier.attach(subscriber.clone())?;
        Ok(subscriber)
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.received.count()
    }

    #[must_use]
    pub const fn wait_for_count(&self) -> u64 {
        self.received.target()
    }

    #[must_use]
    pub const fn min(&self) -> Option<Value> {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<Value> {
        self.max
    }

    #[must_use]
    pub const fn sum(&self) -> i64 {
        self.sum
    }

    /// Arithmetic mean of the received values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> Option<f64> {
        let count = self.count();
        (count > 0).then(|| self.sum as f64 / count as f64)
    }

    /// Mean truncated towards zero.
    #[must_use]
    pub fn integer_average(&self) -> Option<i64> {
        let count = i64::try_from(self.count()).ok().filter(|&count| count > 0)?;
        Some(self.sum / count)
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.detacher.is_attached()
    }
}

impl Subscriber for StatisticsSubscriber {
    fn on_next(&mut self, value: Value) -> Result<()> {
        let done = self.received.advance();

        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
        self.sum = self.sum.saturating_add(i64::from(value));

        if done {
            debug!(
                count = self.received.count(),
                sum = self.sum,
                "statistics subscriber reached its count, detaching"
            );
            self.detacher.detach()?;
        }
        Ok(())
    }
}

struct Field<T>(Option<T>);

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("-"),
        }
    }
}

impl fmt::Display for StatisticsSubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StatisticsSubscriber [count='{}', wait_for='{}', min='{}', max='{}', sum='{}', avg='{}']",
            self.count(),
            self.wait_for_count(),
            Field(self.min),
            Field(self.max),
            self.sum,
            Field(self.integer_average())
        )
    }
}
