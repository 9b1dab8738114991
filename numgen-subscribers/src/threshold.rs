// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Count-then-leave: the base subscriber contract.

use crate::logging::debug;
use numgen_core::{detacher, Detacher, Notifier, Subscriber, Value};
use numgen_error::Result;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Counts occurrences towards a fixed target.
///
/// A target of [`Threshold::UNBOUNDED`] is never met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    count: u64,
    target: u64,
}

impl Threshold {
    pub const UNBOUNDED: u64 = u64::MAX;

    #[must_use]
    pub const fn new(target: u64) -> Self {
        Self { count: 0, target }
    }

    /// Counts one occurrence and reports whether the target is now met.
    pub fn advance(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.is_met()
    }

    #[must_use]
    pub const fn is_met(&self) -> bool {
        self.target != Self::UNBOUNDED && self.count >= self.target
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }
}

/// Receives values until it has seen `wait_for_count` of them, then detaches
/// itself.
///
/// ```rust
/// use numgen_core::Notifier;
/// use numgen_subscribers::ThresholdSubscriber;
///
/// let notifier = Notifier::default();
/// let subscriber = ThresholdSubscriber::attach_to(&notifier, 3).unwrap();
///
/// assert_eq!(notifier.run().unwrap(), 3);
/// assert_eq!(subscriber.borrow().received_count(), 3);
/// assert!(!subscriber.borrow().is_attached());
/// ```
pub struct ThresholdSubscriber {
    received: Threshold,
    detacher: Detacher,
}

impl ThresholdSubscriber {
    /// Builds an unattached subscriber bound to `notifier`.
    pub fn new(notifier: &Notifier, wait_for_count: u64) -> Rc<RefCell<Self>> {
        detacher::bind(notifier, |detacher| Self {
            received: Threshold::new(wait_for_count),
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
    pub const fn received_count(&self) -> u64 {
        self.received.count()
    }

    #[must_use]
    pub const fn wait_for_count(&self) -> u64 {
        self.received.target()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.detacher.is_attached()
    }
}

impl Subscriber for ThresholdSubscriber {
    fn on_next(&mut self, _value: Value) -> Result<()> {
        if self.received.advance() {
            debug!(
                received = self.received.count(),
                "threshold subscriber reached its count, detaching"
            );
            self.detacher.detach()?;
        }
        Ok(())
    }
}

impl fmt::Display for ThresholdSubscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ThresholdSubscriber [received='{}', wait_for='{}']",
            self.received_count(),
            self.wait_for_count()
        )
    }
}
