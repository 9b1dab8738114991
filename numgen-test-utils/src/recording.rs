// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use numgen_core::detacher::{self, Detacher};
use numgen_core::{Notifier, Subscriber, Value};
use numgen_error::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// Delivery order shared between several recorders: `(name, value)` pairs.
pub type DeliveryLog = Rc<RefCell<Vec<(&'static str, Value)>>>;

/// Records every value it receives and detaches itself after a fixed number
/// of deliveries.
///
/// It can also be told to detach other recorders on its first delivery, which
/// is how tests exercise cross-subscriber detachment within one round.
pub struct RecordingSubscriber {
    name: &'static str,
    values: Vec<Value>,
    detach_after: Option<usize>,
    detacher: Detacher,
    victims: Vec<Detacher>,
    log: Option<DeliveryLog>,
}

impl RecordingSubscriber {
    /// Builds an unattached recorder. `detach_after == 0` never detaches.
    pub fn new(notifier: &Notifier, detach_after: usize) -> Rc<RefCell<Self>> {
        Self::named(notifier, "recorder", detach_after)
    }

    pub fn named(
        notifier: &Notifier,
        name: &'static str,
        detach_after: usize,
    ) -> Rc<RefCell<Self>> {
        detacher::bind(notifier, |detacher| Self {
            name,
            values: Vec::new(),
            detach_after: (detach_after > 0).then_some(detach_after),
            detacher,
            victims: Vec::new(),
            log: None,
        })
    }

    /// Builds a recorder and attaches it.
    ///
    /// # Errors
    ///
    /// Propagates the attach failure.
    pub fn attach_to(notifier: &Notifier, detach_after: usize) -> Result<Rc<RefCell<Self>>> {
        let recorder = Self::new(notifier, detach_after);
        notifier.attach(recorder.clone())?;
        Ok(recorder)
    }

    /// Appends every delivery to `log`.
    pub fn log_to(&mut self, log: &DeliveryLog) {
        self.log = Some(Rc::clone(log));
    }

    /// Detaches `other` during this recorder's first delivery.
    pub fn detach_on_first_delivery(&mut self, other: &Rc<RefCell<Self>>) {
        self.victims.push(other.borrow().detacher.clone());
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.detacher.is_attached()
    }
}

impl Subscriber for RecordingSubscriber {
    fn on_next(&mut self, value: Value) -> Result<()> {
        self.values.push(value);
        if let Some(log) = &self.log {
            log.borrow_mut().push((self.name, value));
        }

        for victim in self.victims.drain(..) {
            victim.detach()?;
        }

        if self.detach_after == Some(self.values.len()) {
            self.detacher.detach()?;
        }
        Ok(())
    }
}
