// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Subscriber registry and the synchronous generate/notify loop.
//!
//! A [`Notifier`] owns an ordered registry of subscribers and a
//! [`ValueSource`]. Each round draws one value and delivers it to every
//! subscriber that was registered when the round began; [`Notifier::run`]
//! keeps producing rounds until the registry is empty.
//!
//! ## Characteristics
//!
//! - **Single-threaded**: Cheap to clone; all clones share one `Rc<RefCell<..>>`.
//! - **Snapshot delivery**: Subscribers may detach themselves (or each other)
//!   from inside their handler without disturbing the round in progress.
//! - **Identity**: Membership is decided by allocation, never by state.
//!
//! ## Example
//!
//! ```
//! use numgen_core::{Notifier, RandomSource, Subscriber, Value};
//! use numgen_error::Result;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! struct Printer;
//!
//! impl Subscriber for Printer {
//!     fn on_next(&mut self, value: Value) -> Result<()> {
//!         println!("{value}");
//!         Ok(())
//!     }
//! }
//!
//! let notifier = Notifier::new(RandomSource::with_seed(1, 6, 7).unwrap());
//! let printer = Rc::new(RefCell::new(Printer));
//!
//! notifier.attach(printer.clone()).unwrap();
//! notifier.notify_all(4).unwrap();
//! notifier.detach(&printer).unwrap();
//!
//! // Nothing left to notify: the run ends before drawing a value.
//! assert_eq!(notifier.run().unwrap(), 0);
//! ```

use crate::logging::{debug, trace};
use crate::sink::{NoopSink, RoundSink};
use crate::source::{RandomSource, ValueSource};
use crate::subscriber::identity;
use crate::{SubscriberRef, Value};
use numgen_error::{NumGenError, Result};
use std::cell::RefCell;
use std::ptr;
use std::rc::{Rc, Weak};

struct NotifierState {
    registry: Vec<SubscriberRef>,
    // Taken out while their hooks run so the hooks may query the notifier.
    source: Option<Box<dyn ValueSource>>,
    sink: Option<Box<dyn RoundSink>>,
    running: bool,
}

impl NotifierState {
    fn position(&self, id: *const ()) -> Option<usize> {
        if self.registry.is_empty() {
            return None;
        }
        self.registry
            .iter()
            .position(|entry| ptr::eq(identity(Rc::as_ptr(entry)), id))
    }
}

/// Owner of the subscriber registry and driver of the notify loop.
///
/// See the [module documentation](self) for the delivery guarantees.
#[derive(Clone)]
pub struct Notifier {
    state: Rc<RefCell<NotifierState>>,
}

impl Notifier {
    /// Creates an idle notifier with an empty registry that draws its values
    /// from `source`.
    #[must_use]
    pub fn new(source: impl ValueSource + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(NotifierState {
                registry: Vec::new(),
                source: Some(Box::new(source)),
                sink: Some(Box::new(NoopSink)),
                running: false,
            })),
        }
    }

    /// Replaces the observation sink.
    #[must_use]
    pub fn with_sink(self, sink: impl RoundSink + 'static) -> Self {
        self.state.borrow_mut().sink = Some(Box::new(sink));
        self
    }

    /// Adds `subscriber` at the end of the registry.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::DuplicateSubscriber` if the same subscriber is
    /// already registered; the registry is left unchanged.
    pub fn attach(&self, subscriber: SubscriberRef) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.position(identity(Rc::as_ptr(&subscriber))).is_some() {
            return Err(NumGenError::DuplicateSubscriber);
        }
        state.registry.push(subscriber);
        debug!(subscribers = state.registry.len(), "subscriber attached");
        Ok(())
    }

    /// Removes `subscriber` from the registry.
    ///
    /// Safe to call from inside a subscriber's own handler.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::NotRegistered` if `subscriber` is not a member.
    pub fn detach<S: ?Sized>(&self, subscriber: &Rc<RefCell<S>>) -> Result<()> {
        self.detach_id(identity(Rc::as_ptr(subscriber)))
    }

    /// Returns `true` if `subscriber` is currently a member of the registry.
    #[must_use]
    pub fn is_registered<S: ?Sized>(&self, subscriber: &Rc<RefCell<S>>) -> bool {
        self.is_registered_id(identity(Rc::as_ptr(subscriber)))
    }

    pub(crate) fn detach_id(&self, id: *const ()) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let index = state.position(id).ok_or(NumGenError::NotRegistered)?;
        // The removed handle is dropped after the borrow ends; a round in
        // flight still holds its own clone in the snapshot.
        let removed = state.registry.remove(index);
        debug!(subscribers = state.registry.len(), "subscriber detached");
        drop(state);
        drop(removed);
        Ok(())
    }

    pub(crate) fn is_registered_id(&self, id: *const ()) -> bool {
        self.state.borrow().position(id).is_some()
    }

    /// Delivers `value` once to each subscriber registered when the call
    /// starts, in registry order.
    ///
    /// Subscribers attached during the round wait for the next one. A
    /// subscriber detached before its turn is skipped.
    ///
    /// # Errors
    ///
    /// Propagates the first handler error, which ends the round early.
    /// Returns `NumGenError::InvalidOperation` if a subscriber is still inside
    /// its own handler when its turn comes (re-entrant notification).
    pub fn notify_all(&self, value: Value) -> Result<()> {
        let round: Vec<SubscriberRef> = self.state.borrow().registry.clone();

        for subscriber in &round {
            if !self.is_registered_id(identity(Rc::as_ptr(subscriber))) {
                trace!(value, "skipping subscriber detached earlier in the round");
                continue;
            }

            let mut handler = subscriber.try_borrow_mut().map_err(|_| {
                NumGenError::invalid_operation("subscriber re-entered during its own delivery")
            })?;
            handler.on_next(value)?;
        }

        Ok(())
    }

    /// Runs a single round: draws one value and notifies it.
    ///
    /// Returns `Ok(None)` without drawing when the registry is empty.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidOperation` if called from inside the
    /// value source, and otherwise see [`Notifier::notify_all`].
    pub fn step(&self) -> Result<Option<Value>> {
        if self.is_empty() {
            return Ok(None);
        }

        let value = self.draw()?;
        self.observe(|sink| sink.value_generated(value));

        trace!(value, "value generated");
        self.notify_all(value)?;
        Ok(Some(value))
    }

    /// Produces rounds until the registry is empty and returns how many were
    /// produced.
    ///
    /// Returns immediately with `0` if nothing is registered. Never sleeps.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidOperation` if a run is already in
    /// progress, and otherwise propagates the first handler error.
    pub fn run(&self) -> Result<u64> {
        {
            let mut state = self.state.borrow_mut();
            if state.running {
                return Err(NumGenError::invalid_operation("notifier is already running"));
            }
            state.running = true;
        }
        debug!("run started");

        let outcome = self.drive();

        self.state.borrow_mut().running = false;
        if let Ok(&rounds) = outcome.as_ref() {
            self.observe(|sink| sink.run_finished(rounds));
            debug!(rounds, "run finished");
        }
        outcome
    }

    fn draw(&self) -> Result<Value> {
        let mut source = self.state.borrow_mut().source.take().ok_or_else(|| {
            NumGenError::invalid_operation("value source re-entered while drawing")
        })?;
        let value = source.next_value();
        self.state.borrow_mut().source = Some(source);
        Ok(value)
    }

    // A sink re-entering its own hook is not called again.
    fn observe(&self, hook: impl FnOnce(&mut dyn RoundSink)) {
        let Some(mut sink) = self.state.borrow_mut().sink.take() else {
            return;
        };
        hook(sink.as_mut());
        let mut state = self.state.borrow_mut();
        // A sink installed from inside the hook wins.
        if state.sink.is_none() {
            state.sink = Some(sink);
        }
    }

    fn drive(&self) -> Result<u64> {
        let mut rounds = 0;
        while self.step()?.is_some() {
            rounds += 1;
        }
        Ok(rounds)
    }

    /// Returns `true` while [`Notifier::run`] is executing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().registry.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().registry.is_empty()
    }

    /// Returns a handle that does not keep the notifier alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakNotifier {
        WeakNotifier {
            state: Rc::downgrade(&self.state),
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(RandomSource::default())
    }
}

/// Non-owning handle to a [`Notifier`].
///
/// Subscribers hold one of these so that the registry (which owns the
/// subscribers) and the subscribers do not form a reference cycle.
#[derive(Clone, Default)]
pub struct WeakNotifier {
    state: Weak<RefCell<NotifierState>>,
}

impl WeakNotifier {
    #[must_use]
    pub fn upgrade(&self) -> Option<Notifier> {
        self.state.upgrade().map(|state| Notifier { state })
    }
}
