// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Self-removal helper composed into subscribers.
//!
//! A subscriber cannot name its own `Rc` from inside `on_next`, so it keeps a
//! [`Detacher`] built from the weak self-reference handed out by
//! [`Rc::new_cyclic`]. [`bind`] performs that construction:
//!
//! ```rust
//! use numgen_core::{Detacher, Notifier, Subscriber, Value};
//! use numgen_error::Result;
//!
//! struct Once {
//!     detacher: Detacher,
//! }
//!
//! impl Subscriber for Once {
//!     fn on_next(&mut self, _value: Value) -> Result<()> {
//!         self.detacher.detach()
//!     }
//! }
//!
//! let notifier = Notifier::new(|| 5);
//! let once = numgen_core::detacher::bind(&notifier, |detacher| Once { detacher });
//! notifier.attach(once.clone()).unwrap();
//!
//! assert_eq!(notifier.run().unwrap(), 1);
//! assert!(!notifier.is_registered(&once));
//! ```

use crate::logging::debug;
use crate::notifier::{Notifier, WeakNotifier};
use crate::subscriber::identity;
use crate::Subscriber;
use numgen_error::{NumGenError, Result};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Builds a subscriber that owns a [`Detacher`] bound to itself.
///
/// The subscriber is not attached.
pub fn bind<S, F>(notifier: &Notifier, build: F) -> Rc<RefCell<S>>
where
    S: Subscriber + 'static,
    F: FnOnce(Detacher) -> S,
{
    Rc::new_cyclic(|me: &Weak<RefCell<S>>| {
        let me: Weak<RefCell<dyn Subscriber>> = me.clone();
        RefCell::new(build(Detacher::new(notifier, me)))
    })
}

/// Removes one particular subscriber from the notifier it is bound to.
///
/// Holds only weak references, so it never keeps the notifier or the
/// subscriber alive.
#[derive(Clone)]
pub struct Detacher {
    notifier: WeakNotifier,
    subscriber: Weak<RefCell<dyn Subscriber>>,
}

impl Detacher {
    pub fn new(notifier: &Notifier, subscriber: Weak<RefCell<dyn Subscriber>>) -> Self {
        Self {
            notifier: notifier.downgrade(),
            subscriber,
        }
    }

    fn id(&self) -> *const () {
        identity(Weak::as_ptr(&self.subscriber))
    }

    /// Returns `true` while the bound subscriber is in the registry.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.notifier
            .upgrade()
            .is_some_and(|notifier| notifier.is_registered_id(self.id()))
    }

    /// Attaches the bound subscriber.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::DuplicateSubscriber` if it is already attached,
    /// and `NumGenError::InvalidOperation` if the notifier or the subscriber
    /// no longer exists.
    pub fn attach(&self) -> Result<()> {
        let notifier = self.notifier()?;
        let subscriber = self.subscriber.upgrade().ok_or_else(|| {
            NumGenError::invalid_operation("subscriber dropped before attaching")
        })?;
        notifier.attach(subscriber)
    }

    /// Detaches the bound subscriber.
    ///
    /// # Errors
    ///
    /// Returns `NumGenError::InvalidOperation` if the subscriber is not
    /// attached: a subscriber must never detach twice.
    pub fn detach(&self) -> Result<()> {
        let notifier = self.notifier()?;
        if !notifier.is_registered_id(self.id()) {
            return Err(NumGenError::invalid_operation(
                "subscriber detached while not attached",
            ));
        }
        debug!("subscriber detaching itself");
        notifier.detach_id(self.id())
    }

    fn notifier(&self) -> Result<Notifier> {
        self.notifier
            .upgrade()
            .ok_or_else(|| NumGenError::invalid_operation("notifier no longer exists"))
    }
}
