// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The capability every registered subscriber implements.

use numgen_error::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// A generated value.
pub type Value = i32;

/// Shared, identity-compared handle to a subscriber.
///
/// Two handles denote the same subscriber iff they point at the same
/// allocation; equal state is irrelevant.
pub type SubscriberRef = Rc<RefCell<dyn Subscriber>>;

/// Receives generated values from a [`Notifier`](crate::Notifier).
///
/// A handler may detach its own subscriber (usually through a
/// [`Detacher`](crate::Detacher)) while the notifier is still dispatching the
/// current round.
///
/// # Errors
///
/// A returned error aborts the round and is propagated to whoever drove it.
pub trait Subscriber {
    /// Called once per round with the generated value.
    fn on_next(&mut self, value: Value) -> Result<()>;
}

impl<F> Subscriber for F
where
    F: FnMut(Value) -> Result<()>,
{
    fn on_next(&mut self, value: Value) -> Result<()> {
        self(value)
    }
}

/// Address of the subscriber allocation, used as its identity.
pub(crate) fn identity<S: ?Sized>(subscriber: *const RefCell<S>) -> *const () {
    subscriber.cast::<()>()
}
