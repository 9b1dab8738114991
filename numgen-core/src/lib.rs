// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core of the numgen publish/notify engine.
//!
//! - [`Subscriber`]: the capability of receiving one value per round.
//! - [`Notifier`]: the ordered registry plus the generate/notify loop.
//! - [`Detacher`]: lets a subscriber remove itself from inside its handler.
//! - [`ValueSource`] / [`RandomSource`]: where round values come from.
//! - [`RoundSink`]: optional observation of generated values.

mod logging;

pub mod detacher;
pub mod notifier;
pub mod sink;
pub mod source;
pub mod subscriber;

pub use self::detacher::{bind, Detacher};
pub use self::notifier::{Notifier, WeakNotifier};
pub use self::sink::{NoopSink, RoundSink};
pub use self::source::{RandomSource, ValueSource};
pub use self::subscriber::{Subscriber, SubscriberRef, Value};
pub use numgen_error::{NumGenError, Result};
