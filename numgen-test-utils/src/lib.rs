// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the numgen workspace.
//!
//! This crate is for development and testing only.
//!
//! # Key Types
//!
//! - [`ScriptedSource`] - replays a fixed list of values instead of drawing random ones
//! - [`RecordingSubscriber`] - records every delivery and detaches on request
//! - [`CollectingSink`] - captures everything a notifier reports to its sink
//!
//! # Examples
//!
//! ```rust
//! use numgen_core::Notifier;
//! use numgen_test_utils::{RecordingSubscriber, ScriptedSource};
//!
//! let notifier = Notifier::new(ScriptedSource::new([3, 1, 4]));
//! let recorder = RecordingSubscriber::attach_to(&notifier, 3).unwrap();
//!
//! assert_eq!(notifier.run().unwrap(), 3);
//! assert_eq!(recorder.borrow().values(), &[3, 1, 4]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod recording;
pub mod scripted;
pub mod sink;

pub use recording::RecordingSubscriber;
pub use scripted::ScriptedSource;
pub use sink::CollectingSink;
