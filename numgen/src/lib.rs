// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! A random number generator that keeps notifying its subscribers until none
//! of them is interested any more.
//!
//! This crate bundles the engine ([`numgen_core`]), the stock subscribers
//! ([`numgen_subscribers`]) and the host side: TOML configuration, a
//! `tracing` sink and a paced run loop.
//!
//! ```rust
//! use numgen::{Notifier, RandomSource, RangeSubscriber, StatisticsSubscriber};
//!
//! let notifier = Notifier::new(RandomSource::with_seed(1, 1000, 42).unwrap());
//! let stats = StatisticsSubscriber::attach_to(&notifier, 20).unwrap();
//! let range = RangeSubscriber::attach_to(&notifier, 1..=500, 3).unwrap();
//!
//! let rounds = notifier.run().unwrap();
//!
//! assert!(rounds >= 20);
//! assert_eq!(stats.borrow().count(), 20);
//! assert_eq!(range.borrow().hits_in_range(), 3);
//! ```

pub mod config;
pub mod log_sink;
pub mod session;

pub use config::{GeneratorConfig, NumGenConfig, RangeConfig, SubscribersConfig};
pub use log_sink::LogSink;
pub use session::{run_paced, Session};

pub use numgen_core::{
    bind, Detacher, NoopSink, Notifier, RandomSource, RoundSink, Subscriber, SubscriberRef,
    Value, ValueSource, WeakNotifier,
};
pub use numgen_error::{NumGenError, Result};
pub use numgen_subscribers::{RangeSubscriber, StatisticsSubscriber, Threshold, ThresholdSubscriber};
