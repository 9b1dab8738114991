// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Subscribers that decide for themselves when they have seen enough.
//!
//! Every subscriber here is built unattached with `new` and attached with
//! [`Notifier::attach`](numgen_core::Notifier::attach), or built and attached
//! in one go with `attach_to`. Each one composes a [`Threshold`] with a
//! [`Detacher`](numgen_core::Detacher) and leaves the registry from inside its
//! own handler once the threshold is met. Accumulated state stays readable
//! after detachment.
//!
//! | Subscriber              | Leaves after                          |
//! |-------------------------|---------------------------------------|
//! | [`ThresholdSubscriber`] | `wait_for_count` received values      |
//! | [`RangeSubscriber`]     | `hits_to_wait_for` values in its range |
//! | [`StatisticsSubscriber`]| `wait_for_count` received values      |

mod logging;

pub mod range;
pub mod statistics;
pub mod threshold;

pub use self::range::RangeSubscriber;
pub use self::statistics::StatisticsSubscriber;
pub use self::threshold::{Threshold, ThresholdSubscriber};
