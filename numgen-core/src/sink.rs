// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Observation hooks for hosts that want to record a run.

use crate::Value;

/// Receives every generated value and the end of each run.
///
/// Both hooks default to doing nothing. A sink may query the notifier from
/// inside a hook; the hook is not called again while it is running.
pub trait RoundSink {
    fn value_generated(&mut self, _value: Value) {}

    fn run_finished(&mut self, _rounds: u64) {}
}

/// A sink that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl RoundSink for NoopSink {}
