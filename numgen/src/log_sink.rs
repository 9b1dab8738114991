// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use numgen_core::{RoundSink, Value};

/// Reports every generated value and the end of each run through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl RoundSink for LogSink {
    fn value_generated(&mut self, value: Value) {
        tracing::info!(value, "number generated");
    }

    fn run_finished(&mut self, rounds: u64) {
        tracing::info!(rounds, "no subscriber left, generation stopped");
    }
}
