// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use numgen_core::{RoundSink, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Captures generated values and finished runs; clones share the capture.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    values: Rc<RefCell<Vec<Value>>>,
    runs: Rc<RefCell<Vec<u64>>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.values.borrow().clone()
    }

    /// Round counts of every run that finished, oldest first.
    #[must_use]
    pub fn runs(&self) -> Vec<u64> {
        self.runs.borrow().clone()
    }
}

impl RoundSink for CollectingSink {
    fn value_generated(&mut self, value: Value) {
        self.values.borrow_mut().push(value);
    }

    fn run_finished(&mut self, rounds: u64) {
        self.runs.borrow_mut().push(rounds);
    }
}
