// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use numgen_core::{Value, ValueSource};
use std::cell::Cell;
use std::rc::Rc;

/// Replays a fixed script of values, starting over once exhausted.
///
/// Clones share the draw counter, so a test can keep one clone to inspect how
/// many values the notifier actually drew.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Rc<[Value]>,
    drawn: Rc<Cell<usize>>,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// Panics if `script` is empty.
    pub fn new(script: impl IntoIterator<Item = Value>) -> Self {
        let script: Rc<[Value]> = script.into_iter().collect();
        assert!(!script.is_empty(), "a scripted source needs at least one value");
        Self {
            script,
            drawn: Rc::new(Cell::new(0)),
        }
    }

    /// Number of values drawn so far, across all clones.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn.get()
    }
}

impl ValueSource for ScriptedSource {
    fn next_value(&mut self) -> Value {
        let drawn = self.drawn.get();
        self.drawn.set(drawn + 1);
        self.script[drawn % self.script.len()]
    }
}
