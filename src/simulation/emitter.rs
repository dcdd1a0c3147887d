//! Trace recording and the single-pass step emitter
//!
//! Algorithms run to completion against a [`Recorder`], which materializes
//! the whole trace up front. The resulting [`StepEmitter`] hands the events
//! out one at a time and cannot be rewound; a new run needs a new emitter.

use super::step::{Keyword, Motion, Outcome, Step};
use std::iter::FusedIterator;
use std::vec;

/// Collects the events of one trace in emission order
#[derive(Debug, Default)]
pub struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, function: &str) {
        self.steps.push(Step::Push {
            function: function.to_string(),
        });
    }

    pub fn highlight(&mut self, keyword: Keyword, message: impl Into<String>) {
        self.steps.push(Step::Highlight {
            keyword,
            message: message.into(),
        });
    }

    pub fn animate(&mut self, message: impl Into<String>, motion: Motion) {
        self.steps.push(Step::Animate {
            message: message.into(),
            motion,
        });
    }

    pub fn result(&mut self, function: &str, result: Outcome) {
        self.steps.push(Step::Result {
            function: function.to_string(),
            result,
        });
    }

    pub fn pop(&mut self, function: &str) {
        self.steps.push(Step::Pop {
            function: function.to_string(),
        });
    }

    /// Emit the call's result and close it
    pub fn finish_call(&mut self, function: &str, result: Outcome) {
        self.result(function, result);
        self.pop(function);
    }

    /// Close a call with an error result
    pub fn reject(&mut self, function: &str, reason: impl Into<String>) {
        self.finish_call(function, Outcome::Error(reason.into()));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self) -> StepEmitter {
        StepEmitter {
            total: self.steps.len(),
            steps: self.steps.into_iter(),
        }
    }
}

/// Lazy view over a recorded trace; `None` means the trace is exhausted
#[derive(Debug)]
pub struct StepEmitter {
    steps: vec::IntoIter<Step>,
    total: usize,
}

impl StepEmitter {
    /// Events not yet handed out
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Events handed out so far
    pub fn emitted(&self) -> usize {
        self.total - self.steps.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for StepEmitter {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.steps.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for StepEmitter {}

impl FusedIterator for StepEmitter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_is_single_pass() {
        let mut rec = Recorder::new();
        rec.push("f(0)");
        rec.finish_call("f(0)", Outcome::Int(0));
        let mut emitter = rec.finish();

        assert_eq!(emitter.total(), 3);
        assert!(matches!(emitter.next(), Some(Step::Push { .. })));
        assert_eq!(emitter.emitted(), 1);
        assert_eq!(emitter.remaining(), 2);
        assert_eq!(emitter.by_ref().count(), 2);
        assert_eq!(emitter.next(), None);
        assert_eq!(emitter.next(), None);
    }

    #[test]
    fn test_reject_emits_error_result_then_pop() {
        let mut rec = Recorder::new();
        rec.push("f(-1)");
        rec.reject("f(-1)", "negative input");
        let steps: Vec<Step> = rec.finish().collect();
        assert_eq!(
            steps[1],
            Step::Result {
                function: "f(-1)".into(),
                result: Outcome::Error("negative input".into()),
            }
        );
        assert_eq!(
            steps[2],
            Step::Pop {
                function: "f(-1)".into()
            }
        );
    }
}
