//! Driver loop: applies one trace event per tick to the call tree

use super::algorithms::Algorithm;
use super::emitter::StepEmitter;
use super::errors::SimulationError;
use super::step::{Keyword, Motion, Step, StepKind};
use crate::logging::Logger;
use crate::tree::CallTree;
use std::rc::Rc;

/// Result of a successful [`Simulation::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Applied(StepKind),
    /// The trace ran out on this tick
    Finished,
}

/// One run of an algorithm: its emitter, the tree built so far, and the
/// text the UI shows for the latest event
pub struct Simulation {
    algorithm: Algorithm,
    n: i64,
    emitter: StepEmitter,
    tree: CallTree,
    message: String,
    keyword: Option<Keyword>,
    result_line: Option<String>,
    last_motion: Option<Motion>,
    steps_applied: usize,
    finished: bool,
    logger: Rc<dyn Logger>,
}

impl Simulation {
    pub fn new(algorithm: Algorithm, n: i64, logger: Rc<dyn Logger>) -> Self {
        logger.info(&format!("starting {}({})", algorithm, n));
        Simulation {
            algorithm,
            n,
            emitter: algorithm.emitter(n),
            tree: CallTree::new(),
            message: String::new(),
            keyword: None,
            result_line: None,
            last_motion: None,
            steps_applied: 0,
            finished: false,
            logger,
        }
    }

    /// Pull and apply exactly one event
    pub fn tick(&mut self) -> Result<Tick, SimulationError> {
        if self.finished {
            return Err(SimulationError::Exhausted);
        }

        let Some(step) = self.emitter.next() else {
            self.finished = true;
            self.keyword = None;
            self.logger.info(&format!(
                "{}({}) finished after {} steps",
                self.algorithm, self.n, self.steps_applied
            ));
            return Ok(Tick::Finished);
        };

        let kind = step.kind();
        self.apply(step)?;
        self.steps_applied += 1;
        Ok(Tick::Applied(kind))
    }

    fn apply(&mut self, step: Step) -> Result<(), SimulationError> {
        match step {
            Step::Push { function } => {
                self.logger.debug(&format!("push {}", function));
                self.message = format!("Calling {}", function);
                self.keyword = None;
                self.tree.push(function);
            }
            Step::Highlight { keyword, message } => {
                self.keyword = Some(keyword);
                self.message = message;
            }
            Step::Animate { message, motion } => {
                self.keyword = None;
                self.message = message;
                self.last_motion = Some(motion);
            }
            Step::Result { function, result } => {
                if result.is_error() {
                    self.logger.warning(&format!("{} -> {}", function, result));
                }
                let line = format!("{} = {}", function, result);
                self.message = line.clone();
                self.result_line = Some(line);
            }
            Step::Pop { function } => {
                let Some(top) = self.tree.top() else {
                    self.logger
                        .warning(&format!("pop of {} with no open call", function));
                    return Ok(());
                };
                if top.label != function {
                    return Err(SimulationError::LabelMismatch {
                        expected: top.label.clone(),
                        found: function,
                    });
                }
                self.logger.debug(&format!("pop {}", function));
                self.keyword = None;
                self.tree.pop();
            }
        }
        Ok(())
    }

    /// Apply every remaining event and return how many were applied.
    ///
    /// Returns [`SimulationError::Exhausted`] if the run had already finished.
    pub fn run_to_end(&mut self) -> Result<usize, SimulationError> {
        if self.finished {
            return Err(SimulationError::Exhausted);
        }
        let before = self.steps_applied;
        while !self.finished {
            self.tick()?;
        }
        Ok(self.steps_applied - before)
    }

    /// Start over with a fresh emitter and an empty tree
    pub fn reset(&mut self, algorithm: Algorithm, n: i64) {
        *self = Simulation::new(algorithm, n, Rc::clone(&self.logger));
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn n(&self) -> i64 {
        self.n
    }

    pub fn tree(&self) -> &CallTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut CallTree {
        &mut self.tree
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Keyword of the latest highlight, cleared by any other event
    pub fn keyword(&self) -> Option<Keyword> {
        self.keyword
    }

    pub fn result_line(&self) -> Option<&str> {
        self.result_line.as_deref()
    }

    pub fn last_motion(&self) -> Option<&Motion> {
        self.last_motion.as_ref()
    }

    pub fn steps_applied(&self) -> usize {
        self.steps_applied
    }

    pub fn steps_total(&self) -> usize {
        self.emitter.total()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
