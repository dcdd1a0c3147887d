//! Recursion tracing and playback
//!
//! - [`step`]: The event vocabulary ([`Step`], [`Keyword`], [`Outcome`])
//! - [`emitter`]: [`Recorder`] and the single-pass [`StepEmitter`]
//! - [`algorithms`]: The traced algorithms and the [`Algorithm`] catalog
//! - [`driver`]: [`Simulation`], which feeds events into a [`CallTree`](crate::tree::CallTree)
//! - [`errors`]: [`SimulationError`]
//!
//! # Trace shape
//!
//! For every call the trace contains exactly one `push`, then any number of
//! `highlight`/`animate` events and nested calls, then exactly one `result`
//! and one `pop`. Pushes and pops therefore nest like parentheses.

pub mod algorithms;
pub mod driver;
pub mod emitter;
pub mod errors;
pub mod step;

pub use algorithms::Algorithm;
pub use driver::{Simulation, Tick};
pub use emitter::{Recorder, StepEmitter};
pub use errors::SimulationError;
pub use step::{Keyword, Motion, Outcome, Step, StepKind};
