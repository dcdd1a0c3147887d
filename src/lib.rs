//! # Introduction
//!
//! Recurtty traces recursive algorithms call by call and animates the
//! resulting call tree in the terminal. Each algorithm produces a stream of
//! events; a driver applies them to a call tree one at a time, and a layout
//! engine eases the tree's nodes toward their slots at a fixed frame rate.
//!
//! ## Pipeline
//!
//! ```text
//! Algorithm → StepEmitter → Simulation → CallTree → LayoutEngine → TUI
//! ```
//!
//! 1. [`simulation`]: the traced algorithms, the single-pass
//!    [`simulation::StepEmitter`] and the [`simulation::Simulation`] driver.
//! 2. [`tree`]: the [`tree::CallTree`] with its open-call stack and dirty set.
//! 3. [`layout`]: the rate-gated [`layout::LayoutEngine`] with its position
//!    cache and fallback placement.
//! 4. [`logging`]: the injected [`logging::Logger`] collaborator and the
//!    file-backed `tracing` subscriber.
//! 5. [`config`]: [`config::Settings`] and command-line parsing.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Algorithms
//!
//! Fibonacci, Towers of Hanoi, running sum and product, factorial, binomial
//! coefficient, GCD, fast power, permutations and combinations.

pub mod config;
pub mod layout;
pub mod logging;
pub mod simulation;
pub mod tree;
pub mod ui;
