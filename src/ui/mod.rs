//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, the playback timer and keyboard handling
//! - **[`panes`]**: stateless render functions for each visible pane (call tree,
//!   pseudo-code, call stack, message, log, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an [`Algorithm`],
//! an input and [`Settings`], then call [`App::run`] to start the event loop.
//!
//! [`Algorithm`]: crate::simulation::Algorithm
//! [`Settings`]: crate::config::Settings
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
