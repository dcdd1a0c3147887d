//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tree`]: The call tree drawn on a braille canvas at its laid-out positions
//! - [`code`]: Algorithm pseudo-code with the current keyword's lines highlighted
//! - [`stack`]: Open calls, innermost first
//! - [`message`]: Latest event message, last result and disk move
//! - [`log`]: In-memory log history
//! - [`status`]: Status bar with keybindings and playback state
//!
//! Each pane module exports a primary `render_*` function. Panes never mutate
//! the simulation; the layout pass runs in [`App`](super::App) before drawing.

pub mod code;
pub mod log;
pub mod message;
pub mod stack;
pub mod status;
pub mod tree;

pub use code::render_code_pane;
pub use log::render_log_pane;
pub use message::render_message_pane;
pub use stack::render_stack_pane;
pub use status::{render_status_bar, StatusInfo};
pub use tree::{render_tree_pane, virtual_viewport};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block shared by every pane
fn pane_block(title: String, is_active: bool) -> Block<'static> {
    let border_style = if is_active {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}
