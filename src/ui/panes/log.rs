//! Log pane backed by the in-memory log history

use crate::logging::LogRecord;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::Level;

fn level_color(level: Level) -> ratatui::style::Color {
    match level {
        Level::ERROR => DEFAULT_THEME.error,
        Level::WARN => DEFAULT_THEME.secondary,
        Level::INFO => DEFAULT_THEME.fg,
        _ => DEFAULT_THEME.comment,
    }
}

/// Render the newest records that fit, `scroll` lines back from the end
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    records: &[LogRecord],
    scroll: &mut usize,
    is_active: bool,
) {
    let block = super::pane_block(format!(" Log ({}) ", records.len()), is_active);
    let visible_height = area.height.saturating_sub(2) as usize;

    let max_scroll = records.len().saturating_sub(visible_height);
    *scroll = (*scroll).min(max_scroll);
    let end = records.len() - *scroll;
    let start = end.saturating_sub(visible_height);

    let lines: Vec<Line> = records[start..end]
        .iter()
        .map(|record| {
            Line::from(Span::styled(
                record.to_line(),
                Style::default().fg(level_color(record.level)),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
