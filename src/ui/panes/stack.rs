//! Call stack pane: open calls, innermost first

use crate::tree::CallTree;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_stack_pane(frame: &mut Frame, area: Rect, tree: &CallTree, is_active: bool) {
    let depth = tree.stack().len();
    let block = super::pane_block(format!(" Call Stack ({}) ", depth), is_active);

    let visible_height = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = tree
        .stack()
        .iter()
        .rev()
        .filter_map(|id| tree.node(*id))
        .enumerate()
        .take(visible_height)
        .map(|(i, node)| {
            let (marker, style) = if i == 0 {
                (
                    "▶ ",
                    Style::default()
                        .fg(DEFAULT_THEME.function)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(DEFAULT_THEME.muted_function))
            };
            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(node.label.clone(), style),
                Span::styled(
                    format!("  depth {}", node.depth),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no open calls)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
