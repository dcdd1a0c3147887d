//! Message pane: the latest event, the last result and any disk move

use crate::simulation::{Keyword, Motion};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_message_pane(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    keyword: Option<Keyword>,
    result_line: Option<&str>,
    motion: Option<&Motion>,
) {
    let block = super::pane_block(" Message ".to_string(), false);
    let mut lines = Vec::new();

    let mut first = Vec::new();
    if let Some(keyword) = keyword {
        first.push(Span::styled(
            format!("[{}] ", keyword),
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD),
        ));
    }
    first.push(Span::styled(
        message.to_string(),
        Style::default().fg(DEFAULT_THEME.fg),
    ));
    lines.push(Line::from(first));

    if let Some(result) = result_line {
        let color = if result.contains("error:") {
            DEFAULT_THEME.error
        } else {
            DEFAULT_THEME.return_value
        };
        lines.push(Line::from(vec![
            Span::styled("result ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(result.to_string(), Style::default().fg(color)),
        ]));
    }

    if let Some(Motion::Disk { disk, from, to }) = motion {
        lines.push(Line::from(Span::styled(
            format!("disk {}: {} → {}", disk, from, to),
            Style::default().fg(DEFAULT_THEME.secondary),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
