//! Status bar rendering with keybindings and playback indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// Playback state shown on the left of the status bar
pub struct StatusInfo<'a> {
    pub message: &'a str,
    pub algorithm: &'a str,
    pub n: i64,
    pub steps_applied: usize,
    pub steps_total: usize,
    pub step_interval: Duration,
    pub is_playing: bool,
    pub is_finished: bool,
    pub has_error: bool,
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let bar_style = Style::default().bg(DEFAULT_THEME.current_line_bg);

    let left_spans = vec![
        Span::styled(
            format!(" Step {}/{} ", info.steps_applied, info.steps_total),
            Style::default()
                .bg(if info.has_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}({}) ", info.algorithm, info.n),
            bar_style.fg(DEFAULT_THEME.function),
        ),
        Span::styled(
            format!("{} ms ", info.step_interval.as_millis()),
            bar_style.fg(DEFAULT_THEME.comment),
        ),
        Span::styled(" | ", bar_style.fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!(" {} ", info.message),
            bar_style.fg(if info.has_error {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            }),
        ),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(bar_style)
            .alignment(Alignment::Left),
        layout[0],
    );

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_style.fg(DEFAULT_THEME.fg);
    let sep_style = bar_style.fg(DEFAULT_THEME.comment);

    let hints = [
        (" ⎵ ", " play "),
        (" → ", " step "),
        (" ↵ ", " end "),
        (" r ", " reset "),
        (" ⇥ ", " algorithm "),
        (" ↑/↓ ", " n "),
        (" +/- ", " speed "),
        ("q", " quit "),
    ];
    let mut right_spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    let badge = if info.is_playing {
        Some((" ▶ PLAYING ", DEFAULT_THEME.secondary))
    } else if info.is_finished {
        Some((" END ", DEFAULT_THEME.error))
    } else if info.steps_applied == 0 {
        Some((" START ", DEFAULT_THEME.success))
    } else {
        None
    };
    if let Some((text, color)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(bar_style)
            .alignment(Alignment::Right),
        layout[1],
    );
}
