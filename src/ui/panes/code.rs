//! Pseudo-code pane
//!
//! Lines whose comment names the most recent highlight keyword get the
//! current-line background.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split a pseudo-code line into code and `#` comment spans
fn highlight_code_line(line: &str) -> Line<'_> {
    let (code, comment) = match line.find('#') {
        Some(pos) => line.split_at(pos),
        None => (line, ""),
    };

    let mut spans = Vec::new();
    let mut word_start = None;
    for (i, c) in code.char_indices() {
        let is_word = c.is_alphanumeric() || c == '_';
        match (is_word, word_start) {
            (true, None) => word_start = Some(i),
            (false, Some(start)) => {
                spans.push(styled_word(&code[start..i]));
                word_start = None;
                spans.push(Span::raw(&code[i..i + c.len_utf8()]));
            }
            (false, None) => spans.push(Span::raw(&code[i..i + c.len_utf8()])),
            (true, Some(_)) => {}
        }
    }
    if let Some(start) = word_start {
        spans.push(styled_word(&code[start..]));
    }
    if !comment.is_empty() {
        spans.push(Span::styled(
            comment,
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }
    Line::from(spans)
}

fn styled_word(word: &str) -> Span<'_> {
    let style = match word {
        "def" | "if" | "else" | "for" | "in" | "return" | "not" | "and" | "or" => {
            Style::default().fg(DEFAULT_THEME.keyword)
        }
        _ if word.chars().all(|c| c.is_ascii_digit()) => Style::default().fg(DEFAULT_THEME.number),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    };
    Span::styled(word, style)
}

pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    highlighted: &[usize],
    is_active: bool,
) {
    let block = super::pane_block(" Code ".to_string(), is_active);

    let lines: Vec<Line> = source
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let is_current = highlighted.contains(&idx);
            let (num_style, content_style) = if is_current {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().bg(DEFAULT_THEME.current_line_bg),
                )
            } else {
                (Style::default().fg(DEFAULT_THEME.comment), Style::default())
            };

            let mut content = highlight_code_line(line);
            if is_current {
                for span in &mut content.spans {
                    span.style = span.style.patch(content_style);
                }
            }

            let mut spans = vec![Span::styled(format!("{:3} ", idx + 1), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
