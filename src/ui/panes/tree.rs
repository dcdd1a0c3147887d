//! Call tree pane
//!
//! Layout positions live in a virtual coordinate space sized from the pane
//! (see [`virtual_viewport`]). The canvas y axis grows upward, so rows are
//! flipped when drawing.

use crate::tree::CallTree;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle, Line as Edge},
    Frame,
};

/// Virtual units per terminal column
const UNITS_PER_COLUMN: f64 = 10.0;
/// Virtual units per terminal row (cells are roughly twice as tall as wide)
const UNITS_PER_ROW: f64 = 20.0;

/// Layout viewport for the inside of a bordered pane
pub fn virtual_viewport(area: Rect) -> (f64, f64) {
    let cols = area.width.saturating_sub(2) as f64;
    let rows = area.height.saturating_sub(2) as f64;
    (cols * UNITS_PER_COLUMN, rows * UNITS_PER_ROW)
}

fn node_color(tree: &CallTree, id: u64, done: bool) -> Color {
    if tree.stack().last() == Some(&id) {
        DEFAULT_THEME.function
    } else if done {
        DEFAULT_THEME.success
    } else {
        DEFAULT_THEME.secondary
    }
}

pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    tree: &CallTree,
    title: &str,
    node_radius: f64,
    is_active: bool,
) {
    let (width, height) = virtual_viewport(area);
    let block = super::pane_block(format!(" {} ({} calls) ", title, tree.len()), is_active);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width.max(1.0)])
        .y_bounds([0.0, height.max(1.0)])
        .paint(|ctx| {
            for (pid, cid) in tree.edges() {
                if let (Some(p), Some(c)) = (tree.node(pid), tree.node(cid)) {
                    ctx.draw(&Edge {
                        x1: p.x,
                        y1: height - p.y,
                        x2: c.x,
                        y2: height - c.y,
                        color: DEFAULT_THEME.edge,
                    });
                }
            }
            ctx.layer();

            for node in tree.nodes() {
                ctx.draw(&Circle {
                    x: node.x,
                    y: height - node.y,
                    radius: node_radius,
                    color: node_color(tree, node.id, node.done),
                });
            }
            ctx.layer();

            for node in tree.nodes() {
                let half = node.label.chars().count() as f64 * UNITS_PER_COLUMN / 2.0;
                let style = Style::default().fg(if node.done {
                    DEFAULT_THEME.comment
                } else {
                    DEFAULT_THEME.fg
                });
                ctx.print(
                    (node.x - half).max(0.0),
                    height - node.y,
                    Line::from(Span::styled(node.label.clone(), style)),
                );
            }
        });

    frame.render_widget(canvas, area);
}
