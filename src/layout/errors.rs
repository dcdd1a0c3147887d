//! Internal layout faults
//!
//! A [`LayoutError`] never leaves the layout engine: it is logged and masked
//! by the fallback placement.

use crate::tree::NodeId;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Nothing to lay out
    EmptyTree,

    /// Viewport dimensions are not finite positive numbers
    InvalidViewport { width: f64, height: f64 },

    /// Margins leave no room for any node
    ViewportTooSmall { width: f64, height: f64, margin: f64 },

    /// A node's depth does not match its ancestry
    InconsistentDepth {
        id: NodeId,
        depth: usize,
        expected: usize,
    },

    /// A parent or child id points at no node
    MissingNode(NodeId),

    /// Computation produced NaN or infinity
    NonFinite { id: NodeId },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::EmptyTree => write!(f, "Call tree is empty"),
            LayoutError::InvalidViewport { width, height } => {
                write!(f, "Invalid viewport {}x{}", width, height)
            }
            LayoutError::ViewportTooSmall {
                width,
                height,
                margin,
            } => write!(
                f,
                "Viewport {}x{} is too small for a margin of {}",
                width, height, margin
            ),
            LayoutError::InconsistentDepth {
                id,
                depth,
                expected,
            } => write!(
                f,
                "Node {} has depth {}, expected {}",
                id, depth, expected
            ),
            LayoutError::MissingNode(id) => write!(f, "Node {} does not exist", id),
            LayoutError::NonFinite { id } => {
                write!(f, "Non-finite position computed for node {}", id)
            }
        }
    }
}

impl std::error::Error for LayoutError {}
