//! A single call in the call tree

/// Node identity. Assigned from a monotonically increasing counter and never reused.
pub type NodeId = u64;

/// One recursive call, as shown in the tree pane
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Display text, e.g. `fibonacci(4)`
    pub label: String,
    pub parent: Option<NodeId>,
    /// Children in call order (append-only while the call is open)
    pub children: Vec<NodeId>,
    pub depth: usize,
    /// Set once the call returns; never cleared
    pub done: bool,
    pub x: f64,
    pub y: f64,
    /// Horizontal position the layout is easing toward
    pub target_x: f64,
}

impl Node {
    pub fn new(id: NodeId, label: String, parent: Option<NodeId>, depth: usize) -> Self {
        Node {
            id,
            label,
            parent,
            children: Vec::new(),
            depth,
            done: false,
            x: 0.0,
            y: 0.0,
            target_x: 0.0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
