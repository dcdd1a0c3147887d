//! Events emitted while tracing a recursive algorithm

use std::fmt;

/// Discriminant of a [`Step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Push,
    Highlight,
    Animate,
    Result,
    Pop,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Push => "push",
            StepKind::Highlight => "highlight",
            StepKind::Animate => "animate",
            StepKind::Result => "result",
            StepKind::Pop => "pop",
        };
        f.write_str(name)
    }
}

/// Checkpoint category carried by a highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    BaseCase,
    RecursiveCall,
    Return,
    DiskMove,
}

impl Keyword {
    /// Text used in messages and to locate the matching line of pseudo-code
    pub fn label(self) -> &'static str {
        match self {
            Keyword::BaseCase => "base case",
            Keyword::RecursiveCall => "recursive call",
            Keyword::Return => "return",
            Keyword::DiskMove => "move disk",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Domain-specific side effect worth animating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Motion {
    /// Towers of Hanoi: `disk` moves from peg `from` to peg `to`
    Disk { disk: u32, from: char, to: char },
}

/// Value (or error sentinel) produced by a call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Int(i64),
    Text(String),
    Sequence(Vec<i64>),
    Sequences(Vec<Vec<i64>>),
    Error(String),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[i64]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Int(v) => write!(f, "{}", v),
            Outcome::Text(s) => f.write_str(s),
            Outcome::Sequence(items) => write_list(f, items),
            Outcome::Sequences(lists) => {
                write!(f, "[")?;
                for (i, items) in lists.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_list(f, items)?;
                }
                write!(f, "]")
            }
            Outcome::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// One event of a call trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A call begins
    Push { function: String },
    /// Informational checkpoint inside a call
    Highlight { keyword: Keyword, message: String },
    /// Side effect with a domain payload
    Animate { message: String, motion: Motion },
    /// The enclosing call's value, emitted once per call
    Result { function: String, result: Outcome },
    /// The call ends
    Pop { function: String },
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Push { .. } => StepKind::Push,
            Step::Highlight { .. } => StepKind::Highlight,
            Step::Animate { .. } => StepKind::Animate,
            Step::Result { .. } => StepKind::Result,
            Step::Pop { .. } => StepKind::Pop,
        }
    }

    /// Call label for push, result and pop events
    pub fn function(&self) -> Option<&str> {
        match self {
            Step::Push { function } | Step::Result { function, .. } | Step::Pop { function } => {
                Some(function)
            }
            _ => None,
        }
    }

    /// Display message for highlight and animate events
    pub fn message(&self) -> Option<&str> {
        match self {
            Step::Highlight { message, .. } | Step::Animate { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Int(-3).to_string(), "-3");
        assert_eq!(Outcome::Sequence(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(
            Outcome::Sequences(vec![vec![1, 2], vec![2, 1]]).to_string(),
            "[[1, 2], [2, 1]]"
        );
        assert_eq!(Outcome::Sequences(vec![]).to_string(), "[]");
        assert_eq!(
            Outcome::Error("negative input".into()).to_string(),
            "error: negative input"
        );
    }

    #[test]
    fn test_step_accessors() {
        let push = Step::Push {
            function: "f(1)".into(),
        };
        assert_eq!(push.kind(), StepKind::Push);
        assert_eq!(push.function(), Some("f(1)"));
        assert_eq!(push.message(), None);

        let highlight = Step::Highlight {
            keyword: Keyword::BaseCase,
            message: "checking n=1".into(),
        };
        assert_eq!(highlight.function(), None);
        assert_eq!(highlight.message(), Some("checking n=1"));
    }
}
