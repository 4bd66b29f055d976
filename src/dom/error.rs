use thiserror::Error;

/// Faults raised by a DOM backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0} does not exist")]
    InvalidNode(usize),

    #[error("node {0} is not an element")]
    NotAnElement(usize),

    #[error("appending node {child} to {parent} would create a cycle")]
    Cycle { parent: usize, child: usize },

    #[error("node {child} is not a direct child of {parent}")]
    NotAChild { parent: usize, child: usize },

    /// Exception thrown by the browser DOM.
    #[error("script error: {0}")]
    Script(String),
}
