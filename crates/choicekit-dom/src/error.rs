//! Error types for the element tree.

/// Result type alias for element tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating or querying the element tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The node ID is invalid or the node has been destroyed.
    #[error("Invalid or destroyed node ID")]
    InvalidNode,

    /// Attempted to insert a node into itself or one of its descendants.
    #[error("Cannot insert a node into itself or one of its descendants")]
    CircularParentage,

    /// The reference node is not a child of the given parent.
    #[error("The node is not a child of the given parent")]
    NotAChild,

    /// Selector parsing error.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}
