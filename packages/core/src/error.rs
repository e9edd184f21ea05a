//! Error types for tree operations.

use crate::identifier::IdentifierError;

/// Errors produced by tree operations.
///
/// Every variant renders as a human-readable message; callers relaying
/// results to an external adapter surface that message unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Identifier or query text failed to parse.
    Identifier(IdentifierError),

    /// Candidate identifier's first key does not match the tree's root key.
    InvalidIdentifier { expected: String, found: String },

    /// The ancestor path of an inserted identifier resolves to no node.
    ParentNotFound { identifier: String },

    /// A node with this identifier already exists somewhere in the tree.
    DuplicateIdentifier { identifier: String },

    /// No node matched the query.
    NotFound { query: String },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::Identifier(e) => write!(f, "identifier error: {}", e),
            TreeError::InvalidIdentifier { expected, found } => {
                write!(
                    f,
                    "invalid new node identifier: expected first key '{}', found '{}'",
                    expected, found
                )
            }
            TreeError::ParentNotFound { identifier } => {
                write!(f, "parent node not found for '{}'", identifier)
            }
            TreeError::DuplicateIdentifier { identifier } => {
                write!(f, "a node with identifier '{}' already exists", identifier)
            }
            TreeError::NotFound { query } => {
                write!(f, "no node matched '{}'", query)
            }
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Identifier(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IdentifierError> for TreeError {
    fn from(e: IdentifierError) -> Self {
        TreeError::Identifier(e)
    }
}
