//! Core dntree: the tree engine.
//!
//! A hierarchical key-value store addressed by ordered `key=value` path
//! identifiers, in the manner of a directory-service distinguished name:
//! - [`NodeIdentifier`]: parsed, ordered key=value path
//! - [`TreeNode`]: the hierarchical entity holding identity, payload, and
//!   exclusively-owned children
//! - [`TreeError`]: tree-operation errors with human-readable messages
//!
//! This layer is pure in-memory structure and traversal; persistence and
//! store orchestration live in `dntree-store`.
//!
//! # Example
//!
//! ```rust
//! use dntree_core::{Attributes, NodeIdentifier, TreeNode};
//!
//! let root_id = NodeIdentifier::parse("o=root").unwrap();
//! let mut root = TreeNode::new(Attributes::new(), root_id);
//!
//! let child_id = NodeIdentifier::parse("o=root,m=cotton").unwrap();
//! root.insert(Attributes::new(), child_id).unwrap();
//!
//! let query = NodeIdentifier::parse("o=root,m=cotton").unwrap();
//! assert!(root.find(&query).is_some());
//! ```

mod error;
mod identifier;
mod node;

pub use error::TreeError;
pub use identifier::{IdentifierError, NodeIdentifier};
pub use node::{Attributes, NodeSummary, TreeNode};
