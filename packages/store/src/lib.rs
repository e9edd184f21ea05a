//! dntree store layer: the owning [`TreeStore`] and snapshot persistence.
//!
//! This crate wraps the `dntree-core` tree engine with durability:
//! - [`TreeStore`]: owns the root node, orchestrates mutations, and
//!   rewrites the whole tree to a snapshot target after every successful
//!   mutation
//! - [`SnapshotReader`] / [`SnapshotWriter`]: the persistence seam
//! - [`JsonSnapshotStore`]: file-backed JSON blob
//! - [`InMemorySnapshotStore`]: ephemeral blob for tests
//!
//! # Example
//!
//! ```rust
//! use dntree_core::Attributes;
//! use dntree_store::{InMemorySnapshotStore, TreeStore};
//!
//! let mut store =
//!     TreeStore::create(InMemorySnapshotStore::new(), Attributes::new(), "o=root").unwrap();
//! store.insert(Attributes::new(), "o=root,m=cotton").unwrap();
//!
//! let node = store.query("o=root,m=cotton").unwrap().unwrap();
//! assert_eq!(node.identifier().to_string(), "o=root,m=cotton");
//! ```

mod in_memory;
mod local_file;
mod snapshot;
mod store;

pub use in_memory::InMemorySnapshotStore;
pub use local_file::JsonSnapshotStore;
pub use snapshot::{PersistenceError, SnapshotReader, SnapshotStore, SnapshotWriter};
pub use store::{StoreError, TreeStore};

// Re-export core types for convenience
pub use dntree_core::{
    Attributes, IdentifierError, NodeIdentifier, NodeSummary, TreeError, TreeNode,
};
