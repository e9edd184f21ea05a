//! The owning tree store: mutation orchestration and snapshot persistence.

use dntree_core::{Attributes, NodeIdentifier, NodeSummary, TreeError, TreeNode};
use serde_json::Value as JsonValue;

use crate::snapshot::{PersistenceError, SnapshotStore};

/// Errors surfaced by [`TreeStore`] operations.
///
/// Business errors from the in-memory tree step pass through unchanged in
/// [`StoreError::Tree`]; snapshot failures are a separate variant so a
/// caller can tell "your request was wrong" from "your data did not make
/// it to disk".
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("snapshot target holds no tree and no root identifier was supplied")]
    NotFound,

    #[error("{0}")]
    Persistence(#[from] PersistenceError),
}

/// The owning handle over one tree and one snapshot target.
///
/// All mutating operations delegate to the root [`TreeNode`] and, on
/// success, synchronously rewrite the whole tree to the snapshot target
/// before returning. Reads never touch the target.
///
/// Exactly one `TreeStore` may operate on a given target at a time; there
/// is no coordination protocol for multiple writers. Mutation goes through
/// `&mut self`, so a single store instance cannot be mutated concurrently.
///
/// # Example
///
/// ```rust
/// use dntree_core::Attributes;
/// use dntree_store::{InMemorySnapshotStore, TreeStore};
///
/// let snapshots = InMemorySnapshotStore::new();
/// let mut store = TreeStore::create(snapshots, Attributes::new(), "o=root").unwrap();
///
/// store.insert(Attributes::new(), "o=root,m=cotton").unwrap();
/// assert!(store.query("o=root,m=cotton").unwrap().is_some());
/// ```
pub struct TreeStore<S> {
    root: TreeNode,
    snapshots: S,
}

impl<S: SnapshotStore> TreeStore<S> {
    /// Build a fresh store with a single root node and persist it
    /// immediately.
    pub fn create(
        mut snapshots: S,
        attributes: Attributes,
        identifier_text: &str,
    ) -> Result<Self, StoreError> {
        let identifier = NodeIdentifier::parse(identifier_text).map_err(TreeError::from)?;
        let root = TreeNode::new(attributes, identifier);
        snapshots.write(&root)?;
        Ok(TreeStore { root, snapshots })
    }

    /// Restore a store from the snapshot target.
    ///
    /// If the target holds no data and `root_identifier` is supplied, a
    /// fresh root with an empty payload is created and persisted instead.
    /// With no data and no identifier, fails with [`StoreError::NotFound`].
    pub fn load(mut snapshots: S, root_identifier: Option<&str>) -> Result<Self, StoreError> {
        if let Some(root) = snapshots.read::<TreeNode>()? {
            return Ok(TreeStore { root, snapshots });
        }
        match root_identifier {
            Some(identifier_text) => Self::create(snapshots, Attributes::new(), identifier_text),
            None => Err(StoreError::NotFound),
        }
    }

    /// Insert a new node, then persist the whole tree.
    pub fn insert(
        &mut self,
        attributes: Attributes,
        identifier_text: &str,
    ) -> Result<(), StoreError> {
        let identifier = NodeIdentifier::parse(identifier_text).map_err(TreeError::from)?;
        self.root.insert(attributes, identifier)?;
        self.persist()
    }

    /// Replace a node's payload, then persist the whole tree.
    pub fn update(&mut self, query_text: &str, attributes: Attributes) -> Result<(), StoreError> {
        let query = NodeIdentifier::parse(query_text).map_err(TreeError::from)?;
        self.root.update(&query, attributes)?;
        self.persist()
    }

    /// Delete a node and its subtree, then persist the whole tree.
    pub fn delete(&mut self, query_text: &str) -> Result<(), StoreError> {
        let query = NodeIdentifier::parse(query_text).map_err(TreeError::from)?;
        self.root.delete(&query)?;
        self.persist()
    }

    /// Find the first node matching the query. Read-only, never persists.
    pub fn query(&self, query_text: &str) -> Result<Option<&TreeNode>, TreeError> {
        let query = NodeIdentifier::parse(query_text)?;
        Ok(self.root.find(&query))
    }

    /// Summaries of every node in the tree, in pre-order.
    pub fn all_children(&self) -> Vec<NodeSummary> {
        self.root.flatten()
    }

    /// The nested structural export of the whole tree.
    pub fn structure(&self) -> JsonValue {
        self.root.export_structure()
    }

    /// Box-drawing outline of the whole tree, full identifiers.
    pub fn render_tree(&self) -> String {
        self.root.render_tree()
    }

    /// Box-drawing outline, current-level pairs below the root.
    pub fn render_tree_compact(&self) -> String {
        self.root.render_tree_compact()
    }

    /// The root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.snapshots.write(&self.root)?;
        Ok(())
    }
}
