//! The tree node: hierarchy, traversal, mutation, and structural export.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::TreeError;
use crate::identifier::NodeIdentifier;

/// Attribute payload carried by every node.
///
/// An arbitrary string-keyed mapping; the tree does not validate its shape.
pub type Attributes = serde_json::Map<String, JsonValue>;

/// Flat per-node summary: identity, payload, and rendered identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub id: Uuid,
    pub attributes: Attributes,
    pub identifier: NodeIdentifier,
}

/// A node in the tree.
///
/// Each node owns its children by value, so the structure is a strict tree:
/// no cross-links, no cycles, and dropping a node drops its whole subtree.
/// The identity is generated at construction and never changes; the
/// attribute payload is replaceable wholesale via [`TreeNode::update`].
///
/// Identifier uniqueness across the tree is enforced when inserting, by
/// scanning the full subtree below the insertion root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    id: Uuid,
    attributes: Attributes,
    children: Vec<TreeNode>,
    identifier: NodeIdentifier,
}

impl TreeNode {
    /// Create a detached node with a fresh identity and no children.
    pub fn new(attributes: Attributes, identifier: NodeIdentifier) -> Self {
        TreeNode {
            id: Uuid::new_v4(),
            attributes,
            children: Vec::new(),
            identifier,
        }
    }

    /// Process-unique identity, fixed at construction.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The node's attribute payload.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The node's full identifier.
    pub fn identifier(&self) -> &NodeIdentifier {
        &self.identifier
    }

    /// Direct children, in insertion order.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Shallow sanity check for a candidate identifier: its first key must
    /// match the first key of this node's identifier.
    ///
    /// This is a syntactic check only, not an ancestry check.
    pub fn is_valid_new_identifier(&self, candidate: &NodeIdentifier) -> bool {
        candidate.first_key() == self.identifier.first_key()
    }

    /// Find the first node matching `query`, searching pre-order from
    /// `self`: self before children, children left to right.
    ///
    /// Matching is the subset match of [`NodeIdentifier::matches`], so a
    /// query can hit a node whose identifier carries extra trailing pairs.
    /// When several nodes satisfy the query, the first in pre-order wins;
    /// no shortest-path guarantee is made.
    pub fn find(&self, query: &NodeIdentifier) -> Option<&TreeNode> {
        if query.matches(&self.identifier) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(query))
    }

    fn find_mut(&mut self, query: &NodeIdentifier) -> Option<&mut TreeNode> {
        if query.matches(&self.identifier) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(query))
    }

    fn contains_identifier(&self, identifier: &NodeIdentifier) -> bool {
        self.identifier == *identifier
            || self
                .children
                .iter()
                .any(|child| child.contains_identifier(identifier))
    }

    /// Insert a new node under the subtree rooted at `self`.
    ///
    /// The identifier's ancestor path (every pair but the last) is resolved
    /// by subset match to locate the parent; the new node is appended to
    /// that parent's child list. Fails with:
    ///
    /// - [`TreeError::InvalidIdentifier`] if the identifier's first key does
    ///   not match this subtree's root key;
    /// - [`TreeError::ParentNotFound`] if the ancestor path matches no node,
    ///   or the identifier is a single pair and has no ancestor path;
    /// - [`TreeError::DuplicateIdentifier`] if any node in the subtree
    ///   already holds a structurally equal identifier.
    pub fn insert(
        &mut self,
        attributes: Attributes,
        identifier: NodeIdentifier,
    ) -> Result<(), TreeError> {
        if !self.is_valid_new_identifier(&identifier) {
            return Err(TreeError::InvalidIdentifier {
                expected: self.identifier.first_key().to_string(),
                found: identifier.first_key().to_string(),
            });
        }

        let prefix = identifier
            .parent_prefix()
            .ok_or_else(|| TreeError::ParentNotFound {
                identifier: identifier.to_string(),
            })?;
        if self.find(&prefix).is_none() {
            return Err(TreeError::ParentNotFound {
                identifier: identifier.to_string(),
            });
        }

        if self.contains_identifier(&identifier) {
            return Err(TreeError::DuplicateIdentifier {
                identifier: identifier.to_string(),
            });
        }

        let parent = self
            .find_mut(&prefix)
            .ok_or_else(|| TreeError::ParentNotFound {
                identifier: identifier.to_string(),
            })?;
        parent.children.push(TreeNode::new(attributes, identifier));
        Ok(())
    }

    /// Replace the payload of the first node matching `query`.
    ///
    /// The old payload is discarded entirely; fields absent from
    /// `attributes` are not preserved.
    pub fn update(
        &mut self,
        query: &NodeIdentifier,
        attributes: Attributes,
    ) -> Result<(), TreeError> {
        match self.find_mut(query) {
            Some(node) => {
                node.attributes = attributes;
                Ok(())
            }
            None => Err(TreeError::NotFound {
                query: query.to_string(),
            }),
        }
    }

    /// Remove the node whose identifier equals `target`, along with its
    /// entire subtree.
    ///
    /// Removal compares full identifiers structurally, so two branches
    /// sharing a trailing pair cannot shadow each other. The root is no
    /// node's child and cannot be removed this way.
    pub fn delete(&mut self, target: &NodeIdentifier) -> Result<(), TreeError> {
        if self.remove_descendant(target) {
            Ok(())
        } else {
            Err(TreeError::NotFound {
                query: target.to_string(),
            })
        }
    }

    fn remove_descendant(&mut self, target: &NodeIdentifier) -> bool {
        if let Some(index) = self
            .children
            .iter()
            .position(|child| child.identifier == *target)
        {
            self.children.remove(index);
            return true;
        }
        self.children
            .iter_mut()
            .any(|child| child.remove_descendant(target))
    }

    /// Summaries of `self` and every descendant, in pre-order.
    ///
    /// A pure traversal: restartable, finite, no stored cursor.
    pub fn flatten(&self) -> Vec<NodeSummary> {
        let mut summaries = Vec::new();
        self.collect_summaries(&mut summaries);
        summaries
    }

    fn collect_summaries(&self, out: &mut Vec<NodeSummary>) {
        out.push(NodeSummary {
            id: self.id,
            attributes: self.attributes.clone(),
            identifier: self.identifier.clone(),
        });
        for child in &self.children {
            child.collect_summaries(out);
        }
    }

    /// Nested structural export.
    ///
    /// An internal node exports as an object mapping each child's
    /// current-level identifier to that child's exported structure; a leaf
    /// exports as an empty array, not an empty object, keeping "no
    /// children" distinct from an empty child mapping.
    pub fn export_structure(&self) -> JsonValue {
        if self.children.is_empty() {
            return JsonValue::Array(Vec::new());
        }
        let mut structure = serde_json::Map::new();
        for child in &self.children {
            structure.insert(child.identifier.current_level(), child.export_structure());
        }
        JsonValue::Object(structure)
    }

    /// Render the subtree as a box-drawing outline, one node per line with
    /// its full identifier.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_line(&mut out, "", true, true, false);
        out
    }

    /// Like [`TreeNode::render_tree`], but each node below the root shows
    /// only its current-level pair.
    pub fn render_tree_compact(&self) -> String {
        let mut out = String::new();
        self.render_line(&mut out, "", true, true, true);
        out
    }

    fn render_line(&self, out: &mut String, indent: &str, last: bool, root: bool, compact: bool) {
        let prefix = if last { "└── " } else { "├── " };
        let label = if compact && !root {
            self.identifier.current_level()
        } else {
            self.identifier.to_string()
        };
        out.push_str(indent);
        out.push_str(prefix);
        out.push_str(&label);
        out.push('\n');

        let child_indent = format!("{}{}", indent, if last { "    " } else { "│   " });
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.render_line(out, &child_indent, i + 1 == count, false, compact);
        }
    }
}
