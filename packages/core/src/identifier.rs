//! Node identifiers: ordered key=value paths addressing nodes in the tree.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors related to identifier parsing and construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// A segment is not a single `key=value` pair.
    InvalidSegment { segment: String, position: usize },
    /// The identifier has no pairs at all.
    Empty,
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierError::InvalidSegment { segment, position } => {
                write!(
                    f,
                    "invalid identifier segment '{}' at position {}: expected a single key=value pair",
                    segment, position
                )
            }
            IdentifierError::Empty => {
                write!(f, "identifier has no key=value pairs")
            }
        }
    }
}

impl std::error::Error for IdentifierError {}

/// An ordered sequence of `key=value` pairs denoting the path from the tree
/// root down to a node.
///
/// Keys are not unique across the tree; the full ordered pair sequence is
/// what distinguishes one node from another. Constructors reject empty
/// identifiers, so every accessor below is total.
///
/// # Identifier Syntax
///
/// - Pairs are separated by `,`
/// - Each pair is `key=value`, split on a single `=`
/// - A segment with no `=` or more than one `=` is malformed
///
/// # Examples
///
/// ```rust
/// use dntree_core::NodeIdentifier;
///
/// let id = NodeIdentifier::parse("o=root,m=cotton,c=white").unwrap();
/// assert_eq!(id.pairs().len(), 3);
/// assert_eq!(id.current_level(), "c=white");
/// assert_eq!(id.to_string(), "o=root,m=cotton,c=white");
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct NodeIdentifier {
    pairs: Vec<(String, String)>,
}

impl NodeIdentifier {
    /// Parse an identifier string.
    ///
    /// Declaration order in the text is preserved. Empty keys and values
    /// are allowed (`k=` and `=v` are single pairs); a missing or doubled
    /// `=` is not.
    pub fn parse(text: &str) -> Result<Self, IdentifierError> {
        if text.is_empty() {
            return Err(IdentifierError::Empty);
        }

        let mut pairs = Vec::new();
        for (position, segment) in text.split(',').enumerate() {
            let mut parts = segment.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => {
                    pairs.push((key.to_string(), value.to_string()));
                }
                _ => {
                    return Err(IdentifierError::InvalidSegment {
                        segment: segment.to_string(),
                        position,
                    });
                }
            }
        }

        Ok(NodeIdentifier { pairs })
    }

    /// Create an identifier from pre-split pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, IdentifierError> {
        if pairs.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Ok(NodeIdentifier { pairs })
    }

    /// The ordered pairs, first (root-most) to last.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// The key of the first pair.
    pub fn first_key(&self) -> &str {
        &self.pairs[0].0
    }

    /// Value of the first pair with the given key, ignoring position.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The last pair rendered as `"key=value"`, relating this node to its
    /// immediate parent.
    pub fn current_level(&self) -> String {
        let (key, value) = &self.pairs[self.pairs.len() - 1];
        format!("{}={}", key, value)
    }

    /// The ancestor path: every pair but the last.
    ///
    /// Returns `None` for a single-pair identifier, which has no ancestor
    /// path inside the tree.
    #[must_use]
    pub fn parent_prefix(&self) -> Option<NodeIdentifier> {
        if self.pairs.len() < 2 {
            return None;
        }
        Some(NodeIdentifier {
            pairs: self.pairs[..self.pairs.len() - 1].to_vec(),
        })
    }

    /// Subset match: does every pair of `self` appear in `candidate` with
    /// an equal value?
    ///
    /// Extra pairs in `candidate` are permitted, so a query can match a
    /// node deeper than the path it spells out.
    pub fn matches(&self, candidate: &NodeIdentifier) -> bool {
        self.pairs
            .iter()
            .all(|(key, value)| candidate.get(key) == Some(value.as_str()))
    }
}

impl fmt::Display for NodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

// Snapshots carry identifiers in their rendered form; deserializing goes
// back through `parse` so the non-empty invariant holds for loaded trees.

impl Serialize for NodeIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        NodeIdentifier::parse(&text).map_err(serde::de::Error::custom)
    }
}
