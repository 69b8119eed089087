//! # Radix Tree
//!
//! An ordered, prefix-compressed map from byte-string keys to values.
//!
//! This crate provides a radix tree (also known as a patricia trie). Unlike a
//! hash map it keeps its keys in lexicographic byte order and answers
//! prefix queries efficiently.
//!
//! ## Features
//!
//! - **Ordered**: iteration, `minimum` and `maximum` follow byte order of the keys
//! - **Longest-prefix match**: find the stored key that is the longest prefix of a probe
//! - **Prefix operations**: walk, iterate, view or remove every key under a prefix
//! - **Path walks**: visit every stored key that is a prefix of a given key
//! - **Mutation during walks**: remove entries from inside a traversal without skipping any
//!
//! ## Example
//!
//! ```rust
//! use radix_tree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert("romane".to_string(), 1);
//! tree.insert("romanus".to_string(), 2);
//! tree.insert("rubens".to_string(), 3);
//!
//! assert_eq!(tree.get("romane"), Some(&1));
//! assert_eq!(tree.longest_prefix("romanesque"), Some((&"romane".to_string(), &1)));
//! assert_eq!(tree.remove_prefix("rom"), 2);
//! assert_eq!(tree.len(), 1);
//! ```

mod iter;
mod node;
mod prefix_view;
mod tree;
mod util;
mod walk;

// Re-export public types
pub use crate::iter::{IntoIter, Iter, Keys, Values};
pub use crate::prefix_view::PrefixView;
pub use crate::tree::{StringTree, Tree};
pub use crate::walk::WalkAction;

/// Structural defects reported by [`Tree::check_invariants`].
///
/// A correct tree never produces one of these; they point at a bug in the
/// tree itself rather than at anything a caller did. Paths are the
/// concatenated node prefixes leading to the offending node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node other than the root has no entry and fewer than two children
    PassThrough { path: Vec<u8> },
    /// A stored key differs from the path leading to its node
    KeyMismatch { path: Vec<u8> },
    /// Edge labels under a node are not strictly ascending
    UnsortedEdges { path: Vec<u8> },
    /// An edge label is not the first byte of its child's prefix
    LabelMismatch { path: Vec<u8>, label: u8 },
    /// The tracked length disagrees with the number of stored entries
    SizeMismatch { expected: usize, found: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::PassThrough { path } => write!(
                f,
                "node at {:?} has no entry and fewer than two children",
                String::from_utf8_lossy(path)
            ),
            Error::KeyMismatch { path } => write!(
                f,
                "entry at {:?} is stored under a different key",
                String::from_utf8_lossy(path)
            ),
            Error::UnsortedEdges { path } => write!(
                f,
                "edges under {:?} are not sorted",
                String::from_utf8_lossy(path)
            ),
            Error::LabelMismatch { path, label } => write!(
                f,
                "edge {:#04x} under {:?} does not match its child's prefix",
                label,
                String::from_utf8_lossy(path)
            ),
            Error::SizeMismatch { expected, found } => {
                write!(f, "length is {} but {} entries are stored", expected, found)
            }
        }
    }
}

impl std::error::Error for Error {}
