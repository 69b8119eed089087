//! Prefix view into a radix tree.
//!
//! This module provides the `PrefixView` type, a borrowed window onto the
//! entries of a tree whose keys share a prefix.

use std::fmt;

use crate::iter::Iter;
use crate::node::Node;
use crate::walk::walk_node;
use crate::Tree;

/// A lightweight view of the entries whose keys start with a prefix.
///
/// The subtree holding those entries is located once, when the view is
/// created; lookups, counting and iteration then start from it.
///
/// # Examples
///
/// ```
/// use radix_tree::Tree;
///
/// let mut tree = Tree::new();
/// tree.insert("hello".to_string(), 1);
/// tree.insert("help".to_string(), 2);
/// tree.insert("world".to_string(), 3);
///
/// let view = tree.view_prefix("hel");
///
/// assert!(view.exists());
/// assert!(view.contains_key("hello"));
/// assert!(!view.contains_key("world"));
///
/// let keys: Vec<&String> = view.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec!["hello", "help"]);
/// ```
pub struct PrefixView<'a, K, V> {
    /// The tree this view borrows from
    tree: &'a Tree<K, V>,

    /// The key prefix defining this view
    prefix: Vec<u8>,

    /// The subtree holding every key with the prefix, if there is one
    node: Option<&'a Node<K, V>>,
}

impl<'a, K, V> PrefixView<'a, K, V>
where
    K: AsRef<[u8]>,
{
    /// Creates a new prefix view for the given tree and prefix.
    pub(crate) fn new(tree: &'a Tree<K, V>, prefix: &[u8]) -> Self {
        PrefixView {
            tree,
            prefix: prefix.to_vec(),
            node: tree.find_subtree(prefix),
        }
    }

    /// Returns the key prefix for this view.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the underlying tree.
    pub fn tree(&self) -> &'a Tree<K, V> {
        self.tree
    }

    /// Returns whether any stored key starts with the prefix.
    pub fn exists(&self) -> bool {
        self.node.is_some()
    }

    /// Returns the number of entries in this view.
    ///
    /// This counts the entries of the subtree, so it is linear in its size.
    pub fn len(&self) -> usize {
        self.node.map_or(0, Node::subtree_len)
    }

    /// Returns whether this view contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the view contains a key.
    ///
    /// Only returns true if the key is in the tree and starts with the prefix.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Gets the value for a key if it exists in this view.
    pub fn get<Q>(&self, key: &Q) -> Option<&'a V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        if self.node.is_none() || !key.as_ref().starts_with(&self.prefix) {
            return None;
        }
        self.tree.get(key)
    }

    /// Returns the entry with the smallest key in this view.
    pub fn minimum(&self) -> Option<(&'a K, &'a V)> {
        self.node?.minimum().map(|leaf| (&leaf.key, &leaf.value))
    }

    /// Returns the entry with the largest key in this view.
    pub fn maximum(&self) -> Option<(&'a K, &'a V)> {
        self.node?.maximum().map(|leaf| (&leaf.key, &leaf.value))
    }

    /// Returns an iterator over the entries of the view, in ascending key order.
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter::new(self.node, None)
    }

    /// Visits the entries of the view in ascending key order until `f`
    /// returns `true`.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        if let Some(node) = self.node {
            walk_node(node, &mut f);
        }
    }
}

impl<'a, K, V> Clone for PrefixView<'a, K, V> {
    fn clone(&self) -> Self {
        PrefixView {
            tree: self.tree,
            prefix: self.prefix.clone(),
            node: self.node,
        }
    }
}

impl<'a, K, V> fmt::Debug for PrefixView<'a, K, V>
where
    K: AsRef<[u8]> + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

// Views are equal when they expose the same entries, whatever their prefixes.
impl<'a, K, V> PartialEq for PrefixView<'a, K, V>
where
    K: AsRef<[u8]> + PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<'a, 'v, K, V> IntoIterator for &'v PrefixView<'a, K, V>
where
    K: AsRef<[u8]>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
