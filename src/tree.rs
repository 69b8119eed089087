//! The main tree implementation.
//!
//! This module contains the `Tree` type, which provides the primary API for
//! working with the radix tree. The traversal and iteration APIs live in the
//! `walk` and `iter` modules.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;
use std::mem;

use crate::node::{Leaf, Node};
use crate::prefix_view::PrefixView;
use crate::util::longest_prefix;
use crate::Error;

/// An ordered, prefix-compressed map from byte-string keys to values.
///
/// This Radix Tree (also known as a Patricia Trie) keeps its keys in
/// lexicographic byte order and supports prefix queries: longest-prefix
/// match, prefix deletion and prefix-scoped traversal.
///
/// Chains of single-child nodes are compressed into one node carrying a
/// multi-byte prefix, so lookups cost O(key length) regardless of how many
/// entries are stored.
///
/// The tree performs no internal synchronization; share it across threads
/// behind a lock of your choosing.
#[derive(Clone)]
pub struct Tree<K, V> {
    /// The root node, which is never removed
    pub(crate) root: Node<K, V>,

    /// The number of entries stored in the tree
    pub(crate) size: usize,
}

/// A tree keyed by owned strings.
pub type StringTree<V> = Tree<String, V>;

impl<K, V> Tree<K, V> {
    /// Creates a new, empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let tree = Tree::<String, i32>::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Tree {
            root: Node::new(Vec::new()),
            size: 0,
        }
    }

    /// Returns the number of entries stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let mut tree = Tree::<String, i32>::new();
    /// assert_eq!(tree.len(), 0);
    ///
    /// tree.insert("hello".to_string(), 42);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.root = Node::new(Vec::new());
        self.size = 0;
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("beta", 2);
    /// tree.insert("alpha", 1);
    ///
    /// assert_eq!(tree.minimum(), Some((&"alpha", &1)));
    /// ```
    pub fn minimum(&self) -> Option<(&K, &V)> {
        self.root.minimum().map(|leaf| (&leaf.key, &leaf.value))
    }

    /// Returns the entry with the largest key.
    pub fn maximum(&self) -> Option<(&K, &V)> {
        self.root.maximum().map(|leaf| (&leaf.key, &leaf.value))
    }
}

impl<K: AsRef<[u8]>, V> Tree<K, V> {
    /// Builds a tree holding every entry of `map`.
    pub fn from_map(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// When the key is already present its value is replaced and the stored
    /// key is kept; the length does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.insert("hello".to_string(), 1), None);
    /// assert_eq!(tree.insert("hello".to_string(), 2), Some(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut n = &mut self.root;
        let mut depth = 0;

        loop {
            // Key exhausted: the entry lives on this node
            if depth == key.as_ref().len() {
                if let Some(leaf) = n.leaf.as_mut() {
                    return Some(mem::replace(&mut leaf.value, value));
                }
                n.leaf = Some(Leaf::new(key, value));
                self.size += 1;
                return None;
            }

            let label = key.as_ref()[depth];
            let idx = match n.edge_index(label) {
                Ok(idx) => idx,
                Err(_) => {
                    let rest = key.as_ref()[depth..].to_vec();
                    let child = Node::with_leaf(rest, Leaf::new(key, value));
                    n.add_edge(label, Box::new(child));
                    self.size += 1;
                    return None;
                }
            };

            let common = longest_prefix(&key.as_ref()[depth..], &n.edges[idx].node.prefix);
            if common == n.edges[idx].node.prefix.len() {
                depth += common;
                n = &mut *n.edges[idx].node;
                continue;
            }

            // The key diverges partway through the child's prefix. Put a new
            // node holding the shared part between the parent and the child.
            let search = &key.as_ref()[depth..];
            let split = Box::new(Node::new(search[..common].to_vec()));
            let rest = search[common..].to_vec();

            let mut original = n.update_edge(label, split);
            original.prefix = original.prefix.split_off(common);

            let split = &mut n.edges[idx].node;
            split.add_edge(original.prefix[0], original);
            self.size += 1;

            if rest.is_empty() {
                split.leaf = Some(Leaf::new(key, value));
            } else {
                let child = Node::with_leaf(rest, Leaf::new(key, value));
                split.add_edge(child.prefix[0], Box::new(child));
            }
            return None;
        }
    }

    /// Removes a key from the tree, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("hello".to_string(), 42);
    ///
    /// assert_eq!(tree.remove("hello"), Some(42));
    /// assert_eq!(tree.remove("hello"), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let leaf = remove_leaf(&mut self.root, key.as_ref(), true)?;
        self.size -= 1;
        Some(leaf.value)
    }

    /// Removes every entry whose key starts with `prefix`, returning how many
    /// were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("romane", 1);
    /// tree.insert("romanus", 2);
    /// tree.insert("romulus", 3);
    ///
    /// assert_eq!(tree.remove_prefix("roman"), 2);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove_prefix<Q>(&mut self, prefix: &Q) -> usize
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let prefix = prefix.as_ref();
        let removed = if prefix.is_empty() {
            let removed = self.root.subtree_len();
            self.root.leaf = None;
            self.root.edges.clear();
            removed
        } else {
            remove_subtree(&mut self.root, prefix, true)
        };

        self.size -= removed;
        removed
    }

    /// Retrieves a reference to the value stored for the given key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("hello".to_string(), 42);
    ///
    /// assert_eq!(tree.get("hello"), Some(&42));
    /// assert_eq!(tree.get("hell"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.find_node(key.as_ref())?
            .leaf
            .as_ref()
            .map(|leaf| &leaf.value)
    }

    /// Retrieves a mutable reference to the value stored for the given key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let mut n = &mut self.root;
        let mut search = key.as_ref();

        while !search.is_empty() {
            n = n.get_edge_mut(search[0])?;
            if !search.starts_with(&n.prefix) {
                return None;
            }
            search = &search[n.prefix.len()..];
        }

        n.leaf.as_mut().map(|leaf| &mut leaf.value)
    }

    /// Returns `true` if the tree contains a value for the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the entry whose key is the longest prefix of `key`.
    ///
    /// Every entry met on the way down is a candidate, not just an exact
    /// match, which makes this suitable for routing-style lookups.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert("/api", "api");
    /// tree.insert("/api/v1", "v1");
    ///
    /// assert_eq!(tree.longest_prefix("/api/v1/users"), Some((&"/api/v1", &"v1")));
    /// assert_eq!(tree.longest_prefix("/api/v2"), Some((&"/api", &"api")));
    /// assert_eq!(tree.longest_prefix("/static"), None);
    /// ```
    pub fn longest_prefix<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let mut last = None;
        let mut n = &self.root;
        let mut search = key.as_ref();

        loop {
            if let Some(leaf) = &n.leaf {
                last = Some(leaf);
            }
            if search.is_empty() {
                break;
            }
            n = match n.get_edge(search[0]) {
                Some(child) => child,
                None => break,
            };
            if !search.starts_with(&n.prefix) {
                break;
            }
            search = &search[n.prefix.len()..];
        }

        last.map(|leaf| (&leaf.key, &leaf.value))
    }

    /// Creates a borrowed view of the entries whose keys start with `prefix`.
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
    /// assert_eq!(view.len(), 2);
    /// assert!(view.contains_key("help"));
    /// assert!(!view.contains_key("world"));
    /// ```
    pub fn view_prefix<Q>(&self, prefix: &Q) -> PrefixView<'_, K, V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        PrefixView::new(self, prefix.as_ref())
    }

    /// Copies every entry into a `HashMap`.
    pub fn to_map(&self) -> HashMap<K, V>
    where
        K: Hash + Eq + Clone,
        V: Clone,
    {
        let mut out = HashMap::with_capacity(self.size);
        self.walk(|k, v| {
            out.insert(k.clone(), v.clone());
            false
        });
        out
    }

    /// Verifies the structural invariants of the tree.
    ///
    /// Checks that edge labels are sorted and match their child's prefix,
    /// that no node other than the root is an entry-less pass-through, that
    /// every stored key equals the path leading to it, and that `len()`
    /// matches the number of stored entries.
    pub fn check_invariants(&self) -> Result<(), Error> {
        let mut path = self.root.prefix.clone();
        let found = self.root.check(&mut path, true)?;
        if found != self.size {
            return Err(Error::SizeMismatch {
                expected: self.size,
                found,
            });
        }
        Ok(())
    }

    /// Finds the node for an exact key.
    fn find_node(&self, key: &[u8]) -> Option<&Node<K, V>> {
        let mut n = &self.root;
        let mut search = key;

        loop {
            if search.is_empty() {
                return Some(n);
            }
            n = n.get_edge(search[0])?;
            if !search.starts_with(&n.prefix) {
                return None;
            }
            search = &search[n.prefix.len()..];
        }
    }

    /// Finds the root of the subtree holding every key that starts with
    /// `prefix`. The prefix may end inside a compressed node's prefix.
    pub(crate) fn find_subtree(&self, prefix: &[u8]) -> Option<&Node<K, V>> {
        let mut n = &self.root;
        let mut search = prefix;

        loop {
            if search.is_empty() {
                return Some(n);
            }
            n = n.get_edge(search[0])?;
            if search.starts_with(&n.prefix) {
                search = &search[n.prefix.len()..];
            } else if n.prefix.starts_with(search) {
                return Some(n);
            } else {
                return None;
            }
        }
    }
}

/// Removes the leaf for `search` below `n`, whose own prefix is already consumed.
fn remove_leaf<K, V>(n: &mut Node<K, V>, search: &[u8], is_root: bool) -> Option<Leaf<K, V>> {
    if search.is_empty() {
        let leaf = n.leaf.take()?;
        if !is_root && n.edges.len() == 1 {
            n.merge_child();
        }
        return Some(leaf);
    }

    let label = search[0];
    let child = n.get_edge_mut(label)?;
    if !search.starts_with(&child.prefix) {
        return None;
    }
    let rest = &search[child.prefix.len()..];
    let leaf = remove_leaf(child, rest, false)?;

    n.prune_edge(label, is_root);
    Some(leaf)
}

/// Detaches the subtree for a non-empty `prefix` below `n`, returning the
/// number of entries dropped.
fn remove_subtree<K, V>(n: &mut Node<K, V>, prefix: &[u8], is_root: bool) -> usize {
    let label = prefix[0];
    let child = match n.get_edge_mut(label) {
        Some(child) => child,
        None => return 0,
    };

    let removed = if child.prefix.starts_with(prefix) {
        // The cut lands at the end of or inside this child's prefix
        let removed = child.subtree_len();
        child.leaf = None;
        child.edges.clear();
        removed
    } else if prefix.starts_with(&child.prefix) {
        let rest = &prefix[child.prefix.len()..];
        return remove_subtree(child, rest, false);
    } else {
        return 0;
    };

    n.prune_edge(label, is_root);
    removed
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Tree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Two trees are equal when they hold the same entries; their shapes then match too.
impl<K: PartialEq, V: PartialEq> PartialEq for Tree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Tree<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn romans() -> Tree<String, u32> {
        vec![
            ("romane", 1),
            ("romanus", 2),
            ("romulus", 3),
            ("rubens", 4),
            ("ruber", 5),
            ("rubicon", 6),
            ("rubicundus", 7),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    fn root_labels<V>(tree: &Tree<String, V>) -> Vec<u8> {
        tree.root.edges.iter().map(|e| e.label).collect()
    }

    #[test]
    fn test_new_tree() {
        let tree: Tree<String, u32> = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.minimum(), None);
        assert_eq!(tree.maximum(), None);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_get_nonexistent() {
        let tree: Tree<String, u32> = Tree::new();
        assert_eq!(tree.get("hello"), None);
    }

    #[test]
    fn test_insert_and_get() {
        let mut tree = Tree::new();
        assert_eq!(tree.insert("hello".to_string(), 42), None);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("hello"), Some(&42));
        assert_eq!(tree.get("world"), None);
        assert_eq!(tree.get("hell"), None);
        assert_eq!(tree.get("hello!"), None);
    }

    #[test]
    fn test_insert_replace() {
        let mut tree = Tree::new();
        tree.insert("hello".to_string(), 42);
        assert_eq!(tree.insert("hello".to_string(), 100), Some(42));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("hello"), Some(&100));
    }

    #[test]
    fn test_node_splitting() {
        let mut tree = Tree::new();
        tree.insert("alphabet".to_string(), 1);
        tree.insert("alpha".to_string(), 2);

        // "alpha" becomes an intermediate node holding its own entry
        let alpha = tree.root.get_edge(b'a').unwrap();
        assert_eq!(alpha.prefix, b"alpha".to_vec());
        assert_eq!(alpha.leaf.as_ref().unwrap().value, 2);
        assert_eq!(alpha.get_edge(b'b').unwrap().prefix, b"bet".to_vec());

        assert_eq!(tree.get("alphabet"), Some(&1));
        assert_eq!(tree.get("alpha"), Some(&2));
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_split_with_two_new_children() {
        let mut tree = Tree::new();
        tree.insert("team".to_string(), 1);
        tree.insert("test".to_string(), 2);

        let te = tree.root.get_edge(b't').unwrap();
        assert_eq!(te.prefix, b"te".to_vec());
        assert!(te.leaf.is_none());
        let labels: Vec<u8> = te.edges.iter().map(|e| e.label).collect();
        assert_eq!(labels, b"as".to_vec());
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_empty_key() {
        let mut tree = Tree::new();
        tree.insert(String::new(), 0);
        tree.insert("a".to_string(), 1);

        assert_eq!(tree.get(""), Some(&0));
        assert_eq!(tree.minimum(), Some((&String::new(), &0)));
        assert_eq!(tree.longest_prefix("zzz"), Some((&String::new(), &0)));

        assert_eq!(tree.remove(""), Some(0));
        assert_eq!(tree.get(""), None);
        assert_eq!(tree.len(), 1);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_merges_pass_through() {
        let mut tree = Tree::new();
        tree.insert("team".to_string(), 1);
        tree.insert("test".to_string(), 2);

        assert_eq!(tree.remove("team"), Some(1));

        // The "te" node lost a child and was merged into "test"
        let node = tree.root.get_edge(b't').unwrap();
        assert_eq!(node.prefix, b"test".to_vec());
        assert!(node.edges.is_empty());
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_inner_entry_merges_child() {
        let mut tree = Tree::new();
        tree.insert("abc".to_string(), 1);
        tree.insert("abcde".to_string(), 2);

        assert_eq!(tree.remove("abc"), Some(1));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("abc"), None);
        assert_eq!(tree.get("abcde"), Some(&2));

        let node = tree.root.get_edge(b'a').unwrap();
        assert_eq!(node.prefix, b"abcde".to_vec());
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_nonexistent() {
        let mut tree = romans();
        assert_eq!(tree.remove("roman"), None);
        assert_eq!(tree.remove("rubiconx"), None);
        assert_eq!(tree.remove("x"), None);
        assert_eq!(tree.len(), 7);
        assert!(tree.check_invariants().is_ok());

        let mut empty: Tree<String, u32> = Tree::new();
        assert_eq!(empty.remove("anything"), None);
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn test_remove_everything() {
        let mut tree = romans();
        let keys: Vec<String> = tree.keys().cloned().collect();
        for key in &keys {
            assert!(tree.remove(key).is_some());
            assert!(tree.check_invariants().is_ok());
        }
        assert!(tree.is_empty());
        assert!(root_labels(&tree).is_empty());
    }

    #[test]
    fn test_remove_prefix_inside_compressed_node() {
        let mut tree = romans();

        // "rubi" ends inside the prefix of the node shared by "rubicon" and "rubicundus"
        assert_eq!(tree.remove_prefix("rubi"), 2);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.get("rubicon"), None);
        assert_eq!(tree.get("ruber"), Some(&5));
        assert!(tree.check_invariants().is_ok());

        assert_eq!(tree.remove_prefix("romu"), 1);
        assert_eq!(tree.remove_prefix("romx"), 0);
        assert_eq!(tree.remove_prefix("q"), 0);
        assert_eq!(tree.len(), 4);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_prefix_empty_clears() {
        let mut tree = romans();
        assert_eq!(tree.remove_prefix(""), 7);
        assert!(tree.is_empty());
        assert!(root_labels(&tree).is_empty());
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_prefix_collapses_parent() {
        let mut tree = romans();
        tree.remove_prefix("rom");

        // Only the "rub" branch is left below the root, and "r" merged into it
        assert_eq!(root_labels(&tree), b"r".to_vec());
        let node = tree.root.get_edge(b'r').unwrap();
        assert_eq!(node.prefix, b"rub".to_vec());
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_longest_prefix() {
        let tree = romans();
        assert_eq!(
            tree.longest_prefix("romanesque"),
            Some((&"romane".to_string(), &1))
        );
        assert_eq!(tree.longest_prefix("roman"), None);
        assert_eq!(tree.longest_prefix("rubicon"), Some((&"rubicon".to_string(), &6)));
        assert_eq!(tree.longest_prefix(""), None);
    }

    #[test]
    fn test_minimum_maximum() {
        let tree = romans();
        assert_eq!(tree.minimum(), Some((&"romane".to_string(), &1)));
        assert_eq!(tree.maximum(), Some((&"rubicundus".to_string(), &7)));
    }

    #[test]
    fn test_get_mut() {
        let mut tree = romans();
        *tree.get_mut("ruber").unwrap() += 10;
        assert_eq!(tree.get("ruber"), Some(&15));
        assert!(tree.get_mut("rube").is_none());
        assert!(tree.get_mut("rubens!").is_none());
    }

    #[test]
    fn test_map_round_trip() {
        let tree = romans();
        let map = tree.to_map();
        assert_eq!(map.len(), 7);
        assert_eq!(map.get("rubicon"), Some(&6));

        let rebuilt = Tree::from_map(map);
        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn test_clear() {
        let mut tree = romans();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.get("romane"), None);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn test_check_invariants_reports_size_mismatch() {
        let mut tree = romans();
        tree.size += 1;
        assert_eq!(
            tree.check_invariants(),
            Err(Error::SizeMismatch {
                expected: 8,
                found: 7
            })
        );
    }

    #[test]
    fn test_check_invariants_reports_pass_through() {
        let mut tree = romans();
        tree.root.get_edge_mut(b'r').unwrap().del_edge(b'u');

        assert!(tree.check_invariants().is_err());
    }
}
