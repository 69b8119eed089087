//! Visitor-based traversal.
//!
//! Walks visit entries in ascending key order. The shared walks hand each
//! visitor `(&K, &V)` and stop as soon as it returns `true`. The `_mut`
//! walks let the visitor edit values and remove the entry it is looking at
//! through a `WalkAction`; the tree is repaired on the spot and the walk
//! carries on without skipping or repeating entries.

use crate::node::{Node, Prune};
use crate::Tree;

/// What a mutable walk should do after visiting an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    /// Keep the entry and move on.
    Continue,
    /// Keep the entry and end the walk.
    Stop,
    /// Remove the entry and move on.
    Remove,
    /// Remove the entry and end the walk.
    RemoveAndStop,
}

impl WalkAction {
    /// Returns `true` for the actions that remove the visited entry.
    pub fn removes(self) -> bool {
        matches!(self, WalkAction::Remove | WalkAction::RemoveAndStop)
    }

    /// Returns `true` for the actions that end the walk.
    pub fn stops(self) -> bool {
        matches!(self, WalkAction::Stop | WalkAction::RemoveAndStop)
    }
}

impl<K, V> Tree<K, V> {
    /// Visits every entry in ascending key order until `f` returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let tree: Tree<&str, i32> = vec![("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
    ///
    /// let mut seen = Vec::new();
    /// tree.walk(|k, _| {
    ///     seen.push(*k);
    ///     *k == "b"
    /// });
    /// assert_eq!(seen, vec!["a", "b"]);
    /// ```
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        walk_node(&self.root, &mut f);
    }

    /// Visits every entry like `walk`, letting `f` modify values and remove
    /// the entry being visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::{Tree, WalkAction};
    ///
    /// let mut tree: Tree<&str, i32> = vec![("a", 1), ("ab", 2), ("abc", 3)].into_iter().collect();
    ///
    /// tree.walk_mut(|_, v| {
    ///     *v *= 10;
    ///     if *v == 20 { WalkAction::Remove } else { WalkAction::Continue }
    /// });
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.get("abc"), Some(&30));
    /// ```
    pub fn walk_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> WalkAction,
    {
        let mut removed = 0;
        walk_node_mut(&mut self.root, true, &mut removed, &mut f);
        self.size -= removed;
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.walk_mut(|k, v| {
            if f(k, v) {
                WalkAction::Continue
            } else {
                WalkAction::Remove
            }
        });
    }
}

impl<K: AsRef<[u8]>, V> Tree<K, V> {
    /// Visits, in ascending order, every entry whose key starts with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let tree: Tree<&str, i32> = vec![("rubens", 4), ("ruber", 5), ("romane", 1)]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let mut seen = Vec::new();
    /// tree.walk_prefix("rub", |k, _| {
    ///     seen.push(*k);
    ///     false
    /// });
    /// assert_eq!(seen, vec!["rubens", "ruber"]);
    /// ```
    pub fn walk_prefix<Q, F>(&self, prefix: &Q, mut f: F)
    where
        Q: AsRef<[u8]> + ?Sized,
        F: FnMut(&K, &V) -> bool,
    {
        if let Some(n) = self.find_subtree(prefix.as_ref()) {
            walk_node(n, &mut f);
        }
    }

    /// Like `walk_prefix`, letting `f` modify values and remove the entry
    /// being visited.
    pub fn walk_prefix_mut<Q, F>(&mut self, prefix: &Q, mut f: F)
    where
        Q: AsRef<[u8]> + ?Sized,
        F: FnMut(&K, &mut V) -> WalkAction,
    {
        let mut removed = 0;
        walk_prefix_node_mut(&mut self.root, prefix.as_ref(), true, &mut removed, &mut f);
        self.size -= removed;
    }

    /// Visits the entries on the path from the root toward `path`: every
    /// stored key that is a prefix of `path`, shortest first, including
    /// `path` itself when present.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let tree: Tree<&str, i32> = vec![("a", 1), ("abc", 2), ("abd", 3), ("abcde", 4)]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let mut seen = Vec::new();
    /// tree.walk_path("abcdx", |k, _| {
    ///     seen.push(*k);
    ///     false
    /// });
    /// assert_eq!(seen, vec!["a", "abc"]);
    /// ```
    pub fn walk_path<Q, F>(&self, path: &Q, mut f: F)
    where
        Q: AsRef<[u8]> + ?Sized,
        F: FnMut(&K, &V) -> bool,
    {
        let mut n = &self.root;
        let mut search = path.as_ref();

        loop {
            if let Some(leaf) = &n.leaf {
                if f(&leaf.key, &leaf.value) {
                    return;
                }
            }
            if search.is_empty() {
                return;
            }
            n = match n.get_edge(search[0]) {
                Some(child) => child,
                None => return,
            };
            if !search.starts_with(&n.prefix) {
                return;
            }
            search = &search[n.prefix.len()..];
        }
    }
}

/// Pre-order walk of a subtree. Returns `true` if `f` asked to stop.
pub(crate) fn walk_node<K, V, F>(n: &Node<K, V>, f: &mut F) -> bool
where
    F: FnMut(&K, &V) -> bool,
{
    if let Some(leaf) = &n.leaf {
        if f(&leaf.key, &leaf.value) {
            return true;
        }
    }

    for edge in &n.edges {
        if walk_node(&edge.node, f) {
            return true;
        }
    }

    false
}

/// Pre-order walk of a subtree whose visitor may remove entries.
///
/// Removals are repaired immediately, so the node's edge list can shrink or
/// be replaced wholesale while it is being iterated. The edge count is
/// re-read after every child: the index only advances when the count did not
/// drop, and when this node absorbs a sibling that has not been visited yet
/// the node is walked again from the top.
fn walk_node_mut<K, V, F>(n: &mut Node<K, V>, is_root: bool, removed: &mut usize, f: &mut F) -> bool
where
    F: FnMut(&K, &mut V) -> WalkAction,
{
    if let Some(leaf) = n.leaf.as_mut() {
        let action = f(&leaf.key, &mut leaf.value);
        if action.removes() {
            n.leaf = None;
            *removed += 1;
            if !is_root && n.edges.len() == 1 {
                // Everything the node just absorbed is still unvisited
                n.merge_child();
                return action.stops() || walk_node_mut(n, is_root, removed, f);
            }
        }
        if action.stops() {
            return true;
        }
    }

    let mut i = 0;
    let mut k = n.edges.len();
    while i < k {
        let label = n.edges[i].label;
        let stop = walk_node_mut(&mut n.edges[i].node, false, removed, f);

        if n.prune_edge(label, is_root) == Prune::Collapsed {
            // Two edges became one and this node took over the survivor. It
            // was already visited if it sat before the pruned edge.
            return stop || (i == 0 && walk_node_mut(n, is_root, removed, f));
        }
        if stop {
            return true;
        }

        if n.edges.len() >= k {
            i += 1;
        }
        k = n.edges.len();
    }

    false
}

/// Descends toward `search`, then walks the subtree it selects, repairing
/// each node on the way back up.
fn walk_prefix_node_mut<K, V, F>(
    n: &mut Node<K, V>,
    search: &[u8],
    is_root: bool,
    removed: &mut usize,
    f: &mut F,
) -> bool
where
    F: FnMut(&K, &mut V) -> WalkAction,
{
    if search.is_empty() {
        return walk_node_mut(n, is_root, removed, f);
    }

    let label = search[0];
    let child = match n.get_edge_mut(label) {
        Some(child) => child,
        None => return false,
    };

    let stop = if search.starts_with(&child.prefix) {
        let rest = &search[child.prefix.len()..];
        walk_prefix_node_mut(child, rest, false, removed, f)
    } else if child.prefix.starts_with(search) {
        walk_node_mut(child, false, removed, f)
    } else {
        return false;
    };

    n.prune_edge(label, is_root);
    stop
}
