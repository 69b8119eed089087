//! Internal node implementation for the radix tree.
//!
//! This module contains the `Node` structure that forms the backbone of the
//! tree. Every node is exclusively owned by the edge leading to it (or by the
//! `Tree`, for the root), so detaching an edge drops the whole subtree.

use std::mem;

use crate::Error;

/// A stored key/value pair.
///
/// The key is the original, full key, not the compressed remainder that led
/// to the node carrying this leaf.
#[derive(Debug, Clone)]
pub(crate) struct Leaf<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Leaf<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Leaf { key, value }
    }
}

/// A labeled link from a parent to a child node.
///
/// The label is always the first byte of the child's prefix.
#[derive(Debug, Clone)]
pub(crate) struct Edge<K, V> {
    pub label: u8,
    pub node: Box<Node<K, V>>,
}

/// Internal node type for the radix tree.
///
/// Each node contains the compressed prefix it represents, an optional leaf,
/// and its outgoing edges sorted ascending by label.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    /// Bytes consumed when descending into this node, including the edge label
    pub prefix: Vec<u8>,

    /// The entry whose key ends exactly at this node, if any
    pub leaf: Option<Leaf<K, V>>,

    /// Children, sorted by label with at most one edge per label
    pub edges: Vec<Edge<K, V>>,
}

/// What `Node::prune_edge` did to restore the compression invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prune {
    /// The child still holds entries; nothing changed.
    Kept,
    /// The empty child was detached.
    Removed,
    /// The empty child was detached and this node absorbed its sole remaining child.
    Collapsed,
}

impl<K, V> Node<K, V> {
    /// Creates a new empty node with the given prefix
    pub fn new(prefix: Vec<u8>) -> Self {
        Node {
            prefix,
            leaf: None,
            edges: Vec::new(),
        }
    }

    /// Creates a childless node carrying `leaf`
    pub fn with_leaf(prefix: Vec<u8>, leaf: Leaf<K, V>) -> Self {
        Node {
            prefix,
            leaf: Some(leaf),
            edges: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    /// Returns true when neither this node nor anything below it holds an entry.
    pub fn is_empty(&self) -> bool {
        self.leaf.is_none() && self.edges.is_empty()
    }

    /// Binary search for `label`, yielding its slot or the slot it would be inserted at.
    pub fn edge_index(&self, label: u8) -> Result<usize, usize> {
        self.edges.binary_search_by_key(&label, |e| e.label)
    }

    /// Inserts a new edge, keeping the edges sorted by label.
    ///
    /// # Panics
    ///
    /// Panics if an edge with the same label already exists.
    pub fn add_edge(&mut self, label: u8, node: Box<Node<K, V>>) {
        match self.edge_index(label) {
            Ok(_) => panic!("adding duplicate edge {:#04x}", label),
            Err(idx) => self.edges.insert(idx, Edge { label, node }),
        }
    }

    /// Points the existing edge `label` at `node`, returning the previous child.
    ///
    /// # Panics
    ///
    /// Panics if there is no edge with that label.
    pub fn update_edge(&mut self, label: u8, node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        match self.edge_index(label) {
            Ok(idx) => mem::replace(&mut self.edges[idx].node, node),
            Err(_) => panic!("replacing missing edge {:#04x}", label),
        }
    }

    pub fn get_edge(&self, label: u8) -> Option<&Node<K, V>> {
        self.edge_index(label).ok().map(|idx| &*self.edges[idx].node)
    }

    pub fn get_edge_mut(&mut self, label: u8) -> Option<&mut Node<K, V>> {
        match self.edge_index(label) {
            Ok(idx) => Some(&mut *self.edges[idx].node),
            Err(_) => None,
        }
    }

    /// Detaches the edge `label`, returning the child it pointed to.
    pub fn del_edge(&mut self, label: u8) -> Option<Box<Node<K, V>>> {
        match self.edge_index(label) {
            Ok(idx) => Some(self.edges.remove(idx).node),
            Err(_) => None,
        }
    }

    /// Absorbs the only child into this node.
    ///
    /// The prefixes are concatenated and the child's leaf and edges replace
    /// this node's own.
    ///
    /// # Panics
    ///
    /// Panics unless the node has exactly one edge.
    pub fn merge_child(&mut self) {
        assert_eq!(self.edges.len(), 1, "merging a node without a sole child");
        if let Some(edge) = self.edges.pop() {
            let child = *edge.node;
            self.prefix.extend_from_slice(&child.prefix);
            self.leaf = child.leaf;
            self.edges = child.edges;
        }
    }

    /// Drops the child under `label` if it no longer holds any entry, then
    /// collapses this node into its remaining child if that left it as a
    /// leafless pass-through. The root never collapses.
    pub fn prune_edge(&mut self, label: u8, is_root: bool) -> Prune {
        let empty = self.get_edge(label).map_or(false, Node::is_empty);
        if !empty {
            return Prune::Kept;
        }
        self.del_edge(label);
        if !is_root && !self.is_leaf() && self.edges.len() == 1 {
            self.merge_child();
            return Prune::Collapsed;
        }
        Prune::Removed
    }

    /// Returns the number of entries stored in this subtree
    pub fn subtree_len(&self) -> usize {
        let mut count = if self.leaf.is_some() { 1 } else { 0 };

        for edge in &self.edges {
            count += edge.node.subtree_len();
        }

        count
    }

    pub fn first_edge(&self) -> Option<&Node<K, V>> {
        self.edges.first().map(|e| &*e.node)
    }

    pub fn last_edge(&self) -> Option<&Node<K, V>> {
        self.edges.last().map(|e| &*e.node)
    }

    /// Leftmost entry of the subtree.
    pub fn minimum(&self) -> Option<&Leaf<K, V>> {
        let mut n = self;
        loop {
            if let Some(leaf) = &n.leaf {
                return Some(leaf);
            }
            n = n.first_edge()?;
        }
    }

    /// Rightmost entry of the subtree.
    pub fn maximum(&self) -> Option<&Leaf<K, V>> {
        let mut n = self;
        loop {
            match n.last_edge() {
                Some(child) => n = child,
                None => return n.leaf.as_ref(),
            }
        }
    }
}

impl<K: AsRef<[u8]>, V> Node<K, V> {
    /// Audits this subtree, returning the number of entries in it.
    ///
    /// `path` holds the concatenated prefixes from the root down to and
    /// including this node.
    pub fn check(&self, path: &mut Vec<u8>, is_root: bool) -> Result<usize, Error> {
        if !is_root && !self.is_leaf() && self.edges.len() < 2 {
            return Err(Error::PassThrough { path: path.clone() });
        }

        let mut count = 0;
        if let Some(leaf) = &self.leaf {
            if leaf.key.as_ref() != path.as_slice() {
                return Err(Error::KeyMismatch { path: path.clone() });
            }
            count += 1;
        }

        let mut previous: Option<u8> = None;
        for edge in &self.edges {
            if previous.map_or(false, |p| p >= edge.label) {
                return Err(Error::UnsortedEdges { path: path.clone() });
            }
            previous = Some(edge.label);

            if edge.node.prefix.first() != Some(&edge.label) {
                return Err(Error::LabelMismatch {
                    path: path.clone(),
                    label: edge.label,
                });
            }

            let depth = path.len();
            path.extend_from_slice(&edge.node.prefix);
            count += edge.node.check(path, false)?;
            path.truncate(depth);
        }

        Ok(count)
    }
}
