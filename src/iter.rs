//! Iterators over the entries of a tree.
//!
//! All iterators yield entries in ascending key order. They keep an explicit
//! stack of pending nodes instead of recursing.

use crate::node::Node;
use crate::Tree;

/// An iterator over the entries of a tree or of a prefix of it.
///
/// Created by [`Tree::iter`], [`Tree::iter_prefix`] and
/// [`PrefixView::iter`](crate::PrefixView::iter).
pub struct Iter<'a, K, V> {
    /// Nodes still to visit, the next one on top
    stack: Vec<&'a Node<K, V>>,

    /// Entries left to yield, when known
    remaining: Option<usize>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>, remaining: Option<usize>) -> Self {
        Iter {
            stack: root.into_iter().collect(),
            remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Push children in reverse so the lowest label is visited first
            self.stack.extend(node.edges.iter().rev().map(|e| &*e.node));

            if let Some(leaf) = &node.leaf {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return Some((&leaf.key, &leaf.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (0, None),
        }
    }
}

/// An iterator over the keys of a tree, in ascending order.
pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// An iterator over the values of a tree, in ascending key order.
pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// An owning iterator over the entries of a tree.
pub struct IntoIter<K, V> {
    stack: Vec<Node<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.stack.pop() {
            self.stack
                .extend(node.edges.drain(..).rev().map(|e| *e.node));

            if let Some(leaf) = node.leaf.take() {
                self.remaining -= 1;
                return Some((leaf.key, leaf.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> Tree<K, V> {
    /// Returns an iterator over the entries, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_tree::Tree;
    ///
    /// let tree: Tree<&str, i32> = vec![("b", 2), ("a", 1)].into_iter().collect();
    /// let entries: Vec<_> = tree.iter().collect();
    /// assert_eq!(entries, vec![(&"a", &1), (&"b", &2)]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(Some(&self.root), Some(self.size))
    }

    /// Returns an iterator over the keys, in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over the values, in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }
}

impl<K: AsRef<[u8]>, V> Tree<K, V> {
    /// Returns an iterator over the entries whose keys start with `prefix`.
    pub fn iter_prefix<Q>(&self, prefix: &Q) -> Iter<'_, K, V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        Iter::new(self.find_subtree(prefix.as_ref()), None)
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for Tree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            stack: vec![self.root],
            remaining: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Tree;

    fn tree() -> Tree<String, u32> {
        vec!["delta", "alpha", "charlie", "bravo", "alphabet", "al"]
            .into_iter()
            .enumerate()
            .map(|(i, k)| (k.to_string(), i as u32))
            .collect()
    }

    #[test]
    fn test_iter_sorted() {
        let tree = tree();
        let keys: Vec<&str> = tree.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["al", "alpha", "alphabet", "bravo", "charlie", "delta"]
        );
        assert_eq!(tree.iter().size_hint(), (6, Some(6)));
    }

    #[test]
    fn test_values_follow_key_order() {
        let tree = tree();
        let values: Vec<u32> = tree.values().copied().collect();
        assert_eq!(values, vec![5, 1, 4, 3, 2, 0]);
    }

    #[test]
    fn test_iter_prefix() {
        let tree = tree();
        let keys: Vec<&String> = tree.iter_prefix("alp").map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "alphabet"]);

        assert_eq!(tree.iter_prefix("").count(), 6);
        assert_eq!(tree.iter_prefix("alphabets").count(), 0);
        assert_eq!(tree.iter_prefix("x").count(), 0);
    }

    #[test]
    fn test_into_iter_owned() {
        let entries: Vec<(String, u32)> = tree().into_iter().collect();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0], ("al".to_string(), 5));
        assert_eq!(entries[5], ("delta".to_string(), 0));
    }

    #[test]
    fn test_for_loop_over_reference() {
        let tree = tree();
        let mut count = 0;
        for (k, _) in &tree {
            assert!(!k.is_empty());
            count += 1;
        }
        assert_eq!(count, tree.len());
    }
}
