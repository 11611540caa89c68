//! Depth-first traversal.

use crate::node::{Node, NodeKind};

/// Read-only view of a node produced during traversal.
pub struct NodeView<'a, V> {
    node: &'a Node<V>,
    key: Vec<u8>,
    depth: usize,
}

impl<'a, V> NodeView<'a, V> {
    /// Full key of the node: every segment from the root down to it.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Consume the view, keeping only the full key.
    pub fn into_key(self) -> Vec<u8> {
        self.key
    }

    /// Bytes this node contributes to the key.
    pub fn segment(&self) -> &'a [u8] {
        self.node.segment()
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn value(&self) -> Option<&'a V> {
        self.node.value()
    }

    pub fn child_count(&self) -> usize {
        self.node.child_count()
    }

    pub fn priority(&self) -> u32 {
        self.node.priority()
    }

    /// Distance from the root, which has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Pre-order iterator over every node, value-less ones included.
///
/// Siblings come out in scan order, so the sequence depends on the
/// priority-driven reordering done by insertions.
pub struct Iter<'a, V> {
    /// (node, depth, length of the parent's key)
    stack: Vec<(&'a Node<V>, usize, usize)>,
    path: Vec<u8>,
}

impl<'a, V> Iter<'a, V> {
    fn new(root: &'a Node<V>) -> Self {
        Self {
            stack: vec![(root, 0, 0)],
            path: Vec::new(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = NodeView<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth, parent_len) = self.stack.pop()?;

        // Everything still on the stack hangs off a prefix of `path`.
        self.path.truncate(parent_len);
        self.path.extend_from_slice(node.segment());

        let key_len = self.path.len();
        self.stack.extend(
            node.children()
                .iter()
                .rev()
                .map(|child| (child, depth + 1, key_len)),
        );

        Some(NodeView {
            node,
            key: self.path.clone(),
            depth,
        })
    }
}

/// Iterator over `(key, value)` pairs of valued nodes, in traversal order.
pub struct Entries<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let view = self.inner.next()?;
            if let Some(value) = view.value() {
                return Some((view.into_key(), value));
            }
        }
    }
}

impl<V> Node<V> {
    /// Walk every node below and including this one, parent first.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }

    /// Walk the registered `(key, value)` pairs.
    pub fn entries(&self) -> Entries<'_, V> {
        Entries { inner: self.iter() }
    }

    /// Call `visit` on every node, parent first.
    pub fn iterate(&self, mut visit: impl FnMut(NodeView<'_, V>)) {
        for view in self.iter() {
            visit(view);
        }
    }
}
