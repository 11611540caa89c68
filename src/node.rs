//! Radix tree nodes.
//!
//! A node owns a compressed segment of the key, an optional value and its
//! children. Children are found by the first byte of their segment through a
//! small index kept parallel to the child list and scanned linearly.
//! Insertions bump a per-node priority and move busy children toward the
//! front of the index, which only affects scan order.

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

/// Whether a node carries a registered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A key terminates here and its value is set.
    Valued,
    /// The node only marks a shared prefix point.
    Structural,
}

impl NodeKind {
    /// Lowercase name used in tree dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Valued => "valued",
            NodeKind::Structural => "structural",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the prefix tree.
///
/// The root node is the tree: every operation starts here and walks down.
/// Concatenating the segments on the path from the root to a node yields the
/// key that node stands for.
#[derive(Clone)]
pub struct Node<V> {
    pub(crate) segment: Vec<u8>,
    pub(crate) value: Option<V>,
    /// First byte of each child's segment; `indices[i]` belongs to `children[i]`.
    pub(crate) indices: SmallVec<[u8; 8]>,
    pub(crate) children: Vec<Node<V>>,
    pub(crate) priority: u32,
}

impl<V> Node<V> {
    /// Create an empty node.
    pub fn new() -> Self {
        Self {
            segment: Vec::new(),
            value: None,
            indices: SmallVec::new(),
            children: Vec::new(),
            priority: 0,
        }
    }

    /// The bytes this node contributes to its key.
    pub fn segment(&self) -> &[u8] {
        &self.segment
    }

    /// The value registered at exactly this node's key.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// `Valued` when a value is registered here, `Structural` otherwise.
    pub fn kind(&self) -> NodeKind {
        if self.value.is_some() {
            NodeKind::Valued
        } else {
            NodeKind::Structural
        }
    }

    /// Number of insertions that passed through or ended at this node.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Children in scan order.
    pub fn children(&self) -> &[Node<V>] {
        &self.children
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// A node with neither a value nor children.
    pub fn is_orphan(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Register `value` under `key`, replacing any value already there.
    pub fn add(&mut self, key: impl AsRef<[u8]>, value: V) {
        self.insert(key.as_ref(), value, true);
    }

    /// Register an optional value under `key`.
    ///
    /// `None` means "no value" and is refused with [`Error::InvalidValue`]
    /// before the tree is touched.
    pub fn try_add(&mut self, key: impl AsRef<[u8]>, value: Option<V>) -> Result<()> {
        self.try_insert(key.as_ref(), value, true)
    }

    pub(crate) fn try_insert(&mut self, key: &[u8], value: Option<V>, reorder: bool) -> Result<()> {
        match value {
            Some(value) => {
                self.insert(key, value, reorder);
                Ok(())
            }
            None => {
                warn!(key = %String::from_utf8_lossy(key), "rejected absent value");
                Err(Error::invalid_value(key))
            }
        }
    }

    pub(crate) fn insert(&mut self, key: &[u8], value: V, reorder: bool) {
        self.priority = self.priority.saturating_add(1);

        // Empty tree
        if self.segment.is_empty() && self.children.is_empty() && self.value.is_none() {
            self.set_leaf(key, value);
            return;
        }

        let mut node = self;
        let mut key = key;
        loop {
            let common = longest_common_prefix(key, &node.segment);
            if common < node.segment.len() {
                node.split_at(common);
            }
            key = &key[common..];

            let Some(&first) = key.first() else {
                node.value = Some(value);
                return;
            };

            match node.child_position(first) {
                Some(pos) => {
                    let pos = node.increment_child_priority(pos, reorder);
                    node = &mut node.children[pos];
                }
                None => {
                    node.indices.push(first);
                    node.children.push(Node::new());
                    let pos = node.increment_child_priority(node.children.len() - 1, reorder);
                    trace!(segment = %String::from_utf8_lossy(key), "new leaf");
                    node.children[pos].set_leaf(key, value);
                    return;
                }
            }
        }
    }

    fn set_leaf(&mut self, key: &[u8], value: V) {
        self.segment = key.to_vec();
        self.value = Some(value);
    }

    /// Move everything past `at` into a single new child, leaving this node
    /// as a structural prefix point.
    fn split_at(&mut self, at: usize) {
        let rest = self.segment.split_off(at);
        trace!(
            prefix = %String::from_utf8_lossy(&self.segment),
            rest = %String::from_utf8_lossy(&rest),
            "split node"
        );
        let first = rest[0];
        let child = Node {
            segment: rest,
            value: self.value.take(),
            indices: std::mem::take(&mut self.indices),
            children: std::mem::take(&mut self.children),
            priority: self.priority.saturating_sub(1),
        };
        self.indices.push(first);
        self.children.push(child);
    }

    fn child_position(&self, byte: u8) -> Option<usize> {
        self.indices.iter().position(|&b| b == byte)
    }

    /// Bump the priority of the child at `pos` and move it in front of every
    /// sibling with a strictly lower priority. Returns its new position.
    fn increment_child_priority(&mut self, pos: usize, reorder: bool) -> usize {
        let child = &mut self.children[pos];
        child.priority = child.priority.saturating_add(1);
        let priority = child.priority;

        if !reorder {
            return pos;
        }

        let mut new_pos = pos;
        while new_pos > 0 && self.children[new_pos - 1].priority < priority {
            self.children.swap(new_pos - 1, new_pos);
            self.indices.swap(new_pos - 1, new_pos);
            new_pos -= 1;
        }
        new_pos
    }

    /// Find the value of the most specific registered key that is a prefix
    /// of `key`.
    ///
    /// Descending stops at the first mismatch. The answer is then the value
    /// at the deepest valued node passed on the way, or `None` if there was
    /// none. An exact hit on a structural node falls back the same way.
    pub fn lookup(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        let mut key = key.as_ref();
        let mut node = self;
        let mut fallback = None;

        loop {
            let segment = node.segment.as_slice();
            if key.len() > segment.len() {
                if !key.starts_with(segment) {
                    return fallback;
                }
                key = &key[segment.len()..];
                if let Some(value) = &node.value {
                    fallback = Some(value);
                }
                match node.child_position(key[0]) {
                    Some(pos) => node = &node.children[pos],
                    None => return fallback,
                }
            } else if key == segment {
                return node.value.as_ref().or(fallback);
            } else {
                return fallback;
            }
        }
    }

    /// Detach and return the value registered at exactly `key`.
    ///
    /// The node stays in place as a structural node; run
    /// [`cleanup`](Self::cleanup) to prune it.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let mut key = key.as_ref();
        let mut node = self;

        loop {
            if key.len() > node.segment.len() {
                if !key.starts_with(&node.segment) {
                    return None;
                }
                key = &key[node.segment.len()..];
                let pos = node.child_position(key[0])?;
                node = &mut node.children[pos];
            } else if key == node.segment.as_slice() {
                let value = node.value.take();
                if value.is_some() {
                    trace!(segment = %String::from_utf8_lossy(key), "removed value");
                }
                return value;
            } else {
                return None;
            }
        }
    }

    /// Prune every node that has no value and no children.
    ///
    /// Children are visited before their parent, so a chain of emptied
    /// nodes collapses in a single call. The node this is called on is
    /// never removed.
    pub fn cleanup(&mut self) {
        let pruned = self.prune_orphans();
        debug!(pruned, "cleanup finished");
    }

    fn prune_orphans(&mut self) -> usize {
        let mut pruned = 0;
        for child in &mut self.children {
            pruned += child.prune_orphans();
        }

        let mut i = 0;
        while i < self.children.len() {
            if self.children[i].is_orphan() {
                self.children.remove(i);
                self.indices.remove(i);
                pruned += 1;
            } else {
                i += 1;
            }
        }
        pruned
    }
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Length of the longest common prefix of `a` and `b`.
pub(crate) fn longest_common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
