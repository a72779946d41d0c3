//! Navigation history
//!
//! Bounded record of visited nodes, used to recover when the DOM mutates
//! underneath the cursor.

use std::collections::VecDeque;

use fos_dom::{Document, NodeId};

/// Node predicate used when recovering
pub type NodePredicate<'a> = &'a dyn Fn(&Document, NodeId) -> bool;

/// Outcome of a history revert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reverted {
    /// Most recent valid entry
    pub current: Option<NodeId>,
    /// Valid entry before it
    pub previous: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: VecDeque<NodeId>,
    capacity: usize,
}

impl NavigationHistory {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity: capacity.max(1) }
    }

    /// Record a visit. Repeated visits to the same node collapse.
    pub fn update(&mut self, node: NodeId) {
        if self.entries.back() == Some(&node) {
            return;
        }
        self.entries.push_back(node);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// True if the node no longer belongs to the document
    pub fn become_invalid(&self, doc: &Document, node: NodeId) -> bool {
        !doc.is_attached(node)
    }

    /// Drop invalid entries from the newest end and report where to resume
    pub fn revert(&mut self, doc: &Document, predicate: Option<NodePredicate<'_>>) -> Reverted {
        let valid = |n: NodeId| !self.become_invalid(doc, n) && predicate.is_none_or(|p| p(doc, n));
        let keep = self.entries.iter().rposition(|&n| valid(n)).map_or(0, |i| i + 1);
        let current = keep.checked_sub(1).and_then(|i| self.entries.get(i).copied());
        let previous = self.entries.iter().take(keep.saturating_sub(1)).rev().copied().find(|&n| valid(n));
        self.entries.truncate(keep);
        if current.is_none() {
            tracing::debug!("navigation history has no valid entry");
        }
        Reverted { current, previous }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.entries.back().copied()
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(32)
    }
}
