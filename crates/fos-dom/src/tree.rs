//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed while the tree lives. Removing a node only unlinks
//! it, so ids held by observers stay safe to query after a mutation.

use std::cmp::Ordering;

use crate::{DomError, DomResult, Node, NodeData, NodeId, NodeOperations};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes ever allocated (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Allocate a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    fn link(&self, id: NodeId, pick: impl Fn(&Node) -> NodeId) -> Option<NodeId> {
        self.get(id).map(pick).filter(|n| n.is_valid())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.parent)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.first_child)
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.last_child)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.next_sibling)
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(id, |n| n.prev_sibling)
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children { tree: self, next: self.first_child(id) }
    }

    /// Iterate over the ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { tree: self, next: self.parent(id) }
    }

    /// True if `ancestor` is a strict ancestor of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// True if `node` is `container` or inside it
    pub fn contains(&self, container: NodeId, node: NodeId) -> bool {
        container == node || self.is_ancestor(container, node)
    }

    /// True if the node is connected to the document node
    pub fn is_attached(&self, id: NodeId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        id == NodeId::ROOT || self.ancestors(id).last() == Some(NodeId::ROOT)
    }

    /// Number of ancestors
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(t)) => out.push_str(&t.content),
            Some(_) => {
                for child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            None => {}
        }
    }

    /// Replace the content of a text node, returning the old content
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<String> {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Text(t)) => Ok(std::mem::replace(&mut t.content, content.to_string())),
            Some(_) => Err(DomError::InvalidNodeType),
            None => Err(DomError::NotFound(id)),
        }
    }

    /// Compare two nodes in document (pre-)order.
    ///
    /// An ancestor sorts before its descendants. Returns `None` when the nodes
    /// live in different (detached) subtrees.
    pub fn compare_document_position(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        if a == b {
            return Some(Ordering::Equal);
        }
        let path_a = self.path_from_top(a);
        let path_b = self.path_from_top(b);
        if path_a.first()? != path_b.first()? {
            return None;
        }
        let shared = path_a.iter().zip(&path_b).take_while(|(x, y)| x == y).count();
        match (path_a.get(shared), path_b.get(shared)) {
            (None, _) => Some(Ordering::Less),
            (_, None) => Some(Ordering::Greater),
            (Some(&ca), Some(&cb)) => {
                let mut cursor = self.next_sibling(ca);
                while let Some(sib) = cursor {
                    if sib == cb {
                        return Some(Ordering::Less);
                    }
                    cursor = self.next_sibling(sib);
                }
                Some(Ordering::Greater)
            }
        }
    }

    fn path_from_top(&self, id: NodeId) -> Vec<NodeId> {
        if self.get(id).is_none() {
            return Vec::new();
        }
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path.push(id);
        path
    }

    fn unlink(&mut self, child: NodeId) {
        let (parent, prev, next) = match self.get(child) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if !parent.is_valid() {
            return;
        }
        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(par) = self.get_mut(parent) {
            par.last_child = prev;
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = NodeId::NONE;
            c.prev_sibling = NodeId::NONE;
            c.next_sibling = NodeId::NONE;
        }
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if parent_node.is_text() || matches!(parent_node.data, NodeData::Comment(_)) {
            return Err(DomError::InvalidNodeType);
        }
        if matches!(child_node.data, NodeData::Document) {
            return Err(DomError::HierarchyRequest);
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeOperations for DomTree {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound(child))?;
        if node.parent != parent {
            return Err(DomError::NotAChild(child));
        }
        self.unlink(child);
        Ok(child)
    }

    fn insert_before(&mut self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId> {
        self.check_insertable(parent, new_child)?;
        if let Some(r) = ref_child {
            if r == new_child {
                return Ok(new_child);
            }
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild(r));
            }
        }
        self.unlink(new_child);

        let (prev, next) = match ref_child {
            Some(r) => (self.get(r).map_or(NodeId::NONE, |n| n.prev_sibling), r),
            None => (self.get(parent).map_or(NodeId::NONE, |n| n.last_child), NodeId::NONE),
        };
        if let Some(c) = self.get_mut(new_child) {
            c.parent = parent;
            c.prev_sibling = prev;
            c.next_sibling = next;
        }
        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = new_child;
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_child;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = new_child;
        } else if let Some(par) = self.get_mut(parent) {
            par.last_child = new_child;
        }
        Ok(new_child)
    }

    fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) -> DomResult<NodeId> {
        if self.parent(old_child) != Some(parent) {
            return Err(DomError::NotAChild(old_child));
        }
        if new_child == old_child {
            return Ok(old_child);
        }
        self.insert_before(parent, new_child, Some(old_child))?;
        self.remove_child(parent, old_child)
    }
}

/// Iterator over child ids
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Iterator over ancestor ids, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
