//! Document - High-level document API

use crate::{DomError, DomEvent, DomResult, DomTree, NodeData, NodeId, NodeOperations};

/// Elements whose content never reaches the user
const NEVER_RENDERED: &[&str] = &["head", "script", "style", "template", "noscript", "title"];

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Events recorded since the last drain
    events: Vec<DomEvent>,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let root = doc.tree.root();
        let html = doc.tree.create_element("html");
        let head = doc.tree.create_element("head");
        let body = doc.tree.create_element("body");
        // Fresh nodes under a fresh root cannot violate hierarchy rules.
        let _ = doc.tree.append_child(root, html);
        let _ = doc.tree.append_child(html, head);
        let _ = doc.tree.append_child(html, body);
        doc.html_element = html;
        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            events: Vec::new(),
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        let root = self.tree.root();
        self.html_element = self.find_child_tag(root, "html").unwrap_or(NodeId::NONE);
        if self.html_element.is_valid() {
            self.head_element = self.find_child_tag(self.html_element, "head").unwrap_or(NodeId::NONE);
            self.body_element = self.find_child_tag(self.html_element, "body").unwrap_or(NodeId::NONE);
        }
    }

    fn find_child_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.tree.children(parent).find(|&c| self.tag(c) == Some(tag))
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.find_child_tag(self.head_element, "title")
            .map(|t| self.tree.text_content(t).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Root of user navigation: the body while attached, else the document node
    pub fn nav_root(&self) -> NodeId {
        if self.body_element.is_valid() && self.tree.is_attached(self.body_element) {
            self.body_element
        } else {
            self.tree.root()
        }
    }

    /// Get element by ID attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element_with_id(self.tree.root(), id)
    }

    fn find_element_with_id(&self, start: NodeId, target_id: &str) -> Option<NodeId> {
        for child in self.tree.children(start) {
            if self.attr(child, "id") == Some(target_id) {
                return Some(child);
            }
            if let Some(found) = self.find_element_with_id(child, target_id) {
                return Some(found);
            }
        }
        None
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably. Changes made here record no events.
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Lower-case tag name of an element
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.tree.get(id).and_then(|n| n.tag())
    }

    /// Attribute value of an element
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.tree.get(id)?.as_element()?.get_attr(name)
    }

    /// ARIA role of an element
    pub fn role(&self, id: NodeId) -> Option<String> {
        self.tree.get(id)?.as_element()?.role()
    }

    /// Content of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.tree.get(id)?.as_text()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(|n| n.is_element())
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(|n| n.is_text())
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.tree.is_attached(id)
    }

    /// True if this element alone hides its subtree
    pub fn is_element_hidden(&self, id: NodeId) -> bool {
        let Some(elem) = self.tree.get(id).and_then(|n| n.as_element()) else {
            return matches!(self.tree.get(id).map(|n| &n.data), Some(NodeData::Comment(_)));
        };
        if NEVER_RENDERED.contains(&elem.tag.as_str()) || elem.has_attr("hidden") {
            return true;
        }
        if elem.get_attr("aria-hidden").is_some_and(|v| v.eq_ignore_ascii_case("true")) {
            return true;
        }
        if elem.tag == "input" && elem.get_attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")) {
            return true;
        }
        elem.get_attr("style").is_some_and(style_hides)
    }

    /// True if the node or any ancestor is hidden
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.is_element_hidden(id) || self.tree.ancestors(id).any(|a| self.is_element_hidden(a))
    }

    // ------------------------------------------------------------------
    // Mutations (recorded as events)
    // ------------------------------------------------------------------

    /// Append a node, recording an insertion event
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)?;
        self.events.push(DomEvent::node_inserted(child, parent));
        Ok(child)
    }

    /// Insert a node before a sibling
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> DomResult<NodeId> {
        self.tree.insert_before(parent, child, reference)?;
        self.events.push(DomEvent::node_inserted(child, parent));
        Ok(child)
    }

    /// Create and append an element
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> DomResult<NodeId> {
        let id = self.tree.create_element(tag);
        self.append(parent, id)
    }

    /// Create and append a text node
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> DomResult<NodeId> {
        let id = self.tree.create_text(text);
        self.append(parent, id)
    }

    /// Create an element with a single text child
    pub fn append_element_with_text(&mut self, parent: NodeId, tag: &str, text: &str) -> DomResult<NodeId> {
        let id = self.append_element(parent, tag)?;
        self.append_text(id, text)?;
        Ok(id)
    }

    /// Detach a node from its parent
    pub fn remove(&mut self, id: NodeId) -> DomResult<NodeId> {
        let parent = self.tree.parent(id).ok_or(DomError::NotAChild(id))?;
        self.tree.remove_child(parent, id)?;
        self.events.push(DomEvent::node_removed(id, parent));
        Ok(id)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let elem = self
            .tree
            .get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)?;
        let old = elem.set_attr(name, value);
        self.events.push(DomEvent::attr_modified(id, name, old.as_deref(), Some(value)));
        Ok(())
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let elem = self
            .tree
            .get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)?;
        let old = elem.remove_attr(name);
        if old.is_some() {
            self.events.push(DomEvent::attr_modified(id, name, old.as_deref(), None));
        }
        Ok(old)
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, id: NodeId, content: &str) -> DomResult<()> {
        let old = self.tree.set_text(id, content)?;
        self.events.push(DomEvent::character_data_modified(id, &old, content));
        Ok(())
    }

    /// Trigger an element's default action.
    ///
    /// Checkboxes toggle and radio buttons select; every element records a
    /// click event. Returns false for non-elements and detached nodes.
    pub fn click(&mut self, id: NodeId) -> bool {
        if !self.is_element(id) || !self.is_attached(id) {
            return false;
        }
        let toggles = self.tag(id) == Some("input")
            && matches!(self.attr(id, "type").map(str::to_ascii_lowercase).as_deref(), Some("checkbox") | Some("radio"));
        if toggles {
            let is_radio = self.attr(id, "type").is_some_and(|t| t.eq_ignore_ascii_case("radio"));
            let result = if self.attr(id, "checked").is_some() && !is_radio {
                self.remove_attribute(id, "checked").map(|_| ())
            } else {
                self.set_attribute(id, "checked", "")
            };
            if let Err(err) = result {
                tracing::warn!("click on {:?} failed to toggle: {}", id, err);
            }
        }
        tracing::debug!("click dispatched to {:?}", id);
        self.events.push(DomEvent::click(id));
        true
    }

    /// Drain recorded events
    pub fn take_events(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

fn style_hides(style: &str) -> bool {
    style.split(';').any(|decl| {
        let mut parts = decl.splitn(2, ':');
        let prop = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let value = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        (prop == "display" && value.starts_with("none")) || (prop == "visibility" && value.starts_with("hidden"))
    })
}
