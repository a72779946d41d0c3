//! Node classification
//!
//! Every walker agrees on one answer to "what kind of thing is this node".
//! Leaves are what the cursor lands on: text, controls, and embedded media.

use fos_dom::{Document, NodeId};

use crate::role::Role;

/// Coarse node class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Text,
    /// Interactive element, navigated as a single unit
    Control,
    Table,
    /// Block-level element that delimits groups
    Container,
    /// Images, math, audio/video and frames
    Media,
    Other,
}

const CONTROL_TAGS: &[&str] = &["button", "input", "select", "textarea", "summary"];

const MEDIA_TAGS: &[&str] = &["img", "svg", "math", "video", "audio", "canvas", "iframe", "object", "embed"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "dd", "details", "dialog", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "html",
    "legend", "li", "main", "menu", "nav", "ol", "p", "pre", "section", "tbody", "td", "tfoot", "th", "thead", "tr",
    "ul",
];

/// Classify a node
pub fn classify(doc: &Document, node: NodeId) -> NodeClass {
    if doc.is_text(node) {
        return NodeClass::Text;
    }
    let Some(tag) = doc.tag(node) else {
        return NodeClass::Other;
    };
    let role = Role::of(doc, node);
    if role.is_some_and(|r| r.is_widget()) {
        return NodeClass::Control;
    }
    // A table marked presentational is still a table; the layout check decides.
    if tag == "table" || role.is_some_and(|r| r.is_table()) {
        return NodeClass::Table;
    }
    if CONTROL_TAGS.contains(&tag) && !doc.is_element_hidden(node) {
        return NodeClass::Control;
    }
    if MEDIA_TAGS.contains(&tag) || matches!(role, Some(Role::Img) | Some(Role::Math)) {
        return NodeClass::Media;
    }
    if BLOCK_TAGS.contains(&tag) {
        return NodeClass::Container;
    }
    NodeClass::Other
}

pub fn is_iframe(doc: &Document, node: NodeId) -> bool {
    doc.tag(node) == Some("iframe")
}

/// True if traversal stops at this node instead of descending
pub fn is_leaf(doc: &Document, node: NodeId) -> bool {
    doc.tree().first_child(node).is_none()
        || matches!(classify(doc, node), NodeClass::Text | NodeClass::Control | NodeClass::Media)
}

/// True if a leaf has something to say
pub fn has_content(doc: &Document, leaf: NodeId) -> bool {
    if doc.is_element_hidden(leaf) {
        return false;
    }
    match classify(doc, leaf) {
        NodeClass::Text => doc.text(leaf).is_some_and(|t| !t.trim().is_empty()),
        NodeClass::Control => true,
        // Decorative images carry an empty alt
        NodeClass::Media => !(doc.tag(leaf) == Some("img") && doc.attr(leaf, "alt") == Some("")),
        _ => false,
    }
}

/// True if traversal from the navigation root would land on this node
pub fn is_content_leaf(doc: &Document, node: NodeId) -> bool {
    let root = doc.nav_root();
    doc.tree().contains(root, node)
        && is_leaf(doc, node)
        && has_content(doc, node)
        && !doc.is_hidden(node)
        && !doc
            .tree()
            .ancestors(node)
            .take_while(|&a| a != root)
            .any(|a| matches!(classify(doc, a), NodeClass::Control | NodeClass::Media))
}

/// True for units that are one indivisible step long
pub fn is_atomic(doc: &Document, leaf: NodeId) -> bool {
    !doc.is_text(leaf)
}

/// Spoken text of a leaf
pub fn leaf_text(doc: &Document, leaf: NodeId) -> String {
    if let Some(text) = doc.text(leaf) {
        return text.to_string();
    }
    if let Some(label) = doc.attr(leaf, "aria-label").filter(|l| !l.trim().is_empty()) {
        return label.trim().to_string();
    }
    let tree = doc.tree();
    match doc.tag(leaf) {
        Some("input") => doc
            .attr(leaf, "value")
            .filter(|v| !v.is_empty())
            .or_else(|| doc.attr(leaf, "placeholder"))
            .or_else(|| doc.attr(leaf, "alt"))
            .unwrap_or("")
            .to_string(),
        Some("select") => {
            let options: Vec<NodeId> = descendants(doc, leaf).filter(|&n| doc.tag(n) == Some("option")).collect();
            options
                .iter()
                .find(|&&o| doc.attr(o, "selected").is_some())
                .or(options.first())
                .map(|&o| collapse_whitespace(&tree.text_content(o)))
                .unwrap_or_default()
        }
        Some("img") | Some("area") => doc.attr(leaf, "alt").or_else(|| doc.attr(leaf, "title")).unwrap_or("").to_string(),
        Some("iframe") | Some("object") | Some("embed") | Some("video") | Some("audio") => {
            doc.attr(leaf, "title").unwrap_or("").to_string()
        }
        _ => collapse_whitespace(&tree.text_content(leaf)),
    }
}

/// Length of a leaf in cursor units
pub fn leaf_len(doc: &Document, leaf: NodeId) -> usize {
    doc.text(leaf).map_or(1, str::len)
}

/// Nearest ancestor-or-self the user can activate
pub fn actionable_target(doc: &Document, node: NodeId) -> Option<NodeId> {
    let root = doc.nav_root();
    std::iter::once(node)
        .chain(doc.tree().ancestors(node))
        .take_while(|&n| n != root)
        .find(|&n| classify(doc, n) == NodeClass::Control)
}

/// Element that delimits the group a leaf belongs to.
///
/// The nearest block or table ancestor below the navigation root, or the
/// root itself for inline content directly inside it. Frames always form a
/// group of their own.
pub fn group_key(doc: &Document, leaf: NodeId) -> NodeId {
    if is_iframe(doc, leaf) {
        return leaf;
    }
    let root = doc.nav_root();
    doc.tree()
        .ancestors(leaf)
        .take_while(|&a| a != root)
        .find(|&a| matches!(classify(doc, a), NodeClass::Container | NodeClass::Table))
        .unwrap_or(root)
}

/// Pre-order descendants of a node, excluding the node itself
pub fn descendants(doc: &Document, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    let tree = doc.tree();
    let mut next = tree.first_child(node);
    std::iter::from_fn(move || {
        let current = next?;
        next = tree.first_child(current).or_else(|| {
            let mut n = current;
            loop {
                if n == node {
                    return None;
                }
                if let Some(sib) = tree.next_sibling(n) {
                    return Some(sib);
                }
                n = tree.parent(n)?;
            }
        });
        Some(current)
    })
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element_with_text(body, "p", "Hello").unwrap();
        let text = doc.tree().first_child(p).unwrap();
        let button = doc.append_element_with_text(body, "button", "Go").unwrap();
        let img = doc.append_element(body, "img").unwrap();
        let table = doc.append_element(body, "table").unwrap();
        let span = doc.append_element(body, "span").unwrap();

        assert_eq!(classify(&doc, p), NodeClass::Container);
        assert_eq!(classify(&doc, text), NodeClass::Text);
        assert_eq!(classify(&doc, button), NodeClass::Control);
        assert_eq!(classify(&doc, img), NodeClass::Media);
        assert_eq!(classify(&doc, table), NodeClass::Table);
        assert_eq!(classify(&doc, span), NodeClass::Other);
    }

    #[test]
    fn test_leaves_and_content() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element(body, "p").unwrap();
        let blank = doc.append_text(p, "   ").unwrap();
        let button = doc.append_element_with_text(body, "button", "Go").unwrap();
        let decorative = doc.append_element(body, "img").unwrap();
        doc.set_attribute(decorative, "alt", "").unwrap();

        assert!(!is_leaf(&doc, p));
        assert!(is_leaf(&doc, blank));
        assert!(!has_content(&doc, blank));
        assert!(is_leaf(&doc, button));
        assert!(has_content(&doc, button));
        assert!(!has_content(&doc, decorative));
        assert_eq!(leaf_text(&doc, button), "Go");
    }

    #[test]
    fn test_leaf_text_for_inputs() {
        let mut doc = Document::default();
        let body = doc.body();
        let input = doc.append_element(body, "input").unwrap();
        doc.set_attribute(input, "placeholder", "Search").unwrap();
        assert_eq!(leaf_text(&doc, input), "Search");
        doc.set_attribute(input, "value", "rust").unwrap();
        assert_eq!(leaf_text(&doc, input), "rust");

        let select = doc.append_element(body, "select").unwrap();
        doc.append_element_with_text(select, "option", "One").unwrap();
        let two = doc.append_element_with_text(select, "option", "Two").unwrap();
        assert_eq!(leaf_text(&doc, select), "One");
        doc.set_attribute(two, "selected", "").unwrap();
        assert_eq!(leaf_text(&doc, select), "Two");
    }

    #[test]
    fn test_group_key() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element(body, "p").unwrap();
        let span = doc.append_element(p, "span").unwrap();
        let inner = doc.append_text(span, "inner").unwrap();
        let loose = doc.append_text(body, "loose").unwrap();
        assert_eq!(group_key(&doc, inner), p);
        assert_eq!(group_key(&doc, loose), body);
    }

    #[test]
    fn test_actionable_target() {
        let mut doc = Document::default();
        let body = doc.body();
        let link = doc.append_element_with_text(body, "a", "home").unwrap();
        doc.set_attribute(link, "href", "/").unwrap();
        let text = doc.tree().first_child(link).unwrap();
        assert_eq!(actionable_target(&doc, text), Some(link));
        assert_eq!(actionable_target(&doc, body), None);
    }

    #[test]
    fn test_descendants_stay_inside() {
        let mut doc = Document::default();
        let body = doc.body();
        let div = doc.append_element(body, "div").unwrap();
        let a = doc.append_element_with_text(div, "p", "a").unwrap();
        let after = doc.append_element_with_text(body, "p", "b").unwrap();
        let found: Vec<NodeId> = descendants(&doc, div).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], a);
        assert!(!found.contains(&after));
    }
}
