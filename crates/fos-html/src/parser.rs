//! HTML5 Parser implementation
//!
//! Uses html5ever's build-in RcDom and converts to our DOM format.
//! This is simpler and more reliable than implementing TreeSink directly.

use fos_dom::{Document, DomTree, NodeId, NodeOperations};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::HtmlError;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);

        // Find html, head, body elements
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => self.convert_children(handle, tree, parent),
            RcNodeData::Text { contents } => {
                let id = tree.create_text(&contents.borrow());
                attach(tree, parent, id);
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(&contents.to_string());
                attach(tree, parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                    for attr in attrs.borrow().iter() {
                        elem.set_attr(&attr.name.local, &attr.value);
                    }
                }
                attach(tree, parent, id);
                self.convert_children(handle, tree, id);
            }
            // Doctypes and processing instructions carry nothing to read.
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        }
    }

    /// Convert children, keeping whitespace-only text only where it
    /// separates two inline siblings
    fn convert_children(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let children = handle.children.borrow();
        for (i, child) in children.iter().enumerate() {
            if is_blank_text(child) {
                let between_inline =
                    i > 0 && children.get(i - 1).is_some_and(is_inline) && children.get(i + 1).is_some_and(is_inline);
                if !between_inline {
                    continue;
                }
            }
            self.convert_node(child, tree, parent);
        }
    }
}

/// Elements that start a new line; whitespace next to them is layout only
const BLOCK_LEVEL: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "col", "colgroup", "dd", "details",
    "dialog", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu", "meta", "nav",
    "ol", "option", "p", "pre", "script", "section", "select", "style", "summary", "table", "tbody", "td",
    "template", "tfoot", "th", "thead", "title", "tr", "ul",
];

fn is_blank_text(handle: &Handle) -> bool {
    match &handle.data {
        RcNodeData::Text { contents } => contents.borrow().trim().is_empty(),
        _ => false,
    }
}

fn is_inline(handle: &Handle) -> bool {
    match &handle.data {
        RcNodeData::Text { .. } => true,
        RcNodeData::Element { name, .. } => !BLOCK_LEVEL.contains(&&*name.local),
        _ => false,
    }
}

fn attach(tree: &mut DomTree, parent: NodeId, child: NodeId) {
    if let Err(err) = tree.append_child(parent, child) {
        tracing::warn!("Dropping node {:?} under {:?}: {}", child, parent, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html).unwrap();

        assert!(doc.tree().len() > 1, "Expected more than 1 node, got {}", doc.tree().len());
        assert_eq!(doc.title(), "Test");
        assert_eq!(doc.tree().text_content(doc.body()), "Hello");
    }

    #[test]
    fn test_whitespace_between_inline_elements_kept() {
        let doc = HtmlParser::new().parse("<p><b>a</b> <i>b</i></p>\n<p>c</p>").unwrap();
        let first = doc.tree().first_child(doc.body()).unwrap();
        assert_eq!(doc.tree().text_content(first), "a b");
        assert_eq!(doc.tree().children(doc.body()).count(), 2);
    }

    #[test]
    fn test_parse_fragment() {
        let html = "<div><span>Text</span></div>";
        let doc = HtmlParser::new().parse(html).unwrap();

        // Even fragments get wrapped in html/head/body by html5ever
        assert!(doc.body().is_valid());
        assert_eq!(doc.nav_root(), doc.body());
    }
}
