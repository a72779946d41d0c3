//! Structural jump targets

use fos_dom::{Document, NodeId};

use crate::classify::{classify, NodeClass};
use crate::role::Role;

/// Kinds of element the user can jump between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Structure {
    Heading,
    /// Heading of a specific level
    HeadingLevel(u8),
    Link,
    Control,
    FormField,
    Table,
    List,
    Landmark,
    Graphic,
}

impl Structure {
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let role = Role::of(doc, node);
        match self {
            Self::Heading => matches!(role, Some(Role::Heading(_))),
            Self::HeadingLevel(level) => role == Some(Role::Heading(*level)),
            Self::Link => role == Some(Role::Link),
            Self::Control => classify(doc, node) == NodeClass::Control,
            Self::FormField => role.is_some_and(|r| r.is_form_field()),
            Self::Table => classify(doc, node) == NodeClass::Table && role != Some(Role::Presentation),
            Self::List => role == Some(Role::List),
            Self::Landmark => role.is_some_and(|r| r.is_landmark()),
            Self::Graphic => matches!(role, Some(Role::Img)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_matches() {
        let mut doc = Document::default();
        let body = doc.body();
        let h2 = doc.append_element_with_text(body, "h2", "Part").unwrap();
        let nav = doc.append_element(body, "nav").unwrap();
        let input = doc.append_element(body, "input").unwrap();
        let img = doc.append_element(body, "img").unwrap();
        doc.set_attribute(img, "alt", "Logo").unwrap();

        assert!(Structure::Heading.matches(&doc, h2));
        assert!(Structure::HeadingLevel(2).matches(&doc, h2));
        assert!(!Structure::HeadingLevel(1).matches(&doc, h2));
        assert!(Structure::Landmark.matches(&doc, nav));
        assert!(Structure::FormField.matches(&doc, input));
        assert!(Structure::Control.matches(&doc, input));
        assert!(Structure::Graphic.matches(&doc, img));
        assert!(!Structure::Link.matches(&doc, img));
    }
}
