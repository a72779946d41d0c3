//! Navigation descriptions
//!
//! What a walker says about a selection: surrounding context, the text
//! itself, an annotation such as the role, and an optional earcon cue.

use fos_dom::{Document, NodeId};

use crate::classify::{collapse_whitespace, leaf_text};
use crate::role::Role;
use crate::walker::table::TableGrid;

/// Non-speech audio cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Earcon {
    WrapToTop,
    WrapToBottom,
    /// A table move hit the edge of the grid
    TableBoundary,
    Selection,
    Link,
    Button,
    CheckOn,
    CheckOff,
    EditableText,
}

/// How the speech engine should render the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechHint {
    #[default]
    Normal,
    /// Read letter by letter
    Spell,
    /// Slightly emphasized, used for headings
    Emphasis,
}

/// One piece of speech output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavDescription {
    pub context: String,
    pub text: String,
    pub annotation: String,
    pub earcon: Option<Earcon>,
    pub hint: SpeechHint,
}

impl NavDescription {
    pub fn new(context: impl Into<String>, text: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self { context: context.into(), text: text.into(), annotation: annotation.into(), ..Self::default() }
    }

    /// A cue with nothing to say
    pub fn cue(earcon: Earcon) -> Self {
        Self { earcon: Some(earcon), ..Self::default() }
    }

    pub fn with_earcon(mut self, earcon: Earcon) -> Self {
        self.earcon = Some(earcon);
        self
    }

    pub fn with_hint(mut self, hint: SpeechHint) -> Self {
        self.hint = hint;
        self
    }

    /// True when there is neither speech nor a cue
    pub fn is_empty(&self) -> bool {
        self.context.is_empty() && self.text.is_empty() && self.annotation.is_empty() && self.earcon.is_none()
    }

    /// Context, text and annotation as one utterance
    pub fn spoken(&self) -> String {
        [self.context.as_str(), self.text.as_str(), self.annotation.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Structures entered when moving from `prev` to `cur`, outermost first
pub(crate) fn ancestry_context(doc: &Document, prev: Option<NodeId>, cur: NodeId) -> String {
    let root = doc.nav_root();
    let tree = doc.tree();
    let mut entered: Vec<String> = tree
        .ancestors(cur)
        .take_while(|&a| a != root)
        .filter(|&a| prev.is_none_or(|p| !tree.contains(a, p)))
        .filter_map(|a| context_label(doc, a))
        .collect();
    entered.reverse();
    entered.join(", ")
}

fn context_label(doc: &Document, node: NodeId) -> Option<String> {
    let role = Role::of(doc, node)?;
    let label = match role {
        Role::Heading(level) => format!("heading {}", level),
        Role::List => {
            let items = doc.tree().children(node).filter(|&c| Role::of(doc, c) == Some(Role::ListItem)).count();
            format!("list with {} items", items)
        }
        Role::Table | Role::Grid | Role::TreeGrid => {
            let grid = TableGrid::build(doc, node);
            format!("{} with {} rows and {} columns", role.label(), grid.rows(), grid.cols())
        }
        r if r.is_landmark() || matches!(r, Role::Dialog | Role::Article | Role::Figure) => r.label().to_string(),
        _ => return None,
    };
    match doc.attr(node, "aria-label").map(str::trim) {
        Some(name) if !name.is_empty() => Some(format!("{} {}", label, name)),
        _ => Some(label),
    }
}

/// Describe one leaf, or a slice of its text
pub(crate) fn describe_leaf(doc: &Document, leaf: NodeId, slice: Option<&str>, context: String) -> NavDescription {
    let text = match slice {
        Some(s) => s.to_string(),
        None => collapse_whitespace(&leaf_text(doc, leaf)),
    };
    let mut desc = NavDescription::new(context, text, "");

    match Role::of(doc, leaf) {
        Some(role @ (Role::Checkbox | Role::Radio | Role::Switch)) => {
            let checked = is_checked(doc, leaf);
            let state = if checked { "checked" } else { "not checked" };
            desc.annotation = format!("{} {}", role.label(), state);
            desc.earcon = Some(if checked { Earcon::CheckOn } else { Earcon::CheckOff });
        }
        Some(role) => {
            desc.annotation = role.label().to_string();
            desc.earcon = match role {
                Role::Link => Some(Earcon::Link),
                Role::Button => Some(Earcon::Button),
                Role::TextBox | Role::SearchBox => Some(Earcon::EditableText),
                _ => None,
            };
        }
        None if !doc.is_text(leaf) => {
            desc.annotation = doc.tag(leaf).unwrap_or_default().to_string();
        }
        None => {}
    }

    if in_heading(doc, leaf) {
        desc.hint = SpeechHint::Emphasis;
    }
    desc
}

/// Describe a run of leaves, each leaf getting its own entry.
///
/// Output stops once `max_chars` of text have been produced; the last entry
/// is cut at a word boundary.
pub(crate) fn describe_leaves(
    doc: &Document,
    prev: NodeId,
    leaves: &[NodeId],
    mut context: String,
    max_chars: usize,
) -> Vec<NavDescription> {
    let mut out = Vec::new();
    let mut budget = max_chars;
    let mut last = prev;
    for &leaf in leaves {
        let entered = ancestry_context(doc, Some(last), leaf);
        let context = match (context.is_empty(), entered.is_empty()) {
            (true, _) => entered,
            (false, true) => std::mem::take(&mut context),
            (false, false) => format!("{}, {}", std::mem::take(&mut context), entered),
        };
        let mut desc = describe_leaf(doc, leaf, None, context);
        last = leaf;
        if desc.text.len() > budget {
            desc.text = truncate_words(&desc.text, budget).to_string();
            out.push(desc);
            break;
        }
        budget -= desc.text.len();
        out.push(desc);
    }
    out
}

/// Longest prefix of at most `max` bytes that ends at a word boundary
pub(crate) fn truncate_words(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let head = &text[..cut];
    if text[cut..].starts_with(char::is_whitespace) {
        return head.trim_end();
    }
    match head.rfind(char::is_whitespace) {
        Some(ws) if ws > 0 => head[..ws].trim_end(),
        _ => head,
    }
}

fn is_checked(doc: &Document, node: NodeId) -> bool {
    doc.attr(node, "checked").is_some() || doc.attr(node, "aria-checked").is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

fn in_heading(doc: &Document, node: NodeId) -> bool {
    let root = doc.nav_root();
    doc.tree()
        .ancestors(node)
        .take_while(|&a| a != root)
        .any(|a| matches!(Role::of(doc, a), Some(Role::Heading(_))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spoken_joins_parts() {
        let desc = NavDescription::new("heading 1", "Welcome", "");
        assert_eq!(desc.spoken(), "heading 1 Welcome");
        assert!(NavDescription::default().is_empty());
        assert!(!NavDescription::cue(Earcon::WrapToTop).is_empty());
    }

    #[test]
    fn test_context_lists_entered_structures() {
        let mut doc = Document::default();
        let body = doc.body();
        let nav = doc.append_element(body, "nav").unwrap();
        let ul = doc.append_element(nav, "ul").unwrap();
        let li = doc.append_element_with_text(ul, "li", "Home").unwrap();
        doc.append_element_with_text(ul, "li", "About").unwrap();
        let intro = doc.append_element_with_text(body, "p", "Intro").unwrap();
        let home = doc.tree().first_child(li).unwrap();
        let intro_text = doc.tree().first_child(intro).unwrap();

        assert_eq!(ancestry_context(&doc, Some(intro_text), home), "navigation, list with 2 items");
        assert_eq!(ancestry_context(&doc, None, home), "navigation, list with 2 items");
        let about = doc.tree().first_child(doc.tree().last_child(ul).unwrap()).unwrap();
        assert_eq!(ancestry_context(&doc, Some(home), about), "");
    }

    #[test]
    fn test_describe_checkbox() {
        let mut doc = Document::default();
        let body = doc.body();
        let input = doc.append_element(body, "input").unwrap();
        doc.set_attribute(input, "type", "checkbox").unwrap();
        doc.set_attribute(input, "aria-label", "Subscribe").unwrap();
        let desc = describe_leaf(&doc, input, None, String::new());
        assert_eq!(desc.text, "Subscribe");
        assert_eq!(desc.annotation, "check box not checked");
        assert_eq!(desc.earcon, Some(Earcon::CheckOff));
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("short", 10), "short");
        assert_eq!(truncate_words("one two three", 8), "one two");
        assert_eq!(truncate_words("one two three", 7), "one two");
        assert_eq!(truncate_words("unbroken", 3), "unb");
    }

    #[test]
    fn test_describe_leaves_budget() {
        let mut doc = Document::default();
        let body = doc.body();
        let p = doc.append_element(body, "p").unwrap();
        let a = doc.append_text(p, "alpha beta").unwrap();
        let em = doc.append_element(p, "em").unwrap();
        let b = doc.append_text(em, "gamma delta").unwrap();
        let c = doc.append_text(p, "omega").unwrap();
        let out = describe_leaves(&doc, body, &[a, b, c], "table".into(), 16);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].context, "table");
        assert_eq!(out[0].text, "alpha beta");
        assert_eq!(out[1].text, "gamma");
    }

    #[test]
    fn test_heading_text_is_emphasized() {
        let mut doc = Document::default();
        let body = doc.body();
        let h1 = doc.append_element_with_text(body, "h1", "Title").unwrap();
        let text = doc.tree().first_child(h1).unwrap();
        let desc = describe_leaf(&doc, text, Some("Title"), "heading 1".into());
        assert_eq!(desc.hint, SpeechHint::Emphasis);
        assert_eq!(desc.annotation, "");
    }
}
