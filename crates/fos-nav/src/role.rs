//! ARIA roles
//!
//! Explicit `role` attributes win; otherwise the role is implied by the tag.

use fos_dom::{Document, NodeId};

/// ARIA role, limited to what navigation distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    // === Landmark Roles ===
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // === Widget Roles ===
    Button,
    Checkbox,
    ComboBox,
    Link,
    ListBox,
    MenuItem,
    Option,
    Radio,
    SearchBox,
    Slider,
    SpinButton,
    Switch,
    Tab,
    TextBox,

    // === Document Structure Roles ===
    Article,
    Cell,
    ColumnHeader,
    Dialog,
    Document,
    Figure,
    Grid,
    GridCell,
    Heading(u8),
    Img,
    List,
    ListItem,
    Math,
    Presentation,
    Row,
    RowHeader,
    Separator,
    Table,
    TreeGrid,
}

impl Role {
    /// Parse a role token. Headings default to level 2.
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_lowercase().as_str() {
            // Landmark roles
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,

            // Widget roles
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "combobox" => Self::ComboBox,
            "link" => Self::Link,
            "listbox" => Self::ListBox,
            "menuitem" | "menuitemcheckbox" | "menuitemradio" => Self::MenuItem,
            "option" => Self::Option,
            "radio" => Self::Radio,
            "searchbox" => Self::SearchBox,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "textbox" => Self::TextBox,

            // Document structure roles
            "article" => Self::Article,
            "cell" => Self::Cell,
            "columnheader" => Self::ColumnHeader,
            "dialog" | "alertdialog" => Self::Dialog,
            "document" => Self::Document,
            "figure" => Self::Figure,
            "grid" => Self::Grid,
            "gridcell" => Self::GridCell,
            "heading" => Self::Heading(2),
            "img" | "image" => Self::Img,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "math" => Self::Math,
            "none" | "presentation" => Self::Presentation,
            "row" => Self::Row,
            "rowheader" => Self::RowHeader,
            "separator" => Self::Separator,
            "table" => Self::Table,
            "treegrid" => Self::TreeGrid,
            _ => return None,
        })
    }

    /// Role of a node, explicit or implied
    pub fn of(doc: &Document, node: NodeId) -> Option<Self> {
        if let Some(explicit) = doc.role(node).as_deref().and_then(Self::parse) {
            return Some(match explicit {
                Self::Heading(_) => Self::Heading(aria_level(doc, node).unwrap_or(2)),
                other => other,
            });
        }
        Self::implicit(doc, node)
    }

    fn implicit(doc: &Document, node: NodeId) -> Option<Self> {
        let tag = doc.tag(node)?;
        Some(match tag {
            "a" | "area" if doc.attr(node, "href").is_some() => Self::Link,
            "button" | "summary" => Self::Button,
            "input" => return input_role(doc.attr(node, "type").unwrap_or("text")),
            "textarea" => Self::TextBox,
            "select" => {
                let size = doc.attr(node, "size").and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(1);
                if doc.attr(node, "multiple").is_some() || size > 1 { Self::ListBox } else { Self::ComboBox }
            }
            "option" => Self::Option,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading(tag.as_bytes()[1] - b'0'),
            "ul" | "ol" | "menu" => Self::List,
            "li" => Self::ListItem,
            "table" => Self::Table,
            "tr" => Self::Row,
            "td" => Self::Cell,
            "th" => match doc.attr(node, "scope").map(str::to_ascii_lowercase).as_deref() {
                Some("row") | Some("rowgroup") => Self::RowHeader,
                _ => Self::ColumnHeader,
            },
            "img" if doc.attr(node, "alt") == Some("") => Self::Presentation,
            "img" | "svg" => Self::Img,
            "math" => Self::Math,
            "iframe" => Self::Document,
            "nav" => Self::Navigation,
            "main" => Self::Main,
            "header" if !inside_sectioning(doc, node) => Self::Banner,
            "footer" if !inside_sectioning(doc, node) => Self::ContentInfo,
            "aside" => Self::Complementary,
            "form" => Self::Form,
            "search" => Self::Search,
            "section" if doc.attr(node, "aria-label").is_some() => Self::Region,
            "article" => Self::Article,
            "dialog" => Self::Dialog,
            "figure" => Self::Figure,
            "hr" => Self::Separator,
            _ => return None,
        })
    }

    /// Check if landmark role
    pub fn is_landmark(&self) -> bool {
        matches!(
            self,
            Self::Banner
                | Self::Complementary
                | Self::ContentInfo
                | Self::Form
                | Self::Main
                | Self::Navigation
                | Self::Region
                | Self::Search
        )
    }

    /// Check if widget role
    pub fn is_widget(&self) -> bool {
        matches!(
            self,
            Self::Button
                | Self::Checkbox
                | Self::ComboBox
                | Self::Link
                | Self::ListBox
                | Self::MenuItem
                | Self::Option
                | Self::Radio
                | Self::SearchBox
                | Self::Slider
                | Self::SpinButton
                | Self::Switch
                | Self::Tab
                | Self::TextBox
        )
    }

    /// Form controls a user fills in
    pub fn is_form_field(&self) -> bool {
        matches!(
            self,
            Self::Checkbox
                | Self::ComboBox
                | Self::ListBox
                | Self::Radio
                | Self::SearchBox
                | Self::Slider
                | Self::SpinButton
                | Self::Switch
                | Self::TextBox
        )
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table | Self::Grid | Self::TreeGrid)
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Self::Cell | Self::GridCell | Self::ColumnHeader | Self::RowHeader)
    }

    pub fn is_header_cell(&self) -> bool {
        matches!(self, Self::ColumnHeader | Self::RowHeader)
    }

    /// Spoken name of the role
    pub fn label(&self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Complementary => "complementary",
            Self::ContentInfo => "content info",
            Self::Form => "form",
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Region => "region",
            Self::Search => "search",
            Self::Button => "button",
            Self::Checkbox => "check box",
            Self::ComboBox => "combo box",
            Self::Link => "link",
            Self::ListBox => "list box",
            Self::MenuItem => "menu item",
            Self::Option => "option",
            Self::Radio => "radio button",
            Self::SearchBox | Self::TextBox => "edit text",
            Self::Slider => "slider",
            Self::SpinButton => "spin button",
            Self::Switch => "switch",
            Self::Tab => "tab",
            Self::Article => "article",
            Self::Cell | Self::GridCell => "cell",
            Self::ColumnHeader => "column header",
            Self::Dialog => "dialog",
            Self::Document => "frame",
            Self::Figure => "figure",
            Self::Grid => "grid",
            Self::Heading(_) => "heading",
            Self::Img => "image",
            Self::List => "list",
            Self::ListItem => "list item",
            Self::Math => "math",
            Self::Presentation => "",
            Self::Row => "row",
            Self::RowHeader => "row header",
            Self::Separator => "separator",
            Self::Table => "table",
            Self::TreeGrid => "tree grid",
        }
    }
}

fn input_role(input_type: &str) -> Option<Role> {
    Some(match input_type.to_ascii_lowercase().as_str() {
        "hidden" => return None,
        "checkbox" => Role::Checkbox,
        "radio" => Role::Radio,
        "button" | "submit" | "reset" | "image" => Role::Button,
        "range" => Role::Slider,
        "number" => Role::SpinButton,
        "search" => Role::SearchBox,
        _ => Role::TextBox,
    })
}

fn aria_level(doc: &Document, node: NodeId) -> Option<u8> {
    doc.attr(node, "aria-level")?.trim().parse().ok().filter(|l| (1..=9).contains(l))
}

fn inside_sectioning(doc: &Document, node: NodeId) -> bool {
    doc.tree()
        .ancestors(node)
        .any(|a| matches!(doc.tag(a), Some("article" | "aside" | "main" | "nav" | "section")))
}
