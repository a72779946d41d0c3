//! fOS HTML Parser
//!
//! HTML5 loader built on html5ever. Produces a live `fos_dom::Document`
//! that the reader can navigate and the host can keep mutating.

mod parser;

pub use parser::HtmlParser;
pub use fos_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// HTML loading error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("Failed to read markup: {0}")]
    Io(#[from] std::io::Error),
}
