//! Edge case tests for fos-html
//!
//! Malformed and unusual markup must still produce a navigable document.

use fos_html::HtmlParser;

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_only_whitespace() {
    let doc = HtmlParser::new().parse("   \t\n\r\n   ").unwrap();
    assert_eq!(doc.tree().first_child(doc.body()), None);
}

#[test]
fn test_parse_only_doctype() {
    let doc = HtmlParser::new().parse("<!DOCTYPE html>").unwrap();
    assert!(doc.body().is_valid());
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let doc = HtmlParser::new().parse("<div><p><span>text").unwrap();
    assert_eq!(doc.tree().text_content(doc.body()), "text");
}

#[test]
fn test_parse_entities() {
    let doc = HtmlParser::new().parse("<p>&lt;tag&gt; &amp; done</p>").unwrap();
    assert_eq!(doc.tree().text_content(doc.body()), "<tag> & done");
}

#[test]
fn test_parse_large_document() {
    let mut html = String::from("<html><body>");
    for i in 0..1000 {
        html.push_str(&format!("<p>Paragraph {}</p>", i));
    }
    html.push_str("</body></html>");

    let doc = HtmlParser::new().parse(&html).unwrap();
    assert_eq!(doc.tree().children(doc.body()).count(), 1000);
}
