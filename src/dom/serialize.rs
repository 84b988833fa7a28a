//! Document serialization.
//!
//! Writes the owned tree back to HTML. Non-raw text and attribute values
//! are entity-escaped here; raw text (template source, injected script
//! tags) is written verbatim. Void elements close without an end tag.

use super::{Document, Element, Node};
use crate::utils::html;

impl Document {
    /// Serialize the full page, doctype first.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(4096);
        if let Some(doctype) = &self.doctype {
            out.push_str(doctype);
        }
        write_nodes(&self.roots, false, &mut out);
        out
    }
}

impl Element {
    /// Serialize this element and its subtree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn write_nodes(nodes: &[Node], raw_text: bool, out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(el) => write_element(el, out),
            Node::Text(t) => {
                if t.raw || raw_text {
                    out.push_str(&t.content);
                } else {
                    out.push_str(&html::escape(&t.content));
                }
            }
            Node::Comment(c) => out.push_str(c),
        }
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in el.attrs.iter() {
        out.push(' ');
        out.push_str(name);
        if let Some(v) = value {
            out.push_str("=\"");
            out.push_str(&html::escape_attr(v));
            out.push('"');
        }
    }
    out.push('>');

    if html::is_void_element(&el.tag) {
        return;
    }

    write_nodes(&el.children, html::is_raw_text_element(&el.tag), out);

    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attrs, Text, parse_document};

    #[test]
    fn test_roundtrip_preserves_markup() {
        let source = "<!DOCTYPE html>\n<html><head><title>t</title></head>\n<body>\n  <p class=\"x\">hi</p>\n</body></html>";
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.to_html(), source);
    }

    #[test]
    fn test_roundtrip_keeps_attr_order() {
        let source =
            "<a class=\"resume-download\" href=\"assets/cv.pdf\" target=\"_blank\" download>Resume</a>";
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.to_html(), source);
    }

    #[test]
    fn test_bare_query_ampersand_survives_roundtrip() {
        let doc = parse_document("<a href=\"/p?a=1&b=2\">x</a>").unwrap();
        let a = doc.find_by_tag("a").unwrap();
        assert_eq!(a.attr("href"), Some("/p?a=1&b=2"));
        assert_eq!(doc.to_html(), "<a href=\"/p?a=1&amp;b=2\">x</a>");
    }

    #[test]
    fn test_escapes_generated_text() {
        let mut el = Element::new("p");
        el.set_text("<script>alert(1)</script>");
        assert_eq!(el.to_html(), "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_escapes_attr_values() {
        let mut el = Element::new("a");
        el.set_attr("href", "x\"y");
        assert_eq!(el.to_html(), "<a href=\"x&quot;y\"></a>");
    }

    #[test]
    fn test_void_element_has_no_end_tag() {
        let mut el = Element::new("br");
        el.push_text("ignored on void");
        assert_eq!(el.to_html(), "<br>");
    }

    #[test]
    fn test_boolean_attr_serializes_bare() {
        let mut attrs = Attrs::new();
        attrs.set_flag("disabled");
        let el = Element::with_attrs("input", attrs);
        assert_eq!(el.to_html(), "<input disabled>");
    }

    #[test]
    fn test_raw_text_written_verbatim() {
        let mut el = Element::new("div");
        el.push(Node::Text(Text::raw("<script src=\"/x.js\"></script>")));
        assert_eq!(el.to_html(), "<div><script src=\"/x.js\"></script></div>");
    }

    #[test]
    fn test_script_content_not_escaped() {
        let mut el = Element::new("script");
        el.push_text("if (a < b && c > d) {}");
        assert_eq!(el.to_html(), "<script>if (a < b && c > d) {}</script>");
    }

    #[test]
    fn test_source_entities_roundtrip() {
        let source = "<p>a &amp; b</p>";
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.to_html(), source);
    }
}
