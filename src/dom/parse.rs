//! Template parsing via `tl`.
//!
//! Converts the zero-copy `tl` tree into the owned [`Document`] the
//! transforms mutate. Source text and comments are kept verbatim
//! (whitespace included) so an untouched region serializes back to the
//! template's original markup.

use super::{Attrs, Document, Element, Node, Text};
use crate::utils::html;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("template parse failed: {0}")]
    Html(#[from] tl::ParseError),
}

/// Parse a full HTML page into an owned document tree.
pub fn parse_document(source: &str) -> Result<Document, ParseError> {
    let (doctype, rest) = split_doctype(source);
    let dom = tl::parse(rest, tl::ParserOptions::default())?;
    let parser = dom.parser();

    let mut roots = Vec::new();
    for handle in dom.children() {
        if let Some(node) = convert_node(*handle, parser) {
            roots.push(node);
        }
    }

    let mut document = Document::new(roots);
    document.doctype = doctype.map(str::to_string);
    Ok(document)
}

/// Split a leading doctype declaration off the source, if present.
fn split_doctype(source: &str) -> (Option<&str>, &str) {
    let trimmed = source.trim_start();
    let lead = source.len() - trimmed.len();
    if trimmed
        .get(..9)
        .is_some_and(|s| s.eq_ignore_ascii_case("<!doctype"))
    {
        if let Some(end) = trimmed.find('>') {
            return (Some(&trimmed[..=end]), &source[lead + end + 1..]);
        }
    }
    (None, source)
}

/// Convert a tl node handle to an owned node.
fn convert_node(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();

            // tl's attribute iterator does not keep source order; collect
            // the parsed pairs, then emit them in opening-tag order
            let mut pairs: Vec<(String, Option<String>)> = tag
                .attributes()
                .iter()
                .map(|(key, value)| {
                    (
                        key.as_ref().to_string(),
                        // Source values carry entity escaping; store them cooked
                        value.map(|v| html::unescape(v.as_ref()).into_owned()),
                    )
                })
                .collect();

            let mut attrs = Attrs::new();
            for name in opening_tag_attr_names(&tag.raw().as_utf8_str()) {
                if let Some(pos) = pairs.iter().position(|(k, _)| *k == name) {
                    push_attr(&mut attrs, pairs.remove(pos));
                }
            }
            // Anything the scan missed keeps tl's order, after the rest
            for pair in pairs {
                push_attr(&mut attrs, pair);
            }

            let mut element = Element::with_attrs(tag_name, attrs);
            for child_handle in tag.children().top().iter() {
                if let Some(child) = convert_node(*child_handle, parser) {
                    element.children.push(child);
                }
            }

            Some(Node::Element(Box::new(element)))
        }
        // Keep source text verbatim, whitespace included, for round-tripping
        tl::Node::Raw(bytes) => Some(Node::Text(Text::raw(bytes.as_utf8_str().to_string()))),
        tl::Node::Comment(bytes) => Some(Node::Comment(bytes.as_utf8_str().to_string())),
    }
}

fn push_attr(attrs: &mut Attrs, (name, value): (String, Option<String>)) {
    match value {
        Some(v) => attrs.set(&name, &v),
        None => attrs.set_flag(&name),
    }
}

/// Attribute names of the opening tag, in source order.
///
/// `raw` is the tag's source text; the scan stops at the first `>` outside
/// a quoted value.
fn opening_tag_attr_names(raw: &str) -> Vec<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    // skip '<' and the tag name
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
        i += 1;
    }

    let mut names = Vec::new();
    while i < bytes.len() && bytes[i] != b'>' {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] == b'>' {
            break;
        }

        let start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        if i > start {
            names.push(raw[start..i].to_string());
        }

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i).copied() {
                Some(quote @ (b'"' | b'\'')) => {
                    i += 1;
                    while i < bytes.len() && bytes[i] != quote {
                        i += 1;
                    }
                    i += 1;
                }
                _ => {
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                }
            }
        }
    }
    names
}
