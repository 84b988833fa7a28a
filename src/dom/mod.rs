//! Owned HTML document tree.
//!
//! The render pipeline works on a mutable tree parsed from the host
//! template:
//!
//! - [`parse_document`] - template string to [`Document`] (via `tl`)
//! - [`Node`] / [`Element`] / [`Text`] / [`Attrs`] - tree types
//! - queries - depth-first lookups by tag, id, class, attribute
//! - serialization - [`Document::to_html`] with entity escaping
//!
//! Text carries a raw flag: text parsed from the template is written back
//! verbatim (it is already source-escaped), text created from config
//! strings is escaped on write. Config content therefore can never
//! introduce markup into the output.

mod node;
mod parse;
mod serialize;

pub use node::{Attrs, Document, Element, Node, Text};
pub use parse::{ParseError, parse_document};
