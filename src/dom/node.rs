//! Tree node types and queries.

use smallvec::SmallVec;
use std::borrow::Cow;

use crate::utils::html;

/// A single node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
    /// Comment span kept verbatim (includes the `<!--`/`-->` markers).
    Comment(String),
}

/// Text content.
///
/// `raw` text is written back verbatim on serialization (already
/// source-escaped, or trusted generated markup such as the script tags the
/// asset transform injects). Non-raw text is entity-escaped on write.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub raw: bool,
}

impl Text {
    /// Plain text, escaped when serialized.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            raw: false,
        }
    }

    /// Verbatim text, written as-is when serialized.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            raw: true,
        }
    }

    /// Content with entities decoded (raw text carries source escaping).
    pub fn cooked(&self) -> Cow<'_, str> {
        if self.raw {
            html::unescape(&self.content)
        } else {
            Cow::Borrowed(&self.content)
        }
    }
}

/// Ordered attribute list.
///
/// A `None` value is a boolean attribute (`disabled`), serialized as the
/// bare name. Order is preserved so templates round-trip cleanly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs {
    items: SmallVec<[(String, Option<String>); 4]>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value; boolean attributes yield `""`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has(&self, name: &str) -> bool {
        self.items.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute, replacing any existing value.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(item) = self.items.iter_mut().find(|(n, _)| n == name) {
            item.1 = Some(value.to_string());
        } else {
            self.items.push((name.to_string(), Some(value.to_string())));
        }
    }

    /// Set a boolean attribute (serialized as the bare name).
    pub fn set_flag(&mut self, name: &str) {
        if let Some(item) = self.items.iter_mut().find(|(n, _)| n == name) {
            item.1 = None;
        } else {
            self.items.push((name.to_string(), None));
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.items.retain(|(n, _)| n != name);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.items.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Attrs {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut attrs = Self::new();
        for (name, value) in pairs {
            attrs.set(name, value);
        }
        attrs
    }
}

/// An element node: tag, attributes, ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Attrs,
    pub children: SmallVec<[Node; 4]>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            children: SmallVec::new(),
        }
    }

    pub fn with_attrs(tag: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children: SmallVec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.set(name, value);
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|part| part == class))
    }

    /// Append a class, keeping existing ones.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        match self.attr("class") {
            Some(existing) if !existing.is_empty() => {
                let merged = format!("{existing} {class}");
                self.set_attr("class", &merged);
            }
            _ => self.set_attr("class", class),
        }
    }

    /// True if `name` exists and its value contains `needle`.
    pub fn attr_contains(&self, name: &str, needle: &str) -> bool {
        self.attr(name).is_some_and(|v| v.contains(needle))
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn push_elem(&mut self, element: Element) {
        self.children.push(Node::Element(Box::new(element)));
    }

    pub fn push_text(&mut self, text: &str) {
        self.children.push(Node::Text(Text::new(text)));
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        self.children.push(Node::Text(Text::new(text)));
    }

    /// Concatenated descendant text with entities decoded.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el.as_ref()),
            _ => None,
        })
    }

    // -------------------------------------------------------------------------
    // Queries (depth-first, first match)
    // -------------------------------------------------------------------------

    pub fn find_element<F>(&self, pred: &F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        find_in_element(self, pred)
    }

    pub fn find_element_mut<F>(&mut self, pred: &F) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool,
    {
        find_in_element_mut(self, pred)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        self.find_element(&|el: &Element| el.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.find_element_mut(&|el: &Element| el.tag == tag)
    }

    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.find_element_mut(&|el: &Element| el.has_class(class))
    }

    /// Count matching descendants (the element itself included).
    pub fn count_elements<F>(&self, pred: &F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        let mut count = usize::from(pred(self));
        visit_elements(&self.children, &mut |el| {
            if pred(el) {
                count += 1;
            }
        });
        count
    }

    /// Nth matching descendant in depth-first order (self included).
    pub fn find_nth_element_mut<F>(&mut self, pred: &F, nth: usize) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut remaining = nth;
        find_nth_in_element_mut(self, pred, &mut remaining)
    }

    /// Paragraph immediately following a heading whose trimmed text equals
    /// `label`. Heading and paragraph must be element siblings; the first
    /// qualifying pair in tree order wins; later duplicates are ignored.
    pub fn find_labeled_paragraph_mut(
        &mut self,
        heading_tag: &str,
        label: &str,
    ) -> Option<&mut Element> {
        if let Some(index) = labeled_paragraph_index(&self.children, heading_tag, label) {
            match self.children.get_mut(index) {
                Some(Node::Element(p)) => Some(p),
                _ => None,
            }
        } else {
            self.children.iter_mut().find_map(|child| match child {
                Node::Element(el) => el.find_labeled_paragraph_mut(heading_tag, label),
                _ => None,
            })
        }
    }
}

/// A parsed page: optional doctype line plus root nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The doctype span verbatim (e.g. `<!DOCTYPE html>`), if present.
    pub doctype: Option<String>,
    pub roots: Vec<Node>,
}

impl Document {
    pub fn new(roots: Vec<Node>) -> Self {
        Self {
            doctype: None,
            roots,
        }
    }

    pub fn find_element<F>(&self, pred: &F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        find_in_nodes(&self.roots, pred)
    }

    pub fn find_element_mut<F>(&mut self, pred: &F) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool,
    {
        find_in_nodes_mut(&mut self.roots, pred)
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        self.find_element(&|el: &Element| el.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.find_element_mut(&|el: &Element| el.tag == tag)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.find_element_mut(&|el: &Element| el.id() == Some(id))
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find_element(&|el: &Element| el.has_class(class))
    }

    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.find_element_mut(&|el: &Element| el.has_class(class))
    }

    pub fn head_mut(&mut self) -> Option<&mut Element> {
        self.find_by_tag_mut("head")
    }

    pub fn body_mut(&mut self) -> Option<&mut Element> {
        self.find_by_tag_mut("body")
    }

    /// Visit every element depth-first (parents before children).
    pub fn visit_elements_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        visit_elements_mut(&mut self.roots, f);
    }

    /// Visit every element depth-first, immutably.
    pub fn visit_elements<F>(&self, f: &mut F)
    where
        F: FnMut(&Element),
    {
        visit_elements(&self.roots, f);
    }

    pub fn count_elements<F>(&self, pred: &F) -> usize
    where
        F: Fn(&Element) -> bool,
    {
        let mut count = 0;
        visit_elements(&self.roots, &mut |el| {
            if pred(el) {
                count += 1;
            }
        });
        count
    }

    /// Nth matching element in depth-first document order.
    pub fn find_nth_element_mut<F>(&mut self, pred: &F, nth: usize) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut remaining = nth;
        for node in &mut self.roots {
            if let Node::Element(el) = node {
                if let Some(found) = find_nth_in_element_mut(el, pred, &mut remaining) {
                    return Some(found);
                }
            }
        }
        None
    }
}

// =============================================================================
// Recursive search helpers
// =============================================================================

fn find_in_element<'a, F>(element: &'a Element, pred: &F) -> Option<&'a Element>
where
    F: Fn(&Element) -> bool,
{
    if pred(element) {
        return Some(element);
    }
    find_in_nodes(&element.children, pred)
}

fn find_in_nodes<'a, F>(nodes: &'a [Node], pred: &F) -> Option<&'a Element>
where
    F: Fn(&Element) -> bool,
{
    for node in nodes {
        if let Node::Element(el) = node {
            if let Some(found) = find_in_element(el, pred) {
                return Some(found);
            }
        }
    }
    None
}

fn find_in_element_mut<'a, F>(element: &'a mut Element, pred: &F) -> Option<&'a mut Element>
where
    F: Fn(&Element) -> bool,
{
    if pred(element) {
        return Some(element);
    }
    find_in_nodes_mut(&mut element.children, pred)
}

fn find_in_nodes_mut<'a, F>(nodes: &'a mut [Node], pred: &F) -> Option<&'a mut Element>
where
    F: Fn(&Element) -> bool,
{
    for node in nodes {
        if let Node::Element(el) = node {
            if let Some(found) = find_in_element_mut(el, pred) {
                return Some(found);
            }
        }
    }
    None
}

fn find_nth_in_element_mut<'a, F>(
    element: &'a mut Element,
    pred: &F,
    remaining: &mut usize,
) -> Option<&'a mut Element>
where
    F: Fn(&Element) -> bool,
{
    if pred(element) {
        if *remaining == 0 {
            return Some(element);
        }
        *remaining -= 1;
    }
    for node in element.children.iter_mut() {
        if let Node::Element(el) = node {
            if let Some(found) = find_nth_in_element_mut(el, pred, remaining) {
                return Some(found);
            }
        }
    }
    None
}

fn visit_elements_mut<F>(nodes: &mut [Node], f: &mut F)
where
    F: FnMut(&mut Element),
{
    for node in nodes {
        if let Node::Element(el) = node {
            f(el);
            visit_elements_mut(&mut el.children, f);
        }
    }
}

fn visit_elements<F>(nodes: &[Node], f: &mut F)
where
    F: FnMut(&Element),
{
    for node in nodes {
        if let Node::Element(el) = node {
            f(el);
            visit_elements(&el.children, f);
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(el) => collect_text(&el.children, out),
            Node::Text(t) => out.push_str(&t.cooked()),
            Node::Comment(_) => {}
        }
    }
}

/// Index of the first paragraph directly preceded (among element siblings)
/// by a matching heading, within one child list.
fn labeled_paragraph_index(nodes: &[Node], heading_tag: &str, label: &str) -> Option<usize> {
    for (i, node) in nodes.iter().enumerate() {
        let Node::Element(heading) = node else {
            continue;
        };
        if heading.tag != heading_tag || heading.text().trim() != label {
            continue;
        }
        // Next element sibling must be a paragraph
        for (j, sibling) in nodes.iter().enumerate().skip(i + 1) {
            match sibling {
                Node::Element(p) if p.tag == "p" => return Some(j),
                Node::Element(_) => break,
                _ => {}
            }
        }
    }
    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let mut root = Element::new("div");
        root.set_attr("id", "root");
        let mut inner = Element::new("section");
        inner.set_attr("class", "hero primary");
        let mut title = Element::new("h1");
        title.push_text("Hello");
        inner.push_elem(title);
        root.push_elem(inner);
        root
    }

    #[test]
    fn test_find_by_tag() {
        let root = sample();
        assert!(root.find_by_tag("h1").is_some());
        assert!(root.find_by_tag("table").is_none());
    }

    #[test]
    fn test_find_by_class_matches_whole_words() {
        let mut root = sample();
        assert!(root.find_by_class_mut("hero").is_some());
        assert!(root.find_by_class_mut("primary").is_some());
        // substring of a class name is not a match
        assert!(root.find_by_class_mut("her").is_none());
    }

    #[test]
    fn test_add_class() {
        let mut el = Element::new("div");
        el.add_class("card");
        el.add_class("featured");
        el.add_class("card"); // no duplicate
        assert_eq!(el.attr("class"), Some("card featured"));
    }

    #[test]
    fn test_set_text_replaces_children() {
        let mut el = Element::new("p");
        el.push_elem(Element::new("span"));
        el.set_text("plain");
        assert_eq!(el.children.len(), 1);
        assert_eq!(el.text(), "plain");
    }

    #[test]
    fn test_text_concatenates_descendants() {
        let root = sample();
        assert_eq!(root.text(), "Hello");
    }

    #[test]
    fn test_attrs_boolean_flag() {
        let mut attrs = Attrs::new();
        attrs.set_flag("disabled");
        assert!(attrs.has("disabled"));
        assert_eq!(attrs.get("disabled"), Some(""));
    }

    #[test]
    fn test_attr_contains() {
        let mut el = Element::new("a");
        el.set_attr("href", "mailto:me@example.com");
        assert!(el.attr_contains("href", "mailto:"));
        assert!(!el.attr_contains("href", "https:"));
    }

    #[test]
    fn test_find_nth_element() {
        let mut root = Element::new("div");
        for name in ["a", "b", "c"] {
            let mut cat = Element::new("div");
            cat.set_attr("class", "skill-category");
            cat.set_attr("data-name", name);
            root.push_elem(cat);
        }
        let pred = |el: &Element| el.has_class("skill-category");
        assert_eq!(root.count_elements(&pred), 3);
        let first = root.find_nth_element_mut(&pred, 0).unwrap();
        assert_eq!(first.attr("data-name"), Some("a"));
        let last = root.find_nth_element_mut(&pred, 2).unwrap();
        assert_eq!(last.attr("data-name"), Some("c"));
    }

    #[test]
    fn test_labeled_paragraph_first_match_wins() {
        let mut region = Element::new("div");
        for (label, body) in [("Goals", "first"), ("Goals", "second")] {
            let mut h = Element::new("h3");
            h.push_text(label);
            region.push_elem(h);
            let mut p = Element::new("p");
            p.push_text(body);
            region.push_elem(p);
        }
        let found = region.find_labeled_paragraph_mut("h3", "Goals").unwrap();
        assert_eq!(found.text(), "first");
    }

    #[test]
    fn test_labeled_paragraph_requires_adjacency() {
        let mut region = Element::new("div");
        let mut h = Element::new("h3");
        h.push_text("Goals");
        region.push_elem(h);
        // A div sits between heading and paragraph
        region.push_elem(Element::new("div"));
        let mut p = Element::new("p");
        p.push_text("body");
        region.push_elem(p);

        assert!(region.find_labeled_paragraph_mut("h3", "Goals").is_none());
    }

    #[test]
    fn test_labeled_paragraph_tolerates_text_between() {
        let mut region = Element::new("div");
        let mut h = Element::new("h3");
        h.push_text(" Goals "); // trimmed comparison
        region.push_elem(h);
        region.push(Node::Text(Text::raw("\n  ")));
        let mut p = Element::new("p");
        p.push_text("body");
        region.push_elem(p);

        let found = region.find_labeled_paragraph_mut("h3", "Goals").unwrap();
        assert_eq!(found.text(), "body");
    }

    #[test]
    fn test_labeled_paragraph_no_match_is_none() {
        let mut region = Element::new("div");
        let mut h = Element::new("h3");
        h.push_text("Other");
        region.push_elem(h);
        assert!(region.find_labeled_paragraph_mut("h3", "Goals").is_none());
    }
}
