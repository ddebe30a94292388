use std::cell::RefCell;
use std::rc::Rc;

/// A shared handle to one display node. Content is either plain text or a
/// fragment of literal runs and id-tagged child spans; writing plain text
/// discards any children, so handles resolved from an earlier fragment go
/// stale and must be re-queried.
///
/// Handles are `Rc`-based and single-threaded: every write lands on the
/// one event loop that owns the widget.
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<Content>>,
}

enum Content {
    Text(String),
    Fragment(Vec<Node>),
}

pub enum Node {
    Literal(&'static str),
    Span { id: &'static str, element: Element },
}

impl Node {
    /// A child span with the given id and initial text.
    pub fn span(id: &'static str, text: &str) -> Self {
        Node::Span {
            id,
            element: Element::text(text),
        }
    }
}

impl Element {
    pub fn new() -> Self {
        Self::text("")
    }

    pub fn text(initial: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Content::Text(initial.to_string()))),
        }
    }

    /// Replace the entire content with plain text. Child spans are discarded.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.inner.borrow_mut() = Content::Text(text.into());
    }

    /// Install a fragment of literals and child spans.
    pub fn set_fragment(&self, nodes: Vec<Node>) {
        *self.inner.borrow_mut() = Content::Fragment(nodes);
    }

    /// Resolve a child span by id from the current content. Returns `None`
    /// once the content has been replaced with plain text.
    pub fn query(&self, id: &str) -> Option<Element> {
        match &*self.inner.borrow() {
            Content::Text(_) => None,
            Content::Fragment(nodes) => nodes.iter().find_map(|node| match node {
                Node::Span {
                    id: span_id,
                    element,
                } if *span_id == id => Some(element.clone()),
                _ => None,
            }),
        }
    }

    /// Serialize the content with child spans rendered as
    /// `<span id="...">text</span>`.
    pub fn inner_html(&self) -> String {
        match &*self.inner.borrow() {
            Content::Text(text) => text.clone(),
            Content::Fragment(nodes) => {
                let mut out = String::new();
                for node in nodes {
                    match node {
                        Node::Literal(literal) => out.push_str(literal),
                        Node::Span { id, element } => {
                            out.push_str("<span id=\"");
                            out.push_str(id);
                            out.push_str("\">");
                            out.push_str(&element.inner_html());
                            out.push_str("</span>");
                        }
                    }
                }
                out
            }
        }
    }

    /// Tag-free concatenation of the content.
    pub fn text_content(&self) -> String {
        match &*self.inner.borrow() {
            Content::Text(text) => text.clone(),
            Content::Fragment(nodes) => {
                let mut out = String::new();
                for node in nodes {
                    match node {
                        Node::Literal(literal) => out.push_str(literal),
                        Node::Span { element, .. } => out.push_str(&element.text_content()),
                    }
                }
                out
            }
        }
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_serializes_with_span_tags() {
        let el = Element::new();
        el.set_fragment(vec![
            Node::Literal("a "),
            Node::span("x", "1"),
            Node::Literal(" b"),
        ]);
        assert_eq!(el.inner_html(), "a <span id=\"x\">1</span> b");
        assert_eq!(el.text_content(), "a 1 b");
    }

    #[test]
    fn queried_span_writes_show_in_parent() {
        let el = Element::new();
        el.set_fragment(vec![Node::Literal("n="), Node::span("n", "0")]);
        let n = el.query("n").unwrap();
        n.set_text("42");
        assert_eq!(el.inner_html(), "n=<span id=\"n\">42</span>");
        assert_eq!(el.text_content(), "n=42");
    }

    #[test]
    fn set_text_discards_children() {
        let el = Element::new();
        el.set_fragment(vec![Node::span("x", "1")]);
        assert!(el.query("x").is_some());
        el.set_text("gone");
        assert!(el.query("x").is_none());
        assert_eq!(el.inner_html(), "gone");
    }

    #[test]
    fn query_unknown_id_is_none() {
        let el = Element::new();
        el.set_fragment(vec![Node::span("x", "1")]);
        assert!(el.query("y").is_none());
    }
}
