//! Minimal typed markup tree.
//!
//! Text and attribute values are always escaped at serialisation; there is no way to
//! splice raw markup into a tree built from document values.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    /// Translation key; when set, localisation replaces this element's text content.
    pub i18n: Option<&'static str>,
}

const VOID_TAGS: &[&str] = &["img", "input", "br", "meta", "link"];
const BOOLEAN_ATTRS: &[&str] = &["disabled", "readonly", "hidden", "selected", "checked"];

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
        i18n: None,
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: &'static str) -> Self {
        self.attr("class", value)
    }

    /// Adds a boolean attribute when `on` is set.
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }

    /// Tags the element with a translation key and its default-language text.
    pub fn i18n(mut self, key: &'static str, fallback: &str) -> Self {
        self.i18n = Some(key);
        self.attrs.push(("data-i18n", key.to_string()));
        self.child(text(fallback))
    }

    /// Appends the child only when `node` is `Some`.
    pub fn maybe(self, node: Option<Node>) -> Self {
        match node {
            Some(n) => self.child(n),
            None => self,
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl Node {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_text(t)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    if value.is_empty() && BOOLEAN_ATTRS.contains(name) {
                        let _ = write!(out, " {name}");
                    } else {
                        let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.write_to(out);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first visit of every element.
    pub fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        if let Node::Element(e) = self {
            f(e);
            for child in e.children.iter_mut() {
                child.visit_mut(f);
            }
        }
    }
}

pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let node: Node = el("p").text("<script>alert('x')</script> & co").into();
        assert_eq!(
            node.render(),
            "<p>&lt;script&gt;alert('x')&lt;/script&gt; &amp; co</p>"
        );
    }

    #[test]
    fn test_attribute_quotes_cannot_break_out() {
        let node: Node = el("input").attr("value", "\" onfocus=\"evil()").into();
        assert_eq!(
            node.render(),
            "<input value=\"&quot; onfocus=&quot;evil()\">"
        );
    }

    #[test]
    fn test_boolean_attribute() {
        let node: Node = el("button").flag("disabled", true).text("Go").into();
        assert_eq!(node.render(), "<button disabled>Go</button>");
        let node: Node = el("button").flag("disabled", false).text("Go").into();
        assert_eq!(node.render(), "<button>Go</button>");
    }

    #[test]
    fn test_empty_value_attribute_is_kept() {
        let node: Node = el("input").attr("value", "").into();
        assert_eq!(node.render(), "<input value=\"\">");
    }

    #[test]
    fn test_i18n_tag_sets_attribute_and_text() {
        let node: Node = el("label").i18n("label.email", "Email").into();
        assert_eq!(node.render(), "<label data-i18n=\"label.email\">Email</label>");
        assert_eq!(node.text_content(), "Email");
    }

    #[test]
    fn test_maybe_omits_missing_child() {
        let node: Node = el("div").maybe(None).into();
        assert_eq!(node.render(), "<div></div>");
    }
}
