//! A minimal declarative HTML tree.
//!
//! Views are plain values built with a chain of builder calls and rendered to a string at the
//! edge of the server:
//!
//! ```rust
//! use tracker_app::component::{el, Node};
//!
//! let node: Node = el("div")
//!     .class("row")
//!     .child(el("h5").text("No data found for ticker: AAPL"))
//!     .into();
//! assert_eq!(
//!     node.to_string(),
//!     r#"<div class="row"><h5>No data found for ticker: AAPL</h5></div>"#
//! );
//! ```

use serde::Serialize;
use std::fmt;
use tera::escape_html as escape;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

/// Start an element.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        id: None,
        class: None,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Element {
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    fn is_void(&self) -> bool {
        matches!(self.tag, "input" | "hr" | "br" | "img" | "meta" | "link")
    }
}

impl Node {
    /// Depth-first search for the element carrying `id`.
    pub fn find(&self, id: &str) -> Option<&Element> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) => {
                if element.id.as_deref() == Some(id) {
                    return Some(element);
                }
                element.children.iter().find_map(|child| child.find(id))
            }
        }
    }

    /// Concatenated text content, in document order.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(text) => f.write_str(&escape(text)),
            Node::Element(element) => fmt::Display::fmt(element, f),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if let Some(id) = &self.id {
            write!(f, r#" id="{}""#, escape(id))?;
        }
        if let Some(class) = &self.class {
            write!(f, r#" class="{}""#, escape(class))?;
        }
        for (name, value) in &self.attrs {
            write!(f, r#" {name}="{}""#, escape(value))?;
        }
        write!(f, ">")?;

        if self.is_void() {
            return Ok(());
        }
        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}
