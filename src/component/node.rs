//! Render tree nodes and HTML serialization

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::component::{ComponentError, ComponentInstance, Props};

/// What a node in the render tree represents
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A plain element such as `main` or `div`
    Element(String),
    /// Escaped text content
    Text(String),
    /// A component that renders into further nodes
    Component(ComponentInstance),
}

/// A node in the UI tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,

    /// Node attributes, kept ordered so serialization is stable
    attributes: BTreeMap<String, String>,

    /// Child nodes
    children: Vec<Node>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create an element node
    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Element(tag.into()))
    }

    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    /// Create a node backed by a component instance
    pub fn component(instance: ComponentInstance) -> Self {
        Self::new(NodeKind::Component(instance))
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder-style child setter
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Builder-style setter appending several children
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Add an attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Element tag, if this is an element node
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// Get attributes
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Get a single attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Get a reference to the node's children
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Get the component instance
    pub fn component_instance(&self) -> Option<&ComponentInstance> {
        match &self.kind {
            NodeKind::Component(instance) => Some(instance),
            _ => None,
        }
    }

    /// Props of the component behind this node, if it is a component of that props type
    pub fn props<P: Props + Clone>(&self) -> Option<P> {
        self.component_instance()
            .and_then(|instance| instance.props::<P>())
    }

    /// Serialize the tree to HTML, rendering component nodes on the way
    pub fn to_html(&self) -> Result<String, ComponentError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), ComponentError> {
        match &self.kind {
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Component(instance) => {
                for node in instance.render()? {
                    node.write_html(out)?;
                }
            }
            NodeKind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in &self.attributes {
                    // Writing into a String cannot fail
                    let _ = write!(out, " {}=\"{}\"", key, escape(value, true));
                }
                out.push('>');
                for child in &self.children {
                    child.write_html(out)?;
                }
                let _ = write!(out, "</{tag}>");
            }
        }
        Ok(())
    }
}

fn escape(input: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
