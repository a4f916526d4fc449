//! The markup element tree.
//!
//! An [`Element`] has a name, attributes in insertion order, and an ordered
//! list of child [`Node`]s.

/// A child of an element.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    /// Literal text, with entities already resolved.
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }
}

/// A markup element.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any existing value but keeping its position.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Get an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_tag_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// Append a text node. Empty text is dropped.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append a new empty child and return it for further building.
    pub fn create_child(&mut self, name: impl Into<String>) -> &mut Element {
        self.children.push(Node::Element(Element::new(name)));
        match self.children.last_mut() {
            Some(Node::Element(child)) => child,
            _ => unreachable!("an element was just pushed"),
        }
    }

    /// Iterate over child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
