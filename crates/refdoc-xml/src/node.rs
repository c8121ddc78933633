//! Owned element tree for parsed XML.

use std::collections::HashMap;

/// Element in a parsed XML document.
///
/// Text is stored ElementTree-style: `text` holds the content before the first
/// child, `tail` holds the content following this element's end tag inside
/// its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// Direct text content.
    pub text: String,
    /// Text after element.
    pub tail: String,
    /// Element attributes.
    pub attrs: HashMap<String, String>,
    /// Child elements.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create a new node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// First element matching a slash-separated path of child tags.
    ///
    /// `find("location")` looks at direct children only;
    /// `find("parameternamelist/parametername")` descends one level per
    /// segment.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&XmlNode> {
        let mut current = self;
        for segment in path.split('/') {
            current = current.children.iter().find(|c| c.tag == segment)?;
        }
        Some(current)
    }

    /// Direct children with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Direct children with the given tag whose attribute `key` equals `value`.
    pub fn find_all_with<'a>(
        &'a self,
        tag: &'a str,
        key: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.find_all(tag).filter(move |c| c.attr(key) == Some(value))
    }

    /// Full text content of the element found at `path`.
    ///
    /// Returns `None` when no element matches, and `Some("")` for an empty
    /// element, so callers can tell a missing tag from an empty one.
    #[must_use]
    pub fn find_text(&self, path: &str) -> Option<String> {
        self.find(path).map(XmlNode::itertext)
    }

    /// All descendant elements with the given tag, depth-first, excluding self.
    #[must_use]
    pub fn descendants<'a>(&'a self, tag: &str) -> Vec<&'a XmlNode> {
        let mut found = Vec::new();
        collect_descendants(self, tag, &mut found);
        found
    }

    /// Concatenated text of this element and all descendants, without tail.
    #[must_use]
    pub fn itertext(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.itertext());
            out.push_str(&child.tail);
        }
        out
    }
}

fn collect_descendants<'a>(node: &'a XmlNode, tag: &str, found: &mut Vec<&'a XmlNode>) {
    for child in &node.children {
        if child.tag == tag {
            found.push(child);
        }
        collect_descendants(child, tag, found);
    }
}
