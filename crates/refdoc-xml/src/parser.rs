//! Event-driven XML reader building [`XmlNode`] trees.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::XmlError;
use crate::node::XmlNode;

/// Parses XML text into an owned element tree.
pub struct XmlParser;

impl XmlParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse an XML document and return its root element.
    ///
    /// Whitespace is preserved verbatim; Doxygen descriptions depend on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not well-formed XML or has no root.
    pub fn parse(&self, xml: &str, source: &str) -> Result<XmlNode, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let tag = self.decode_tag(&reader, e.name().as_ref());
                    let attrs = self.decode_attrs(&reader, &e);
                    let mut root = self.parse_children(&mut reader, &tag)?;
                    root.tag = tag;
                    root.attrs = attrs;
                    return Ok(root);
                }
                Event::Empty(e) => {
                    return Ok(XmlNode {
                        tag: self.decode_tag(&reader, e.name().as_ref()),
                        attrs: self.decode_attrs(&reader, &e),
                        ..Default::default()
                    });
                }
                Event::Eof => return Err(XmlError::MissingRoot(source.to_owned())),
                _ => {}
            }
            buf.clear();
        }
    }

    fn parse_children<R: BufRead>(
        &self,
        reader: &mut Reader<R>,
        parent_tag: &str,
    ) -> Result<XmlNode, XmlError> {
        let mut buf = Vec::new();
        let mut node = XmlNode::default();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let child_tag = self.decode_tag(reader, e.name().as_ref());
                    let child_attrs = self.decode_attrs(reader, &e);
                    let mut child = self.parse_children(reader, &child_tag)?;
                    child.tag = child_tag;
                    child.attrs = child_attrs;
                    node.children.push(child);
                }
                Event::Empty(e) => {
                    node.children.push(XmlNode {
                        tag: self.decode_tag(reader, e.name().as_ref()),
                        attrs: self.decode_attrs(reader, &e),
                        ..Default::default()
                    });
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?.into_owned();
                    append_text(&mut node, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?.into_owned();
                    append_text(&mut node, &decode_entity(&entity));
                }
                Event::CData(e) => {
                    append_text(&mut node, &String::from_utf8_lossy(&e));
                }
                Event::End(e) => {
                    let end_tag = self.decode_tag(reader, e.name().as_ref());
                    if end_tag == parent_tag {
                        return Ok(node);
                    }
                }
                Event::Eof => return Ok(node),
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }

    fn decode_tag<R: BufRead>(&self, reader: &Reader<R>, name: &[u8]) -> String {
        reader.decoder().decode(name).map_or_else(
            |_| String::from_utf8_lossy(name).into_owned(),
            std::borrow::Cow::into_owned,
        )
    }

    fn decode_attrs<R: BufRead>(
        &self,
        reader: &Reader<R>,
        e: &BytesStart,
    ) -> HashMap<String, String> {
        let mut attrs = HashMap::new();
        for attr in e.attributes().flatten() {
            let key = self.decode_tag(reader, attr.key.as_ref());
            if key.starts_with("xmlns") {
                continue;
            }
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            );
            attrs.insert(key, value);
        }
        attrs
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Append text to node's text or last child's tail.
fn append_text(node: &mut XmlNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}
