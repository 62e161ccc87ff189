//! Minimaler Element-Baum über `quick-xml` mit typisierten Attribut-Zugriffen.

use crate::core::{Angle, BoardError, BoardLayer, BoardResult, LayerStack, Length, PositiveLength};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::str::FromStr;
use uuid::Uuid;

/// Ein XML-Element mit Attributen und Kind-Elementen (Textinhalt wird ignoriert).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    /// Tag-Name
    pub name: String,
    /// Attribute in Dokument-Reihenfolge
    pub attributes: IndexMap<String, String>,
    /// Kind-Elemente in Dokument-Reihenfolge
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Neues Element ohne Attribute.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parst ein Dokument und liefert das Wurzelelement.
    pub fn parse(xml_content: &str) -> BoardResult<Self> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);

        let mut buffer = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event_into(&mut buffer) {
                Ok(Event::Start(ref e)) => {
                    stack.push(Self::from_start(&reader, e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = Self::from_start(&reader, e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| BoardError::Xml("Unerwartetes End-Tag".to_string()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Eof) => break,
                Err(err) => {
                    return Err(BoardError::Xml(format!(
                        "Position {}: {err}",
                        reader.error_position()
                    )))
                }
                _ => {}
            }
            buffer.clear();
        }

        if let Some(open) = stack.last() {
            return Err(BoardError::Xml(format!(
                "Element <{}> wurde nicht geschlossen",
                open.name
            )));
        }
        root.ok_or_else(|| BoardError::Xml("Dokument ohne Wurzelelement".to_string()))
    }

    fn from_start(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> BoardResult<Self> {
        let name = e.name();
        let tag = reader
            .decoder()
            .decode(name.as_ref())
            .map_err(|err| BoardError::Xml(err.to_string()))?;
        let mut node = Self::new(tag);
        for attr in e.attributes() {
            let attr = attr.map_err(|err| BoardError::Xml(err.to_string()))?;
            let key = reader
                .decoder()
                .decode(attr.key.as_ref())
                .map_err(|err| BoardError::Xml(err.to_string()))?
                .into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| BoardError::Xml(err.to_string()))?
                .into_owned();
            node.attributes.insert(key, value);
        }
        Ok(node)
    }

    /// Setzt ein Attribut (Builder-Stil).
    pub fn with_attr(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Hängt ein Kind-Element an (Builder-Stil).
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Alle Kind-Elemente mit dem Namen `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    // ── Attribute ───────────────────────────────────────────────────

    /// Optionales Attribut als Text.
    pub fn opt_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Pflicht-Attribut als Text; fehlt es, gibt es `MalformedValue`.
    pub fn attr(&self, key: &str) -> BoardResult<&str> {
        self.opt_attr(key)
            .ok_or_else(|| BoardError::malformed(self.field(key), "<fehlt>"))
    }

    /// Attribut als UUID.
    pub fn attr_uuid(&self, key: &str) -> BoardResult<Uuid> {
        let value = self.attr(key)?;
        Uuid::parse_str(value).map_err(|_| BoardError::malformed(self.field(key), value))
    }

    /// Optionales Attribut als UUID.
    pub fn opt_attr_uuid(&self, key: &str) -> BoardResult<Option<Uuid>> {
        match self.opt_attr(key) {
            Some(_) => self.attr_uuid(key).map(Some),
            None => Ok(None),
        }
    }

    /// Attribut als exakte Millimeter-Länge.
    pub fn attr_length(&self, key: &str) -> BoardResult<Length> {
        let value = self.attr(key)?;
        Length::from_mm_str(value).ok_or_else(|| BoardError::malformed(self.field(key), value))
    }

    /// Attribut als positive Länge; `0` oder negativ ergibt `MalformedValue`.
    pub fn attr_positive_length(&self, key: &str) -> BoardResult<PositiveLength> {
        let value = self.attr(key)?;
        PositiveLength::new(self.attr_length(key)?)
            .map_err(|_| BoardError::malformed(self.field(key), value))
    }

    /// Attribut als Winkel in Grad.
    pub fn attr_angle(&self, key: &str) -> BoardResult<Angle> {
        let value = self.attr(key)?;
        Angle::from_deg_str(value).ok_or_else(|| BoardError::malformed(self.field(key), value))
    }

    /// Attribut als Layer des Lagenaufbaus.
    pub fn attr_layer(&self, key: &str, layer_stack: &LayerStack) -> BoardResult<BoardLayer> {
        layer_stack.layer_by_name(self.attr(key)?)
    }

    /// Attribut als `true`/`false`.
    pub fn attr_bool(&self, key: &str) -> BoardResult<bool> {
        self.attr_parsed(key)
    }

    /// Attribut über `FromStr`.
    pub fn attr_parsed<T: FromStr>(&self, key: &str) -> BoardResult<T> {
        let value = self.attr(key)?;
        value
            .parse()
            .map_err(|_| BoardError::malformed(self.field(key), value))
    }

    fn field(&self, key: &str) -> String {
        format!("{}.{}", self.name, key)
    }

    // ── Ausgabe ─────────────────────────────────────────────────────

    /// Schreibt das Element eingerückt als XML-Text.
    pub fn write_to(&self, output: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        output.push_str(&format!("{indent}<{}", self.name));
        for (key, value) in &self.attributes {
            output.push_str(&format!(" {key}=\"{}\"", escape_xml(value)));
        }
        if self.children.is_empty() {
            output.push_str("/>\n");
            return;
        }
        output.push_str(">\n");
        for child in &self.children {
            child.write_to(output, depth + 1);
        }
        output.push_str(&format!("{indent}</{}>\n", self.name));
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> BoardResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(BoardError::Xml(format!(
                "Mehrere Wurzelelemente (<{}>)",
                node.name
            )))
        }
    }
    Ok(())
}

/// Escaped XML-Sonderzeichen in Attributwerten.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let xml = r#"<?xml version="1.0"?>
        <board name="A &amp; B">
            <via uuid="x"/>
            <netsegment><netpoint x="1"/></netsegment>
        </board>"#;
        let root = XmlNode::parse(xml).expect("Dokument erwartet");
        assert_eq!(root.name, "board");
        assert_eq!(root.opt_attr("name"), Some("A & B"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children_named("netsegment").count(), 1);
        assert_eq!(root.children[1].children[0].attr("x"), Ok("1"));
    }

    #[test]
    fn syntax_error_is_reported_as_xml_error() {
        let result = XmlNode::parse("<board><via></board>");
        assert!(matches!(result, Err(BoardError::Xml(_))));
    }

    #[test]
    fn missing_or_bad_attributes_are_malformed() {
        let node = XmlNode::new("netline").with_attr("width", "abc");
        assert!(matches!(
            node.attr_length("width"),
            Err(BoardError::MalformedValue { .. })
        ));
        assert!(matches!(
            node.attr_uuid("p1"),
            Err(BoardError::MalformedValue { .. })
        ));
        let node = XmlNode::new("netline").with_attr("width", "0");
        assert!(matches!(
            node.attr_positive_length("width"),
            Err(BoardError::MalformedValue { .. })
        ));
    }

    #[test]
    fn write_escapes_attribute_values() {
        let node = XmlNode::new("netsignal").with_attr("name", "<A&B>");
        let mut out = String::new();
        node.write_to(&mut out, 0);
        assert_eq!(out, "<netsignal name=\"&lt;A&amp;B&gt;\"/>\n");
    }
}
