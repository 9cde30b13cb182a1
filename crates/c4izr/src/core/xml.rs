//! Owned XML element tree
//!
//! The translator works on a small DOM rather than on the event stream: it
//! needs to look at a cell, its wrapper and its geometry child at the same
//! time, and floating edges are moved into the output untouched.
//! Parsing and writing both go through `quick-xml`.

use std::borrow::Cow;
use std::io::Write;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::trace;

use super::error::{C4Error, Result};

/// An XML element with ordered attributes, child elements and optional text
///
/// Comments, processing instructions and inter-element whitespace are not
/// kept.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Tag name, including any namespace prefix
    pub name: String,
    attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<Element>,
    /// Concatenated character data, if any
    pub text: Option<String>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create an element carrying a copy of the given attributes
    pub fn with_attributes(name: impl Into<String>, attributes: &[(String, String)]) -> Self {
        Self {
            name: name.into(),
            attributes: attributes.to_vec(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child append
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Look up an attribute value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the attribute is present, even with an empty value
    pub fn has(&self, key: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k == key)
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Append a child element
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First direct child with the given tag name
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag name
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Visit every descendant in document order, passing its parent along
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element, &'a Element)) {
        for child in &self.children {
            visit(self, child);
            child.walk(visit);
        }
    }

    /// Parse a document and return its root element
    ///
    /// Fails with [`C4Error::InputFormat`] on malformed markup, on a missing
    /// root element or on content after the root.
    pub fn parse(input: &str) -> Result<Element> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if root.is_some() {
                        return Err(C4Error::input_format("content after the root element"));
                    }
                    stack.push(element_from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| C4Error::input_format("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    let raw = e
                        .decode()
                        .map_err(|err| C4Error::input_format(err.to_string()))?;
                    let text = unescape(&raw).map_err(|err| C4Error::input_format(err.to_string()))?;
                    append_text(&mut stack, &text)?;
                }
                Ok(Event::CData(ref e)) => {
                    let text = String::from_utf8_lossy(e).into_owned();
                    append_text(&mut stack, &text)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(C4Error::input_format(format!(
                        "{} at position {}",
                        e,
                        reader.error_position()
                    )))
                }
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(C4Error::input_format(format!(
                "unclosed element <{}>",
                open.name
            )));
        }

        let root = root.ok_or_else(|| C4Error::input_format("no root element"))?;
        trace!(root = %root.name, children = root.children.len(), "Parsed XML tree");
        Ok(root)
    }

    /// Serialize without any added whitespace
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        write_element(&mut writer, self)?;
        into_string(writer.into_inner())
    }

    /// Serialize with two-space indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_element(&mut writer, self)?;
        into_string(writer.into_inner())
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| C4Error::input_format(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = unescape(&raw).map_err(|e| C4Error::input_format(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(C4Error::input_format("multiple root elements")),
    }
}

fn append_text(stack: &mut [Element], text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None => Err(C4Error::input_format("text outside the root element")),
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut content = element.name.clone();
    for (key, value) in element.attributes() {
        content.push(' ');
        content.push_str(key);
        content.push_str("=\"");
        content.push_str(&escape_attribute(value));
        content.push('"');
    }
    let start = BytesStart::from_content(content, element.name.len());

    if element.children.is_empty() && element.text.is_none() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| C4Error::serialize(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| C4Error::serialize(e.to_string()))?;
    if let Some(text) = &element.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| C4Error::serialize(e.to_string()))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| C4Error::serialize(e.to_string()))
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| C4Error::serialize(e.to_string()))
}

/// Escape an attribute value, keeping line breaks and tabs as character
/// references so that parsers do not normalize them to spaces
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\n' | '\r' | '\t'))
    {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#xa;"),
            '\r' => escaped.push_str("&#xd;"),
            '\t' => escaped.push_str("&#x9;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let root = Element::parse(
            r#"<mxGraphModel dx="10"><root><mxCell id="0"/><mxCell id="1" parent="0"/></root></mxGraphModel>"#,
        )
        .unwrap();
        assert_eq!(root.name, "mxGraphModel");
        assert_eq!(root.get("dx"), Some("10"));
        let cells: Vec<_> = root.find("root").unwrap().find_all("mxCell").collect();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].get("parent"), Some("0"));
    }

    #[test]
    fn test_parse_unescapes_attributes() {
        let root = Element::parse(r#"<a value="&lt;b&gt;API&lt;/b&gt; &amp; DB&#xa;x"/>"#).unwrap();
        assert_eq!(root.get("value"), Some("<b>API</b> & DB\nx"));
    }

    #[test]
    fn test_parse_keeps_text() {
        let root =
            Element::parse("<mxfile><diagram id=\"d\">  abc==  </diagram></mxfile>").unwrap();
        assert_eq!(root.find("diagram").unwrap().text.as_deref(), Some("abc=="));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Element::parse("<a><b></a>").unwrap_err().is_input_format());
        assert!(Element::parse("<a>").unwrap_err().is_input_format());
        assert!(Element::parse("").unwrap_err().is_input_format());
        assert!(Element::parse("not xml at all").unwrap_err().is_input_format());
        assert!(Element::parse("<a/><b/>").unwrap_err().is_input_format());
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut element = Element::new("x").attr("a", "1").attr("b", "2");
        element.set_attr("a", "3");
        assert_eq!(
            element.attributes(),
            &[
                ("a".to_string(), "3".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_has_distinguishes_empty_from_missing() {
        let element = Element::new("x").attr("source", "");
        assert!(element.has("source"));
        assert!(!element.has("target"));
    }

    #[test]
    fn test_compact_serialization() {
        let element = Element::new("object")
            .attr("label", "<b>%c4Name%</b>")
            .child(Element::new("mxCell").attr("vertex", "1"));
        assert_eq!(
            element.to_xml_string().unwrap(),
            r#"<object label="&lt;b&gt;%c4Name%&lt;/b&gt;"><mxCell vertex="1"/></object>"#
        );
    }

    #[test]
    fn test_serialization_round_trips_newlines() {
        let element = Element::new("a").attr("value", "line 1\nline \"2\"");
        let text = element.to_xml_string().unwrap();
        assert!(text.contains("&#xa;"));
        assert_eq!(Element::parse(&text).unwrap(), element);
    }

    #[test]
    fn test_pretty_serialization_indents() {
        let element = Element::new("a").child(Element::new("b").child(Element::new("c")));
        let pretty = element.to_pretty_string().unwrap();
        assert!(pretty.contains("\n  <b>"));
        assert!(pretty.contains("\n    <c/>"));
    }

    #[test]
    fn test_walk_visits_in_document_order() {
        let root = Element::parse("<r><a><b/></a><c/></r>").unwrap();
        let mut seen = Vec::new();
        root.walk(&mut |parent, child| seen.push(format!("{}>{}", parent.name, child.name)));
        assert_eq!(seen, vec!["r>a", "a>b", "r>c"]);
    }
}
