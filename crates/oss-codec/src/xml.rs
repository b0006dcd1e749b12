use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::{CodecError, CodecResult};

const FORMAT: &str = "xml";

/// A parsed XML element: its name, concatenated text content and child
/// elements in document order. Attributes are not carried.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// First child named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Every child named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn parse(data: &[u8]) -> CodecResult<XmlNode> {
        let mut reader = Reader::from_reader(data);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|err| CodecError::malformed(FORMAT, err.to_string()))?;
            match event {
                Event::Start(start) => stack.push(XmlNode::new(element_name(&start)?)),
                Event::Empty(start) => {
                    let node = XmlNode::new(element_name(&start)?);
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let unescaped = text
                            .unescape()
                            .map_err(|err| CodecError::malformed(FORMAT, err.to_string()))?;
                        current.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        let text = std::str::from_utf8(&data)
                            .map_err(|err| CodecError::malformed(FORMAT, err.to_string()))?;
                        current.text.push_str(text);
                    }
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| CodecError::malformed(FORMAT, "unbalanced end tag"))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(CodecError::malformed(FORMAT, "unexpected end of document"));
        }
        root.ok_or_else(|| CodecError::malformed(FORMAT, "document has no root element"))
    }

    pub fn to_bytes(&self, declaration: bool) -> CodecResult<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        if declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(|err| CodecError::malformed(FORMAT, err.to_string()))?;
        }
        write_node(&mut writer, self)?;
        Ok(writer.into_inner())
    }
}

fn element_name(start: &BytesStart<'_>) -> CodecResult<String> {
    String::from_utf8(start.name().as_ref().to_vec())
        .map_err(|err| CodecError::malformed(FORMAT, err.to_string()))
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> CodecResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(CodecError::malformed(FORMAT, "multiple root elements")),
    }
    Ok(())
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> CodecResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new(node.name.as_str())))
        .map_err(|err| CodecError::malformed(FORMAT, err.to_string()))?;
    if node.children.is_empty() {
        if !node.text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&node.text)))
                .map_err(|err| CodecError::malformed(FORMAT, err.to_string()))?;
        }
    } else {
        for child in &node.children {
            write_node(writer, child)?;
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(|err| CodecError::malformed(FORMAT, err.to_string()))?;
    Ok(())
}
