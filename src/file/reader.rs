//! Streaming XML reader that assembles the owned [`Element`] tree.

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::{file::element::Element, Result};

/// Reads `input` into a tree and returns its root element.
///
/// # Errors
/// Returns [`crate::Error::Xml`] for syntax errors and
/// [`crate::Error::MalformedDocument`] if the input has no root element, more than
/// one root element, or unbalanced tags.
pub(crate) fn read_tree(input: &str) -> Result<Element> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(open_element(&start)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed_error!("Closing tag without an open element"))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.append_text(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    let bytes = data.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|e| malformed_error!("CDATA section is not UTF-8: {}", e))?;
                    current.append_text(text);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no model data
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed_error!(
            "Unexpected end of input, <{}> is not closed",
            stack[stack.len() - 1].name()
        ));
    }

    root.ok_or_else(|| malformed_error!("Input contains no root element"))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| malformed_error!("Element name is not UTF-8: {}", e))?
        .to_string();

    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| malformed_error!("Attribute name is not UTF-8: {}", e))?
            .to_string();
        let value = attribute.unescape_value()?.into_owned();
        element.push_attribute(key, value);
    }
    Ok(element)
}

fn close_element(
    mut element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<()> {
    element.normalize_text();
    match stack.last_mut() {
        Some(parent) => parent.push_child(element),
        None => {
            if root.is_some() {
                return Err(malformed_error!(
                    "Second root element <{}> found",
                    element.name()
                ));
            }
            *root = Some(element);
        }
    }
    Ok(())
}
