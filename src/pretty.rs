use std::fmt::Display;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::ConfXmlError;

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" ?>";

fn xml_error(message: impl Display) -> ConfXmlError {
    ConfXmlError::XmlError {
        message: message.to_string(),
        hint: None,
        code: Some(503),
    }
}

fn ill_formed(message: &str) -> ConfXmlError {
    ConfXmlError::XmlError {
        message: message.to_string(),
        hint: Some("The input must hold exactly one well-formed root element".into()),
        code: Some(504),
    }
}

/// Re-indent a well-formed XML string.
///
/// The output starts with an XML declaration line, nests elements with one
/// tab per level, keeps text-only elements on one line, collapses elements
/// without content to `<name/>` and ends with a newline.
pub fn pretty_print_xml(xml: &str) -> Result<String, ConfXmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    // A start tag is held back until we know whether the element is empty.
    let mut pending: Option<BytesStart<'static>> = None;
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            xml_error(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(start) => {
                flush(&mut writer, &mut pending)?;
                if depth == 0 {
                    roots += 1;
                    if roots > 1 {
                        return Err(ill_formed("More than one root element"));
                    }
                }
                depth += 1;
                pending = Some(start.into_owned());
            }
            Event::End(end) => {
                let written = match pending.take() {
                    Some(start) => writer.write_event(Event::Empty(start)),
                    None => writer.write_event(Event::End(end)),
                };
                written.map_err(xml_error)?;
                depth = depth.saturating_sub(1);
            }
            Event::Empty(start) => {
                flush(&mut writer, &mut pending)?;
                if depth == 0 {
                    roots += 1;
                    if roots > 1 {
                        return Err(ill_formed("More than one root element"));
                    }
                }
                writer.write_event(Event::Empty(start)).map_err(xml_error)?;
            }
            Event::Text(text) => {
                if depth == 0 {
                    return Err(ill_formed("Text outside of the root element"));
                }
                flush(&mut writer, &mut pending)?;
                writer.write_event(Event::Text(text)).map_err(xml_error)?;
            }
            Event::CData(data) => {
                if depth == 0 {
                    return Err(ill_formed("Text outside of the root element"));
                }
                flush(&mut writer, &mut pending)?;
                writer.write_event(Event::CData(data)).map_err(xml_error)?;
            }
            Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
            other => {
                flush(&mut writer, &mut pending)?;
                writer.write_event(other).map_err(xml_error)?;
            }
        }
    }

    if depth != 0 {
        return Err(ill_formed("Unclosed element at end of input"));
    }
    if roots == 0 {
        return Err(ill_formed("No root element"));
    }

    let body = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

fn flush(
    writer: &mut Writer<Vec<u8>>,
    pending: &mut Option<BytesStart<'static>>,
) -> Result<(), ConfXmlError> {
    if let Some(start) = pending.take() {
        writer.write_event(Event::Start(start)).map_err(xml_error)?;
    }
    Ok(())
}
