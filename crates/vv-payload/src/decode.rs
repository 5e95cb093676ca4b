//! Payload → readings.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use quick_xml::Reader;
use quick_xml::events::Event;
use vv_core::Reading;

use crate::{PayloadError, PayloadResult};

/// Element carrying the base64 text in the upstream envelope.
pub const DEFAULT_ELEMENT: &str = "data";

/// Decode a raw payload using the default `<data>` element.
pub fn decode(raw: &str) -> PayloadResult<Vec<Reading>> {
    decode_with_element(raw, DEFAULT_ELEMENT)
}

/// Decode a raw payload whose base64 text lives in `<element>`.
///
/// The first matching element wins; the rest of the document must still be
/// well-formed.
pub fn decode_with_element(raw: &str, element: &str) -> PayloadResult<Vec<Reading>> {
    let text = extract_element_text(raw, element)?;

    let compact: Vec<u8> = text
        .into_iter()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return Err(PayloadError::EmptyElement {
            element: element.to_string(),
        });
    }

    let bytes = STANDARD.decode(&compact)?;
    let json = String::from_utf8(bytes)?;
    let readings = parse_readings(&json)?;

    tracing::debug!(count = readings.len(), "decoded payload");
    Ok(readings)
}

fn parse_readings(json: &str) -> PayloadResult<Vec<Reading>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let found = match &value {
        serde_json::Value::Array(_) => return Ok(serde_json::from_value(value)?),
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Object(_) => "an object",
    };
    Err(PayloadError::NotAnArray { found })
}

fn ill_formed(reader: &Reader<&[u8]>, message: &str) -> PayloadError {
    PayloadError::Xml {
        position: reader.buffer_position(),
        message: message.to_string(),
    }
}

/// Raw text content of the first `<element>`, CDATA included.
///
/// The whole document is checked: exactly one root element, every element
/// closed, and nothing but whitespace outside the root.
fn extract_element_text(raw: &str, element: &str) -> PayloadResult<Vec<u8>> {
    let mut reader = Reader::from_str(raw);
    let target = element.as_bytes();

    let mut found: Option<Vec<u8>> = None;
    // Nesting depth inside the target element while capturing.
    let mut capture_depth: Option<usize> = None;
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| PayloadError::Xml {
            position: reader.error_position(),
            message: e.to_string(),
        })?;

        match event {
            Event::Start(start) => {
                if depth == 0 && seen_root {
                    return Err(ill_formed(&reader, "more than one root element"));
                }
                seen_root = true;
                depth += 1;
                if let Some(inner) = capture_depth.as_mut() {
                    *inner += 1;
                } else if found.is_none() && start.local_name().as_ref() == target {
                    capture_depth = Some(0);
                    found = Some(Vec::new());
                }
            }
            Event::Empty(empty) => {
                if depth == 0 && seen_root {
                    return Err(ill_formed(&reader, "more than one root element"));
                }
                seen_root = true;
                if capture_depth.is_none()
                    && found.is_none()
                    && empty.local_name().as_ref() == target
                {
                    found = Some(Vec::new());
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if let Some(inner) = capture_depth {
                    capture_depth = inner.checked_sub(1);
                }
            }
            Event::Text(text) => {
                if depth == 0 {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        return Err(ill_formed(&reader, "text outside the root element"));
                    }
                } else if let (Some(_), Some(buf)) = (capture_depth, found.as_mut()) {
                    buf.extend_from_slice(&text);
                }
            }
            Event::CData(cdata) => {
                if depth == 0 {
                    return Err(ill_formed(&reader, "CDATA outside the root element"));
                }
                if let (Some(_), Some(buf)) = (capture_depth, found.as_mut()) {
                    buf.extend_from_slice(&cdata);
                }
            }
            Event::GeneralRef(_) if depth == 0 => {
                return Err(ill_formed(&reader, "entity reference outside the root element"));
            }
            Event::Eof => {
                if depth > 0 {
                    return Err(ill_formed(&reader, "unclosed element at end of document"));
                }
                break;
            }
            _ => {}
        }
    }

    found.ok_or_else(|| PayloadError::MissingElement {
        element: element.to_string(),
    })
}
