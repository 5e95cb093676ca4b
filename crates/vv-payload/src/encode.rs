//! Readings → payload, the inverse of [`crate::decode`].
//!
//! Used to build fixtures and to check that decoding is lossless.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use vv_core::Reading;

use crate::PayloadResult;
use crate::decode::DEFAULT_ELEMENT;

pub fn encode(readings: &[Reading]) -> PayloadResult<String> {
    encode_with_element(readings, DEFAULT_ELEMENT)
}

pub fn encode_with_element(readings: &[Reading], element: &str) -> PayloadResult<String> {
    let json = serde_json::to_string(readings)?;
    let b64 = STANDARD.encode(json.as_bytes());
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><response><{element}>{b64}</{element}></response>"
    ))
}
