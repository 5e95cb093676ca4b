//! vv-payload: wire payload decoding.
//!
//! The upstream feed answers with an XML envelope holding one element whose
//! text is base64; the decoded bytes are a UTF-8 JSON array of readings.

pub mod decode;
pub mod encode;

pub use decode::{DEFAULT_ELEMENT, decode, decode_with_element};
pub use encode::{encode, encode_with_element};

pub type PayloadResult<T> = Result<T, PayloadError>;

/// Why a payload could not be turned into readings. Decoding is
/// all-or-nothing, so any of these aborts the whole load.
#[derive(thiserror::Error, Debug)]
pub enum PayloadError {
    #[error("Malformed XML payload at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("No <{element}> element found in payload")]
    MissingElement { element: String },

    #[error("The <{element}> element in the payload is empty")]
    EmptyElement { element: String },

    #[error("Payload data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded payload data is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Decoded payload data is not valid reading JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decoded payload data must be a JSON array of readings, found {found}")]
    NotAnArray { found: &'static str },
}
