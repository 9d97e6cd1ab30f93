//! Serialize-then-encode wrapping applied to every request body.
//!
//! The inner payload is serialized with serde_json (struct declaration
//! order fixes the key order) and then passed through standard base64.
//! Both steps must stay bit-compatible with the server's decoder.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors produced when sealing or opening an envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Payload could not be serialized or parsed as JSON.
    #[error("invalid envelope payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The base64 layer was malformed.
    #[error("invalid envelope encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// The decoded bytes were not UTF-8.
    #[error("envelope is not valid UTF-8")]
    NotUtf8,
}

/// Serializes `payload` to JSON and applies the base64 transport encoding.
///
/// # Errors
///
/// Returns an error if the payload cannot be represented as JSON.
pub fn seal<T: Serialize>(payload: &T) -> Result<String, EnvelopeError> {
    let json = serde_json::to_string(payload)?;
    Ok(BASE64.encode(json.as_bytes()))
}

/// Reverses [`seal`]: strips the base64 layer and parses the inner JSON.
///
/// # Errors
///
/// Returns an error if the base64 layer, the UTF-8 text, or the inner JSON
/// is malformed.
pub fn open<T: DeserializeOwned>(sealed: &str) -> Result<T, EnvelopeError> {
    let bytes = BASE64.decode(sealed)?;
    let json = String::from_utf8(bytes).map_err(|_| EnvelopeError::NotUtf8)?;
    Ok(serde_json::from_str(&json)?)
}
