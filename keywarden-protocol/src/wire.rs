//! JSON message shapes exchanged with the licensing service.
//!
//! Field names mirror the server's camelCase contract exactly.

use serde::{Deserialize, Serialize};

/// Marker substring the server embeds in `message` on success.
pub const SUCCESS_MARKER: &str = "SUCN";

/// Response of `POST /verify/pow/{app}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// Status text; contains [`SUCCESS_MARKER`] when the challenge is granted.
    pub message: String,
    /// Opaque server nonce consumed by proof derivation. The client never
    /// interprets its internal structure.
    #[serde(rename = "otherData")]
    pub other_data: String,
}

impl ChallengeResponse {
    /// Whether the server granted the challenge.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.message.contains(SUCCESS_MARKER)
    }
}

/// Outer body wrapping every enveloped request: `{ "data": <sealed> }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// The sealed inner JSON (see [`crate::seal`]).
    pub data: String,
}

/// Inner body of `POST /verify/{app}/{license}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// The derived proof.
    pub token: String,
    /// Digest of the device binding; omitted when no binding was supplied.
    #[serde(rename = "macHash", skip_serializing_if = "Option::is_none")]
    pub mac_hash: Option<String>,
}

/// Response of `POST /verify/{app}/{license}`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    /// Server acknowledgment token; absent when verification was rejected.
    pub token: Option<String>,
    /// Status text some server versions populate; only logged.
    pub message: Option<String>,
}
