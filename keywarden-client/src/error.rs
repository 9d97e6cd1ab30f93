//! Error types for the client SDK.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to SDK callers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid configuration; raised before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// Network failure or malformed response from the service.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Login failure taxonomy. Every variant collapses to `false` at the
/// public `login` surface; the tags let the monitor and logs tell causes
/// apart without widening the caller contract.
#[derive(Debug, Error)]
pub(crate) enum AuthFailure {
    /// Any endpoint was unreachable or returned a malformed body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server refused to issue a challenge.
    #[error("challenge denied by server")]
    ChallengeDenied,

    /// The verification response carried no acknowledgment token.
    #[error("verification response carried no token")]
    MissingToken,

    /// The server token did not match the locally recomputed digest.
    #[error("server token did not match expected digest")]
    TokenMismatch,
}

impl From<ClientError> for AuthFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Config(msg) | ClientError::Transport(msg) => Self::Transport(msg),
        }
    }
}
