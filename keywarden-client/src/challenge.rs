//! Challenge acquisition for the login handshake.

use keywarden_protocol::ChallengeResponse;
use tracing::debug;

use crate::error::AuthFailure;
use crate::transport::LicensingApi;

/// Requests a fresh challenge, enforcing the server's grant marker.
///
/// Exactly one challenge is consumed per login attempt; challenges are
/// never cached or reused across attempts. The nonce is opaque; nothing
/// downstream interprets its structure.
pub(crate) async fn request(
    api: &dyn LicensingApi,
    app: &str,
) -> Result<ChallengeResponse, AuthFailure> {
    let challenge = api.request_challenge(app).await?;
    if !challenge.is_granted() {
        return Err(AuthFailure::ChallengeDenied);
    }
    debug!(app, "challenge granted");
    Ok(challenge)
}
