//! Proof derivation and the hour-bucketed acknowledgment check.
//!
//! A proof binds the server's challenge nonce to the license and the
//! application's secret digest without revealing either secret. The
//! server's acknowledgment is bucketed to the current hour; near the hour
//! rollover both sides round up so they agree on the bucket even when
//! their clocks straddle the boundary.

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::digest::digest_hex;

/// Minutes on either side of an hour rollover treated as ambiguous.
pub const SKEW_WINDOW_MINUTES: u32 = 5;

/// Derives the proof submitted for verification: the server nonce
/// concatenated with the digest of nonce, license, and secret digest.
#[must_use]
pub fn derive_proof(nonce: &str, license: &str, secret_digest: &str) -> String {
    let inner = digest_hex(format!("{nonce}{license}{secret_digest}"));
    format!("{nonce}{inner}")
}

/// Extracts the hour bucket from a trusted instant.
///
/// Within [`SKEW_WINDOW_MINUTES`] of the rollover (minute >= 55 or <= 5)
/// the next hour is used, wrapping at midnight.
#[must_use]
pub fn proof_hour(trusted: DateTime<Utc>) -> u32 {
    let minute = trusted.minute();
    if minute >= 60 - SKEW_WINDOW_MINUTES || minute <= SKEW_WINDOW_MINUTES {
        (trusted + Duration::hours(1)).hour()
    } else {
        trusted.hour()
    }
}

/// Recomputes the acknowledgment token the server must return for `proof`
/// within the given hour bucket. The hour is rendered in decimal with no
/// zero padding.
#[must_use]
pub fn expected_ack(proof: &str, hour: u32, secret_digest: &str) -> String {
    digest_hex(format!("{proof}{hour}{secret_digest}"))
}
