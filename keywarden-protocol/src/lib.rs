//! Wire contract for the KeyWarden licensing service.
//!
//! This crate holds everything the client and server must agree on
//! byte-for-byte:
//! - The keyed digest primitive (MD5, lowercase hex)
//! - The serialize-then-encode envelope applied to every request body
//! - Proof derivation and the hour-bucketed acknowledgment check
//! - The JSON message shapes of the three service endpoints
//!
//! Everything here is pure and deterministic; nothing performs I/O.

mod digest;
mod envelope;
mod proof;
mod wire;

pub use digest::digest_hex;
pub use envelope::{open, seal, EnvelopeError};
pub use proof::{derive_proof, expected_ack, proof_hour, SKEW_WINDOW_MINUTES};
pub use wire::{ChallengeResponse, Envelope, VerifyRequest, VerifyResponse, SUCCESS_MARKER};
