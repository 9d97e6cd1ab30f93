//! Shared test helpers for client tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering::SeqCst};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use keywarden_client::protocol::{
    derive_proof, digest_hex, expected_ack, open, proof_hour, ChallengeResponse, Envelope,
    VerifyRequest, VerifyResponse, SUCCESS_MARKER,
};
use keywarden_client::{AppConfig, ClientError, ClientResult, LicensingApi};

pub const APP: &str = "demo";
pub const SECRET: &str = "s3cr3t";
pub const LICENSE: &str = "ABC-123";
pub const NONCE: &str = "X1";

/// Installs a test subscriber once; later calls are no-ops.
pub fn trace_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config for the standard test application.
pub fn config() -> AppConfig {
    AppConfig::new(APP, SECRET)
}

/// 2024-05-01 01:02:00 UTC: minute 2, inside the skew window (bucket 2).
pub fn skewed_instant() -> i64 {
    Utc.with_ymd_and_hms(2024, 5, 1, 1, 2, 0).unwrap().timestamp()
}

/// 2024-05-01 10:30:00 UTC: mid-hour, no correction (bucket 10).
pub fn mid_hour_instant() -> i64 {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0)
        .unwrap()
        .timestamp()
}

/// Computes the acknowledgment token an honest server returns for a proof
/// over `license` at `unix_secs`.
pub fn server_ack(license: &str, unix_secs: i64) -> String {
    let secret_digest = digest_hex(SECRET);
    let proof = derive_proof(NONCE, license, &secret_digest);
    let trusted = Utc.timestamp_opt(unix_secs, 0).unwrap();
    expected_ack(&proof, proof_hour(trusted), &secret_digest)
}

/// How the mock verify endpoint answers.
pub enum VerifyBehavior {
    /// Compute the correct acknowledgment from the received proof.
    Honest,
    /// Return this token verbatim.
    Fixed(String),
    /// Omit the token field.
    NoToken,
}

/// Scripted in-process implementation of [`LicensingApi`].
///
/// Defaults to an honest, always-granting server; tests flip fields to
/// script denials, outages, and bad tokens.
pub struct MockApi {
    secret_digest: String,
    pub nonce: String,
    pub grant_challenge: AtomicBool,
    pub challenge_unreachable: AtomicBool,
    pub verify: Mutex<VerifyBehavior>,
    pub now_secs: AtomicI64,
    pub challenge_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
    pub time_calls: AtomicUsize,
    pub last_verify: Mutex<Option<(String, String, Envelope)>>,
}

impl MockApi {
    /// Honest server observed inside the skew window.
    pub fn new() -> Arc<Self> {
        Self::at(skewed_instant())
    }

    /// Honest server with a fixed trusted time.
    pub fn at(now_secs: i64) -> Arc<Self> {
        Arc::new(Self {
            secret_digest: digest_hex(SECRET),
            nonce: NONCE.to_string(),
            grant_challenge: AtomicBool::new(true),
            challenge_unreachable: AtomicBool::new(false),
            verify: Mutex::new(VerifyBehavior::Honest),
            now_secs: AtomicI64::new(now_secs),
            challenge_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            time_calls: AtomicUsize::new(0),
            last_verify: Mutex::new(None),
        })
    }

    pub fn deny_challenge(&self) {
        self.grant_challenge.store(false, SeqCst);
    }

    pub fn set_verify(&self, behavior: VerifyBehavior) {
        *self.verify.lock().unwrap() = behavior;
    }

    /// The inner request of the last verify call, if any.
    pub fn last_request(&self) -> Option<VerifyRequest> {
        self.last_verify
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, _, envelope)| open(&envelope.data).unwrap())
    }

    /// The license path segment of the last verify call, if any.
    pub fn last_license(&self) -> Option<String> {
        self.last_verify
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, license, _)| license.clone())
    }
}

#[async_trait]
impl LicensingApi for MockApi {
    async fn request_challenge(&self, _app: &str) -> ClientResult<ChallengeResponse> {
        self.challenge_calls.fetch_add(1, SeqCst);

        if self.challenge_unreachable.load(SeqCst) {
            return Err(ClientError::Transport("connection refused".to_string()));
        }

        if self.grant_challenge.load(SeqCst) {
            Ok(ChallengeResponse {
                message: format!("{SUCCESS_MARKER} challenge issued"),
                other_data: self.nonce.clone(),
            })
        } else {
            Ok(ChallengeResponse {
                message: "application rejected".to_string(),
                other_data: String::new(),
            })
        }
    }

    async fn submit_proof(
        &self,
        app: &str,
        license: &str,
        envelope: Envelope,
    ) -> ClientResult<VerifyResponse> {
        self.verify_calls.fetch_add(1, SeqCst);
        *self.last_verify.lock().unwrap() =
            Some((app.to_string(), license.to_string(), envelope.clone()));

        let token = match &*self.verify.lock().unwrap() {
            VerifyBehavior::Honest => {
                let request: VerifyRequest = open(&envelope.data)
                    .map_err(|e| ClientError::Transport(format!("bad envelope: {e}")))?;
                let trusted = Utc.timestamp_opt(self.now_secs.load(SeqCst), 0).unwrap();
                Some(expected_ack(
                    &request.token,
                    proof_hour(trusted),
                    &self.secret_digest,
                ))
            }
            VerifyBehavior::Fixed(token) => Some(token.clone()),
            VerifyBehavior::NoToken => None,
        };

        Ok(VerifyResponse {
            token,
            message: None,
        })
    }

    async fn unix_time(&self) -> ClientResult<i64> {
        self.time_calls.fetch_add(1, SeqCst);
        Ok(self.now_secs.load(SeqCst))
    }
}
