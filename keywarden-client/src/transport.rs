//! Transport layer for the licensing service.
//!
//! [`LicensingApi`] is the seam between the authenticator and the wire;
//! [`HttpApi`] is the production implementation speaking HTTPS JSON via
//! reqwest. Tests stand up a wiremock server against `HttpApi` or
//! substitute their own trait implementation.

use async_trait::async_trait;
use keywarden_protocol::{ChallengeResponse, Envelope, VerifyResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Request timeout applied to every call to the service.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The three logical endpoints of the licensing service.
#[async_trait]
pub trait LicensingApi: Send + Sync {
    /// `POST /verify/pow/{app}`: requests a login challenge.
    async fn request_challenge(&self, app: &str) -> ClientResult<ChallengeResponse>;

    /// `POST /verify/{app}/{license}`: submits an enveloped proof.
    async fn submit_proof(
        &self,
        app: &str,
        license: &str,
        envelope: Envelope,
    ) -> ClientResult<VerifyResponse>;

    /// `GET /unixtime`: the server's current Unix time in seconds.
    async fn unix_time(&self) -> ClientResult<i64>;
}

/// HTTPS implementation of [`LicensingApi`].
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    /// Creates a transport rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// The base URL requests are rooted at.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl LicensingApi for HttpApi {
    async fn request_challenge(&self, app: &str) -> ClientResult<ChallengeResponse> {
        let url = format!("{}/verify/pow/{app}", self.base_url);
        debug!(app, "requesting login challenge");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("challenge request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ClientError::Transport(format!(
                "challenge request returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to parse challenge response: {e}")))
    }

    async fn submit_proof(
        &self,
        app: &str,
        license: &str,
        envelope: Envelope,
    ) -> ClientResult<VerifyResponse> {
        let url = format!("{}/verify/{app}/{license}", self.base_url);
        debug!(app, "submitting proof");

        let response = self
            .client
            .post(&url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("proof submission failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ClientError::Transport(format!(
                "proof submission returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to parse verify response: {e}")))
    }

    async fn unix_time(&self) -> ClientResult<i64> {
        let url = format!("{}/unixtime", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("unixtime request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ClientError::Transport(format!(
                "unixtime request returned {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to read unixtime body: {e}")))?;

        body.trim().parse().map_err(|_| {
            ClientError::Transport(format!("unixtime returned a non-numeric body: {body:?}"))
        })
    }
}
