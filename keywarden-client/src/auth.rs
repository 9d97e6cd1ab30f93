//! The license authenticator: two-phase handshake and acknowledgment check.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use keywarden_protocol::{
    derive_proof, digest_hex, expected_ack, proof_hour, seal, Envelope, VerifyRequest,
};
use tracing::{debug, info, warn};

use crate::challenge;
use crate::config::{AppConfig, FailureCallback, Verification};
use crate::error::{AuthFailure, ClientResult};
use crate::monitor::{self, MonitorHandle};
use crate::time::TrustedClock;
use crate::transport::{HttpApi, LicensingApi};

/// Authenticates licenses for one application.
///
/// Holds the immutable application identity (name plus secret digest) and
/// the transport. Cheap to clone; clones share the transport and the
/// monitor slot.
#[derive(Clone)]
pub struct Authenticator {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    secret_digest: String,
    verification: Verification,
    api: Arc<dyn LicensingApi>,
    clock: TrustedClock,
    monitor: Mutex<Option<MonitorHandle>>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Creates an authenticator over the production HTTPS transport.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::Config`] when `name` or `secret_key`
    /// is empty. Validation runs before any network call.
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let api = Arc::new(HttpApi::new(&config.api_base_url));
        Self::with_api(config, api)
    }

    /// Creates an authenticator over a custom transport. Used by tests and
    /// embedders with their own HTTP stack.
    ///
    /// # Errors
    ///
    /// Same validation as [`Authenticator::new`].
    pub fn with_api(config: AppConfig, api: Arc<dyn LicensingApi>) -> ClientResult<Self> {
        config.validate()?;

        Ok(Self {
            inner: Arc::new(Inner {
                name: config.name,
                secret_digest: digest_hex(&config.secret_key),
                verification: config.verification,
                clock: TrustedClock::new(api.clone()),
                api,
                monitor: Mutex::new(None),
            }),
        })
    }

    /// Application name as registered with the service.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.inner.name
    }

    /// Signs a user in with their license, optionally bound to a device
    /// identifier (digested before transmission, never sent raw).
    ///
    /// Every runtime failure (network, challenge denial, missing or
    /// mismatched server token) collapses to `false`; the cause is
    /// logged. On success, when periodic verification is configured, the
    /// revalidation monitor is (re)started for this license; a previously
    /// running monitor is stopped first.
    pub async fn login(&self, license: &str, device: Option<&str>) -> bool {
        if license.trim().is_empty() {
            warn!(app = %self.inner.name, "login called with an empty license");
            return false;
        }

        match self.attempt(license, device).await {
            Ok(()) => {
                info!(app = %self.inner.name, "license accepted");
                if let Verification::Periodic {
                    interval,
                    on_failure,
                } = &self.inner.verification
                {
                    self.start_monitor(license, device, *interval, on_failure.clone());
                }
                true
            }
            Err(failure) => {
                warn!(app = %self.inner.name, %failure, "license rejected");
                false
            }
        }
    }

    /// Runs one full handshake without touching the monitor.
    pub(crate) async fn attempt(
        &self,
        license: &str,
        device: Option<&str>,
    ) -> Result<(), AuthFailure> {
        let inner = &self.inner;

        let granted = challenge::request(inner.api.as_ref(), &inner.name).await?;
        let proof = derive_proof(&granted.other_data, license, &inner.secret_digest);

        let request = VerifyRequest {
            token: proof.clone(),
            mac_hash: device.map(digest_hex),
        };
        let sealed = seal(&request)
            .map_err(|e| AuthFailure::Transport(format!("failed to seal request: {e}")))?;

        let response = inner
            .api
            .submit_proof(&inner.name, license, Envelope { data: sealed })
            .await?;
        let Some(token) = response.token else {
            return Err(AuthFailure::MissingToken);
        };

        let trusted = inner.clock.now().await?;
        let expected = expected_ack(&proof, proof_hour(trusted), &inner.secret_digest);
        if expected != token {
            return Err(AuthFailure::TokenMismatch);
        }

        debug!(app = %inner.name, "server acknowledgment verified");
        Ok(())
    }

    /// Whether a revalidation monitor is currently running.
    #[must_use]
    pub fn monitoring(&self) -> bool {
        self.monitor_slot()
            .as_ref()
            .is_some_and(MonitorHandle::is_running)
    }

    /// Stops the revalidation monitor, if one is running. An in-flight
    /// cycle completes; the loop exits at its next sleep boundary.
    pub fn stop_monitoring(&self) {
        if let Some(handle) = self.monitor_slot().take() {
            handle.stop();
        }
    }

    /// Detaches the running monitor, transferring its lifecycle to the
    /// caller. Returns `None` when no monitor is running.
    pub fn take_monitor(&self) -> Option<MonitorHandle> {
        self.monitor_slot().take()
    }

    fn start_monitor(
        &self,
        license: &str,
        device: Option<&str>,
        interval: Duration,
        on_failure: FailureCallback,
    ) {
        let handle = monitor::start(
            self.clone(),
            license.to_string(),
            device.map(str::to_string),
            interval,
            on_failure,
        );
        if let Some(previous) = self.monitor_slot().replace(handle) {
            previous.stop();
        }
    }

    fn monitor_slot(&self) -> std::sync::MutexGuard<'_, Option<MonitorHandle>> {
        self.inner
            .monitor
            .lock()
            .expect("monitor slot lock poisoned")
    }
}
