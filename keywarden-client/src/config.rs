//! SDK configuration and fail-fast validation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Base URL of the production licensing service.
pub const DEFAULT_API_BASE_URL: &str = "https://api.keywarden.io/v1";

/// Default period between revalidation cycles.
pub const DEFAULT_REVALIDATION_INTERVAL: Duration = Duration::from_secs(900);

/// Callback invoked when a revalidation cycle fails.
pub type FailureCallback = Arc<dyn Fn() + Send + Sync>;

/// Whether and how the SDK re-verifies a license after a successful login.
#[derive(Clone)]
pub enum Verification {
    /// Verify once at login; no background activity.
    Off,
    /// Re-run the full login on a fixed period, firing `on_failure` once
    /// for every cycle that fails.
    Periodic {
        /// Period between cycles.
        interval: Duration,
        /// Invoked from the monitor task on each failed cycle.
        on_failure: FailureCallback,
    },
}

impl Verification {
    /// Periodic verification with [`DEFAULT_REVALIDATION_INTERVAL`].
    pub fn periodic(on_failure: impl Fn() + Send + Sync + 'static) -> Self {
        Self::Periodic {
            interval: DEFAULT_REVALIDATION_INTERVAL,
            on_failure: Arc::new(on_failure),
        }
    }

    /// Whether this policy starts a monitor after login.
    #[must_use]
    pub fn is_periodic(&self) -> bool {
        matches!(self, Self::Periodic { .. })
    }
}

impl fmt::Debug for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("Off"),
            Self::Periodic { interval, .. } => f
                .debug_struct("Periodic")
                .field("interval", interval)
                .finish_non_exhaustive(),
        }
    }
}

/// Configuration for one application talking to the licensing service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Application name as registered with the service.
    pub name: String,
    /// Application secret key; digested at construction and never sent raw.
    pub secret_key: String,
    /// Base URL of the service. Tests point this at a local mock server.
    pub api_base_url: String,
    /// Re-verification policy.
    pub verification: Verification,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            secret_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            verification: Verification::Off,
        }
    }
}

impl AppConfig {
    /// Creates a config for the production service with verification off.
    pub fn new(name: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    /// Sets the re-verification policy.
    #[must_use]
    pub fn with_verification(mut self, verification: Verification) -> Self {
        self.verification = verification;
        self
    }

    /// Sets the service base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Checks the required fields. Runs before any network activity.
    pub(crate) fn validate(&self) -> ClientResult<()> {
        if self.name.trim().is_empty() {
            return Err(ClientError::Config(
                "application name must not be empty".to_string(),
            ));
        }
        if self.secret_key.trim().is_empty() {
            return Err(ClientError::Config(
                "secret key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
