//! Trusted time from the service, as an absolute UTC instant.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{ClientError, ClientResult};
use crate::transport::LicensingApi;

/// Reads the service's notion of "now" through the transport.
///
/// No retry: the caller decides whether a missing trusted time aborts the
/// login attempt.
pub struct TrustedClock {
    api: Arc<dyn LicensingApi>,
}

impl TrustedClock {
    /// Creates a clock reading through the given transport.
    pub fn new(api: Arc<dyn LicensingApi>) -> Self {
        Self { api }
    }

    /// Returns the server's current time.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the endpoint is unreachable, returns a
    /// non-numeric body, or reports a timestamp outside the representable
    /// range.
    pub async fn now(&self) -> ClientResult<DateTime<Utc>> {
        let secs = self.api.unix_time().await?;
        Utc.timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| ClientError::Transport(format!("unixtime out of range: {secs}")))
    }
}
