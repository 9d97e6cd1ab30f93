//! Client SDK for the KeyWarden licensing service.
//!
//! This crate handles:
//! - Application login: challenge retrieval, proof derivation, and
//!   independent verification of the server's acknowledgment token
//! - Optional device binding via hashed machine identifiers
//! - A periodic background revalidation monitor with an explicit stop handle
//!
//! # Design Principles
//!
//! - **Secrets stay local**: only keyed digests of the application secret
//!   and device identifier ever cross the wire
//! - **Soft failures**: every runtime authentication failure collapses to
//!   a boolean at the public surface; causes are logged, never thrown
//! - **Explicit lifecycle**: monitoring is opt-in and always cancellable
//!
//! # Example
//!
//! ```no_run
//! use keywarden_client::{AppConfig, Authenticator, Verification};
//!
//! # async fn demo() -> Result<(), keywarden_client::ClientError> {
//! let config = AppConfig::new("demo", "s3cr3t")
//!     .with_verification(Verification::periodic(|| eprintln!("license lapsed")));
//! let auth = Authenticator::new(config)?;
//!
//! if auth.login("ABC-123", None).await {
//!     // licensed; a revalidation monitor is now running
//! }
//! # auth.stop_monitoring();
//! # Ok(())
//! # }
//! ```

mod auth;
mod challenge;
mod config;
mod device;
mod error;
mod monitor;
mod time;
mod transport;

pub use keywarden_protocol as protocol;

pub use auth::Authenticator;
pub use config::{
    AppConfig, FailureCallback, Verification, DEFAULT_API_BASE_URL,
    DEFAULT_REVALIDATION_INTERVAL,
};
pub use device::{machine_binding, DeviceInfo};
pub use error::{ClientError, ClientResult};
pub use monitor::MonitorHandle;
pub use time::TrustedClock;
pub use transport::{HttpApi, LicensingApi};
