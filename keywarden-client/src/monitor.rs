//! Periodic license revalidation.
//!
//! After a successful login with periodic verification configured, a
//! background task repeats the full handshake on a fixed period. A failed
//! cycle fires the failure callback exactly once and the loop keeps going;
//! the stop handle (or process exit) ends it.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::auth::Authenticator;
use crate::config::FailureCallback;

/// Handle to a running revalidation task.
///
/// The task stops when [`MonitorHandle::stop`] is called or the handle is
/// dropped, in both cases at the next sleep boundary.
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Whether the task is still looping.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signals the task to exit at its next sleep boundary.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Signals the task and waits for it to exit.
    pub async fn stop_and_wait(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Spawns the revalidation loop for one `(license, device)` pair.
///
/// Must run inside a tokio runtime. Each cycle sleeps a full period first,
/// then performs a complete login with the same credentials.
pub(crate) fn start(
    auth: Authenticator,
    license: String,
    device: Option<String>,
    interval: Duration,
    on_failure: FailureCallback,
) -> MonitorHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                () = tokio::time::sleep(interval) => {}
                _ = shutdown_rx.changed() => {
                    debug!(app = %auth.app_name(), "revalidation monitor stopped");
                    return;
                }
            }

            debug!(app = %auth.app_name(), "revalidation cycle");
            match auth.attempt(&license, device.as_deref()).await {
                Ok(()) => {}
                Err(failure) => {
                    warn!(app = %auth.app_name(), %failure, "revalidation cycle failed");
                    on_failure();
                }
            }
        }
    });

    MonitorHandle { shutdown, task }
}
