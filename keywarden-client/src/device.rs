//! Stable machine identity for optional device binding.
//!
//! Callers that want a license bound to hardware pass a binding string to
//! `login`; this module derives one from identifiers that survive reboots.
//! The raw binding never crosses the wire; the authenticator digests it
//! before transmission.

use std::env;

use serde::{Deserialize, Serialize};

/// Identifying facts about the current machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Operating system name.
    pub os_name: String,
    /// CPU architecture.
    pub arch: String,
    /// Hostname.
    pub hostname: String,
}

impl DeviceInfo {
    /// Collects information about the current machine.
    #[must_use]
    pub fn collect() -> Self {
        Self {
            os_name: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            hostname: get_hostname(),
        }
    }
}

/// Returns a stable binding string for the current machine, suitable as
/// the device argument of `login`.
///
/// Combines OS, architecture, hostname, and the platform machine id where
/// one is available. The result changes only when the machine itself does.
#[must_use]
pub fn machine_binding() -> String {
    let info = DeviceInfo::collect();
    let mut parts = vec![info.os_name, info.arch, info.hostname];

    if let Some(machine_id) = get_machine_id() {
        parts.push(machine_id);
    }

    parts.join("|")
}

/// Gets the machine hostname.
fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Gets the machine ID (platform-specific unique identifier).
fn get_machine_id() -> Option<String> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("IOPlatformUUID"))
                    .and_then(|l| l.split('"').nth(3))
                    .map(String::from)
            })
    }

    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        None
    }
}
