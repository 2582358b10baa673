//! mDNS discovery of SoundTouch devices.
//!
//! SoundTouch devices advertise their control surface under
//! `_soundtouch._tcp.local.`. Discovery browses that service for a fixed
//! window, resolving each advertisement into the host and port the
//! control client needs.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let devices = soundtouch_discovery::discover(Duration::from_secs(3)).unwrap();
//! for device in devices {
//!     println!("{} at {}:{}", device.name, device.host, device.port);
//! }
//! ```

mod error;

pub use error::{DiscoveryError, Result};

use std::time::{Duration, Instant};

use mdns_sd::{ServiceDaemon, ServiceEvent};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// The mDNS service type SoundTouch devices register.
pub const SERVICE_TYPE: &str = "_soundtouch._tcp.local.";

/// One resolved device advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    /// Full mDNS service name
    pub name: String,
    /// IP address, preferring IPv4 when the device advertises both
    pub host: String,
    /// Control surface port (normally 8090)
    pub port: u16,
}

/// Browse the local network for SoundTouch devices until `timeout`
/// elapses. Duplicate advertisements for the same host are collapsed.
pub fn discover(timeout: Duration) -> Result<Vec<DiscoveredDevice>> {
    let daemon = ServiceDaemon::new().map_err(|e| DiscoveryError::Daemon(e.to_string()))?;
    let receiver = daemon
        .browse(SERVICE_TYPE)
        .map_err(|e| DiscoveryError::Daemon(e.to_string()))?;

    let mut devices: Vec<DiscoveredDevice> = Vec::new();
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match receiver.recv_timeout(remaining) {
            Ok(ServiceEvent::ServiceResolved(resolved)) => {
                let address = resolved
                    .get_addresses()
                    .iter()
                    .find(|addr| addr.is_ipv4())
                    .or_else(|| resolved.get_addresses().iter().next())
                    .copied();
                let Some(address) = address else {
                    debug!(name = resolved.get_fullname(), "resolved without address");
                    continue;
                };
                let device = DiscoveredDevice {
                    name: resolved.get_fullname().to_string(),
                    host: address.to_string(),
                    port: resolved.get_port(),
                };
                if devices.iter().any(|known| known.host == device.host) {
                    continue;
                }
                info!(name = %device.name, host = %device.host, port = device.port, "discovered device");
                devices.push(device);
            }
            Ok(other) => debug!(?other, "ignoring mDNS event"),
            // Receive window closed; either way the browse is over.
            Err(_) => break,
        }
    }

    let _ = daemon.shutdown();
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_returns_immediately() {
        // Environments without multicast still have to fail fast.
        if let Ok(devices) = discover(Duration::ZERO) {
            assert!(devices.is_empty());
        }
    }

    #[test]
    fn service_type_is_soundtouch() {
        assert_eq!(SERVICE_TYPE, "_soundtouch._tcp.local.");
    }
}
