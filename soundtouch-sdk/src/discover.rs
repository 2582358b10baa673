//! Network discovery of devices, wrapped into ready-to-use handles.

use std::time::Duration;

use soundtouch_discovery::DiscoveredDevice;
use tracing::{info, warn};

use crate::device::{SoundTouchDevice, DEFAULT_DLNA_PORT, DEFAULT_WS_PORT};
use crate::error::Result;

/// Browse the local network for SoundTouch devices and return a
/// connected handle for each one found before `timeout` elapses.
///
/// Each handle has its configuration fetched during construction;
/// records whose fetch fails are skipped. The advertised port is used
/// for the control surface; the websocket and DLNA ports are not
/// advertised and use their defaults.
pub fn discover_devices(timeout: Duration) -> Result<Vec<SoundTouchDevice>> {
    let records = soundtouch_discovery::discover(timeout)?;
    info!(count = records.len(), "discovery finished");
    Ok(connect_records(records))
}

fn connect_records(records: Vec<DiscoveredDevice>) -> Vec<SoundTouchDevice> {
    records
        .into_iter()
        .filter_map(|record| {
            match SoundTouchDevice::connect_with_ports(
                &record.host,
                record.port,
                DEFAULT_WS_PORT,
                DEFAULT_DLNA_PORT,
            ) {
                Ok(device) => Some(device),
                Err(err) => {
                    warn!(host = %record.host, error = %err, "skipping unreachable device");
                    None
                }
            }
        })
        .collect()
}
