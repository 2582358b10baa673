//! Sync-first SDK for Bose SoundTouch speakers.
//!
//! A [`SoundTouchDevice`] wraps one speaker: playback and volume commands,
//! presets, multi-room zones, and a cached view of device state. Commands
//! and state fetches are blocking HTTP round trips; push notifications
//! arrive over a websocket once [`SoundTouchDevice::start_notifications`]
//! is called, keeping the cache current and driving registered listeners.
//!
//! ```no_run
//! use soundtouch_sdk::SoundTouchDevice;
//!
//! let device = SoundTouchDevice::connect("192.168.1.1")?;
//! let status = device.status(true)?;
//! println!("playing from {}", status.source);
//!
//! device.add_volume_listener(|volume| {
//!     println!("volume is now {}", volume.actual);
//! });
//! device.start_notifications()?;
//! # Ok::<(), soundtouch_sdk::SoundTouchError>(())
//! ```

mod device;
mod discover;
mod dispatch;
mod error;
mod listener;
mod notification;

pub use device::{
    SoundTouchDevice, DEFAULT_DLNA_PORT, DEFAULT_PORT, DEFAULT_WS_PORT,
};
pub use discover::discover_devices;
pub use error::{Result, SoundTouchError};
pub use listener::ListenerHandle;

pub use soundtouch_api::{Key, Type};
pub use soundtouch_parser::{
    Component, Config, ContentItem, Network, Preset, Source, Status, Volume, ZoneSlave,
    ZoneStatus,
};
