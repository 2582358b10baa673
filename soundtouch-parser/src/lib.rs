//! XML parsing for SoundTouch devices.
//!
//! SoundTouch speakers expose a REST-over-HTTP surface whose request and
//! response bodies are small XML documents, and push the same document
//! shapes over a websocket wrapped in an `<updates>` envelope. This crate
//! turns those documents into typed value objects.
//!
//! Parsing is DOM-based rather than serde-based on purpose: the wire format
//! is loose about which elements are present, and the decoding rules are
//! about defaults, not structure. The contract is:
//!
//! - absent elements and attributes decode to `None`
//! - absent numeric fields decode to `None`; present but non-numeric fields
//!   are a [`DecodeError`]
//! - boolean-like fields are an exact string comparison against `"true"`;
//!   anything else, including absence, is `false`

mod decode;
mod error;
mod model;

pub mod dom;

pub use decode::{
    decode_config, decode_presets, decode_status, decode_volume, decode_zone_status,
};
pub use error::{DecodeError, Result};
pub use model::{
    Component, Config, ContentItem, Network, Preset, Source, Status, Volume, ZoneSlave,
    ZoneStatus,
};
