//! Typed value objects for the SoundTouch control surface.
//!
//! Every type here is an immutable snapshot of one device document. Fields
//! the device omitted are `None`, never defaulted; see the crate-level
//! decoding rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// A music source, as reported on `nowPlaying` and used for content
/// selection.
///
/// The wire mapping is a closed, exact-match set; an unknown string is a
/// decode error rather than a catch-all variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    SlaveSource,
    InternetRadio,
    Pandora,
    Airplay,
    StoredMusic,
    Aux,
    Bluetooth,
    OffSource,
    CurratedRadio,
    Standby,
    Update,
    Deezer,
    Spotify,
    IHeart,
    LocalMusic,
    Upnp,
}

impl Source {
    /// The exact string the device uses for this source.
    pub fn as_wire(self) -> &'static str {
        match self {
            Source::SlaveSource => "SLAVE_SOURCE",
            Source::InternetRadio => "INTERNET_RADIO",
            Source::Pandora => "PANDORA",
            Source::Airplay => "AIRPLAY",
            Source::StoredMusic => "STORED_MUSIC",
            Source::Aux => "AUX",
            Source::Bluetooth => "BLUETOOTH",
            Source::OffSource => "OFF_SOURCE",
            Source::CurratedRadio => "CURRATED_RADIO",
            Source::Standby => "STANDBY",
            Source::Update => "UPDATE",
            Source::Deezer => "DEEZER",
            Source::Spotify => "SPOTIFY",
            Source::IHeart => "IHEART",
            Source::LocalMusic => "LOCAL_MUSIC",
            Source::Upnp => "UPNP",
        }
    }
}

impl FromStr for Source {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SLAVE_SOURCE" => Ok(Source::SlaveSource),
            "INTERNET_RADIO" => Ok(Source::InternetRadio),
            "PANDORA" => Ok(Source::Pandora),
            "AIRPLAY" => Ok(Source::Airplay),
            "STORED_MUSIC" => Ok(Source::StoredMusic),
            "AUX" => Ok(Source::Aux),
            "BLUETOOTH" => Ok(Source::Bluetooth),
            "OFF_SOURCE" => Ok(Source::OffSource),
            "CURRATED_RADIO" => Ok(Source::CurratedRadio),
            "STANDBY" => Ok(Source::Standby),
            "UPDATE" => Ok(Source::Update),
            "DEEZER" => Ok(Source::Deezer),
            "SPOTIFY" => Ok(Source::Spotify),
            "IHEART" => Ok(Source::IHeart),
            "LOCAL_MUSIC" => Ok(Source::LocalMusic),
            "UPNP" => Ok(Source::Upnp),
            other => Err(DecodeError::UnknownSource(other.to_string())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Device configuration, the `/info` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Opaque device identifier
    pub device_id: Option<String>,
    /// Friendly display name
    pub name: Option<String>,
    /// Model/type string (e.g. "SoundTouch 20")
    pub device_type: Option<String>,
    /// Account identifier the device is registered to
    pub account_uuid: Option<String>,
    /// Hardware module type
    pub module_type: Option<String>,
    /// Product variant
    pub variant: Option<String>,
    /// Variant mode
    pub variant_mode: Option<String>,
    /// ISO country code
    pub country_code: Option<String>,
    /// Region code
    pub region_code: Option<String>,
    /// Network interfaces the device reported
    pub networks: Vec<Network>,
    /// Hardware/software components
    pub components: Vec<Component>,
}

impl Config {
    /// Primary network interface: the one tagged `SMSC` when present,
    /// otherwise the first one reported.
    fn primary_network(&self) -> Option<&Network> {
        self.networks
            .iter()
            .find(|network| network.network_type == "SMSC")
            .or_else(|| self.networks.first())
    }

    /// IP address of the primary network interface.
    pub fn device_ip(&self) -> Option<&str> {
        self.primary_network()?.ip_address.as_deref()
    }

    /// MAC address of the primary network interface.
    pub fn mac_address(&self) -> Option<&str> {
        self.primary_network()?.mac_address.as_deref()
    }
}

/// One network interface entry from `/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Interface type tag (e.g. "SMSC", "SCM")
    pub network_type: String,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
}

/// One component entry from `/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub category: Option<String>,
    pub software_version: Option<String>,
    pub serial_number: Option<String>,
}

/// Playback status, the `/now_playing` document.
///
/// Fields that do not apply to the current source are `None`; a radio
/// stream has no `track`, a local track has no `station_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Source currently playing (or `Standby`)
    pub source: Source,
    /// Descriptor of what is playing
    pub content_item: ContentItem,
    pub track: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Artwork URL, only when the device flags the image as present
    pub image: Option<String>,
    /// Track length in seconds
    pub duration: Option<u32>,
    /// Playback position in seconds
    pub position: Option<u32>,
    pub play_status: Option<String>,
    pub shuffle_setting: Option<String>,
    pub repeat_setting: Option<String>,
    pub stream_type: Option<String>,
    pub track_id: Option<String>,
    pub station_name: Option<String>,
    pub description: Option<String>,
    pub station_location: Option<String>,
}

/// The device's descriptor for "what is playing or selectable".
///
/// `source` and `item_type` stay raw strings here: the descriptor must be
/// replayable verbatim (see [`Preset::source_xml`]), and the device emits
/// type strings outside the closed selection set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Display name (`<itemName>`)
    pub name: Option<String>,
    pub source: Option<String>,
    pub item_type: Option<String>,
    /// Source-specific location/identifier
    pub location: Option<String>,
    pub source_account: Option<String>,
    pub is_presetable: bool,
}

/// Volume state, the `/volume` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Current level (0-100)
    pub actual: u8,
    /// Target level of an in-flight ramp (0-100)
    pub target: u8,
    pub muted: bool,
}

/// One stored preset slot (1-6) from `/presets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Device-assigned slot id
    pub preset_id: Option<u8>,
    /// Display name of the preset's content
    pub name: Option<String>,
    pub content_item: ContentItem,
    /// The descriptor exactly as serialized in the preset document.
    /// Selecting a preset POSTs these bytes back unchanged.
    pub source_xml: String,
}

/// Multi-room zone topology, the `/getZone` document.
///
/// Recomputed wholesale on every fetch; a device not in any zone is
/// represented as the absence of a `ZoneStatus`, not an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStatus {
    /// Device id of the zone master
    pub master_id: Option<String>,
    /// IP of the master, present only when viewed from a slave
    pub master_ip: Option<String>,
    pub slaves: Vec<ZoneSlave>,
}

impl ZoneStatus {
    /// A device is the master iff its zone document carries no sender IP.
    pub fn is_master(&self) -> bool {
        self.master_ip.is_none()
    }
}

/// One `<member>` of a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSlave {
    pub device_ip: Option<String>,
    pub role: Option<String>,
}
