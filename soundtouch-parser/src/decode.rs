//! Decoders from device XML documents to the typed models.
//!
//! Each decoder searches the document recursively, so the same function
//! handles both a direct response body and the same payload nested inside
//! an `<updates>` push envelope.

use xmltree::Element;

use crate::dom;
use crate::error::{DecodeError, Result};
use crate::model::{
    Component, Config, ContentItem, Network, Preset, Status, Volume, ZoneSlave, ZoneStatus,
};

/// Decode an `/info` document.
pub fn decode_config(xml: &str) -> Result<Config> {
    let root = dom::parse(xml)?;
    let info = dom::find(&root, "info").ok_or(DecodeError::MissingElement("info"))?;

    let networks = dom::find_all(info, "networkInfo")
        .into_iter()
        .map(decode_network)
        .collect::<Result<Vec<_>>>()?;
    let components = dom::find_all(info, "component")
        .into_iter()
        .map(decode_component)
        .collect();

    Ok(Config {
        device_id: dom::attr(info, "deviceID").map(str::to_string),
        name: dom::element_text(info, "name"),
        device_type: dom::element_text(info, "type"),
        account_uuid: dom::element_text(info, "margeAccountUUID"),
        module_type: dom::element_text(info, "moduleType"),
        variant: dom::element_text(info, "variant"),
        variant_mode: dom::element_text(info, "variantMode"),
        country_code: dom::element_text(info, "countryCode"),
        region_code: dom::element_text(info, "regionCode"),
        networks,
        components,
    })
}

fn decode_network(element: &Element) -> Result<Network> {
    let network_type = dom::attr(element, "type")
        .ok_or(DecodeError::MissingAttribute {
            element: "networkInfo",
            attribute: "type",
        })?
        .to_string();
    Ok(Network {
        network_type,
        mac_address: dom::element_text(element, "macAddress"),
        ip_address: dom::element_text(element, "ipAddress"),
    })
}

fn decode_component(element: &Element) -> Component {
    Component {
        category: dom::element_text(element, "componentCategory"),
        software_version: dom::element_text(element, "softwareVersion"),
        serial_number: dom::element_text(element, "serialNumber"),
    }
}

/// Decode a `/now_playing` document.
pub fn decode_status(xml: &str) -> Result<Status> {
    let root = dom::parse(xml)?;
    let now_playing =
        dom::find(&root, "nowPlaying").ok_or(DecodeError::MissingElement("nowPlaying"))?;
    let source = dom::attr(now_playing, "source")
        .ok_or(DecodeError::MissingAttribute {
            element: "nowPlaying",
            attribute: "source",
        })?
        .parse()?;
    let content_item = dom::find(now_playing, "ContentItem")
        .map(decode_content_item)
        .ok_or(DecodeError::MissingElement("ContentItem"))?;

    // The art URL is only meaningful when the device flags it present.
    let image = match dom::element_attr(now_playing, "art", "artImageStatus") {
        Some("IMAGE_PRESENT") => dom::element_text(now_playing, "art"),
        _ => None,
    };
    let duration = match dom::find(now_playing, "time") {
        Some(time) => dom::attr_number(time, "total")?,
        None => None,
    };

    Ok(Status {
        source,
        content_item,
        track: dom::element_text(now_playing, "track"),
        artist: dom::element_text(now_playing, "artist"),
        album: dom::element_text(now_playing, "album"),
        image,
        duration,
        position: dom::element_number(now_playing, "time")?,
        play_status: dom::element_text(now_playing, "playStatus"),
        shuffle_setting: dom::element_text(now_playing, "shuffleSetting"),
        repeat_setting: dom::element_text(now_playing, "repeatSetting"),
        stream_type: dom::element_text(now_playing, "streamType"),
        track_id: dom::element_text(now_playing, "trackID"),
        station_name: dom::element_text(now_playing, "stationName"),
        description: dom::element_text(now_playing, "description"),
        station_location: dom::element_text(now_playing, "stationLocation"),
    })
}

fn decode_content_item(element: &Element) -> ContentItem {
    ContentItem {
        name: dom::element_text(element, "itemName"),
        source: dom::attr(element, "source").map(str::to_string),
        item_type: dom::attr(element, "type").map(str::to_string),
        location: dom::attr(element, "location").map(str::to_string),
        source_account: dom::attr(element, "sourceAccount").map(str::to_string),
        is_presetable: dom::attr_bool(element, "isPresetable"),
    }
}

/// Decode a `/volume` document. Levels are required, mute defaults off.
pub fn decode_volume(xml: &str) -> Result<Volume> {
    let root = dom::parse(xml)?;
    let actual = dom::element_number(&root, "actualvolume")?
        .ok_or(DecodeError::MissingElement("actualvolume"))?;
    let target = dom::element_number(&root, "targetvolume")?
        .ok_or(DecodeError::MissingElement("targetvolume"))?;
    Ok(Volume {
        actual,
        target,
        muted: dom::element_bool(&root, "muteenabled"),
    })
}

/// Decode a `/presets` document.
///
/// The descriptor of each slot is kept as the exact bytes the device sent,
/// sliced out of the source text, so that selecting the preset replays it
/// unmodified.
pub fn decode_presets(xml: &str) -> Result<Vec<Preset>> {
    let root = dom::parse(xml)?;
    let slots = dom::find_all(&root, "preset");
    let mut raw = dom::raw_blocks(xml, "ContentItem").into_iter();

    slots
        .into_iter()
        .map(|slot| {
            let content_item = dom::find(slot, "ContentItem")
                .map(decode_content_item)
                .ok_or(DecodeError::MissingElement("ContentItem"))?;
            // Slots and raw descriptor blocks appear in the same document
            // order, one block per slot.
            let source_xml = raw
                .next()
                .ok_or(DecodeError::MissingElement("ContentItem"))?;
            Ok(Preset {
                preset_id: dom::attr_number(slot, "id")?,
                name: dom::element_text(slot, "itemName"),
                content_item,
                source_xml,
            })
        })
        .collect()
}

/// Decode a `/getZone` document. A zone with no members means the device
/// is not grouped, reported as `None`.
pub fn decode_zone_status(xml: &str) -> Result<Option<ZoneStatus>> {
    let root = dom::parse(xml)?;
    let zone = dom::find(&root, "zone").ok_or(DecodeError::MissingElement("zone"))?;

    let slaves: Vec<ZoneSlave> = dom::find_all(zone, "member")
        .into_iter()
        .map(|member| ZoneSlave {
            device_ip: dom::attr(member, "ipaddress").map(str::to_string),
            role: dom::attr(member, "role").map(str::to_string),
        })
        .collect();
    if slaves.is_empty() {
        return Ok(None);
    }

    Ok(Some(ZoneStatus {
        master_id: dom::attr(zone, "master").map(str::to_string),
        master_ip: dom::attr(zone, "senderIPAddress").map(str::to_string),
        slaves,
    }))
}
