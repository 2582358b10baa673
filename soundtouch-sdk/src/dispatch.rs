//! Routing of push notification envelopes into the cache and listeners.
//!
//! Every inbound message is an `<updates>` envelope whose first child
//! names the update category. Anything else, and any payload that fails
//! to decode, is logged and dropped; one bad message must never take the
//! receive loop down.

use soundtouch_parser::{decode_presets, decode_status, decode_volume, dom};
use tracing::{debug, warn};

use crate::device::DeviceInner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateKind {
    Volume,
    NowPlaying,
    Presets,
    Zone,
    Info,
}

impl UpdateKind {
    fn classify(tag: &str) -> Option<Self> {
        match tag {
            "volumeUpdated" => Some(UpdateKind::Volume),
            "nowPlayingUpdated" => Some(UpdateKind::NowPlaying),
            "presetsUpdated" => Some(UpdateKind::Presets),
            "zoneUpdated" => Some(UpdateKind::Zone),
            "infoUpdated" => Some(UpdateKind::Info),
            _ => None,
        }
    }
}

pub(crate) fn handle_message(device: &DeviceInner, message: &str) {
    let root = match dom::parse(message) {
        Ok(root) => root,
        Err(err) => {
            warn!(%err, "dropping unparseable notification");
            return;
        }
    };
    if root.name != "updates" {
        debug!(root = %root.name, "ignoring non-update message");
        return;
    }
    let Some(first) = root.children.iter().find_map(|node| node.as_element()) else {
        debug!("ignoring empty update envelope");
        return;
    };
    let Some(kind) = UpdateKind::classify(&first.name) else {
        debug!(update = %first.name, "ignoring unrecognized update");
        return;
    };

    match kind {
        UpdateKind::Volume => match decode_volume(message) {
            Ok(volume) => device.apply_volume(volume),
            Err(err) => warn!(%err, "dropping undecodable volume update"),
        },
        UpdateKind::NowPlaying => match decode_status(message) {
            Ok(status) => device.apply_status(status),
            Err(err) => warn!(%err, "dropping undecodable status update"),
        },
        // An empty presetsUpdated is meaningful: all presets cleared.
        UpdateKind::Presets => match decode_presets(message) {
            Ok(presets) => device.apply_presets(presets),
            Err(err) => warn!(%err, "dropping undecodable presets update"),
        },
        // Zone and info updates carry no usable payload; re-fetch.
        UpdateKind::Zone => match device.refresh_zone() {
            Ok(zone) => device.listeners.zone.notify(&zone),
            Err(err) => warn!(%err, "zone re-fetch after update failed"),
        },
        UpdateKind::Info => match device.refresh_config() {
            Ok(config) => device.listeners.config.notify(&config),
            Err(err) => warn!(%err, "info re-fetch after update failed"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SoundTouchDevice;
    use parking_lot::Mutex;
    use soundtouch_parser::{Source, Volume};
    use std::sync::Arc;

    fn device_for(server: &mockito::Server) -> SoundTouchDevice {
        let addr = server.host_with_port();
        let (host, port) = addr.rsplit_once(':').unwrap();
        let port: u16 = port.parse().unwrap();
        SoundTouchDevice::with_ports(host, port, port, port)
    }

    fn offline_device() -> SoundTouchDevice {
        SoundTouchDevice::with_ports("127.0.0.1", 1, 1, 1)
    }

    #[test]
    fn volume_update_replaces_cache_and_notifies() {
        let device = offline_device();
        let seen: Arc<Mutex<Vec<Volume>>> = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = seen.clone();
            device.add_volume_listener(move |volume| seen.lock().push(*volume));
        }

        handle_message(
            &device.inner,
            r#"<updates deviceID="689E198DDB3A">
  <volumeUpdated>
    <volume><targetvolume>22</targetvolume><actualvolume>22</actualvolume><muteenabled>false</muteenabled></volume>
  </volumeUpdated>
</updates>"#,
        );

        assert_eq!(seen.lock().len(), 1);
        assert_eq!(seen.lock()[0].actual, 22);
        // The cache is served without a network round trip.
        assert_eq!(device.volume(false).unwrap().actual, 22);
    }

    #[test]
    fn now_playing_update_carries_full_status() {
        let device = offline_device();
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = seen.clone();
            device.add_status_listener(move |status| seen.lock().push(status.clone()));
        }

        handle_message(
            &device.inner,
            r#"<updates deviceID="689E198DDB3A">
  <nowPlayingUpdated>
    <nowPlaying deviceID="689E198DDB3A" source="SPOTIFY">
      <ContentItem source="SPOTIFY" type="uri" location="spotify:track:3BgEQzN8JVLLejhCSJbMyi" sourceAccount="user" isPresetable="true">
        <itemName>Devil We Know</itemName>
      </ContentItem>
      <track>Devil We Know</track>
      <artist>LANY</artist>
      <playStatus>PLAY_STATE</playStatus>
    </nowPlaying>
  </nowPlayingUpdated>
</updates>"#,
        );

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].source, Source::Spotify);
        assert_eq!(seen[0].track.as_deref(), Some("Devil We Know"));
        assert_eq!(device.status(false).unwrap().artist.as_deref(), Some("LANY"));
    }

    #[test]
    fn empty_presets_update_dispatches_empty_list() {
        let device = offline_device();
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = seen.clone();
            device.add_presets_listener(move |presets| seen.lock().push(presets.clone()));
        }

        handle_message(
            &device.inner,
            r#"<updates deviceID="689E198DDB3A"><presetsUpdated /></updates>"#,
        );

        assert_eq!(seen.lock().len(), 1);
        assert!(seen.lock()[0].is_empty());
        assert!(device.presets(false).unwrap().is_empty());
    }

    #[test]
    fn zone_update_triggers_one_refetch() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/getZone")
            .with_body(
                r#"<zone master="1111MASTER"><member ipaddress="192.168.1.2" role="NORMAL">1111SLAVE</member></zone>"#,
            )
            .expect(1)
            .create();
        let device = device_for(&server);
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = seen.clone();
            device.add_zone_status_listener(move |zone| seen.lock().push(zone.clone()));
        }

        handle_message(
            &device.inner,
            r#"<updates deviceID="689E198DDB3A"><zoneUpdated><zone /></zoneUpdated></updates>"#,
        );

        mock.assert();
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        let zone = seen[0].as_ref().unwrap();
        assert_eq!(zone.master_id.as_deref(), Some("1111MASTER"));
        assert_eq!(device.zone_status(false).unwrap().unwrap().slaves.len(), 1);
    }

    #[test]
    fn info_update_refetches_config() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/info")
            .with_body(
                r#"<info deviceID="00112233445566"><name>Kitchen</name><networkInfo type="SMSC"><ipAddress>192.168.1.1</ipAddress></networkInfo></info>"#,
            )
            .expect(1)
            .create();
        let device = device_for(&server);
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = seen.clone();
            device.add_device_info_listener(move |config| seen.lock().push(config.clone()));
        }

        handle_message(
            &device.inner,
            r#"<updates deviceID="00112233445566"><infoUpdated /></updates>"#,
        );

        mock.assert();
        assert_eq!(seen.lock()[0].name.as_deref(), Some("Kitchen"));
        assert_eq!(device.config(false).unwrap().name.as_deref(), Some("Kitchen"));
    }

    #[test]
    fn unrecognized_and_malformed_messages_are_dropped() {
        let device = offline_device();
        let count = Arc::new(Mutex::new(0));
        {
            let count = count.clone();
            device.add_volume_listener(move |_| *count.lock() += 1);
        }

        handle_message(&device.inner, "not xml at all");
        handle_message(&device.inner, "<userActivityUpdate />");
        handle_message(
            &device.inner,
            r#"<updates deviceID="x"><connectionStateUpdated /></updates>"#,
        );
        handle_message(&device.inner, r#"<updates deviceID="x"></updates>"#);
        // Undecodable payload for a recognized category.
        handle_message(
            &device.inner,
            r#"<updates><volumeUpdated><volume><actualvolume>loud</actualvolume></volume></volumeUpdated></updates>"#,
        );

        assert_eq!(*count.lock(), 0);
    }
}
