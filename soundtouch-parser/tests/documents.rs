//! Integration tests decoding complete device documents.

use soundtouch_parser::{
    decode_presets, decode_status, decode_zone_status, DecodeError, Source,
};

#[test]
fn test_full_spotify_now_playing_document() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8" ?>
<nowPlaying deviceID="689E198DDB3A" source="SPOTIFY" sourceAccount="spotify_account_id">
    <ContentItem source="SPOTIFY" type="uri" location="spotify:artist:2ye2Wgw4gimLv2eAKyk1NB" sourceAccount="spotify_account_id" isPresetable="true">
        <itemName>Metallica</itemName>
    </ContentItem>
    <track>Nothing Else Matters (Live)</track>
    <artist>Metallica</artist>
    <album>S&amp;M (Live with the San Francisco Symphony Orchestra)</album>
    <stationName></stationName>
    <art artImageStatus="IMAGE_PRESENT">http://i.scdn.co/image/5250734ff07e5b27b0bc08e65e043a6088858fe5</art>
    <time total="441">402</time>
    <skipEnabled />
    <playStatus>PLAY_STATE</playStatus>
    <shuffleSetting>SHUFFLE_OFF</shuffleSetting>
    <repeatSetting>REPEAT_OFF</repeatSetting>
    <skipPreviousEnabled />
    <streamType>TRACK_ONDEMAND</streamType>
    <trackID>spotify:track:0GGcTltgWFMKGd2wG5sKCo</trackID>
</nowPlaying>"#;

    let status = decode_status(xml).unwrap();
    assert_eq!(status.source, Source::Spotify);
    assert_eq!(status.content_item.name.as_deref(), Some("Metallica"));
    assert_eq!(status.content_item.source.as_deref(), Some("SPOTIFY"));
    assert_eq!(status.content_item.item_type.as_deref(), Some("uri"));
    assert_eq!(
        status.content_item.location.as_deref(),
        Some("spotify:artist:2ye2Wgw4gimLv2eAKyk1NB")
    );
    assert_eq!(
        status.content_item.source_account.as_deref(),
        Some("spotify_account_id")
    );
    assert!(status.content_item.is_presetable);
    assert_eq!(status.track.as_deref(), Some("Nothing Else Matters (Live)"));
    assert_eq!(status.artist.as_deref(), Some("Metallica"));
    assert_eq!(
        status.album.as_deref(),
        Some("S&M (Live with the San Francisco Symphony Orchestra)")
    );
    assert_eq!(
        status.image.as_deref(),
        Some("http://i.scdn.co/image/5250734ff07e5b27b0bc08e65e043a6088858fe5")
    );
    assert_eq!(status.duration, Some(441));
    assert_eq!(status.position, Some(402));
    assert_eq!(status.play_status.as_deref(), Some("PLAY_STATE"));
    assert_eq!(status.shuffle_setting.as_deref(), Some("SHUFFLE_OFF"));
    assert_eq!(status.repeat_setting.as_deref(), Some("REPEAT_OFF"));
    assert_eq!(status.stream_type.as_deref(), Some("TRACK_ONDEMAND"));
    assert_eq!(
        status.track_id.as_deref(),
        Some("spotify:track:0GGcTltgWFMKGd2wG5sKCo")
    );
    assert_eq!(status.station_name, None);
    assert_eq!(status.station_location, None);
}

#[test]
fn test_full_radio_now_playing_document() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8" ?>
<nowPlaying deviceID="689E198DDB3A" source="INTERNET_RADIO">
    <ContentItem source="INTERNET_RADIO" location="21630" sourceAccount="" isPresetable="true">
        <itemName>RMC Info Talk Sport</itemName>
    </ContentItem>
    <art artImageStatus="IMAGE_PRESENT">http://item.radio456.com/007452/logo/logo-21630.jpg</art>
    <playStatus>PLAY_STATE</playStatus>
    <description>MP3 64 kbps Paris France, Radio Monte Carlo.</description>
    <stationName>RMC Info Talk Sport</stationName>
    <stationLocation>Paris France</stationLocation>
</nowPlaying>"#;

    let status = decode_status(xml).unwrap();
    assert_eq!(status.source, Source::InternetRadio);
    assert_eq!(status.content_item.location.as_deref(), Some("21630"));
    assert_eq!(status.content_item.source_account.as_deref(), Some(""));
    assert_eq!(status.track, None);
    assert_eq!(status.artist, None);
    assert_eq!(status.album, None);
    assert_eq!(status.duration, None);
    assert_eq!(status.position, None);
    assert_eq!(
        status.image.as_deref(),
        Some("http://item.radio456.com/007452/logo/logo-21630.jpg")
    );
    assert_eq!(status.station_name.as_deref(), Some("RMC Info Talk Sport"));
    assert_eq!(
        status.description.as_deref(),
        Some("MP3 64 kbps Paris France, Radio Monte Carlo.")
    );
    assert_eq!(status.station_location.as_deref(), Some("Paris France"));
}

#[test]
fn test_six_slot_preset_document() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8" ?>
<presets>
    <preset id="1" createdOn="1476019956" updatedOn="1476019956">
        <ContentItem source="SPOTIFY" type="uri" location="spotify:artist:2qxJFvFYMEDqd7ui6kSAcq" sourceAccount="spotify_account" isPresetable="true">
            <itemName>Zedd</itemName>
        </ContentItem>
    </preset>
    <preset id="2">
        <ContentItem source="SPOTIFY" type="uri" location="spotify:user:112233:playlist:4X7Cjisbl7340KaIh8Y1Do" sourceAccount="spotify_account" isPresetable="true">
            <itemName>Afternoon Accoustic</itemName>
        </ContentItem>
    </preset>
    <preset id="3">
        <ContentItem source="SPOTIFY" type="uri" location="spotify:user:332211:playlist:376GZaa2huXDHKaORSeIzP" sourceAccount="spotify_account" isPresetable="true">
            <itemName>Rock Ballads</itemName>
        </ContentItem>
    </preset>
    <preset id="4">
        <ContentItem source="SPOTIFY" type="uri" location="spotify:artist:2ye2Wgw4gimLv2eAKyk1NB" sourceAccount="spotify_account" isPresetable="true">
            <itemName>Metallica</itemName>
        </ContentItem>
    </preset>
    <preset id="5">
        <ContentItem source="INTERNET_RADIO" type="stationurl" location="/v1/playback/station/s33828" sourceAccount="" isPresetable="true">
            <itemName>France Info</itemName>
        </ContentItem>
    </preset>
    <preset id="6">
        <ContentItem source="INTERNET_RADIO" type="stationurl" location="/v1/playback/station/s6597" sourceAccount="" isPresetable="true">
            <itemName>RMC</itemName>
        </ContentItem>
    </preset>
</presets>"#;

    let presets = decode_presets(xml).unwrap();
    assert_eq!(presets.len(), 6);
    let names: Vec<_> = presets
        .iter()
        .map(|preset| preset.name.as_deref().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "Zedd",
            "Afternoon Accoustic",
            "Rock Ballads",
            "Metallica",
            "France Info",
            "RMC"
        ]
    );
    for (index, preset) in presets.iter().enumerate() {
        assert_eq!(preset.preset_id, Some(index as u8 + 1));
        assert!(preset.source_xml.starts_with("<ContentItem "));
        assert!(preset.source_xml.ends_with("</ContentItem>"));
        assert!(xml.contains(&preset.source_xml));
    }
    assert_eq!(
        presets[4].content_item.item_type.as_deref(),
        Some("stationurl")
    );
}

#[test]
fn test_preset_slot_without_descriptor_is_an_error() {
    let xml = r#"<presets><preset id="1"><itemName>Empty</itemName></preset></presets>"#;
    assert!(matches!(
        decode_presets(xml),
        Err(DecodeError::MissingElement("ContentItem"))
    ));
}

#[test]
fn test_zone_document_variants() {
    let master = r#"<?xml version="1.0" encoding="UTF-8" ?>
<zone master="1111MASTER">
    <member ipaddress="192.168.1.2" role="NORMAL">1111SLAVE</member>
</zone>"#;
    let zone = decode_zone_status(master).unwrap().unwrap();
    assert!(zone.is_master());
    assert_eq!(zone.master_id.as_deref(), Some("1111MASTER"));
    assert_eq!(zone.slaves[0].device_ip.as_deref(), Some("192.168.1.2"));

    let slave = r#"<zone master="1111MASTER" senderIPAddress="192.168.1.1">
    <member ipaddress="192.168.1.2" role="NORMAL">1111SLAVE</member>
</zone>"#;
    let zone = decode_zone_status(slave).unwrap().unwrap();
    assert!(!zone.is_master());
    assert_eq!(zone.master_ip.as_deref(), Some("192.168.1.1"));

    assert_eq!(decode_zone_status("<zone />").unwrap(), None);
}
