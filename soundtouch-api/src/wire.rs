//! Wire-level vocabulary of the control surface: endpoint paths, remote
//! keys and their two-phase press/release protocol, and selection types.

/// Control surface endpoints, relative to `http://host:port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Device configuration
    Info,
    /// Playback status
    NowPlaying,
    /// Volume state (GET) and absolute level (POST)
    Volume,
    /// Stored presets
    Presets,
    /// Zone topology
    GetZone,
    /// Remote key injection
    Key,
    /// Content selection
    Select,
    /// Zone creation
    SetZone,
    /// Add slaves to an existing zone
    AddZoneSlave,
    /// Remove slaves from an existing zone
    RemoveZoneSlave,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Info => "/info",
            Endpoint::NowPlaying => "/now_playing",
            Endpoint::Volume => "/volume",
            Endpoint::Presets => "/presets",
            Endpoint::GetZone => "/getZone",
            Endpoint::Key => "/key",
            Endpoint::Select => "/select",
            Endpoint::SetZone => "/setZone",
            Endpoint::AddZoneSlave => "/addZoneSlave",
            Endpoint::RemoveZoneSlave => "/removeZoneSlave",
        }
    }
}

/// Remote control keys accepted by the `/key` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Play,
    Pause,
    PlayPause,
    Stop,
    PrevTrack,
    NextTrack,
    ThumbsUp,
    ThumbsDown,
    Bookmark,
    Power,
    Mute,
    VolumeUp,
    VolumeDown,
    Preset1,
    Preset2,
    Preset3,
    Preset4,
    Preset5,
    Preset6,
    AuxInput,
    ShuffleOff,
    ShuffleOn,
    RepeatOff,
    RepeatOne,
    RepeatAll,
    AddFavorite,
    RemoveFavorite,
}

impl Key {
    pub fn as_wire(self) -> &'static str {
        match self {
            Key::Play => "PLAY",
            Key::Pause => "PAUSE",
            Key::PlayPause => "PLAY_PAUSE",
            Key::Stop => "STOP",
            Key::PrevTrack => "PREV_TRACK",
            Key::NextTrack => "NEXT_TRACK",
            Key::ThumbsUp => "THUMBS_UP",
            Key::ThumbsDown => "THUMBS_DOWN",
            Key::Bookmark => "BOOKMARK",
            Key::Power => "POWER",
            Key::Mute => "MUTE",
            Key::VolumeUp => "VOLUME_UP",
            Key::VolumeDown => "VOLUME_DOWN",
            Key::Preset1 => "PRESET_1",
            Key::Preset2 => "PRESET_2",
            Key::Preset3 => "PRESET_3",
            Key::Preset4 => "PRESET_4",
            Key::Preset5 => "PRESET_5",
            Key::Preset6 => "PRESET_6",
            Key::AuxInput => "AUX_INPUT",
            Key::ShuffleOff => "SHUFFLE_OFF",
            Key::ShuffleOn => "SHUFFLE_ON",
            Key::RepeatOff => "REPEAT_OFF",
            Key::RepeatOne => "REPEAT_ONE",
            Key::RepeatAll => "REPEAT_ALL",
            Key::AddFavorite => "ADD_FAVORITE",
            Key::RemoveFavorite => "REMOVE_FAVORITE",
        }
    }
}

/// Phase of a key event. Every logical key press is sent as a press
/// immediately followed by a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Press,
    Release,
}

impl KeyState {
    pub fn as_wire(self) -> &'static str {
        match self {
            KeyState::Press => "press",
            KeyState::Release => "release",
        }
    }
}

/// Content type for `/select` requests.
///
/// `Uri` addresses streaming services; the library types address media
/// servers (UPnP, stored music).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Uri,
    Track,
    Album,
    Playlist,
}

impl Type {
    pub fn as_wire(self) -> &'static str {
        match self {
            Type::Uri => "uri",
            Type::Track => "track",
            Type::Album => "album",
            Type::Playlist => "playlist",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Endpoint::Info, "/info")]
    #[case(Endpoint::NowPlaying, "/now_playing")]
    #[case(Endpoint::Volume, "/volume")]
    #[case(Endpoint::Presets, "/presets")]
    #[case(Endpoint::GetZone, "/getZone")]
    #[case(Endpoint::Key, "/key")]
    #[case(Endpoint::Select, "/select")]
    #[case(Endpoint::SetZone, "/setZone")]
    #[case(Endpoint::AddZoneSlave, "/addZoneSlave")]
    #[case(Endpoint::RemoveZoneSlave, "/removeZoneSlave")]
    fn endpoint_paths(#[case] endpoint: Endpoint, #[case] path: &str) {
        assert_eq!(endpoint.path(), path);
    }

    #[rstest]
    #[case(Key::Play, "PLAY")]
    #[case(Key::PlayPause, "PLAY_PAUSE")]
    #[case(Key::PrevTrack, "PREV_TRACK")]
    #[case(Key::VolumeDown, "VOLUME_DOWN")]
    #[case(Key::Preset6, "PRESET_6")]
    #[case(Key::AuxInput, "AUX_INPUT")]
    #[case(Key::ShuffleOn, "SHUFFLE_ON")]
    #[case(Key::RepeatAll, "REPEAT_ALL")]
    #[case(Key::RemoveFavorite, "REMOVE_FAVORITE")]
    fn key_wire_names(#[case] key: Key, #[case] wire: &str) {
        assert_eq!(key.as_wire(), wire);
    }

    #[test]
    fn type_wire_names_are_lowercase() {
        assert_eq!(Type::Uri.as_wire(), "uri");
        assert_eq!(Type::Track.as_wire(), "track");
        assert_eq!(Type::Album.as_wire(), "album");
        assert_eq!(Type::Playlist.as_wire(), "playlist");
    }
}
