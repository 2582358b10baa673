use soundtouch_api::ApiError;
use soundtouch_discovery::DiscoveryError;
use soundtouch_parser::DecodeError;
use thiserror::Error;

/// Errors surfaced by the high-level device API.
#[derive(Debug, Error)]
pub enum SoundTouchError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Zone operations need at least one slave device.
    #[error("zone operation requires at least one slave")]
    NoSlaves,

    /// Adding or removing slaves needs an existing zone.
    #[error("device is not part of an existing zone")]
    NoExistingZone,

    /// Volume levels run 0 to 100.
    #[error("volume level {0} is out of range (0-100)")]
    VolumeOutOfRange(u8),

    /// URL playback only supports plain http.
    #[error("unsupported playback URL: {0}")]
    InvalidUrl(String),

    /// The notification channel is already connecting or connected.
    #[error("notification channel already started")]
    AlreadyStarted,

    /// The notification channel was closed and cannot be restarted.
    #[error("notification channel is closed")]
    ChannelClosed,

    /// Websocket connect or handshake failure.
    #[error("websocket error: {0}")]
    WebSocket(String),
}

pub type Result<T> = std::result::Result<T, SoundTouchError>;
