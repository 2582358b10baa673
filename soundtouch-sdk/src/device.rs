//! The device handle: cached state, playback and zone commands, and the
//! notification lifecycle.

use std::sync::Arc;

use parking_lot::RwLock;
use soundtouch_api::{payload, ApiClient, DlnaClient, Endpoint, Key, Type};
use soundtouch_parser::{Config, Preset, Source, Status, Volume, ZoneStatus};
use tracing::debug;

use crate::dispatch;
use crate::error::{Result, SoundTouchError};
use crate::listener::{ListenerHandle, ListenerList};
use crate::notification::NotificationChannel;

/// Control surface port.
pub const DEFAULT_PORT: u16 = 8090;
/// Websocket notification port.
pub const DEFAULT_WS_PORT: u16 = 8080;
/// DLNA AVTransport port.
pub const DEFAULT_DLNA_PORT: u16 = 8091;

/// Handle to one SoundTouch device.
///
/// Cheap to clone; clones share the caches, listener registries, and
/// notification channel. All state reads are served from the cache once
/// populated, unless `refresh` is requested; the notification channel
/// keeps the cache current once started.
#[derive(Clone)]
pub struct SoundTouchDevice {
    pub(crate) inner: Arc<DeviceInner>,
}

pub(crate) struct DeviceInner {
    host: String,
    port: u16,
    ws_port: u16,
    dlna_port: u16,
    pub(crate) api: ApiClient,
    dlna: DlnaClient,
    config: RwLock<Option<Config>>,
    status: RwLock<Option<Status>>,
    volume: RwLock<Option<Volume>>,
    presets: RwLock<Option<Vec<Preset>>>,
    /// Outer `None`: never fetched. Inner `None`: fetched, not in a zone.
    zone_status: RwLock<Option<Option<ZoneStatus>>>,
    channel: NotificationChannel,
    pub(crate) listeners: Listeners,
}

#[derive(Default)]
pub(crate) struct Listeners {
    pub volume: ListenerList<Volume>,
    pub status: ListenerList<Status>,
    pub presets: ListenerList<Vec<Preset>>,
    pub zone: ListenerList<Option<ZoneStatus>>,
    pub config: ListenerList<Config>,
}

impl SoundTouchDevice {
    /// Connect to the device at `host` on the standard ports
    /// (8090/8080/8091), fetching its configuration up front.
    pub fn connect(host: &str) -> Result<Self> {
        Self::connect_with_ports(host, DEFAULT_PORT, DEFAULT_WS_PORT, DEFAULT_DLNA_PORT)
    }

    /// [`connect`](Self::connect) with explicit control, websocket, and
    /// DLNA ports.
    pub fn connect_with_ports(
        host: &str,
        port: u16,
        ws_port: u16,
        dlna_port: u16,
    ) -> Result<Self> {
        let device = Self::with_ports(host, port, ws_port, dlna_port);
        device.inner.refresh_config()?;
        Ok(device)
    }

    /// Device at `host` on the standard ports, without touching the
    /// network. The configuration is fetched lazily on first read; use
    /// [`connect`](Self::connect) to verify reachability up front.
    pub fn new(host: &str) -> Self {
        Self::with_ports(host, DEFAULT_PORT, DEFAULT_WS_PORT, DEFAULT_DLNA_PORT)
    }

    /// [`new`](Self::new) with explicit ports, without touching the
    /// network.
    pub fn with_ports(host: &str, port: u16, ws_port: u16, dlna_port: u16) -> Self {
        Self {
            inner: Arc::new(DeviceInner {
                host: host.to_string(),
                port,
                ws_port,
                dlna_port,
                api: ApiClient::new(host, port),
                dlna: DlnaClient::new(host, dlna_port),
                config: RwLock::new(None),
                status: RwLock::new(None),
                volume: RwLock::new(None),
                presets: RwLock::new(None),
                zone_status: RwLock::new(None),
                channel: NotificationChannel::default(),
                listeners: Listeners::default(),
            }),
        }
    }

    pub fn host(&self) -> &str {
        &self.inner.host
    }

    pub fn port(&self) -> u16 {
        self.inner.port
    }

    pub fn ws_port(&self) -> u16 {
        self.inner.ws_port
    }

    pub fn dlna_port(&self) -> u16 {
        self.inner.dlna_port
    }

    // --- cached state ---

    /// Device configuration. `refresh` forces a fetch; otherwise the
    /// cache is used once populated.
    pub fn config(&self, refresh: bool) -> Result<Config> {
        if !refresh {
            if let Some(config) = self.inner.config.read().clone() {
                return Ok(config);
            }
        }
        self.inner.refresh_config()
    }

    /// Playback status.
    pub fn status(&self, refresh: bool) -> Result<Status> {
        if !refresh {
            if let Some(status) = self.inner.status.read().clone() {
                return Ok(status);
            }
        }
        self.inner.refresh_status()
    }

    /// Volume state.
    pub fn volume(&self, refresh: bool) -> Result<Volume> {
        if !refresh {
            if let Some(volume) = *self.inner.volume.read() {
                return Ok(volume);
            }
        }
        self.inner.refresh_volume()
    }

    /// Stored presets.
    pub fn presets(&self, refresh: bool) -> Result<Vec<Preset>> {
        if !refresh {
            if let Some(presets) = self.inner.presets.read().clone() {
                return Ok(presets);
            }
        }
        self.inner.refresh_presets()
    }

    /// Zone topology. `Ok(None)` means the device is not in a zone; the
    /// distinction between "never fetched" and "not in a zone" is kept
    /// internally so a cached `None` is trusted.
    pub fn zone_status(&self, refresh: bool) -> Result<Option<ZoneStatus>> {
        if !refresh {
            if let Some(cached) = self.inner.zone_status.read().clone() {
                return Ok(cached);
            }
        }
        self.inner.refresh_zone()
    }

    // --- playback commands ---

    pub fn play(&self) -> Result<()> {
        self.send_key(Key::Play)
    }

    pub fn pause(&self) -> Result<()> {
        self.send_key(Key::Pause)
    }

    pub fn play_pause(&self) -> Result<()> {
        self.send_key(Key::PlayPause)
    }

    pub fn next_track(&self) -> Result<()> {
        self.send_key(Key::NextTrack)
    }

    pub fn previous_track(&self) -> Result<()> {
        self.send_key(Key::PrevTrack)
    }

    pub fn mute(&self) -> Result<()> {
        self.send_key(Key::Mute)
    }

    pub fn volume_up(&self) -> Result<()> {
        self.send_key(Key::VolumeUp)
    }

    pub fn volume_down(&self) -> Result<()> {
        self.send_key(Key::VolumeDown)
    }

    pub fn shuffle(&self, enabled: bool) -> Result<()> {
        self.send_key(if enabled {
            Key::ShuffleOn
        } else {
            Key::ShuffleOff
        })
    }

    pub fn repeat_off(&self) -> Result<()> {
        self.send_key(Key::RepeatOff)
    }

    pub fn repeat_one(&self) -> Result<()> {
        self.send_key(Key::RepeatOne)
    }

    pub fn repeat_all(&self) -> Result<()> {
        self.send_key(Key::RepeatAll)
    }

    /// Send any remote key as a press/release pair.
    pub fn send_key(&self, key: Key) -> Result<()> {
        Ok(self.inner.api.send_key(key)?)
    }

    /// Wake the device, checking current status first so the power
    /// toggle cannot put a playing device into standby.
    pub fn power_on(&self) -> Result<()> {
        if self.status(true)?.source == Source::Standby {
            self.send_key(Key::Power)?;
        }
        Ok(())
    }

    /// Put the device into standby unless it already is.
    pub fn power_off(&self) -> Result<()> {
        if self.status(true)?.source != Source::Standby {
            self.send_key(Key::Power)?;
        }
        Ok(())
    }

    /// Set an absolute volume level (0-100).
    pub fn set_volume(&self, level: u8) -> Result<()> {
        if level > 100 {
            return Err(SoundTouchError::VolumeOutOfRange(level));
        }
        Ok(self
            .inner
            .api
            .post(Endpoint::Volume, &payload::volume(level))?)
    }

    /// Replay a preset by POSTing its stored descriptor verbatim.
    pub fn select_preset(&self, preset: &Preset) -> Result<()> {
        Ok(self.inner.api.post(Endpoint::Select, &preset.source_xml)?)
    }

    /// Start playback of source-addressed content, e.g. a Spotify URI or
    /// an internet radio station id.
    pub fn play_media(
        &self,
        source: Source,
        location: &str,
        source_account: Option<&str>,
        media_type: Type,
    ) -> Result<()> {
        let body = payload::select(
            source.as_wire(),
            media_type.as_wire(),
            source_account.unwrap_or(""),
            location,
        );
        Ok(self.inner.api.post(Endpoint::Select, &body)?)
    }

    /// Play an arbitrary http URL through the DLNA transport.
    pub fn play_url(&self, url: &str) -> Result<()> {
        if !url.starts_with("http://") {
            return Err(SoundTouchError::InvalidUrl(url.to_string()));
        }
        Ok(self.inner.dlna.set_av_transport_uri(url)?)
    }

    // --- zones ---

    /// Create a multi-room zone mastered by this device. Fails with
    /// [`SoundTouchError::NoSlaves`] before any network traffic when
    /// `slaves` is empty.
    pub fn create_zone(&self, slaves: &[SoundTouchDevice]) -> Result<()> {
        if slaves.is_empty() {
            return Err(SoundTouchError::NoSlaves);
        }
        let config = self.config(false)?;
        let body = payload::create_zone(
            config.device_id.as_deref().unwrap_or(""),
            config.device_ip().unwrap_or(""),
            &self.member_list(slaves)?,
        );
        debug!("creating zone");
        Ok(self.inner.api.post(Endpoint::SetZone, &body)?)
    }

    /// Add slaves to this device's existing zone.
    pub fn add_zone_slave(&self, slaves: &[SoundTouchDevice]) -> Result<()> {
        self.alter_zone(Endpoint::AddZoneSlave, slaves)
    }

    /// Remove slaves from this device's existing zone.
    pub fn remove_zone_slave(&self, slaves: &[SoundTouchDevice]) -> Result<()> {
        self.alter_zone(Endpoint::RemoveZoneSlave, slaves)
    }

    fn alter_zone(&self, endpoint: Endpoint, slaves: &[SoundTouchDevice]) -> Result<()> {
        if slaves.is_empty() {
            return Err(SoundTouchError::NoSlaves);
        }
        if self.zone_status(true)?.is_none() {
            return Err(SoundTouchError::NoExistingZone);
        }
        let config = self.config(false)?;
        let body = payload::alter_zone(
            config.device_id.as_deref().unwrap_or(""),
            &self.member_list(slaves)?,
        );
        Ok(self.inner.api.post(endpoint, &body)?)
    }

    fn member_list(&self, slaves: &[SoundTouchDevice]) -> Result<Vec<(String, String)>> {
        slaves
            .iter()
            .map(|slave| {
                let config = slave.config(false)?;
                Ok((
                    config.device_ip().unwrap_or("").to_string(),
                    config.device_id.unwrap_or_default(),
                ))
            })
            .collect()
    }

    // --- notifications ---

    /// Open the websocket channel and start applying push updates to the
    /// cache and listeners. One shot: after the channel closes it cannot
    /// be restarted on this handle.
    pub fn start_notifications(&self) -> Result<()> {
        let inner = self.inner.clone();
        self.inner
            .channel
            .start(&self.inner.host, self.inner.ws_port, move |message| {
                dispatch::handle_message(&inner, message)
            })
    }

    /// Close the websocket channel. Idempotent.
    pub fn stop_notifications(&self) {
        self.inner.channel.stop();
    }

    // --- listeners ---

    pub fn add_volume_listener(
        &self,
        listener: impl Fn(&Volume) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.inner.listeners.volume.add(listener)
    }

    pub fn remove_volume_listener(&self, handle: ListenerHandle) -> bool {
        self.inner.listeners.volume.remove(handle)
    }

    pub fn clear_volume_listeners(&self) {
        self.inner.listeners.volume.clear();
    }

    pub fn add_status_listener(
        &self,
        listener: impl Fn(&Status) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.inner.listeners.status.add(listener)
    }

    pub fn remove_status_listener(&self, handle: ListenerHandle) -> bool {
        self.inner.listeners.status.remove(handle)
    }

    pub fn clear_status_listeners(&self) {
        self.inner.listeners.status.clear();
    }

    pub fn add_presets_listener(
        &self,
        listener: impl Fn(&Vec<Preset>) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.inner.listeners.presets.add(listener)
    }

    pub fn remove_presets_listener(&self, handle: ListenerHandle) -> bool {
        self.inner.listeners.presets.remove(handle)
    }

    pub fn clear_presets_listeners(&self) {
        self.inner.listeners.presets.clear();
    }

    pub fn add_zone_status_listener(
        &self,
        listener: impl Fn(&Option<ZoneStatus>) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.inner.listeners.zone.add(listener)
    }

    pub fn remove_zone_status_listener(&self, handle: ListenerHandle) -> bool {
        self.inner.listeners.zone.remove(handle)
    }

    pub fn clear_zone_status_listeners(&self) {
        self.inner.listeners.zone.clear();
    }

    pub fn add_device_info_listener(
        &self,
        listener: impl Fn(&Config) + Send + Sync + 'static,
    ) -> ListenerHandle {
        self.inner.listeners.config.add(listener)
    }

    pub fn remove_device_info_listener(&self, handle: ListenerHandle) -> bool {
        self.inner.listeners.config.remove(handle)
    }

    pub fn clear_device_info_listeners(&self) {
        self.inner.listeners.config.clear();
    }
}

impl DeviceInner {
    pub(crate) fn refresh_config(&self) -> Result<Config> {
        let config = self.api.config()?;
        *self.config.write() = Some(config.clone());
        Ok(config)
    }

    pub(crate) fn refresh_status(&self) -> Result<Status> {
        let status = self.api.now_playing()?;
        *self.status.write() = Some(status.clone());
        Ok(status)
    }

    pub(crate) fn refresh_volume(&self) -> Result<Volume> {
        let volume = self.api.volume()?;
        *self.volume.write() = Some(volume);
        Ok(volume)
    }

    pub(crate) fn refresh_presets(&self) -> Result<Vec<Preset>> {
        let presets = self.api.presets()?;
        *self.presets.write() = Some(presets.clone());
        Ok(presets)
    }

    pub(crate) fn refresh_zone(&self) -> Result<Option<ZoneStatus>> {
        let zone = self.api.zone_status()?;
        *self.zone_status.write() = Some(zone.clone());
        Ok(zone)
    }

    pub(crate) fn apply_volume(&self, volume: Volume) {
        *self.volume.write() = Some(volume);
        self.listeners.volume.notify(&volume);
    }

    pub(crate) fn apply_status(&self, status: Status) {
        *self.status.write() = Some(status.clone());
        self.listeners.status.notify(&status);
    }

    pub(crate) fn apply_presets(&self, presets: Vec<Preset>) {
        *self.presets.write() = Some(presets.clone());
        self.listeners.presets.notify(&presets);
    }
}
