use std::time::Duration;

use soundtouch_parser::{
    decode_config, decode_presets, decode_status, decode_volume, decode_zone_status, Config,
    Preset, Status, Volume, ZoneStatus,
};
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::payload;
use crate::wire::{Endpoint, Key, KeyState};

/// Blocking HTTP client for one device's control surface.
///
/// Owns a connection-pooling agent with conservative timeouts; clones
/// share the pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base: String,
}

impl ApiClient {
    /// Client for the device at `host:port`.
    pub fn new(host: &str, port: u16) -> Self {
        Self::from_url(format!("http://{host}:{port}"))
    }

    /// Client against an explicit base URL, without the `http://host:port`
    /// convention. Useful for tests and proxies.
    pub fn from_url(base: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
            base: base.into(),
        }
    }

    /// GET an endpoint and return the raw XML body.
    pub fn get(&self, endpoint: Endpoint) -> Result<String> {
        let url = format!("{}{}", self.base, endpoint.path());
        debug!(%url, "GET");
        let response = self.agent.get(&url).call().map_err(map_err)?;
        response
            .into_string()
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// POST a raw XML body to an endpoint. The response body is ignored;
    /// only the status matters.
    pub fn post(&self, endpoint: Endpoint, body: &str) -> Result<()> {
        let url = format!("{}{}", self.base, endpoint.path());
        debug!(%url, body, "POST");
        self.agent.post(&url).send_string(body).map_err(map_err)?;
        Ok(())
    }

    /// Fetch and decode `/info`.
    pub fn config(&self) -> Result<Config> {
        Ok(decode_config(&self.get(Endpoint::Info)?)?)
    }

    /// Fetch and decode `/now_playing`.
    pub fn now_playing(&self) -> Result<Status> {
        Ok(decode_status(&self.get(Endpoint::NowPlaying)?)?)
    }

    /// Fetch and decode `/volume`.
    pub fn volume(&self) -> Result<Volume> {
        Ok(decode_volume(&self.get(Endpoint::Volume)?)?)
    }

    /// Fetch and decode `/presets`.
    pub fn presets(&self) -> Result<Vec<Preset>> {
        Ok(decode_presets(&self.get(Endpoint::Presets)?)?)
    }

    /// Fetch and decode `/getZone`. `None` means the device is not in a
    /// zone.
    pub fn zone_status(&self) -> Result<Option<ZoneStatus>> {
        Ok(decode_zone_status(&self.get(Endpoint::GetZone)?)?)
    }

    /// Send one logical key event: a press POST followed by a release
    /// POST. The release is attempted even when the press fails, so the
    /// device is not left with a held key; the press error wins.
    pub fn send_key(&self, key: Key) -> Result<()> {
        let press = self.post(Endpoint::Key, &payload::key(key, KeyState::Press));
        let release = self.post(Endpoint::Key, &payload::key(key, KeyState::Release));
        press.and(release)
    }
}

fn map_err(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(code, _) => ApiError::Http(code),
        ureq::Error::Transport(transport) => ApiError::Network(transport.to_string()),
    }
}
