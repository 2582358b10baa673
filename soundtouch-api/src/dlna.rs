//! Minimal DLNA transport client for URL playback.
//!
//! SoundTouch devices expose a UPnP AVTransport endpoint on a separate
//! port (8091 by default). Setting the transport URI is enough to start
//! playback; no Play action is needed.

use std::time::Duration;

use tracing::debug;

use crate::error::{ApiError, Result};

const SET_URI_ACTION: &str = "urn:schemas-upnp-org:service:AVTransport:1#SetAVTransportURI";

/// Client for one device's AVTransport endpoint.
#[derive(Debug, Clone)]
pub struct DlnaClient {
    agent: ureq::Agent,
    host: String,
    port: u16,
}

impl DlnaClient {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
            host: host.to_string(),
            port,
        }
    }

    /// Point the transport at `url` and start playback.
    ///
    /// The device wants the SOAPACTION header bare, without the quoting
    /// UPnP usually requires.
    pub fn set_av_transport_uri(&self, url: &str) -> Result<()> {
        let endpoint = format!("http://{}:{}/AVTransport/Control", self.host, self.port);
        let host_header = format!("{}:{}", self.host, self.port);
        let body = format!(
            r#"<?xml version="1.0" encoding="utf-8"?><s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/"><s:Body><u:SetAVTransportURI xmlns:u="urn:schemas-upnp-org:service:AVTransport:1"><InstanceID>0</InstanceID><CurrentURI>{}</CurrentURI><CurrentURIMetaData></CurrentURIMetaData></u:SetAVTransportURI></s:Body></s:Envelope>"#,
            escape_xml(url)
        );
        debug!(%endpoint, url, "SetAVTransportURI");
        self.agent
            .post(&endpoint)
            .set("SOAPACTION", SET_URI_ACTION)
            .set("Content-Type", r#"text/xml; charset="utf-8""#)
            .set("HOST", &host_header)
            .send_string(&body)
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => ApiError::Http(code),
                ureq::Error::Transport(transport) => ApiError::Network(transport.to_string()),
            })?;
        Ok(())
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
