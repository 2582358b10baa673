//! Websocket notification channel.
//!
//! The device pushes `<updates>` envelopes over a websocket on port 8080
//! using the `gabbo` sub-protocol. The channel is a one-shot state
//! machine: `Idle -> Connecting -> Open -> Closed`, with no reconnect.
//! The handshake runs on the caller's thread so a start failure is
//! reported synchronously; the receive loop runs on one named background
//! thread per device.

use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};
use tungstenite::client::IntoClientRequest;
use tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tungstenite::http::HeaderValue;
use tungstenite::{Message, WebSocket};

use crate::error::{Result, SoundTouchError};

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
/// Receive poll interval; bounds how long stop() can wait on the worker.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChannelState {
    Idle,
    Connecting,
    Open,
    Closed,
}

pub(crate) struct NotificationChannel {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

struct Shared {
    state: Mutex<ChannelState>,
    stop: AtomicBool,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ChannelState::Idle),
                stop: AtomicBool::new(false),
            }),
            worker: Mutex::new(None),
        }
    }
}

impl NotificationChannel {
    /// Connect and start delivering inbound text messages to
    /// `on_message`, one at a time in arrival order.
    pub fn start(
        &self,
        host: &str,
        port: u16,
        on_message: impl Fn(&str) + Send + 'static,
    ) -> Result<()> {
        {
            let mut state = self.shared.state.lock();
            match *state {
                ChannelState::Connecting | ChannelState::Open => {
                    return Err(SoundTouchError::AlreadyStarted)
                }
                ChannelState::Closed => return Err(SoundTouchError::ChannelClosed),
                ChannelState::Idle => *state = ChannelState::Connecting,
            }
        }

        let socket = match connect(host, port) {
            Ok(socket) => socket,
            Err(err) => {
                // Failed handshakes are retryable, unless stop() closed
                // the channel during the handshake.
                let mut state = self.shared.state.lock();
                if *state == ChannelState::Connecting {
                    *state = ChannelState::Idle;
                }
                return Err(err);
            }
        };

        {
            // stop() may have won the race while the handshake ran.
            let mut state = self.shared.state.lock();
            if *state != ChannelState::Connecting {
                return Err(SoundTouchError::ChannelClosed);
            }
            *state = ChannelState::Open;
        }
        let shared = self.shared.clone();
        let handle = std::thread::Builder::new()
            .name("soundtouch-notify".into())
            .spawn(move || {
                receive_loop(socket, &shared, on_message);
                *shared.state.lock() = ChannelState::Closed;
            })
            .map_err(|e| {
                let mut state = self.shared.state.lock();
                if *state == ChannelState::Open {
                    *state = ChannelState::Idle;
                }
                SoundTouchError::WebSocket(e.to_string())
            })?;
        *self.worker.lock() = Some(handle);
        Ok(())
    }

    /// Close the channel. Idempotent; a no-op when never started. The
    /// join is bounded by the receive loop's poll interval.
    pub fn stop(&self) {
        let was_running = {
            let mut state = self.shared.state.lock();
            match *state {
                ChannelState::Connecting | ChannelState::Open => {
                    *state = ChannelState::Closed;
                    true
                }
                ChannelState::Idle | ChannelState::Closed => false,
            }
        };
        if was_running {
            self.shared.stop.store(true, Ordering::Relaxed);
        }
        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ChannelState {
        *self.shared.state.lock()
    }
}

fn connect(host: &str, port: u16) -> Result<WebSocket<TcpStream>> {
    let stream = TcpStream::connect((host, port)).map_err(ws_err)?;
    stream.set_read_timeout(Some(HANDSHAKE_TIMEOUT)).map_err(ws_err)?;

    let mut request = format!("ws://{host}:{port}/")
        .into_client_request()
        .map_err(ws_err)?;
    request
        .headers_mut()
        .insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static("gabbo"));

    let (socket, response) = tungstenite::client(request, stream).map_err(ws_err)?;
    debug!(status = %response.status(), "notification channel handshake complete");

    // Short poll so the stop flag is observed promptly.
    socket
        .get_ref()
        .set_read_timeout(Some(POLL_INTERVAL))
        .map_err(ws_err)?;
    Ok(socket)
}

fn ws_err(err: impl std::fmt::Display) -> SoundTouchError {
    SoundTouchError::WebSocket(err.to_string())
}

fn receive_loop(
    mut socket: WebSocket<TcpStream>,
    shared: &Shared,
    on_message: impl Fn(&str),
) {
    loop {
        if shared.stop.load(Ordering::Relaxed) {
            let _ = socket.close(None);
            break;
        }
        match socket.read() {
            Ok(Message::Text(text)) => on_message(&text),
            Ok(Message::Close(_)) => {
                debug!("device closed the notification channel");
                break;
            }
            Ok(_) => {}
            Err(tungstenite::Error::Io(err))
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => break,
            Err(err) => {
                warn!(%err, "notification transport failed");
                break;
            }
        }
    }
}
