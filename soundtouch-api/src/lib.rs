//! Low-level client for the SoundTouch control surface.
//!
//! The device speaks XML over plain HTTP on port 8090, with a separate
//! DLNA AVTransport endpoint on port 8091. This crate covers the wire
//! vocabulary (endpoints, keys, request bodies), a blocking [`ApiClient`]
//! with typed fetchers, and the [`DlnaClient`] used for URL playback.
//! Higher-level caching, zones, and push notifications live in the
//! `soundtouch-sdk` crate.

mod client;
mod dlna;
mod error;
pub mod payload;
mod wire;

pub use client::ApiClient;
pub use dlna::DlnaClient;
pub use error::{ApiError, Result};
pub use wire::{Endpoint, Key, KeyState, Type};
