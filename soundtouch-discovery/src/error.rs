//! Error types for the discovery system.

use std::fmt;

/// Error type for discovery operations.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The mDNS daemon could not be created or queried
    Daemon(String),
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::Daemon(msg) => write!(f, "mDNS daemon error: {}", msg),
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
