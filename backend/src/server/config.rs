//! Startup configuration.
//!
//! Signing-key material and token lifetime are required; a process that
//! cannot read them must not come up. The key itself never reaches logs;
//! only its SHA-256 fingerprint does.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Environment variable naming the signing-key file.
pub const SIGNING_KEY_FILE_VAR: &str = "BOOKING_SIGNING_KEY_FILE";
/// Environment variable carrying the token lifetime in seconds.
pub const TOKEN_LIFETIME_VAR: &str = "BOOKING_TOKEN_LIFETIME_SECS";
/// Environment variable overriding the bind address.
pub const BIND_ADDR_VAR: &str = "BOOKING_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const MIN_KEY_BYTES: usize = 32;

/// Configuration failures; all fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    /// The signing-key file could not be read.
    #[error("failed to read signing key at {path}: {message}")]
    KeyFile {
        /// Configured key path.
        path: PathBuf,
        /// Underlying I/O failure.
        message: String,
    },
    /// The signing key is too short to sign with.
    #[error("signing key must be at least {MIN_KEY_BYTES} bytes, got {0}")]
    KeyTooShort(usize),
    /// The token lifetime is not a positive number of seconds.
    #[error("{TOKEN_LIFETIME_VAR} must be a positive number of seconds, got {0:?}")]
    InvalidLifetime(String),
    /// The bind address could not be parsed.
    #[error("{BIND_ADDR_VAR} is not a valid socket address: {0:?}")]
    InvalidBindAddr(String),
}

/// Validated startup configuration.
pub struct AppConfig {
    /// Symmetric signing-key material.
    pub signing_key: Zeroizing<Vec<u8>>,
    /// Bearer token lifetime.
    pub token_lifetime: Duration,
    /// Socket address to bind.
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Tests inject closures here instead of mutating the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key_path = PathBuf::from(
            lookup(SIGNING_KEY_FILE_VAR).ok_or(ConfigError::MissingVar(SIGNING_KEY_FILE_VAR))?,
        );
        let signing_key =
            Zeroizing::new(std::fs::read(&key_path).map_err(|e| ConfigError::KeyFile {
                path: key_path,
                message: e.to_string(),
            })?);
        if signing_key.len() < MIN_KEY_BYTES {
            return Err(ConfigError::KeyTooShort(signing_key.len()));
        }

        let raw_lifetime =
            lookup(TOKEN_LIFETIME_VAR).ok_or(ConfigError::MissingVar(TOKEN_LIFETIME_VAR))?;
        let lifetime_secs: i64 = raw_lifetime
            .trim()
            .parse()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::InvalidLifetime(raw_lifetime.clone()))?;

        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        Ok(Self {
            signing_key,
            token_lifetime: Duration::seconds(lifetime_secs),
            bind_addr,
        })
    }

    /// Short SHA-256 fingerprint of the signing key, safe for logs.
    pub fn key_fingerprint(&self) -> String {
        let digest = Sha256::digest(self.signing_key.as_slice());
        let mut fingerprint = hex::encode(digest);
        fingerprint.truncate(16);
        fingerprint
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never reach logs; expose only its fingerprint.
        f.debug_struct("AppConfig")
            .field("signing_key", &self.key_fingerprint())
            .field("token_lifetime", &self.token_lifetime)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}
