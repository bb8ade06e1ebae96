//! Configuration loading and constants.
//!
//! Holds the environment snapshot describing the service's dependencies
//! (`DB_HOST`, `REDIS_HOST`, `REDIS_PORT`), the command-line settings for the
//! listener and probe, and the constants shared by the rest of the crate.
//! The snapshot is read once at startup and handed to the router; handlers
//! never read the process environment themselves.

use std::time::Duration;

use const_format::formatcp;

// =============================================================================
// Service Identity
// =============================================================================

/// Name shown in the banner line of every status body
pub const SERVICE_NAME: &str = "infra-inception";

/// Crate version, shown in the banner
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// First line of every status body
pub const BANNER: &str = formatcp!("{} v{} app running", SERVICE_NAME, SERVICE_VERSION);

/// Release whose two-line body the legacy layout reproduces
pub const LEGACY_VERSION: &str = "0.1.0";

/// First line of the legacy body
pub const LEGACY_BANNER: &str = formatcp!("{} v{} app running", SERVICE_NAME, LEGACY_VERSION);

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_REDIS_HOST: &str = "REDIS_HOST";
pub const ENV_REDIS_PORT: &str = "REDIS_PORT";

/// Placeholder for hosts that are not configured
pub const UNSET: &str = "unset";

/// Default Redis port when `REDIS_PORT` is absent
pub const DEFAULT_REDIS_PORT: u16 = 6379;

// =============================================================================
// Listener and Probe Defaults
// =============================================================================

/// Default bind address (all interfaces)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listening port
pub const DEFAULT_HTTP_PORT: u16 = 8085;

/// Default upper bound for one cache probe (connect + PING)
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 500;

/// Default cap on requests being handled at the same time
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 64;

/// Drain window for in-flight connections on shutdown
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// HTTP Response Headers
// =============================================================================

pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Status bodies reflect live dependency state and must never be cached
pub const CACHE_CONTROL_STATUS: &str = "no-store";

/// Response header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "inception_status=info,tower_http=info";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Which body layout the status endpoint renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BodyLayout {
    /// Banner, DB_HOST and the live REDIS line
    #[default]
    Full,
    /// Banner and DB_HOST only; the cache is never probed
    Legacy,
}

/// Settings fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub host: String,
    pub port: u16,
    pub probe_timeout: Duration,
    pub max_concurrent_requests: usize,
    pub layout: BodyLayout,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            layout: BodyLayout::Full,
        }
    }
}

impl ServiceSettings {
    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dependency configuration read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub db_host: String,
    pub redis_host: String,
    pub redis_port: u16,
}

impl Default for EnvSnapshot {
    fn default() -> Self {
        Self {
            db_host: UNSET.to_string(),
            redis_host: UNSET.to_string(),
            redis_port: DEFAULT_REDIS_PORT,
        }
    }
}

impl EnvSnapshot {
    /// Read the snapshot from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary variable lookup.
    ///
    /// Absent variables take their defaults. A present but empty host is kept
    /// as the empty string. `REDIS_PORT` is trimmed and must parse as a port.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_host = lookup(ENV_DB_HOST).unwrap_or_else(|| UNSET.to_string());
        let redis_host = lookup(ENV_REDIS_HOST).unwrap_or_else(|| UNSET.to_string());
        let redis_port = match lookup(ENV_REDIS_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    var: ENV_REDIS_PORT,
                    value: raw,
                })?,
            None => DEFAULT_REDIS_PORT,
        };

        Ok(Self {
            db_host,
            redis_host,
            redis_port,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var}: {value:?} is not a valid port number")]
    InvalidPort { var: &'static str, value: String },
}
