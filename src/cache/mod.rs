//! Cache liveness probing.
//!
//! The status endpoint only needs to know whether the cache backend answers a
//! `PING`. [`CacheProbe`] is the seam the responder depends on; [`RedisProbe`]
//! is the production implementation backed by the `redis` client crate.
//!
//! Probe outcomes are reduced to a fixed set of reasons so the rendered status
//! line stays stable across client library versions.

mod redis_probe;

pub use redis_probe::RedisProbe;

use std::fmt;

use async_trait::async_trait;

/// Why a probe did not get a `PONG` back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeFailure {
    /// Connect + PING did not finish within the probe timeout
    Timeout,
    /// The host actively refused the TCP connection
    ConnectionRefused,
    /// Name resolution or the network path failed
    Unreachable,
    /// Connected, but the reply was an error or not `PONG`
    Protocol,
}

impl ProbeFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeFailure::Timeout => "timeout",
            ProbeFailure::ConnectionRefused => "connection_refused",
            ProbeFailure::Unreachable => "unreachable",
            ProbeFailure::Protocol => "protocol",
        }
    }
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStatus {
    Pong,
    Failed(ProbeFailure),
}

/// Renders as `pong` or `error:<reason>`.
impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Pong => f.write_str("pong"),
            ProbeStatus::Failed(reason) => write!(f, "error:{}", reason),
        }
    }
}

impl From<ProbeFailure> for ProbeStatus {
    fn from(reason: ProbeFailure) -> Self {
        ProbeStatus::Failed(reason)
    }
}

/// A liveness check against the cache backend.
///
/// Implementations must never fail the caller: every outcome, including a
/// timeout, is folded into a [`ProbeStatus`].
#[async_trait]
pub trait CacheProbe: Send + Sync {
    async fn ping(&self, host: &str, port: u16) -> ProbeStatus;
}
