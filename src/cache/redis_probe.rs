use std::time::Duration;

use async_trait::async_trait;
use redis::{ConnectionAddr, ConnectionInfo, ErrorKind, RedisConnectionInfo, RedisError};
use tokio::time::timeout;

use super::{CacheProbe, ProbeFailure, ProbeStatus};

/// Probes a Redis server with a single `PING` over a fresh connection.
///
/// Connect and PING share one deadline. When it expires the in-flight
/// future is dropped, which closes the socket.
#[derive(Debug, Clone)]
pub struct RedisProbe {
    timeout: Duration,
}

impl RedisProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn ping_once(host: &str, port: u16) -> Result<String, RedisError> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(host.to_string(), port),
            redis: RedisConnectionInfo::default(),
        };
        let client = redis::Client::open(info)?;
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<String>(&mut conn).await
    }
}

#[async_trait]
impl CacheProbe for RedisProbe {
    async fn ping(&self, host: &str, port: u16) -> ProbeStatus {
        let outcome = match timeout(self.timeout, Self::ping_once(host, port)).await {
            Ok(Ok(reply)) if reply.eq_ignore_ascii_case("PONG") => Ok(()),
            Ok(Ok(reply)) => {
                tracing::debug!(%host, port, %reply, "Unexpected PING reply");
                Err(ProbeFailure::Protocol)
            }
            Ok(Err(e)) => {
                tracing::debug!(%host, port, error = %e, "Redis probe failed");
                Err(classify(&e))
            }
            Err(_) => Err(ProbeFailure::Timeout),
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(%host, port, "Redis answered PING");
                ProbeStatus::Pong
            }
            Err(reason) => {
                tracing::warn!(
                    %host,
                    port,
                    reason = %reason,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Cache probe failed"
                );
                ProbeStatus::Failed(reason)
            }
        }
    }
}

/// Map a client error onto the fixed set of probe failure reasons.
fn classify(err: &RedisError) -> ProbeFailure {
    if err.is_timeout() {
        ProbeFailure::Timeout
    } else if err.is_connection_refusal() {
        ProbeFailure::ConnectionRefused
    } else if err.is_io_error() || err.kind() == ErrorKind::InvalidClientConfig {
        // Resolution failures surface as I/O errors or as "no address found"
        ProbeFailure::Unreachable
    } else {
        ProbeFailure::Protocol
    }
}
