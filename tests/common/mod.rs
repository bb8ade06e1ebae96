//! Shared helpers for integration tests.
//!
//! Starts the real router on an ephemeral port and provides a tiny fake Redis
//! that speaks just enough RESP to answer the probe.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_server::Handle;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use inception_status::cache::RedisProbe;
use inception_status::config::{BodyLayout, EnvSnapshot, ServiceSettings};
use inception_status::http::{parse_bind_addr, serve};
use inception_status::{create_router, AppState};

pub const TEST_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// A running server; shut down when dropped.
pub struct TestApp {
    pub base_url: String,
    handle: Handle,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

pub async fn spawn_app(snapshot: EnvSnapshot, layout: BodyLayout) -> TestApp {
    let settings = ServiceSettings {
        probe_timeout: TEST_PROBE_TIMEOUT,
        layout,
        ..ServiceSettings::default()
    };
    spawn_app_with(snapshot, settings).await
}

/// Start the app with custom settings. The listener always binds to
/// `127.0.0.1` on an ephemeral port.
pub async fn spawn_app_with(snapshot: EnvSnapshot, settings: ServiceSettings) -> TestApp {
    let settings = ServiceSettings {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..settings
    };
    let addr = parse_bind_addr(&settings).expect("valid test address");
    let probe = Arc::new(RedisProbe::new(settings.probe_timeout));
    let app = create_router(AppState::new(settings, snapshot, probe));

    let handle = Handle::new();
    tokio::spawn(serve(app, addr, handle.clone()));
    let bound = handle
        .listening()
        .await
        .expect("test server failed to bind");

    TestApp {
        base_url: format!("http://{}", bound),
        handle,
    }
}

/// Snapshot pointing the cache at `127.0.0.1:<port>`.
pub fn local_cache(db_host: &str, port: u16) -> EnvSnapshot {
    cache_at(db_host, "127.0.0.1", port)
}

pub fn cache_at(db_host: &str, redis_host: &str, port: u16) -> EnvSnapshot {
    EnvSnapshot {
        db_host: db_host.to_string(),
        redis_host: redis_host.to_string(),
        redis_port: port,
    }
}

/// A port nothing is listening on.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// A cache that accepts connections and never replies.
pub async fn spawn_silent_cache() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    port
}

/// How the fake Redis answers `PING`. Every other command gets `+OK`.
#[derive(Debug, Clone, Copy)]
pub enum FakeRedis {
    Pong,
    WrongReply,
}

pub async fn spawn_fake_redis(mode: FakeRedis) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(answer_commands(socket, mode));
        }
    });
    port
}

async fn answer_commands(socket: TcpStream, mode: FakeRedis) {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    while let Some(command) = read_command(&mut reader).await {
        let is_ping = command
            .first()
            .map(|name| name.eq_ignore_ascii_case("PING"))
            .unwrap_or(false);
        let reply: &[u8] = match (is_ping, mode) {
            (true, FakeRedis::Pong) => b"+PONG\r\n",
            (true, FakeRedis::WrongReply) => b"+NOPE\r\n",
            (false, _) => b"+OK\r\n",
        };
        if writer.write_all(reply).await.is_err() {
            break;
        }
    }
}

/// Read one RESP array of bulk strings.
async fn read_command<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut parts = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut buf = vec![0u8; len + 2];
        reader.read_exact(&mut buf).await.ok()?;
        buf.truncate(len);
        parts.push(String::from_utf8(buf).ok()?);
    }
    Some(parts)
}
