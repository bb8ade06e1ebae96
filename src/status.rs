//! Status body composition.
//!
//! The body is plain text, one fact per line:
//!
//! ```text
//! infra-inception v0.2.0 app running
//! DB_HOST=db1
//! REDIS=cache:6379 status=pong
//! ```
//!
//! The legacy layout reproduces the v0.1.0 body: its own banner, the `DB_HOST`
//! line, and no cache probe.

use std::fmt::Write;
use std::sync::Arc;

use crate::cache::{CacheProbe, ProbeStatus};
use crate::config::{BodyLayout, EnvSnapshot, BANNER, LEGACY_BANNER};

/// Full three-line body for a snapshot and a probe outcome.
pub fn build_status_body(snapshot: &EnvSnapshot, status: ProbeStatus) -> String {
    let mut body = banner_and_db(BANNER, snapshot);
    // Writing into a String cannot fail
    let _ = writeln!(
        body,
        "REDIS={}:{} status={}",
        snapshot.redis_host, snapshot.redis_port, status
    );
    body
}

/// Two-line v0.1.0 body: legacy banner and database host.
pub fn build_legacy_body(snapshot: &EnvSnapshot) -> String {
    banner_and_db(LEGACY_BANNER, snapshot)
}

fn banner_and_db(banner: &str, snapshot: &EnvSnapshot) -> String {
    format!("{}\nDB_HOST={}\n", banner, snapshot.db_host)
}

/// Produces the status body for each request.
#[derive(Clone)]
pub struct StatusResponder {
    layout: BodyLayout,
    probe: Arc<dyn CacheProbe>,
}

impl StatusResponder {
    pub fn new(layout: BodyLayout, probe: Arc<dyn CacheProbe>) -> Self {
        Self { layout, probe }
    }

    /// Run the probe (if the layout needs it) and build the body.
    pub async fn render(&self, snapshot: &EnvSnapshot) -> String {
        match self.layout {
            BodyLayout::Legacy => build_legacy_body(snapshot),
            BodyLayout::Full => {
                let status = self
                    .probe
                    .ping(&snapshot.redis_host, snapshot.redis_port)
                    .await;
                build_status_body(snapshot, status)
            }
        }
    }
}
