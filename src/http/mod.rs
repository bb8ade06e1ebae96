//! HTTP server bootstrap.
//!
//! Binds the listener, serves one task per connection and drains in-flight
//! connections on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{parse_bind_addr, serve, start_server, ServerError};
