//! Static file server restricted to an allowlist of client addresses.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

#[cfg(test)]
mod testutil;

pub use config::{resolve, Cli, Environment, Resolved, ServerOptions};
pub use http::HttpServer;
pub use lifecycle::{stop_channel, RunningServer, StopHandle, StopSignal};
pub use security::Allowlist;
