//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (peer SocketAddr via ConnectInfo)
//!     → server.rs (Axum setup, TraceLayer span)
//!     → middleware/admission.rs (access log, allowlist check)
//!         → rejected: 403 "Blocked"
//!         → admitted: tower_http ServeDir under the served root
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
