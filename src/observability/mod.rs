//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup, middleware, server
//!     → tracing events
//!     → logging.rs subscriber (EnvFilter + fmt, stderr)
//! ```

pub mod logging;
