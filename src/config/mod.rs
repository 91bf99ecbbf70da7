//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! argv
//!     → cli.rs (normalize single-dash flags, clap parse)
//!     → resolver.rs
//!         → loader.rs (discover server.conf, parse lines, collect warnings)
//!         → precedence merge
//!     → Resolved { ServerOptions, Allowlist, warnings } (immutable)
//!     → handed to lifecycle::startup
//! ```
//!
//! # Design Decisions
//! - Options are resolved once at startup; nothing reloads them
//! - Malformed config lines are warnings, never errors
//! - A config file that opens replaces the command-line allow spec

pub mod cli;
pub mod loader;
pub mod resolver;
pub mod schema;
pub mod template;

pub use cli::Cli;
pub use loader::ConfigWarning;
pub use resolver::{resolve, ConfigError, Resolved};
pub use schema::{Environment, ServerOptions};
