//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     allow spec → allowlist.rs (split, freeze)
//!
//! Incoming request:
//!     remote endpoint → address.rs (strip port, validate)
//!     → allowlist lookup in http::middleware::admission
//! ```
//!
//! # Design Decisions
//! - Fail closed: invalid or unsupported addresses are never looked up
//! - The allowlist has no mutating methods after construction

pub mod address;
pub mod allowlist;

pub use address::{validate_address, ValidatedAddress};
pub use allowlist::Allowlist;
