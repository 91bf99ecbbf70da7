//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolved options → version / gen-conf modes → validate root
//!     → banner → bind listener → serve
//!
//! Stop (shutdown.rs, signals.rs):
//!     StopHandle::stop, handle dropped, or SIGINT/SIGTERM
//!     → StopSignal resolves → stop accepting → drain → return
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The root is checked before the listener is bound
//! - Listeners start last (traffic only when ready)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{stop_channel, RunningServer, StopHandle, StopSignal};
pub use startup::{run, validate_root, Outcome, StartupError};
