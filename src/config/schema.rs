//! Effective option definitions.
//!
//! `ServerOptions` is produced once by the resolver and never modified
//! afterwards; the server only borrows it.

use std::path::PathBuf;

/// Tool name used in logs, version output and the config template.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Tool version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Default allow spec.
pub const DEFAULT_ALLOW: &str = "127.0.0.1";

/// File name looked up in the working and home directories.
pub const CONFIG_FILE_NAME: &str = "server.conf";

/// Effective options after merging defaults, config file and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    /// Listen address, `host:port` or `:port`.
    pub listen: String,

    /// Directory served at `/`.
    pub root: PathBuf,

    /// Raw allow spec (space-separated addresses).
    pub allow_spec: String,

    /// Config file that was consulted.
    pub config_path: PathBuf,

    /// Print name and version, then exit.
    pub show_version: bool,

    /// Print the config template, then exit.
    pub gen_config: bool,
}

/// Process environment consulted during resolution.
///
/// Kept separate from `ServerOptions` so tests can point discovery at a
/// scratch directory instead of the real working directory.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Current working directory, if it could be determined.
    pub working_dir: Option<PathBuf>,

    /// Home directory, if it could be determined.
    pub home_dir: Option<PathBuf>,
}

impl Environment {
    /// Capture the environment of the running process.
    pub fn current() -> Self {
        Self {
            working_dir: std::env::current_dir().ok(),
            home_dir: home_dir(),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
