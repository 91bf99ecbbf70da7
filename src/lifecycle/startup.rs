//! Startup orchestration.
//!
//! # Responsibilities
//! - Handle the version and config-template modes
//! - Check the served root before anything is bound
//! - Log the effective options
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned to `main`, which exits non-zero
//! - Config warnings are logged here, once, before the banner

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::schema::{NAME, VERSION};
use crate::config::template::write_config_template;
use crate::config::Resolved;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::StopSignal;

/// Fatal startup error.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("cannot access root {}: {source}", .path.display())]
    RootMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("is not directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Printed name and version.
    Version,
    /// Printed the config template.
    Template,
    /// Served until shutdown.
    Stopped,
}

/// Ensure `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<(), StartupError> {
    let meta = std::fs::metadata(root).map_err(|source| StartupError::RootMissing {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(StartupError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Turn `:port` into an all-interfaces address; leave anything else alone.
///
/// `:port` binds IPv4 `0.0.0.0` only, not the IPv6 wildcard. A dual-stack
/// `[::]` socket would report IPv4 clients as `[::ffff:a.b.c.d]:port`, which
/// the address validator rejects, and IPv6 peers are never admitted anyway.
pub fn listen_address(listen: &str) -> String {
    if listen.starts_with(':') {
        format!("0.0.0.0{}", listen)
    } else {
        listen.to_string()
    }
}

/// Run the tool with resolved options.
///
/// `out` receives version and template output. The server, if started,
/// stops when `stop` resolves.
pub async fn run<W: Write>(
    resolved: Resolved,
    mut out: W,
    stop: StopSignal,
) -> Result<Outcome, StartupError> {
    let Resolved {
        options,
        allowlist,
        warnings,
    } = resolved;

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    if options.show_version {
        writeln!(out, "{} version {}", NAME, VERSION).map_err(StartupError::Output)?;
        return Ok(Outcome::Version);
    }

    if options.gen_config {
        write_config_template(&mut out).map_err(StartupError::Output)?;
        return Ok(Outcome::Template);
    }

    validate_root(&options.root)?;

    tracing::info!(
        port = %options.listen,
        root = %options.root.display(),
        allow = %options.allow_spec,
        config = %options.config_path.display(),
        "static file server running, press Ctrl+C to stop"
    );

    let addr = listen_address(&options.listen);
    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    HttpServer::new(&options.root, Arc::new(allowlist))
        .run(listener, stop)
        .await
        .map_err(StartupError::Serve)?;

    Ok(Outcome::Stopped)
}
