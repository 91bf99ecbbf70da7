//! tinyserver
//!
//! Serves one directory tree over HTTP to an allowlist of client addresses.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv + server.conf
//!        │
//!        ▼
//!   ┌──────────┐  ServerOptions  ┌───────────┐
//!   │  config  │────────────────▶│ lifecycle │── version / gen-conf → stdout
//!   │ resolver │    Allowlist    │  startup  │
//!   └──────────┘                 └─────┬─────┘
//!                                      │ bind
//!                                      ▼
//!   Client ──▶ TraceLayer ──▶ admission middleware ──▶ ServeDir(root)
//!                                 │
//!                                 └──▶ 403 "Blocked"
//! ```

use std::process::ExitCode;

use tinyserver::config::schema::{NAME, VERSION};
use tinyserver::config::{resolve, Cli, Environment};
use tinyserver::lifecycle::{self, stop_channel};
use tinyserver::observability::logging;
use tracing::Instrument;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let cli = match Cli::parse_normalized(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let span = tracing::info_span!("tinyserver", version = VERSION);

    let resolved = match resolve(cli, &Environment::current()) {
        Ok(r) => r,
        Err(e) => {
            span.in_scope(|| tracing::error!(error = %e, "Invalid configuration"));
            return ExitCode::FAILURE;
        }
    };

    // Held for the whole run; the server stops on Ctrl+C / SIGTERM.
    let (_stop, signal) = stop_channel();

    let result = lifecycle::run(resolved, std::io::stdout(), signal)
        .instrument(span.clone())
        .await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            span.in_scope(|| tracing::error!(error = %e, "{} exited with a fatal error", NAME));
            ExitCode::FAILURE
        }
    }
}
