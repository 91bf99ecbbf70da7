//! Command-line flags.
//!
//! Flags are traditionally written with a single dash (`-port :9000`).
//! clap only understands long options with two dashes, so known single-dash
//! long flags are rewritten before parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::config::schema::{DEFAULT_ALLOW, DEFAULT_LISTEN};

/// Static file server restricted to an allowlist of client addresses.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tinyserver", disable_version_flag = true)]
pub struct Cli {
    /// Show version
    #[arg(long)]
    pub version: bool,

    /// Listen address
    #[arg(long, default_value = DEFAULT_LISTEN)]
    pub port: String,

    /// Directory to serve (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Allowed remote addresses, separated by spaces
    #[arg(long, default_value = DEFAULT_ALLOW)]
    pub allow: String,

    /// Path to configuration file (default: ./server.conf, then ~/server.conf)
    #[arg(long)]
    pub conf: Option<PathBuf>,

    /// Write a configuration template to stdout
    #[arg(long = "gen-conf")]
    pub gen_conf: bool,

    /// Directory to serve; overrides --root and the config file
    #[arg(value_name = "ROOT")]
    pub positional: Vec<PathBuf>,
}

const LONG_FLAGS: &[&str] = &["version", "port", "root", "allow", "conf", "gen-conf", "help"];

impl Cli {
    /// Parse arguments, accepting single-dash long flags.
    pub fn parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrite `-flag` and `-flag=value` into `--flag` / `--flag=value` for the
/// known long flags. Everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            LONG_FLAGS
                .contains(&name)
                .then(|| OsString::from(format!("-{}", s)))
        });
        out.push(rewritten.unwrap_or(arg));
    }
    out
}
