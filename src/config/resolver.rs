//! Merge defaults, config file and command line into effective options.
//!
//! Resolution order:
//! 1. Command-line values (clap applies the defaults).
//! 2. Config file, if it opens: `port=`/`root=` overwrite, and the allow spec
//!    is reset and rebuilt from `allow=` lines only.
//! 3. A positional argument overrides the root.
//! 4. A still-missing root becomes the working directory.

use std::path::PathBuf;

use crate::config::cli::Cli;
use crate::config::loader::{discover_config_path, load_config_file, ConfigWarning};
use crate::config::schema::{Environment, ServerOptions};
use crate::security::Allowlist;

/// Fatal configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid argument: {0:?}")]
    TooManyArguments(Vec<PathBuf>),

    #[error("cannot determine working directory")]
    WorkingDirectory,
}

/// Outcome of a successful resolution.
#[derive(Debug)]
pub struct Resolved {
    pub options: ServerOptions,
    pub allowlist: Allowlist,
    pub warnings: Vec<ConfigWarning>,
}

/// Resolve effective options from parsed flags and the process environment.
pub fn resolve(cli: Cli, env: &Environment) -> Result<Resolved, ConfigError> {
    let Cli {
        version,
        port,
        root,
        allow,
        conf,
        gen_conf,
        positional,
    } = cli;

    let mut positional = positional.into_iter();
    let root_override = positional.next();
    let extra: Vec<PathBuf> = positional.collect();
    if !extra.is_empty() {
        let mut all: Vec<PathBuf> = root_override.into_iter().collect();
        all.extend(extra);
        return Err(ConfigError::TooManyArguments(all));
    }

    let config_path = conf.unwrap_or_else(|| discover_config_path(env));

    let mut warnings = Vec::new();
    let mut listen = port;
    let mut root = root;
    let mut allow_spec = allow;

    if let Some(file) = load_config_file(&config_path, &mut warnings) {
        allow_spec = file.allow;
        if let Some(p) = file.port {
            listen = p;
        }
        if let Some(r) = file.root {
            root = Some(r);
        }
    }

    if let Some(r) = root_override {
        root = Some(r);
    }

    let root = match root.filter(|r| !r.as_os_str().is_empty()) {
        Some(r) => r,
        None => env
            .working_dir
            .clone()
            .ok_or(ConfigError::WorkingDirectory)?,
    };

    let allowlist = Allowlist::from_spec(&allow_spec);

    Ok(Resolved {
        options: ServerOptions {
            listen,
            root,
            allow_spec,
            config_path,
            show_version: version,
            gen_config: gen_conf,
        },
        allowlist,
        warnings,
    })
}
