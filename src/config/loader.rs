//! Configuration file discovery and parsing.
//!
//! The file is line oriented:
//! ```text
//! # comment
//! allow=127.0.0.1 192.168.1.5
//! allow=10.0.0.7
//! port=:8080
//! root=public
//! ```
//! `allow=` lines accumulate, `port=` and `root=` are last-write-wins.
//! Unrecognized lines are skipped and reported as warnings.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::schema::{Environment, CONFIG_FILE_NAME};
use crate::security::allowlist::ALLOW_SEPARATOR;

/// Non-fatal problem found while reading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigWarning {
    #[error("cannot open config file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error in {} after line {line}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("ignored line {line} in {}: {text:?}", .path.display())]
    UnrecognizedLine {
        path: PathBuf,
        line: usize,
        text: String,
    },
}

/// Values read from a config file that was successfully opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    /// Accumulated allow spec. Replaces the command-line spec entirely.
    pub allow: String,

    /// Last `port=` value, if any.
    pub port: Option<String>,

    /// Last `root=` value, if any.
    pub root: Option<PathBuf>,
}

/// Find the config file: `./server.conf` if it is a regular file, then
/// `<home>/server.conf`, then the bare name.
pub fn discover_config_path(env: &Environment) -> PathBuf {
    if let Some(cwd) = &env.working_dir {
        let local = cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return local;
        }
    }
    match &env.home_dir {
        Some(home) => home.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/// Read the config file at `path`.
///
/// Returns `None` if the file could not be opened; the caller then keeps its
/// command-line values. Problems are appended to `warnings`.
pub fn load_config_file(path: &Path, warnings: &mut Vec<ConfigWarning>) -> Option<FileSettings> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(source) => {
            warnings.push(ConfigWarning::Unreadable {
                path: path.to_path_buf(),
                source,
            });
            return None;
        }
    };
    Some(parse_config(BufReader::new(file), path, warnings))
}

/// Parse config lines from any reader.
///
/// Lines are split on bytes, so a line that is not valid UTF-8 is decoded
/// lossily and handled like any other. Only an I/O error stops the scan.
pub fn parse_config<R: BufRead>(
    mut reader: R,
    path: &Path,
    warnings: &mut Vec<ConfigWarning>,
) -> FileSettings {
    let mut settings = FileSettings::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => line_no += 1,
            Err(source) => {
                warnings.push(ConfigWarning::ReadFailed {
                    path: path.to_path_buf(),
                    line: line_no,
                    source,
                });
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }

        if let Some(v) = s.strip_prefix("allow=") {
            settings.allow.push(ALLOW_SEPARATOR);
            settings.allow.push_str(v);
        } else if let Some(v) = s.strip_prefix("port=") {
            settings.port = Some(v.to_string());
        } else if let Some(v) = s.strip_prefix("root=") {
            settings.root = Some(PathBuf::from(v));
        } else {
            warnings.push(ConfigWarning::UnrecognizedLine {
                path: path.to_path_buf(),
                line: line_no,
                text: s.to_string(),
            });
        }
    }

    settings
}
