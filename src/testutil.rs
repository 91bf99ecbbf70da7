//! Helpers shared by unit tests.

use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Temporary directory removed when dropped.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(scope: &str, name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "tinyserver-{}-{}-{}",
            scope,
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Deref for ScratchDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
