//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tinyserver::{Allowlist, HttpServer, RunningServer};
use tokio::net::TcpListener;

/// Temporary directory removed when dropped.
pub struct ScratchDir(PathBuf);

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "tinyserver-it-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Deref for ScratchDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Create a small site under a scratch directory.
pub fn make_site(name: &str) -> ScratchDir {
    let dir = ScratchDir::new(name);
    fs::create_dir_all(dir.join("sub")).unwrap();
    fs::write(dir.join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(dir.join("sub").join("data.txt"), "payload").unwrap();
    dir
}

/// Start a server for `root` admitting the addresses in `allow`.
pub async fn start_server(root: &Path, allow: &str) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    HttpServer::new(root, Arc::new(Allowlist::from_spec(allow)))
        .spawn(listener)
        .unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
