//! Start/stop control for a serving instance.
//!
//! `stop_channel` pairs a `StopHandle` (kept by whoever started the server)
//! with a `StopSignal` (consumed by `HttpServer::run`). The signal resolves
//! when the handle is used or dropped, or when the process gets Ctrl+C or
//! SIGTERM.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::lifecycle::signals::shutdown_signal;

/// Requests a graceful stop.
#[derive(Debug)]
pub struct StopHandle {
    tx: oneshot::Sender<()>,
}

/// Resolves when the server should stop accepting connections.
#[derive(Debug)]
pub struct StopSignal {
    rx: oneshot::Receiver<()>,
}

/// Create a connected handle/signal pair.
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = oneshot::channel();
    (StopHandle { tx }, StopSignal { rx })
}

impl StopHandle {
    pub fn stop(self) {
        let _ = self.tx.send(());
    }
}

impl StopSignal {
    /// Wait for the handle or an OS termination signal.
    pub async fn wait(self) {
        tokio::select! {
            res = self.rx => match res {
                Ok(()) => tracing::info!("Stop requested"),
                Err(_) => tracing::info!("Stop handle dropped"),
            },
            _ = shutdown_signal() => {}
        }
    }
}

/// A server started in the background with `HttpServer::spawn`.
pub struct RunningServer {
    addr: SocketAddr,
    stop: StopHandle,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningServer {
    pub(crate) fn new(
        addr: SocketAddr,
        stop: StopHandle,
        task: JoinHandle<Result<(), std::io::Error>>,
    ) -> Self {
        Self { addr, stop, task }
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting, drain in-flight requests and release the socket.
    pub async fn stop(self) -> Result<(), std::io::Error> {
        self.stop.stop();
        match self.task.await {
            Ok(res) => res,
            Err(e) => Err(std::io::Error::other(e)),
        }
    }
}
