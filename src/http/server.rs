//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router: admission middleware around static file serving
//! - Wire up tracing so every request event carries the tool prefix span
//! - Serve on a listener until shutdown is requested

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{body::Body, http::Request, middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::schema::{NAME, VERSION};
use crate::http::middleware::admission_middleware;
use crate::lifecycle::shutdown::{stop_channel, RunningServer, StopSignal};
use crate::security::Allowlist;

/// Static file server gated by an allowlist.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server serving `root` to the addresses in `allowlist`.
    pub fn new(root: &Path, allowlist: Arc<Allowlist>) -> Self {
        let files = Router::new().fallback_service(ServeDir::new(root));
        Self {
            router: Self::gate(files, allowlist),
        }
    }

    /// Wrap any router with the admission middleware and request tracing.
    pub fn gate(inner: Router, allowlist: Arc<Allowlist>) -> Router {
        inner.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(|_req: &Request<Body>| {
                    tracing::info_span!("tinyserver", version = VERSION)
                }))
                .layer(middleware::from_fn_with_state(allowlist, admission_middleware)),
        )
    }

    /// The assembled router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `stop` resolves, after in-flight requests finish.
    pub async fn run(self, listener: TcpListener, stop: StopSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "{} {} listening", NAME, VERSION);

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(stop.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server on a background task and return its stop handle.
    pub fn spawn(self, listener: TcpListener) -> Result<RunningServer, std::io::Error> {
        let addr = listener.local_addr()?;
        let (handle, signal) = stop_channel();
        let task = tokio::spawn(self.run(listener, signal));
        Ok(RunningServer::new(addr, handle, task))
    }
}
