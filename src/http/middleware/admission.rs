//! Admission Middleware.
//! Enforces the client address allowlist before file serving.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::security::{validate_address, Allowlist};

/// Body sent with every rejection.
pub const BLOCKED_BODY: &str = "Blocked";

/// Access-log entry text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessEvent<'a> {
    /// Every request, before the allowlist check.
    Attempt { remote: &'a str, uri: &'a str },
    /// A request that was turned away.
    Rejected { remote: &'a str },
}

impl fmt::Display for AccessEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessEvent::Attempt { remote, uri } => write!(f, "{} {}", remote, uri),
            AccessEvent::Rejected { remote } => write!(f, "rejected  {}", remote),
        }
    }
}

/// Whether a raw remote endpoint may pass.
pub fn is_admitted(allowlist: &Allowlist, remote: &str) -> bool {
    validate_address(remote)
        .bare_ip()
        .is_some_and(|ip| allowlist.contains(ip))
}

pub async fn admission_middleware(
    State(allowlist): State<Arc<Allowlist>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let remote = addr.to_string();
    let uri = req.uri().to_string();

    // 1. Access log
    info!("{}", AccessEvent::Attempt { remote: &remote, uri: &uri });

    // 2. Validate and look up
    if is_admitted(&allowlist, &remote) {
        return next.run(req).await;
    }

    // 3. Reject without touching the inner service
    warn!("{}", AccessEvent::Rejected { remote: &remote });
    (StatusCode::FORBIDDEN, BLOCKED_BODY).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::connect_info::MockConnectInfo, middleware, routing::get, Router};
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use tower::ServiceExt;
    use tracing_subscriber::fmt::MakeWriter;

    fn sentinel_app(allow: &str, peer: &str, hit: Arc<AtomicBool>) -> Router {
        let allowlist = Arc::new(Allowlist::from_spec(allow));
        let peer: SocketAddr = peer.parse().unwrap();
        let handler = get(move || {
            let hit = hit.clone();
            async move {
                hit.store(true, Ordering::SeqCst);
                "served"
            }
        });
        Router::new()
            .route("/", handler.clone())
            .route("/{*path}", handler)
            .layer(middleware::from_fn_with_state(allowlist, admission_middleware))
            .layer(MockConnectInfo(peer))
    }

    /// Log sink collecting formatted events in memory.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Send one request to `/` with a subscriber capturing this thread's events.
    async fn call_logged(allow: &str, peer: &str) -> (StatusCode, bool, String) {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let hit = Arc::new(AtomicBool::new(false));
        let (status, _) = call(sentinel_app(allow, peer, hit.clone()), "/").await;
        (status, hit.load(Ordering::SeqCst), log.text())
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, String) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn allowed_address_reaches_handler() {
        let hit = Arc::new(AtomicBool::new(false));
        let app = sentinel_app("127.0.0.1", "127.0.0.1:54321", hit.clone());

        let (status, body) = call(app, "/index.html").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "served");
        assert!(hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_address_is_blocked() {
        let hit = Arc::new(AtomicBool::new(false));
        let app = sentinel_app("127.0.0.1", "10.0.0.5:1000", hit.clone());

        let (status, body) = call(app, "/index.html").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, "Blocked");
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn any_port_of_allowed_address_passes() {
        for port in [1u16, 80, 8080, 65535] {
            let hit = Arc::new(AtomicBool::new(false));
            let peer = format!("192.168.1.7:{}", port);
            let app = sentinel_app("127.0.0.1 192.168.1.7", &peer, hit.clone());

            let (status, _) = call(app, "/a/b").await;
            assert_eq!(status, StatusCode::OK, "port {port}");
            assert!(hit.load(Ordering::SeqCst));
        }
    }

    #[tokio::test]
    async fn ipv6_peer_is_blocked_even_if_listed() {
        let hit = Arc::new(AtomicBool::new(false));
        let app = sentinel_app("::1", "[::1]:8080", hit.clone());

        let (status, _) = call(app, "/x").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn empty_allowlist_blocks_everyone() {
        let hit = Arc::new(AtomicBool::new(false));
        let app = sentinel_app("", "127.0.0.1:1", hit.clone());

        let (status, _) = call(app, "/x").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!hit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn admitted_request_is_logged() {
        let (status, hit, log) = call_logged("127.0.0.1", "127.0.0.1:54321").await;

        assert_eq!(status, StatusCode::OK);
        assert!(hit);
        assert!(log.contains("127.0.0.1:54321 /"), "log was: {log}");
        assert!(!log.contains("rejected"), "log was: {log}");
    }

    #[tokio::test]
    async fn rejected_request_is_logged_twice() {
        let (status, hit, log) = call_logged("127.0.0.1", "10.0.0.5:1000").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!hit);
        assert!(log.contains("10.0.0.5:1000 /"), "log was: {log}");
        assert!(log.contains("rejected  10.0.0.5:1000"), "log was: {log}");
    }

    #[test]
    fn access_log_lines() {
        let attempt = AccessEvent::Attempt {
            remote: "127.0.0.1:54321",
            uri: "/",
        };
        assert_eq!(attempt.to_string(), "127.0.0.1:54321 /");

        let rejected = AccessEvent::Rejected {
            remote: "10.0.0.5:1000",
        };
        assert_eq!(rejected.to_string(), "rejected  10.0.0.5:1000");
    }

    #[test]
    fn admission_decision() {
        let list = Allowlist::from_spec("127.0.0.1");
        assert!(is_admitted(&list, "127.0.0.1:1"));
        assert!(!is_admitted(&list, "127.0.0.2:1"));
        assert!(!is_admitted(&list, "not-an-ip:8080"));
        assert!(!is_admitted(&Allowlist::from_spec(" "), ""));
    }
}
