//! Canned HTTP portal for exercising fetch paths in tests.
//!
//! Serves static JSON bodies over a real TCP socket; responses are chosen by
//! substring match against the request line, so routes can key on the
//! `action` and id query parameters.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub struct Route {
    pattern: &'static str,
    status: u16,
    body: &'static str,
    delay: Duration,
    fail_after: Option<u32>,
    hits: AtomicU32,
}

impl Route {
    pub fn new(pattern: &'static str, status: u16, body: &'static str) -> Self {
        Self {
            pattern,
            status,
            body,
            delay: Duration::ZERO,
            fail_after: None,
            hits: AtomicU32::new(0),
        }
    }

    /// Delay the response, for exercising fetches that resolve out of order
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Serve the route normally for `hits` requests, then return 500
    pub fn fail_after(mut self, hits: u32) -> Self {
        self.fail_after = Some(hits);
        self
    }
}

/// Spawn a portal serving the given routes; returns its http base URL.
///
/// Unmatched requests get a 404. The listener accepts connections until the
/// test process exits.
pub async fn spawn_portal(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind portal");
    let addr = listener.local_addr().expect("portal addr");
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                let line = request.lines().next().unwrap_or("");

                let (status, body, delay) = match routes.iter().find(|r| line.contains(r.pattern)) {
                    Some(route) => {
                        let hit = route.hits.fetch_add(1, Ordering::SeqCst) + 1;
                        match route.fail_after {
                            Some(limit) if hit > limit => (500, "{}", route.delay),
                            _ => (route.status, route.body, route.delay),
                        }
                    }
                    None => (404, "{}", Duration::ZERO),
                };

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                let reason = match status {
                    200 => "OK",
                    500 => "Internal Server Error",
                    _ => "Not Found",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\
                     \r\n\
                     {}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    format!("http://{addr}")
}
