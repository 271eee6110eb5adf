//! Minimal in-process HTTP server for unit tests.
//!
//! Serves canned responses over real TCP so the transport layer is
//! exercised end to end without touching the network.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub(crate) struct TestResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_length: bool,
}

impl TestResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            content_length: true,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            content_length: true,
        }
    }
}

/// A test HTTP server bound to a random local port.
pub(crate) struct TestServer {
    pub addr: SocketAddr,
}

impl TestServer {
    /// Spawn a server answering each request by path. Unknown paths get 404.
    pub async fn spawn(routes: HashMap<String, TestResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(routes);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&routes);
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let mut read = 0;
                    // Read until end of headers; bodies are not used.
                    loop {
                        let Ok(n) = socket.read(&mut buf[read..]).await else {
                            return;
                        };
                        if n == 0 {
                            return;
                        }
                        read += n;
                        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                        if read == buf.len() {
                            return;
                        }
                    }

                    let request = String::from_utf8_lossy(&buf[..read]).into_owned();
                    let path = request
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();
                    // Match on the path without the query string too.
                    let bare = path.split('?').next().unwrap_or("/").to_string();

                    let response = routes
                        .get(&path)
                        .or_else(|| routes.get(&bare))
                        .cloned()
                        .unwrap_or_else(|| TestResponse::status(404));

                    let reason = match response.status {
                        200 => "OK",
                        404 => "Not Found",
                        429 => "Too Many Requests",
                        500 => "Internal Server Error",
                        _ => "Status",
                    };

                    let mut head = format!("HTTP/1.1 {} {}\r\n", response.status, reason);
                    if response.content_length {
                        head.push_str(&format!("Content-Length: {}\r\n", response.body.len()));
                    }
                    head.push_str("Connection: close\r\n\r\n");

                    let _ = socket.write_all(head.as_bytes()).await;
                    let _ = socket.write_all(&response.body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr }
    }

    /// Spawn a server with a single route.
    pub async fn single(path: &str, response: TestResponse) -> Self {
        let mut routes = HashMap::new();
        routes.insert(path.to_string(), response);
        Self::spawn(routes).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}
