// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Byte transport between the client and an IPP server.
//
// The protocol layers never touch the network; they hand a request body to a
// `Transport` and get a response body back.  `HttpTransport` is the standard
// implementation: IPP over HTTP POST (RFC 8010 §4), optionally over TLS.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::debug;
use url::Url;

use inkwire_core::config::ServerConfig;
use inkwire_core::error::{InkwireError, Result, TransportError};

/// MIME type of IPP request and response bodies.
pub const IPP_MIME_TYPE: &str = "application/ipp";

/// Per-request transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// HTTP resource path, e.g. `/printers/Office-1`.  CUPS accepts every
    /// operation at `/`.
    pub path: String,
    /// Overrides the transport's own timeout for this call.
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            path: "/".into(),
            timeout: None,
        }
    }
}

impl RequestOptions {
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Sends one encoded request and returns the raw response body.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: Vec<u8>,
        options: &RequestOptions,
    ) -> impl Future<Output = std::result::Result<Vec<u8>, TransportError>> + Send;
}

/// IPP over HTTP(S) using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport for the server described by `config`.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base = config.base_url();
        let base_url = Url::parse(&base).map_err(|e| InkwireError::InvalidUri(format!("{base}: {e}")))?;
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InkwireError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a resource path.
    pub fn endpoint(&self, path: &str) -> std::result::Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Endpoint(format!("{path}: {e}")))
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: Vec<u8>,
        options: &RequestOptions,
    ) -> std::result::Result<Vec<u8>, TransportError> {
        let url = self.endpoint(&options.path)?;
        let timeout = options.timeout.unwrap_or(self.timeout);
        debug!(%url, bytes = request.len(), timeout_ms = timeout.as_millis() as u64, "POST IPP request");

        let mut builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(IPP_MIME_TYPE))
            .timeout(timeout)
            .body(request);
        if let Some(user) = &self.username {
            builder = builder.basic_auth(user, self.password.as_ref());
        }

        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::Other(Box::new(e))
            }
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }
        let body = response.bytes().await.map_err(classify)?;
        debug!(status = status.as_u16(), bytes = body.len(), "IPP response received");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Read one HTTP/1.1 request (headers plus Content-Length body).
    async fn read_request(stream: &mut tokio::net::TcpStream) -> (String, Vec<u8>) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending a full request");
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                return (head, buf[end + 4..end + 4 + content_length].to_vec());
            }
        }
    }

    async fn respond(stream: &mut tokio::net::TcpStream, status: &str, body: &[u8]) {
        let head = format!(
            "HTTP/1.1 {status}\r\n\
             Content-Type: application/ipp\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\
             \r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).await.unwrap();
        stream.write_all(body).await.unwrap();
        stream.flush().await.unwrap();
    }

    fn config_for(port: u16) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn default_options_target_root() {
        let options = RequestOptions::default();
        assert_eq!(options.path, "/");
        assert_eq!(options.timeout, None);
        let options = RequestOptions::at("/admin").with_timeout(Duration::from_secs(2));
        assert_eq!(options.path, "/admin");
        assert_eq!(options.timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn endpoint_uses_scheme_from_config() {
        let config = ServerConfig {
            host: "cups.example".into(),
            secure: true,
            ..ServerConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.endpoint("/printers/p1").unwrap().as_str(),
            "https://cups.example:631/printers/p1"
        );
    }

    #[tokio::test]
    async fn posts_ipp_body_and_returns_response_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let (head, body) = read_request(&mut stream).await;
            respond(&mut stream, "200 OK", b"response-bytes").await;
            (head, body)
        });

        let mut config = config_for(port);
        config.username = Some("alice".into());
        config.password = Some("secret".into());
        let transport = HttpTransport::new(&config).unwrap();
        let reply = transport
            .send(b"request-bytes".to_vec(), &RequestOptions::at("/printers/p1"))
            .await
            .unwrap();
        assert_eq!(reply, b"response-bytes");

        let (head, body) = server.await.unwrap();
        assert!(head.starts_with("post /printers/p1 http/1.1"));
        assert!(head.contains("content-type: application/ipp"));
        // base64("alice:secret")
        assert!(head.contains("authorization: basic ywxpy2u6c2vjcmv0"));
        assert_eq!(body, b"request-bytes");
    }

    #[tokio::test]
    async fn non_success_http_status_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request(&mut stream).await;
            respond(&mut stream, "401 Unauthorized", b"").await;
        });

        let transport = HttpTransport::new(&config_for(port)).unwrap();
        let err = transport
            .send(vec![0x02, 0x01], &RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::HttpStatus(401)));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request(&mut stream).await;
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let transport = HttpTransport::new(&config_for(port)).unwrap();
        let options = RequestOptions::default().with_timeout(Duration::from_millis(100));
        let err = transport.send(vec![0x02, 0x01], &options).await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout(t) if t == Duration::from_millis(100)));
    }
}
