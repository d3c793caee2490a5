//! Loopback HTTP fixture answering with canned responses.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;

/// A one-shot HTTP server bound to an ephemeral loopback port.
pub struct CannedServer {
    listener: TcpListener,
    url: String,
}

impl CannedServer {
    /// Bind to `127.0.0.1:0`.
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        Self {
            listener,
            url: format!("http://{addr}"),
        }
    }

    /// Base URL of the server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Accept one connection, answer with `status` and `body`, and return
    /// the raw request that was received.
    pub async fn respond(self, status: u16, body: &str) -> String {
        let (mut stream, _) = self.listener.accept().await.expect("accept connection");
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        stream.shutdown().await.expect("shutdown stream");
        request
    }

    /// Accept one connection and read the request, then hold the
    /// connection open without answering until `release` is notified.
    pub async fn stall(self, release: &Notify) -> String {
        let (mut stream, _) = self.listener.accept().await.expect("accept connection");
        let request = read_request(&mut stream).await;
        release.notified().await;
        request
    }
}

/// Base URL of a port with nothing listening on it.
pub async fn refused_url() -> String {
    let server = CannedServer::bind().await;
    let url = server.url().to_owned();
    drop(server);
    url
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let read = stream.read(&mut chunk).await.expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(end) = header_end(&buffer) {
            let expected = end + content_length(&buffer[..end]);
            if buffer.len() >= expected {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|index| index + 4)
}

fn content_length(headers: &[u8]) -> usize {
    String::from_utf8_lossy(headers)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}
