//! One-shot HTTP server for exercising the REST clients in tests.

use crate::http_client::HttpClient;
use medchat_core::auth::TokenHandle;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Builds a raw HTTP/1.1 response with a JSON body.
pub fn http_response(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Client that never routes through a proxy, so loopback requests stay local.
pub fn test_client(base_url: &str, token: TokenHandle) -> HttpClient {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test client");
    HttpClient::with_client(client, base_url, token)
}

/// Accepts a single connection, answers with `response`, and resolves to the
/// raw request text (request line, headers and body).
pub async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.expect("read");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.expect("write");
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{addr}"), handle)
}

// Only Content-Length framed bodies are recognised. A chunked request is cut
// off at the end of its headers, which is fine because reqwest sends a
// Content-Length for every JSON body these clients build.
fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

/// Body part of a raw request captured by [`serve_once`].
pub fn request_body(raw: &str) -> &str {
    raw.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
}
