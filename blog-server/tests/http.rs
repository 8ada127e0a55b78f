use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use blog_server::{serve_with_listener, BlogStore};

async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_with_listener(listener, Arc::new(BlogStore::in_memory())));
    addr
}

/// 发送一个 HTTP/1.1 请求，返回状态码和完整响应文本
async fn request(addr: SocketAddr, method: &str, path: &str, body: &str, extra: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let raw = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\n{extra}Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    let text = String::from_utf8_lossy(&buf).to_string();
    let status = text
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    (status, text)
}

#[tokio::test]
async fn root_is_plain_text() {
    let addr = spawn_server().await;
    let (status, text) = request(addr, "GET", "/", "", "").await;
    assert_eq!(status, 200);
    assert!(text.ends_with("API is running..."));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let addr = spawn_server().await;
    let (status, text) = request(addr, "POST", "/blogs", "{not json", "").await;
    assert_eq!(status, 400);
    assert!(text.contains("\"message\""));
}

#[tokio::test]
async fn create_list_and_delete() {
    let addr = spawn_server().await;

    let (status, text) = request(
        addr,
        "POST",
        "/blogs",
        r#"{"title":"Hello","content":"World","author":"Ann","tags":["intro"]}"#,
        "",
    )
    .await;
    assert_eq!(status, 201);
    assert!(text.contains("\"_id\""));
    assert!(text.contains("\"createdAt\""));

    let (status, text) = request(addr, "GET", "/blogs", "", "").await;
    assert_eq!(status, 200);
    assert!(text.contains("\"title\":\"Hello\""));

    let (status, text) = request(addr, "GET", "/blogs/does-not-exist", "", "").await;
    assert_eq!(status, 404);
    assert!(text.contains("Blog not found"));

    let (status, text) = request(addr, "DELETE", "/blogs/does-not-exist", "", "").await;
    assert_eq!(status, 404);
    assert!(text.contains("Blog not found"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let addr = spawn_server().await;
    let (status, text) = request(addr, "GET", "/blogs", "", "Origin: http://example.com\r\n").await;
    assert_eq!(status, 200);
    assert!(text.to_lowercase().contains("access-control-allow-origin: *"));
}
