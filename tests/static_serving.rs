//! Integration tests for the static file server
//!
//! Each test binds an ephemeral port, serves a throwaway fixture directory,
//! and speaks raw HTTP/1.1 over TCP.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use devserve::config::{AppState, Config, HeaderPair};
use devserve::server::{self, ShutdownHandle};

static FIXTURE_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Fixture tree: index.html, assets/{app.js, style.css}, data.bin, empty/
fn fixture_root() -> PathBuf {
    let seq = FIXTURE_SEQ.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("devserve-it-{}-{seq}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets")).expect("create fixture dirs");
    std::fs::create_dir_all(dir.join("empty")).expect("create fixture dirs");
    std::fs::write(dir.join("index.html"), "<html><body>home</body></html>")
        .expect("write fixture");
    std::fs::write(dir.join("assets/app.js"), "console.log('dev');").expect("write fixture");
    std::fs::write(dir.join("assets/style.css"), "body { margin: 0 }").expect("write fixture");
    std::fs::write(dir.join("data.bin"), [0u8, 1, 2, 3]).expect("write fixture");
    dir
}

fn test_config(root: &Path) -> Config {
    let mut cfg = Config::load_from("no-such-config-file").expect("defaults should load");
    cfg.server.host = "127.0.0.1".to_string();
    cfg.server.port = 0;
    cfg.logging.access_log = false;
    cfg.serving.root = root.to_string_lossy().into_owned();
    cfg.browser.open = false;
    cfg.performance.read_timeout = 5;
    cfg.performance.write_timeout = 5;
    cfg
}

struct TestServer {
    addr: SocketAddr,
    shutdown: Arc<ShutdownHandle>,
    task: tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>,
}

async fn start_server(cfg: Config) -> TestServer {
    let addr = cfg.socket_addr().expect("valid address");
    let listener = server::create_listener(addr).expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let state = Arc::new(AppState::new(cfg).expect("state"));
    let shutdown = Arc::new(ShutdownHandle::new());
    let task = tokio::spawn(server::run(listener, state, Arc::clone(&shutdown)));
    TestServer {
        addr,
        shutdown,
        task,
    }
}

impl TestServer {
    async fn stop(self) {
        self.shutdown.request();
        tokio::time::timeout(Duration::from_secs(2), self.task)
            .await
            .expect("server should stop within grace period")
            .expect("server task should not panic")
            .expect("server should exit cleanly");
    }
}

async fn send_raw(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream.write_all(raw.as_bytes()).await.expect("write request");
    // No half-close: requests carry Connection: close, so the server ends
    // the stream after responding and read_to_end terminates.
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.expect("read response");
    String::from_utf8_lossy(&buf).into_owned()
}

async fn request(addr: SocketAddr, method: &str, path: &str) -> String {
    send_raw(
        addr,
        &format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"),
    )
    .await
}

fn status_line(response: &str) -> &str {
    response.lines().next().unwrap_or("")
}

fn header_value(response: &str, name: &str) -> Option<String> {
    let head = response.split("\r\n\r\n").next()?;
    for line in head.lines().skip(1) {
        if let Some((n, v)) = line.split_once(':') {
            if n.eq_ignore_ascii_case(name) {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn body_of(response: &str) -> &str {
    response
        .split_once("\r\n\r\n")
        .map_or("", |(_, body)| body)
}

#[tokio::test]
async fn test_mime_types_follow_override_table() {
    let server = start_server(test_config(&fixture_root())).await;

    let css = request(server.addr, "GET", "/assets/style.css").await;
    assert!(status_line(&css).contains("200 OK"), "got: {css}");
    assert_eq!(header_value(&css, "content-type").as_deref(), Some("text/css"));
    assert!(body_of(&css).contains("margin"));

    let js = request(server.addr, "GET", "/assets/app.js").await;
    assert!(status_line(&js).contains("200 OK"));
    assert_eq!(
        header_value(&js, "content-type").as_deref(),
        Some("application/javascript")
    );

    let html = request(server.addr, "GET", "/index.html").await;
    assert_eq!(
        header_value(&html, "content-type").as_deref(),
        Some("text/html; charset=utf-8")
    );

    let bin = request(server.addr, "GET", "/data.bin").await;
    assert_eq!(
        header_value(&bin, "content-type").as_deref(),
        Some("application/octet-stream")
    );

    server.stop().await;
}

#[tokio::test]
async fn test_cors_headers_on_every_response() {
    let server = start_server(test_config(&fixture_root())).await;

    for (method, path, expected_status) in [
        ("GET", "/index.html", "200"),
        ("GET", "/no-such-file.txt", "404"),
        ("GET", "/../etc/passwd", "403"),
        ("OPTIONS", "/", "204"),
        ("POST", "/index.html", "405"),
    ] {
        let response = request(server.addr, method, path).await;
        assert!(
            status_line(&response).contains(expected_status),
            "{method} {path}: {response}"
        );
        assert_eq!(
            header_value(&response, "access-control-allow-origin").as_deref(),
            Some("*"),
            "{method} {path} missing CORS origin header"
        );
        assert_eq!(
            header_value(&response, "access-control-allow-methods").as_deref(),
            Some("GET, POST, OPTIONS")
        );
        assert_eq!(
            header_value(&response, "access-control-allow-headers").as_deref(),
            Some("Content-Type")
        );
    }

    server.stop().await;
}

#[tokio::test]
async fn test_cache_control_profile() {
    let mut cfg = test_config(&fixture_root());
    cfg.headers.extra = vec![HeaderPair::new("Cache-Control", "no-cache")];
    let server = start_server(cfg).await;

    let response = request(server.addr, "GET", "/index.html").await;
    assert_eq!(
        header_value(&response, "cache-control").as_deref(),
        Some("no-cache")
    );
    assert_eq!(header_value(&response, "access-control-allow-origin"), None);

    server.stop().await;
}

#[tokio::test]
async fn test_traversal_is_forbidden() {
    let server = start_server(test_config(&fixture_root())).await;

    for path in ["/../secret.txt", "/assets/../../secret.txt"] {
        let response = request(server.addr, "GET", path).await;
        assert!(
            status_line(&response).contains("403"),
            "GET {path}: {response}"
        );
    }

    server.stop().await;
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let server = start_server(test_config(&fixture_root())).await;

    let response = request(server.addr, "GET", "/nope/nothing.css").await;
    assert!(status_line(&response).contains("404"));

    server.stop().await;
}

#[tokio::test]
async fn test_directory_redirect_and_listing() {
    let server = start_server(test_config(&fixture_root())).await;

    let redirect = request(server.addr, "GET", "/assets").await;
    assert!(status_line(&redirect).contains("301"), "got: {redirect}");
    assert_eq!(
        header_value(&redirect, "location").as_deref(),
        Some("/assets/")
    );

    let listing = request(server.addr, "GET", "/empty/").await;
    assert!(status_line(&listing).contains("200 OK"));
    assert!(body_of(&listing).contains("Directory listing for /empty/"));

    server.stop().await;
}

#[tokio::test]
async fn test_listing_disabled_is_404() {
    let mut cfg = test_config(&fixture_root());
    cfg.serving.directory_listing = false;
    let server = start_server(cfg).await;

    let response = request(server.addr, "GET", "/empty/").await;
    assert!(status_line(&response).contains("404"), "got: {response}");

    server.stop().await;
}

#[tokio::test]
async fn test_root_serves_index_file() {
    let server = start_server(test_config(&fixture_root())).await;

    let response = request(server.addr, "GET", "/").await;
    assert!(status_line(&response).contains("200 OK"));
    assert!(body_of(&response).contains("home"));

    server.stop().await;
}

#[tokio::test]
async fn test_head_has_length_but_no_body() {
    let server = start_server(test_config(&fixture_root())).await;

    let response = request(server.addr, "HEAD", "/index.html").await;
    assert!(status_line(&response).contains("200 OK"));
    let length: usize = header_value(&response, "content-length")
        .expect("HEAD keeps Content-Length")
        .parse()
        .expect("numeric length");
    assert_eq!(length, "<html><body>home</body></html>".len());
    assert_eq!(body_of(&response), "");

    server.stop().await;
}

#[tokio::test]
async fn test_malformed_request_gets_400() {
    let server = start_server(test_config(&fixture_root())).await;

    let response = send_raw(server.addr, "GET /index.html BADPROTO/9.9\r\n\r\n").await;
    assert!(status_line(&response).contains("400"), "got: {response}");

    server.stop().await;
}

#[tokio::test]
async fn test_server_survives_bad_requests() {
    let server = start_server(test_config(&fixture_root())).await;

    let missing = request(server.addr, "GET", "/missing.txt").await;
    assert!(status_line(&missing).contains("404"));

    let traversal = request(server.addr, "GET", "/../x").await;
    assert!(status_line(&traversal).contains("403"));

    let bad = send_raw(server.addr, "GET / BADPROTO/9.9\r\n\r\n").await;
    assert!(status_line(&bad).contains("400"));

    // The loop keeps serving after every per-request failure
    let ok = request(server.addr, "GET", "/index.html").await;
    assert!(status_line(&ok).contains("200 OK"), "got: {ok}");

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_closes_listener() {
    let server = start_server(test_config(&fixture_root())).await;
    let addr = server.addr;

    let response = request(addr, "GET", "/index.html").await;
    assert!(status_line(&response).contains("200 OK"));

    server.stop().await;

    assert!(
        TcpStream::connect(addr).await.is_err(),
        "listener should be closed after shutdown"
    );
}
