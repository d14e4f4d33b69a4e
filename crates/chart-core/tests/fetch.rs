// File: crates/chart-core/tests/fetch.rs
// Purpose: The GET against a local one-shot HTTP server, and what each failure looks like.

use gdp_chart_core::markup::render_error;
use gdp_chart_core::{fetch_dataset, DataLoadError, Document, ERROR_MESSAGE};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one response on an ephemeral port and return its URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = sock.read(&mut buf).await;
        let resp = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(resp.as_bytes()).await.unwrap();
        let _ = sock.shutdown().await;
    });
    format!("http://{addr}/GDP-data.json")
}

#[tokio::test]
async fn loads_the_feed() {
    let url = serve_once("200 OK", r#"{"name":"GDP","data":[["1947-01-01","243.1"],["1947-04-01","246.3"]]}"#).await;
    let ds = fetch_dataset(&reqwest::Client::new(), &url).await.unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.points()[1].value, 246.3);
    assert_eq!(ds.meta().name.as_deref(), Some("GDP"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let url = serve_once("404 Not Found", "{}").await;
    let err = fetch_dataset(&reqwest::Client::new(), &url).await.unwrap_err();
    assert!(matches!(err, DataLoadError::Status(s) if s.as_u16() == 404));
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let url = serve_once("200 OK", "<html>oops</html>").await;
    let err = fetch_dataset(&reqwest::Client::new(), &url).await.unwrap_err();
    assert!(matches!(err, DataLoadError::Json(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_request_error_and_shows_the_message() {
    // bind then drop to get a port nobody listens on
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let err = fetch_dataset(&reqwest::Client::new(), &format!("http://{addr}/")).await.unwrap_err();
    assert!(matches!(err, DataLoadError::Request(_)));

    let mut doc = Document::page("United States GDP");
    render_error(&mut doc, ERROR_MESSAGE).unwrap();
    let errors = doc.query_all("div.error");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].text(), Some(ERROR_MESSAGE));
    assert!(doc.query_all("rect").is_empty());
}
