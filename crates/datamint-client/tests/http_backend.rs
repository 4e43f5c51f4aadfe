use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use datamint_client::{GenerationBackend, HttpBackend, TransportError};
use datamint_core::{GeneratorConfig, HealthStatus};
use serde_json::json;

/// Serve one canned HTTP response; the handle yields the raw request.
fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read line");
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().expect("content length");
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).expect("read body");

        let response = format!(
            "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).expect("write response");

        head + &String::from_utf8(request_body).expect("utf8 body")
    });

    (url, handle)
}

fn backend(url: &str) -> HttpBackend {
    HttpBackend::new(url, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn generate_posts_request_and_decodes_result() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        json!({"success": true, "requestId": "r-1", "data": "[{\"id\": 7}]", "recordCount": 1})
            .to_string(),
    );

    let mut config = GeneratorConfig::new();
    config.set_context("holiday orders");
    let request = config.build_request();
    let result = backend(&url).generate(&request).await.expect("generate");
    assert_eq!(result.data, json!([{"id": 7}]));

    let raw = server.join().expect("server thread");
    assert!(raw.starts_with("POST /generate "));
    assert!(raw.to_ascii_lowercase().contains("x-request-id:"));
    assert!(raw.contains("\"hints\":[\"realistic\"]"));
    assert!(raw.contains("\"outputFormat\":\"JSON\""));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (url, server) = serve_once("HTTP/1.1 503 Service Unavailable", "overloaded".to_string());
    let request = GeneratorConfig::new().build_request();
    let err = backend(&url).generate(&request).await.expect_err("503");
    server.join().expect("server thread");

    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn schemas_are_filtered_by_domain() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        json!({"schemas": [{"name": "payment", "description": "Payments", "fields": []}]})
            .to_string(),
    );
    let schemas = backend(&url)
        .list_schemas(Some("financial"))
        .await
        .expect("schemas");
    assert_eq!(schemas[0].name, "payment");

    let raw = server.join().expect("server thread");
    assert!(raw.starts_with("GET /schemas?domain=financial "));
}

#[tokio::test]
async fn unreachable_backend_is_unhealthy() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let backend = backend(&format!("http://127.0.0.1:{port}"));

    let report = backend.health_check().await;
    assert_eq!(report.status, HealthStatus::Unhealthy);
    assert_eq!(report.service_status, "unreachable");
    assert!(report.components.is_empty());

    let err = backend
        .generate(&GeneratorConfig::new().build_request())
        .await
        .expect_err("unreachable");
    assert!(matches!(err, TransportError::Unreachable { .. }));
}

#[test]
fn trailing_slash_is_trimmed() {
    assert_eq!(backend("http://localhost:8091/").base_url(), "http://localhost:8091");
}
