// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use beneficios::client::{BeneficioApi, HttpApi};
use beneficios::error::ClientError;
use beneficios::models::{AccountRequest, TransferRequest};
use reqwest::StatusCode;
use rust_decimal::Decimal;

/// Serves one canned response and hands back the raw request it saw.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api/v1", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            assert!(n > 0, "client closed before headers");
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .map(|v| v.trim().parse::<usize>().unwrap())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "client closed before body");
            buf.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        String::from_utf8_lossy(&buf).to_string()
    });
    (base, handle)
}

#[test]
fn list_decodes_backend_payload() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"id":1,"nome":"Alimentação","descricao":"VA","valor":100.50,"ativo":true},
            {"id":2,"nome":"Cultura","descricao":null,"valor":0,"ativo":false}]"#,
    );
    let api = HttpApi::new(&base).unwrap();
    let accounts = api.list().unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("GET /api/v1/beneficios HTTP/1.1"));
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].balance, Decimal::new(10050, 2));
    assert!(!accounts[1].active);
}

#[test]
fn transfer_posts_camel_case_body() {
    let (base, server) = serve_once("204 No Content", "");
    let api = HttpApi::new(&base).unwrap();
    api.transfer(&TransferRequest {
        from_id: 1,
        to_id: 2,
        amount: Decimal::from(30),
    })
    .unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("POST /api/v1/beneficios/transfer HTTP/1.1"));
    let body = request.split("\r\n\r\n").nth(1).unwrap();
    let v: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(v["fromId"], 1);
    assert_eq!(v["toId"], 2);
    assert_eq!(v["amount"].as_f64(), Some(30.0));
}

#[test]
fn rejected_transfer_surfaces_envelope_message() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"timestamp":"2025-05-01T12:00:00","status":400,"error":"Bad Request","message":"Invalid transfer"}"#,
    );
    let api = HttpApi::new(&base).unwrap();
    let err = api
        .transfer(&TransferRequest {
            from_id: 1,
            to_id: 2,
            amount: Decimal::from(30),
        })
        .unwrap_err();
    server.join().unwrap();

    assert_eq!(err.to_string(), "Invalid transfer");
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[test]
fn validation_envelope_keeps_field_errors() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"status":400,"error":"Bad Request","message":"Validation failed","errors":{"nome":"must not be blank"}}"#,
    );
    let api = HttpApi::new(&base).unwrap();
    let err = api
        .create(&AccountRequest {
            name: " ".into(),
            description: None,
            balance: Decimal::ZERO,
            active: None,
        })
        .unwrap_err();
    let request = server.join().unwrap();

    assert!(request.starts_with("POST /api/v1/beneficios HTTP/1.1"));
    let envelope = err.envelope().unwrap();
    assert_eq!(
        envelope.field_errors().collect::<Vec<_>>(),
        vec![("nome", "must not be blank")]
    );
}

#[test]
fn delete_hits_item_path() {
    let (base, server) = serve_once("204 No Content", "");
    let api = HttpApi::new(&format!("{}/", base)).unwrap();
    api.delete(7).unwrap();
    let request = server.join().unwrap();
    assert!(request.starts_with("DELETE /api/v1/beneficios/7 HTTP/1.1"));
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let api = HttpApi::new(&format!("http://127.0.0.1:{}/api/v1", port)).unwrap();
    let err = api.list().unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.to_string().starts_with("Network error"));
}

#[test]
fn truncated_error_body_falls_back_to_status_line() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api/v1", listener.local_addr().unwrap());
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "client closed before headers");
            buf.extend_from_slice(&chunk[..n]);
        }
        // Promise more bytes than are sent, then hang up.
        stream
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n{\"message\":\"Bo",
            )
            .unwrap();
    });
    let api = HttpApi::new(&base).unwrap();
    let err = api.list().unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, ClientError::Status { .. }));
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
}
