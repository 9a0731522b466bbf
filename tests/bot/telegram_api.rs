use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use linkcap::channels::TelegramChannel;
use linkcap::channels::traits::{Channel, IncomingMessage};
use linkcap::error::TransportError;

const TOKEN: &str = "123:TEST";

fn channel_for(server: &MockServer, allowed: &[&str]) -> TelegramChannel {
    TelegramChannel::new(
        TOKEN.into(),
        allowed.iter().map(|u| (*u).to_string()).collect(),
    )
    .with_api_base(&server.uri())
    .with_poll_timeout(0)
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result }))
}

#[tokio::test]
async fn send_posts_plain_text_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_partial_json(json!({
            "chat_id": "7",
            "text": "First 10 links:\n\nhttp://a",
            "disable_web_page_preview": true
        })))
        .respond_with(ok(json!({ "message_id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    channel_for(&server, &["*"])
        .send("First 10 links:\n\nhttp://a", "7")
        .await
        .unwrap();
}

#[tokio::test]
async fn send_chunked_splits_at_platform_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ok(json!({ "message_id": 1 })))
        .expect(2)
        .mount(&server)
        .await;

    let line = "http://example.com/".repeat(10);
    let text = vec![line; 30].join("\n");
    assert!(text.chars().count() > 4096);

    channel_for(&server, &["*"])
        .send_chunked(&text, "7")
        .await
        .unwrap();
}

#[tokio::test]
async fn api_error_surfaces_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = channel_for(&server, &["*"])
        .send("hi", "7")
        .await
        .unwrap_err();

    match err.downcast_ref::<TransportError>() {
        Some(TransportError::Api {
            method,
            description,
        }) => {
            assert_eq!(method, "sendMessage");
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn send_document_uploads_multipart_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendDocument")))
        .and(body_string_contains("processed_links.xlsx"))
        .and(body_string_contains("Processed links file"))
        .and(body_string_contains("xlsx-bytes"))
        .respond_with(ok(json!({ "message_id": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    channel_for(&server, &["*"])
        .send_document(
            b"xlsx-bytes".to_vec(),
            "processed_links.xlsx",
            Some("Processed links file"),
            "7",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn download_resolves_path_then_fetches_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getFile")))
        .and(body_partial_json(json!({ "file_id": "abc" })))
        .respond_with(ok(json!({ "file_id": "abc", "file_path": "documents/file_1.xlsx" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/file/bot{TOKEN}/documents/file_1.xlsx")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = channel_for(&server, &["*"])
        .download_file("abc")
        .await
        .unwrap();

    assert_eq!(bytes, b"PK\x03\x04");
}

#[tokio::test]
async fn download_without_file_path_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getFile")))
        .respond_with(ok(json!({ "file_id": "abc" })))
        .mount(&server)
        .await;

    let err = channel_for(&server, &["*"])
        .download_file("abc")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TransportError>(),
        Some(TransportError::MissingField { .. })
    ));
}

#[tokio::test]
async fn health_check_calls_get_me() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getMe")))
        .respond_with(ok(json!({ "id": 1, "is_bot": true, "username": "linkcap_bot" })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(channel_for(&server, &["*"]).health_check().await);
}

#[tokio::test]
async fn listen_forwards_allowed_messages_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(ok(json!([
            {
                "update_id": 10,
                "message": {
                    "message_id": 1,
                    "date": 1_700_000_000,
                    "from": { "id": 555, "username": "mallory" },
                    "chat": { "id": 555 },
                    "text": "http://evil"
                }
            },
            {
                "update_id": 11,
                "message": {
                    "message_id": 2,
                    "date": 1_700_000_001,
                    "from": { "id": 42, "username": "alice" },
                    "chat": { "id": 900 },
                    "document": {
                        "file_id": "doc-1",
                        "file_name": "links.xlsx",
                        "mime_type": "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                        "file_size": 2048
                    }
                }
            }
        ])))
        .mount(&server)
        .await;

    let channel = channel_for(&server, &["alice"]);
    let (tx, mut rx) = tokio::sync::mpsc::channel::<IncomingMessage>(1);
    let listener = tokio::spawn(async move { channel.listen(tx).await });

    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no message forwarded")
        .expect("listener closed");

    assert_eq!(msg.chat_id, "900");
    assert_eq!(msg.sender, "42");
    assert_eq!(msg.timestamp, 1_700_000_001);
    assert!(msg.text.is_none());
    let document = msg.document.expect("document missing");
    assert_eq!(document.file_id, "doc-1");
    assert_eq!(document.file_name.as_deref(), Some("links.xlsx"));
    assert_eq!(document.file_size, Some(2048));

    drop(rx);
    let result = tokio::time::timeout(Duration::from_secs(5), listener)
        .await
        .expect("listener did not stop")
        .unwrap();
    assert!(result.is_ok());
}
