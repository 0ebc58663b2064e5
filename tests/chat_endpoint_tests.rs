//! End-to-end tests for the chat pipeline against a mocked portal endpoint.

use hubbub::chat::{ChatCommand, ChatEvent, ChatPipeline, HttpChatTransport};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The mock server needs a live reactor; keep the runtime around for the
/// duration of each test.
fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

fn start_pipeline(
    base_url: &str,
) -> (
    crossbeam_channel::Sender<ChatCommand>,
    crossbeam_channel::Receiver<ChatEvent>,
) {
    let transport = Arc::new(HttpChatTransport::new(base_url, Duration::from_secs(5)));
    let pipeline = ChatPipeline::new(transport);
    let tx = pipeline.command_sender();
    let rx = pipeline.event_receiver();
    pipeline.start_worker().unwrap();
    (tx, rx)
}

#[test]
fn test_reply_round_trip() {
    let rt = runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatbot"))
            .and(body_json(serde_json::json!({"message": "Hello"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"reply": "Hi there"})),
            )
            .mount(&server)
            .await;
        server
    });

    let (tx, rx) = start_pipeline(&server.uri());

    tx.send(ChatCommand::Send {
        text: "Hello".to_string(),
        request_id: Uuid::new_v4(),
    })
    .unwrap();

    match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
        ChatEvent::Reply { text, .. } => assert_eq!(text, "Hi there"),
        other => panic!("Expected reply, got {:?}", other),
    }
}

#[test]
fn test_server_error_reports_failure() {
    let rt = runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatbot"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        server
    });

    let (tx, rx) = start_pipeline(&server.uri());

    tx.send(ChatCommand::Send {
        text: "Hello".to_string(),
        request_id: Uuid::new_v4(),
    })
    .unwrap();

    match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
        ChatEvent::Failed { .. } => {}
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[test]
fn test_malformed_reply_reports_failure() {
    let rt = runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatbot"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        server
    });

    let (tx, rx) = start_pipeline(&server.uri());

    tx.send(ChatCommand::Send {
        text: "Hello".to_string(),
        request_id: Uuid::new_v4(),
    })
    .unwrap();

    match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
        ChatEvent::Failed { .. } => {}
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[test]
fn test_unreachable_server_reports_failure() {
    // Nothing listens here
    let (tx, rx) = start_pipeline("http://127.0.0.1:1");

    tx.send(ChatCommand::Send {
        text: "Hello".to_string(),
        request_id: Uuid::new_v4(),
    })
    .unwrap();

    match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
        ChatEvent::Failed { .. } => {}
        other => panic!("Expected failure, got {:?}", other),
    }
}

/// Rapid sends are independent requests; both answers arrive, in whatever
/// order they complete.
#[test]
fn test_rapid_sends_are_not_deduplicated() {
    let rt = runtime();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatbot"))
            .and(body_json(serde_json::json!({"message": "first"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reply": "reply one"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chatbot"))
            .and(body_json(serde_json::json!({"message": "second"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"reply": "reply two"})),
            )
            .mount(&server)
            .await;
        server
    });

    let (tx, rx) = start_pipeline(&server.uri());

    for text in ["first", "second"] {
        tx.send(ChatCommand::Send {
            text: text.to_string(),
            request_id: Uuid::new_v4(),
        })
        .unwrap();
    }

    let mut replies = Vec::new();
    for _ in 0..2 {
        match rx.recv_timeout(Duration::from_secs(10)).unwrap() {
            ChatEvent::Reply { text, .. } => replies.push(text),
            other => panic!("Expected reply, got {:?}", other),
        }
    }

    replies.sort();
    assert_eq!(replies, vec!["reply one", "reply two"]);
}
