mod support;

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use drift_review::host::{
    run_form_action, DocClient, DocRef, Doctype, HostAction, HostActions, HostError, MediaSource,
    SessionMediaSource,
};
use drift_review::Playlist;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::support::{tracing_init, RecordingHostActions};

/// One request seen by the fake host
#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    auth: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn run_doc_method(
    State(log): State<Log>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    log.lock().unwrap().push(Recorded {
        path: "/api/method/run_doc_method".to_string(),
        auth: auth_header(&headers),
        body: body.clone(),
    });

    match body["method"].as_str().unwrap_or_default() {
        "get_recorded_video_urls" if body["dn"] == "BLANK" => {
            Json(json!({ "message": ["", "  "] })).into_response()
        }
        "get_recorded_video_urls" => Json(json!({
            "message": ["/files/drift/a.webm", "", "https://cdn.example.com/b.webm", "   ", 3]
        }))
        .into_response(),
        "delete_downloaded_videos" => {
            let messages = serde_json::to_string(&vec![
                json!({"message": "Deleted 2 videos"}).to_string(),
            ])
            .unwrap();
            Json(json!({ "message": null, "_server_messages": messages })).into_response()
        }
        "next" => (
            StatusCode::EXPECTATION_FAILED,
            Json(json!({"exc_type": "ValidationError"})),
        )
            .into_response(),
        _ => Json(json!({ "message": "ok" })).into_response(),
    }
}

async fn get_resource(
    State(log): State<Log>,
    headers: HeaderMap,
    Path((doctype, name)): Path<(String, String)>,
) -> Response {
    log.lock().unwrap().push(Recorded {
        path: format!("/api/resource/{}/{}", doctype, name),
        auth: auth_header(&headers),
        body: Value::Null,
    });

    if name == "missing" {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    }
    if name == "empty" {
        return Json(json!({})).into_response();
    }

    Json(json!({
        "data": {
            "doctype": doctype,
            "name": name,
            "status": "Stopped",
            "video_download_status": "Deleted"
        }
    }))
    .into_response()
}

/// Fake host site on an ephemeral port
struct FakeHost {
    base_url: String,
    log: Log,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl FakeHost {
    async fn start() -> Self {
        tracing_init();

        let log: Log = Arc::default();
        let router = Router::new()
            .route("/api/method/run_doc_method", post(run_doc_method))
            .route("/api/resource/:doctype/:name", get(get_resource))
            .with_state(log.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let server = axum::serve(listener, router).with_graceful_shutdown(async {
            shutdown_rx.await.ok();
        });
        tokio::spawn(async move {
            server.await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            log,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    fn client(&self) -> DocClient {
        DocClient::new(&self.base_url, Some("key"), Some("secret")).unwrap()
    }

    fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }
}

impl Drop for FakeHost {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}

fn session(name: &str) -> DocRef {
    DocRef::new(Doctype::DriftSession, name)
}

#[tokio::test]
async fn invoke_posts_document_method_with_token_auth() {
    let host = FakeHost::start().await;
    let reply = host
        .client()
        .invoke(&session("SESS-0001"), HostAction::DestroyRemoteSession)
        .await
        .unwrap();

    assert_eq!(reply.value, json!("ok"));
    assert!(reply.messages.is_empty());

    let requests = host.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].auth.as_deref(), Some("token key:secret"));
    assert_eq!(
        requests[0].body,
        json!({
            "dt": "Drift Session",
            "dn": "SESS-0001",
            "method": "destroy_remote_session"
        })
    );
}

#[tokio::test]
async fn anonymous_client_sends_no_auth_header() {
    let host = FakeHost::start().await;
    let client = DocClient::new(&host.base_url, Some("key"), None).unwrap();
    client
        .invoke(&session("SESS-0001"), HostAction::CreateTest)
        .await
        .unwrap();
    assert_eq!(host.requests()[0].auth, None);
}

#[tokio::test]
async fn server_messages_are_decoded() {
    let host = FakeHost::start().await;
    let reply = host
        .client()
        .invoke(&session("SESS-0001"), HostAction::DeleteDownloadedVideos)
        .await
        .unwrap();
    assert_eq!(reply.messages, vec!["Deleted 2 videos"]);
}

#[tokio::test]
async fn error_status_is_reported() {
    let host = FakeHost::start().await;
    let err = host
        .client()
        .invoke(
            &DocRef::new(Doctype::DriftTest, "TEST-0001"),
            HostAction::Execute,
        )
        .await
        .unwrap_err();

    match err {
        HostError::Status { status, body } => {
            assert_eq!(status, 417);
            assert!(body.contains("ValidationError"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn reload_reads_document_fields() {
    let host = FakeHost::start().await;
    let doc = session("SESS 0002");
    let document = host.client().reload(&doc).await.unwrap();

    assert_eq!(document.doc, doc);
    assert_eq!(document.status(), Some("Stopped"));
    assert_eq!(document.field_str("video_download_status"), Some("Deleted"));
    assert_eq!(
        host.requests()[0].path,
        "/api/resource/Drift Session/SESS 0002"
    );
}

#[tokio::test]
async fn reload_failures_are_errors() {
    let host = FakeHost::start().await;
    let client = host.client();

    let missing = client.reload(&session("missing")).await.unwrap_err();
    assert!(matches!(missing, HostError::Status { status: 404, .. }));

    let empty = client.reload(&session("empty")).await.unwrap_err();
    assert!(matches!(empty, HostError::MissingField("data")));
}

#[tokio::test]
async fn session_media_source_resolves_relative_paths() {
    let host = FakeHost::start().await;
    let source = SessionMediaSource::new(host.client(), session("SESS-0001"));

    let payload = source.list_media_urls().await.unwrap();

    assert_eq!(
        payload,
        json!([
            format!("{}/files/drift/a.webm", host.base_url),
            "",
            "https://cdn.example.com/b.webm",
            "   ",
            3
        ])
    );
    assert_eq!(host.requests()[0].body["method"], "get_recorded_video_urls");
}

#[tokio::test]
async fn blank_recorded_paths_are_dropped_from_the_playlist() {
    let host = FakeHost::start().await;
    let source = SessionMediaSource::new(host.client(), session("BLANK"));

    let payload = source.list_media_urls().await.unwrap();
    assert_eq!(payload, json!(["", "  "]));
    assert_eq!(Playlist::from_payload(&payload), None);
}

#[tokio::test]
async fn form_action_reloads_after_success() {
    let host = FakeHost::start().await;
    let doc = session("SESS-0001");

    let outcome = run_form_action(&host.client(), &doc, HostAction::DeleteDownloadedVideos)
        .await
        .unwrap();

    assert_eq!(outcome.reply.messages, vec!["Deleted 2 videos"]);
    assert_eq!(outcome.document.field_str("video_download_status"), Some("Deleted"));

    let paths: Vec<String> = host.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/api/method/run_doc_method".to_string(),
            "/api/resource/Drift Session/SESS-0001".to_string()
        ]
    );
}

#[tokio::test]
async fn form_action_does_not_reload_after_failure() {
    let host = FakeHost::start().await;
    let doc = DocRef::new(Doctype::DriftTest, "TEST-0001");

    let result = run_form_action(&host.client(), &doc, HostAction::Execute).await;

    assert!(result.is_err());
    assert_eq!(host.requests().len(), 1);
}

#[tokio::test]
async fn form_action_glue_with_fake_actions() {
    let doc = DocRef::new(Doctype::DriftTestDefinition, "DEF-0001");

    let actions = RecordingHostActions::with_fields(json!({"status": "Active"}));
    let outcome = run_form_action(&actions, &doc, HostAction::CreateTest)
        .await
        .unwrap();
    assert_eq!(outcome.reply.messages, vec!["create_test done"]);
    assert_eq!(outcome.document.status(), Some("Active"));
    assert_eq!(*actions.reloads.lock().unwrap(), vec![doc.clone()]);

    let failing = RecordingHostActions::failing();
    assert!(run_form_action(&failing, &doc, HostAction::CreateTest)
        .await
        .is_err());
    assert_eq!(failing.invoked.lock().unwrap().len(), 1);
    assert!(failing.reloads.lock().unwrap().is_empty());
}
