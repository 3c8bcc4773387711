use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::error::FailureKind;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn handle_analyze(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.received.lock().await.push(payload);
    (
        state.status,
        [("content-type", "application/json")],
        state.body.clone(),
    )
}

async fn handle_root() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "running",
        "service": "NyayaSahayak Backend",
        "message": "Use /docs or POST /analyze"
    }))
}

async fn spawn_analysis_server(
    status: StatusCode,
    body: &str,
) -> std::io::Result<(String, Arc<Mutex<Vec<serde_json::Value>>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        status,
        body: body.to_string(),
        received: received.clone(),
    };
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/analyze", post(handle_analyze))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), received))
}

fn client_for(base_url: &str) -> AnalysisClient {
    let settings = ClientSettings {
        api_base_url: base_url.to_string(),
        request_timeout_secs: 5,
    };
    AnalysisClient::new(&settings).expect("client")
}

const THEFT_BODY: &str = r#"{"normalized_keywords": ["theft"], "sections": [{"section_id":"BNS-303","section_number":"303","title":"Theft","full_text":"...", "severity_level":3}]}"#;

#[tokio::test]
async fn analyze_posts_text_and_parses_sections() {
    let (base_url, received) = spawn_analysis_server(StatusCode::OK, THEFT_BODY)
        .await
        .expect("spawn server");
    let client = client_for(&base_url);

    let result = client
        .analyze(&AnalyzeRequest {
            text: "A man stole a phone.".into(),
        })
        .await
        .expect("analyze");

    assert_eq!(result.normalized_keywords, vec!["theft"]);
    assert_eq!(result.sections[0].section_id, "BNS-303");
    let received = received.lock().await;
    assert_eq!(
        received.as_slice(),
        &[serde_json::json!({ "text": "A man stole a phone." })]
    );
}

#[tokio::test]
async fn non_success_status_is_a_transport_failure() {
    let (base_url, _) =
        spawn_analysis_server(StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail":"boom"}"#)
            .await
            .expect("spawn server");

    let err = client_for(&base_url)
        .analyze(&AnalyzeRequest { text: "x".into() })
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Status { status: 500 }));
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn success_without_required_fields_is_malformed() {
    let (base_url, _) = spawn_analysis_server(StatusCode::OK, r#"{"sections": []}"#)
        .await
        .expect("spawn server");

    let err = client_for(&base_url)
        .analyze(&AnalyzeRequest { text: "x".into() })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::MalformedResponse);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client_for(&format!("http://{addr}"))
        .analyze(&AnalyzeRequest { text: "x".into() })
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Http(_)));
    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn status_probe_reads_root_document() {
    let (base_url, _) = spawn_analysis_server(StatusCode::OK, THEFT_BODY)
        .await
        .expect("spawn server");

    let status = client_for(&format!("{base_url}/"))
        .status()
        .await
        .expect("status");

    assert!(status.is_running());
    assert_eq!(status.service.as_deref(), Some("NyayaSahayak Backend"));
}

#[tokio::test]
async fn session_over_http_reaches_succeeded() {
    let (base_url, received) = spawn_analysis_server(StatusCode::OK, THEFT_BODY)
        .await
        .expect("spawn server");
    let mut session = AnalysisSession::new(Arc::new(client_for(&base_url)));

    session.set_input("A man stole a phone.");
    let resolution = session.submit().await;

    assert_eq!(resolution, Some(Resolution::Applied(RequestPhase::Succeeded)));
    let result = session.orchestrator().result().expect("result");
    let cards = view::section_cards(result);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].badges[0].to_string(), "Severity: 3/5");
    assert_eq!(received.lock().await.len(), 1);
}

#[tokio::test]
async fn session_over_http_reports_server_error() {
    let (base_url, _) = spawn_analysis_server(StatusCode::INTERNAL_SERVER_ERROR, "")
        .await
        .expect("spawn server");
    let mut session = AnalysisSession::new(Arc::new(client_for(&base_url)));

    session.set_input("A man stole a phone.");
    session.submit().await;

    assert_eq!(session.orchestrator().phase(), RequestPhase::Failed);
    assert!(session.orchestrator().result().is_none());
    assert!(!session
        .orchestrator()
        .error_message()
        .unwrap_or_default()
        .is_empty());
}
