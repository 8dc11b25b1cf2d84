use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use shield_core::session::{SessionAction, SessionGateway, SessionStatus, Severity};
use shield_infrastructure::HttpSessionGateway;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Clone)]
struct MockState {
    sessions: Arc<Mutex<Value>>,
    actions: Arc<Mutex<Vec<(String, String)>>>,
    action_status: StatusCode,
}

impl MockState {
    fn new(sessions: Value, action_status: StatusCode) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
            actions: Arc::new(Mutex::new(Vec::new())),
            action_status,
        }
    }
}

async fn list_sessions(State(state): State<MockState>) -> Json<Value> {
    Json(state.sessions.lock().expect("sessions lock").clone())
}

async fn session_action(
    State(state): State<MockState>,
    Path((session_id, action)): Path<(String, String)>,
) -> StatusCode {
    state
        .actions
        .lock()
        .expect("actions lock")
        .push((session_id, action));
    state.action_status
}

async fn spawn_mock_server(router: Router) -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server listener");
    let address: SocketAddr = listener.local_addr().expect("mock listener local addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let server = axum::serve(listener, router).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        server.await.expect("run mock server");
    });
    (format!("http://{address}"), shutdown_tx)
}

async fn spawn_session_store(state: MockState) -> (String, oneshot::Sender<()>) {
    let router = Router::new()
        .route("/sessions", get(list_sessions))
        .route("/session/{session_id}/{action}", post(session_action))
        .with_state(state);
    spawn_mock_server(router).await
}

#[tokio::test]
async fn fetch_sessions_preserves_backend_order_and_tolerates_odd_fields() {
    let state = MockState::new(
        json!([
            {"session_id": "a", "status": "pending", "severity": "Critical", "camera_id": "cam1"},
            {"session_id": "b", "status": "approved", "confidence": 0.91},
            {"session_id": "c", "status": "pending", "latitude": null, "unknown": [1, 2]}
        ]),
        StatusCode::OK,
    );
    let (base_url, shutdown) = spawn_session_store(state).await;
    let gateway = HttpSessionGateway::new(&base_url).expect("gateway");

    let sessions = gateway.fetch_sessions().await.expect("fetch sessions");

    let ids: Vec<&str> = sessions.iter().map(|s| s.session_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(sessions[0].severity, Severity::Critical);
    assert_eq!(sessions[1].status, SessionStatus::Approved);
    assert_eq!(sessions[1].confidence, "0.91");
    assert_eq!(sessions[2].latitude, "");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn fetch_sessions_non_success_is_transport_failure() {
    let router = Router::new().route(
        "/sessions",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let (base_url, shutdown) = spawn_mock_server(router).await;
    let gateway = HttpSessionGateway::new(&base_url).expect("gateway");

    let err = gateway.fetch_sessions().await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn fetch_sessions_malformed_body_is_transport_failure() {
    let router = Router::new().route("/sessions", get(|| async { "not json at all" }));
    let (base_url, shutdown) = spawn_mock_server(router).await;
    let gateway = HttpSessionGateway::new(&base_url).expect("gateway");

    let err = gateway.fetch_sessions().await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");

    let _ = shutdown.send(());
}

#[tokio::test]
async fn fetch_sessions_unreachable_backend_is_transport_failure() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    drop(listener);

    let gateway = HttpSessionGateway::new(&format!("http://{address}")).expect("gateway");
    let err = gateway.fetch_sessions().await.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");
}

#[tokio::test]
async fn submit_action_posts_to_session_endpoint() {
    let state = MockState::new(json!([]), StatusCode::OK);
    let actions = state.actions.clone();
    let (base_url, shutdown) = spawn_session_store(state).await;
    let gateway = HttpSessionGateway::new(&base_url).expect("gateway");

    gateway
        .submit_action("abc-123", SessionAction::Approve)
        .await
        .expect("approve");
    gateway
        .submit_action("abc-123", SessionAction::Reject)
        .await
        .expect("reject");

    let recorded = actions.lock().expect("actions lock").clone();
    assert_eq!(
        recorded,
        vec![
            ("abc-123".to_string(), "approve".to_string()),
            ("abc-123".to_string(), "reject".to_string()),
        ]
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn submit_action_non_success_is_action_rejected() {
    let state = MockState::new(json!([]), StatusCode::CONFLICT);
    let (base_url, shutdown) = spawn_session_store(state).await;
    let gateway = HttpSessionGateway::new(&base_url).expect("gateway");

    let err = gateway
        .submit_action("abc-123", SessionAction::Approve)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        shield_core::ShieldError::action_rejected("abc-123", "approve", 409)
    );

    let _ = shutdown.send(());
}
