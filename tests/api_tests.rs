//! End-to-end tests against an in-process MyTasks backend

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use mytasks_client::{
    models::NewGroup, AuthCallback, ClientError, Credentials, ErrorCallback, GatewayConfig,
    RequestGateway,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const USER_ID: &str = "1";
const PASSWORD: &str = "PASSWORD1";

#[derive(Default)]
struct Backend {
    groups: Mutex<HashMap<String, Value>>,
    next_id: AtomicUsize,
}

type Shared = Arc<Backend>;

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Basic {}", STANDARD.encode(format!("{}:{}", USER_ID, PASSWORD)));
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false)
}

/// The backend reports application errors inside a 200 response
fn embedded_error(status: u16, message: &str) -> Response {
    Json(json!({"error_message": message, "status": status})).into_response()
}

fn users() -> Value {
    json!([{"_id": USER_ID, "name": "USER1"}])
}

async fn login(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(users()).into_response()
}

async fn list_users(headers: HeaderMap) -> Response {
    login(headers).await
}

async fn new_group(State(backend): State<Shared>, headers: HeaderMap, Json(info): Json<Value>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(name) = info.get("name").and_then(|n| n.as_str()) else {
        return embedded_error(400, "400 Bad Request: A group needs a name");
    };
    let id = format!("g{}", backend.next_id.fetch_add(1, Ordering::SeqCst));
    let group = json!({
        "_id": id,
        "name": name,
        "private": info.get("private").cloned().unwrap_or(Value::Bool(true)),
        "_parentid": USER_ID,
        "checklists": [],
    });
    backend.groups.lock().unwrap().insert(id, group.clone());
    Json(group).into_response()
}

async fn single_group(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match backend.groups.lock().unwrap().get(&id) {
        Some(group) => Json(group.clone()).into_response(),
        None => embedded_error(404, "404 Not Found: Group not found"),
    }
}

async fn delete_group(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match backend.groups.lock().unwrap().remove(&id) {
        Some(_) => Json(json!({"status": 200, "message": format!("Group {} deleted", id)})).into_response(),
        None => embedded_error(404, "404 Not Found: Group not found"),
    }
}

async fn crash() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
}

// Helper to spawn a backend on a random port
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/", get(list_users))
        .route("/login", get(login))
        .route("/crash", get(crash))
        .route("/groups/", post(new_group))
        .route("/groups/{id}", get(single_group).delete(delete_group))
        .with_state(Shared::default());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_login_then_group_lifecycle() {
    let base_url = spawn_backend().await;
    let gateway = RequestGateway::new(GatewayConfig::new(&base_url)).unwrap();

    // 1. Wrong credentials are rejected and nothing is stored
    let err = gateway
        .login(&Credentials::basic(USER_ID, "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
    assert!(!gateway.is_authenticated());

    // 2. Valid credentials are validated, then committed
    let credentials = Credentials::basic(USER_ID, PASSWORD);
    let users = gateway.verify_credentials(&credentials).await.unwrap();
    assert_eq!(users[0].name, "USER1");
    gateway.configure(Some(credentials), None);

    // 3. Create a group
    let group = gateway
        .create_group(&NewGroup::new("GROUP1"))
        .await
        .unwrap()
        .expect("group");
    assert!(group.private);
    assert_eq!(group.parent_id.as_deref(), Some(USER_ID));

    // 4. Read it back through a relative path and an absolute URL
    let fetched = gateway.group(&group.id).await.unwrap().expect("group");
    assert_eq!(fetched, group);
    let absolute = format!("{}/groups/{}", base_url, group.id);
    let response = gateway.get(&absolute).await.unwrap().expect("response");
    assert_eq!(response.url, absolute);

    // 5. Delete it
    let receipt = gateway.delete_group(&group.id).await.unwrap().expect("receipt");
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.message, format!("Group {} deleted", group.id));

    // 6. Gone: the embedded 404 surfaces as an error
    let err = gateway.group(&group.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_callbacks_against_backend() {
    let base_url = spawn_backend().await;
    let gateway = RequestGateway::new(GatewayConfig::new(&base_url).with_basic_auth(USER_ID, "stale")).unwrap();

    let auth_calls = Arc::new(AtomicUsize::new(0));
    let counter = auth_calls.clone();
    let on_auth: AuthCallback = Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = messages.clone();
    let on_error: ErrorCallback = Arc::new(move |msg: &str| {
        sink.lock().unwrap().push(msg.to_string());
    });

    // configure replaces credentials, so keep the stale ones
    gateway.configure(Some(Credentials::basic(USER_ID, "stale")), Some(on_auth));
    gateway.on_error(Some(on_error));

    assert!(gateway.users().await.unwrap().is_none());
    assert_eq!(auth_calls.load(Ordering::SeqCst), 1);

    assert!(gateway.get("/crash").await.unwrap().is_none());
    assert_eq!(*messages.lock().unwrap(), vec!["database unavailable".to_string()]);

    gateway.configure(Some(Credentials::basic(USER_ID, PASSWORD)), None);
    assert!(gateway.group("missing").await.unwrap().is_none());
    assert_eq!(messages.lock().unwrap().len(), 2);
    assert_eq!(messages.lock().unwrap()[1], "404 Not Found: Group not found");
    assert_eq!(auth_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_backend_validation_error_propagates() {
    let base_url = spawn_backend().await;
    let gateway = RequestGateway::new(GatewayConfig::new(&base_url).with_basic_auth(USER_ID, PASSWORD)).unwrap();

    let err = gateway.post("/groups/", &json!({"private": false})).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "400 Bad Request: A group needs a name");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}
