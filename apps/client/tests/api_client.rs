//! REST client tests against an in-process mock backend.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use tailor_client::{ApiClient, ApiError, StartGenerationRequest};

const APP_ID: &str = "7b4df2f7-55a1-4f66-8f0e-6c5b0f6ee111";

#[derive(Default)]
struct ServerLog {
    auth_headers: Vec<Option<String>>,
    bodies: Vec<Value>,
}

type SharedLog = Arc<Mutex<ServerLog>>;

fn snapshot_body() -> Value {
    json!({
        "id": APP_ID,
        "job_title": "Platform Engineer",
        "company_name": "Initech",
        "job_description": "Keep the mainframe alive.",
        "resume_generation_status": "started",
        "events": [],
        "created_at": "2026-03-01T12:00:00Z",
        "updated_at": "2026-03-01T12:00:00Z"
    })
}

async fn start_handler(
    State(log): State<SharedLog>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut log = log.lock().unwrap();
    log.auth_headers.push(
        headers
            .get("authorization")
            .map(|v| v.to_str().unwrap().to_string()),
    );
    log.bodies.push(body);
    Json(snapshot_body())
}

async fn list_handler(
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    // Echo pagination back so the client-side envelope decode is observable.
    let offset: u64 = params["offset"].parse().unwrap();
    Json(json!({
        "items": [{
            "id": APP_ID,
            "job_title": "Platform Engineer",
            "company_name": "Initech",
            "resume_generation_status": "completed",
            "created_at": "2026-03-01T12:00:00Z",
            "updated_at": "2026-03-01T12:00:00Z"
        }],
        "total": offset + 1,
        "has_next": false
    }))
}

async fn missing_handler(Path(_id): Path<Uuid>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": {"code": "NOT_FOUND", "message": "Job application not found"}})),
    )
}

async fn delete_handler(Path(_id): Path<Uuid>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn login_handler(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "hunter2" {
        Json(json!({
            "token": "session-token-123",
            "user": {
                "id": "11111111-2222-3333-4444-555555555555",
                "email": body["email"],
                "onboarding_completed": true,
                "created_at": "2026-02-01T09:00:00Z"
            }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": "UNAUTHORIZED", "message": "Invalid credentials"}})),
        )
            .into_response()
    }
}

async fn upload_handler(mut multipart: Multipart) -> Json<Value> {
    let field = multipart.next_field().await.unwrap().unwrap();
    let filename = field.file_name().unwrap().to_string();
    let bytes = field.bytes().await.unwrap();
    assert!(!bytes.is_empty());
    Json(json!({
        "contact": {"full_name": "Ada Lovelace", "email": "ada@example.com"},
        "summary": format!("parsed from {filename}"),
        "skill_groups": [],
        "experience": [],
        "education": []
    }))
}

async fn update_resume_handler(Path(_id): Path<Uuid>, Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

async fn search_handler(
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    assert_eq!(params["q"], "initech");
    Json(json!({"items": [], "total": 0, "has_next": false}))
}

async fn google_handler(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["code"], "oauth-code-xyz");
    Json(json!({
        "token": "session-token-google",
        "user": {
            "id": "11111111-2222-3333-4444-555555555555",
            "email": "ada@example.com",
            "onboarding_completed": false,
            "created_at": "2026-02-01T09:00:00Z"
        }
    }))
}

async fn save_resume_handler(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

async fn spawn_server(log: SharedLog) -> SocketAddr {
    let app = Router::new()
        .route("/api/v1/applications", post(start_handler).get(list_handler))
        .route(
            "/api/v1/applications/:id",
            get(missing_handler).delete(delete_handler),
        )
        .route("/api/v1/applications/search", get(search_handler))
        .route("/api/v1/applications/:id/resume", put(update_resume_handler))
        .route("/api/v1/auth/login", post(login_handler))
        .route("/api/v1/auth/google", post(google_handler))
        .route("/api/v1/resumes", post(save_resume_handler))
        .route("/api/v1/resumes/upload", post(upload_handler))
        .with_state(log);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn start_generation_sends_bearer_and_decodes_snapshot() {
    let log: SharedLog = Arc::default();
    let addr = spawn_server(log.clone()).await;

    let client = ApiClient::new(format!("http://{addr}")).with_token("session-token-123");
    let snapshot = client
        .start_generation(&StartGenerationRequest {
            job_role: "Platform Engineer".into(),
            job_description: "Keep the mainframe alive.".into(),
            company: "Initech".into(),
        })
        .await
        .unwrap();

    assert_eq!(snapshot.company_name, "Initech");
    let log = log.lock().unwrap();
    assert_eq!(
        log.auth_headers[0].as_deref(),
        Some("Bearer session-token-123")
    );
    assert_eq!(log.bodies[0]["job_role"], "Platform Engineer");
}

#[tokio::test]
async fn list_applications_decodes_page_envelope() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}")).with_token("t");

    let page = client.list_applications(5, 20).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 6);
    assert!(!page.has_next);
}

#[tokio::test]
async fn not_found_surfaces_error_envelope() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}")).with_token("t");

    let error = client
        .get_application(APP_ID.parse().unwrap())
        .await
        .unwrap_err();
    match error {
        ApiError::Api {
            status,
            status_text,
            message,
            body,
        } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
            assert_eq!(message, "Job application not found");
            assert_eq!(body.unwrap()["error"]["code"], "NOT_FOUND");
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_application_accepts_no_content() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}")).with_token("t");
    client
        .delete_application(APP_ID.parse().unwrap())
        .await
        .unwrap();
}

#[tokio::test]
async fn login_issues_token_for_subsequent_calls() {
    let log: SharedLog = Arc::default();
    let addr = spawn_server(log.clone()).await;

    let client = ApiClient::new(format!("http://{addr}"));
    let session = client.login("ada@example.com", "hunter2").await.unwrap();
    assert_eq!(session.token, "session-token-123");
    assert_eq!(session.user.email, "ada@example.com");

    let authed = client.with_token(session.token);
    authed
        .start_generation(&StartGenerationRequest {
            job_role: "r".into(),
            job_description: "d".into(),
            company: "c".into(),
        })
        .await
        .unwrap();
    let log = log.lock().unwrap();
    assert_eq!(
        log.auth_headers[0].as_deref(),
        Some("Bearer session-token-123")
    );
}

#[tokio::test]
async fn login_failure_maps_to_unauthorized() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}"));
    let error = client.login("ada@example.com", "wrong").await.unwrap_err();
    assert!(matches!(error, ApiError::Api { status: 401, .. }));
}

#[tokio::test]
async fn search_applications_passes_query() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}")).with_token("t");
    let page = client.search_applications("initech", 0, 10).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn update_resume_replaces_full_document() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}")).with_token("t");

    let resume: tailor_client::models::GeneratedResume = serde_json::from_value(json!({
        "contact": {"full_name": "Ada Lovelace", "email": "ada@example.com"},
        "summary": "Engineer.",
        "skill_groups": [{"label": "Languages", "skills": ["Rust"]}],
        "experience": [],
        "education": []
    }))
    .unwrap();

    let saved = client
        .update_resume(APP_ID.parse().unwrap(), &resume)
        .await
        .unwrap();
    assert_eq!(saved.summary, "Engineer.");
    assert_eq!(saved.skill_groups[0].skills, vec!["Rust"]);
}

#[tokio::test]
async fn save_resume_round_trips() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}")).with_token("t");

    let resume: tailor_client::models::UserResume = serde_json::from_value(json!({
        "contact": {"full_name": "Ada Lovelace", "email": "ada@example.com"},
        "skill_groups": [],
        "experience": [],
        "education": []
    }))
    .unwrap();

    let saved = client.save_resume(&resume).await.unwrap();
    assert_eq!(saved.contact.full_name, "Ada Lovelace");
}

#[tokio::test]
async fn google_exchange_issues_session() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}"));
    let session = client.exchange_google_code("oauth-code-xyz").await.unwrap();
    assert_eq!(session.token, "session-token-google");
    assert!(!session.user.onboarding_completed);
}

#[tokio::test]
async fn upload_resume_round_trips_multipart() {
    let addr = spawn_server(Arc::default()).await;
    let client = ApiClient::new(format!("http://{addr}")).with_token("t");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"%PDF-1.7 fake resume bytes").unwrap();
    let bytes = std::fs::read(file.path()).unwrap();

    let resume = client.upload_resume("resume.pdf", bytes).await.unwrap();
    assert_eq!(resume.contact.full_name, "Ada Lovelace");
    assert_eq!(resume.summary.as_deref(), Some("parsed from resume.pdf"));
}
