//! Router-level tests against the in-memory backend and a mocked generation API.

#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::FixedOffset;
use daily_report_http::{create_router, issue_token, AppState, AuthConfig};
use daily_report_llm::{LlmClient, RetryPolicy, NO_REPORTS_ACTIVITY, NO_REPORTS_RESULT};
use daily_report_service::{ReportService, SummaryService};
use daily_report_storage::StorageBackend;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "router-test-secret-long-enough-for-hmac";

fn build_app(llm_uri: &str) -> Router {
    let storage = Arc::new(StorageBackend::new_memory());
    let report_service =
        Arc::new(ReportService::new(Arc::clone(&storage), FixedOffset::east_opt(0).unwrap()));
    let llm = LlmClient::new("test-key".to_owned(), llm_uri.to_owned())
        .unwrap()
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(5)));
    let summary_service =
        Arc::new(SummaryService::new(storage, Arc::new(llm), Arc::clone(&report_service)));
    create_router(Arc::new(AppState {
        report_service,
        summary_service,
        auth: AuthConfig::new(SECRET),
        cors_origin: None,
    }))
}

fn token(owner: &str) -> String {
    issue_token(owner, chrono::Duration::hours(1), &AuthConfig::new(SECRET)).unwrap()
}

struct TestResponse {
    status: StatusCode,
    text: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap()
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    owner: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header("Authorization", format!("Bearer {}", token(owner)));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse { status, text: String::from_utf8(bytes.to_vec()).unwrap() }
}

fn complete_report(created_at: &str) -> Value {
    json!({
        "name": "Ayu",
        "status": "Complete",
        "doneItems": [{"description": "Fix login bug", "startTime": "08:00", "endTime": "09:30"}],
        "createdAt": created_at,
    })
}

#[tokio::test]
async fn health_and_version_need_no_auth() {
    let app = build_app("http://127.0.0.1:1");
    let health = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.text, "ok");

    let version = send(&app, Method::GET, "/api/version", None, None).await;
    assert_eq!(version.status, StatusCode::OK);
    assert!(version.json()["version"].is_string());
}

#[tokio::test]
async fn api_routes_require_a_valid_token() {
    let app = build_app("http://127.0.0.1:1");
    let routes = [
        (Method::GET, "/api/reports"),
        (Method::POST, "/api/reports"),
        (Method::GET, "/api/reports/export?month=9&year=2025"),
        (Method::GET, "/api/reports/abc"),
        (Method::PUT, "/api/reports/abc"),
        (Method::DELETE, "/api/reports/abc"),
        (Method::GET, "/api/reports/abc/text"),
        (Method::GET, "/api/summaries"),
        (Method::POST, "/api/summaries"),
        (Method::GET, "/api/summaries/2025/9"),
        (Method::POST, "/api/summarize"),
    ];
    for (method, uri) in routes {
        let res = send(&app, method.clone(), uri, None, Some(json!({}))).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert!(res.json()["error"].is_string());
    }

    let forged = issue_token("u1", chrono::Duration::hours(1), &AuthConfig::new("wrong")).unwrap();
    let request = Request::builder()
        .uri("/api/reports")
        .header("Authorization", format!("Bearer {forged}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn report_crud_is_owner_scoped() {
    let app = build_app("http://127.0.0.1:1");
    let created =
        send(&app, Method::POST, "/api/reports", Some("u1"), Some(complete_report("2025-09-01T09:00:00Z")))
            .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let report = created.json();
    assert_eq!(report["ownerId"], "u1");
    let id = report["id"].as_str().unwrap().to_owned();
    let uri = format!("/api/reports/{id}");

    for method in [Method::GET, Method::DELETE] {
        let res = send(&app, method, &uri, Some("u2"), None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert!(!res.text.contains("Fix login bug"));
    }
    let res = send(&app, Method::PUT, &uri, Some("u2"), Some(json!({"name": "Mallory"}))).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let fetched = send(&app, Method::GET, &uri, Some("u1"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json()["name"], "Ayu");

    let updated = send(&app, Method::PUT, &uri, Some("u1"), Some(json!({"name": "Ayu L"}))).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["name"], "Ayu L");
    assert_eq!(updated.json()["doneItems"][0]["description"], "Fix login bug");

    let text = send(&app, Method::GET, &format!("{uri}/text"), Some("u1"), None).await;
    assert_eq!(text.status, StatusCode::OK);
    assert_eq!(text.text, "dailyreport\nAyu L\n\nComplete:\n[done] Fix login bug (08:00-09:30)");

    let deleted = send(&app, Method::DELETE, &uri, Some("u1"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json(), json!({"message": "report deleted", "id": id}));

    let gone = send(&app, Method::GET, &uri, Some("u1"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn month_filter_keeps_only_completed_reports_in_range() {
    let app = build_app("http://127.0.0.1:1");
    let inside = send(
        &app,
        Method::POST,
        "/api/reports",
        Some("u1"),
        Some(complete_report("2025-09-10T09:00:00Z")),
    )
    .await
    .json();
    send(&app, Method::POST, "/api/reports", Some("u1"), Some(complete_report("2025-10-01T00:00:00Z")))
        .await;
    let incomplete = json!({
        "name": "Ayu",
        "status": "Incomplete",
        "todoItems": [{"description": "Write docs"}],
        "createdAt": "2025-09-11T09:00:00Z",
    });
    let res = send(&app, Method::POST, "/api/reports", Some("u1"), Some(incomplete)).await;
    assert_eq!(res.status, StatusCode::CREATED);

    let listed = send(&app, Method::GET, "/api/reports?month=9&year=2025", Some("u1"), None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let listed = listed.json();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], inside["id"]);

    let only_month = send(&app, Method::GET, "/api/reports?month=9", Some("u1"), None).await;
    assert_eq!(only_month.json().as_array().unwrap().len(), 3);

    let bad = send(&app, Method::GET, "/api/reports?month=13&year=2025", Some("u1"), None).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_report_bodies_are_bad_requests() {
    let app = build_app("http://127.0.0.1:1");
    let mixed = json!({
        "name": "Ayu",
        "status": "Complete",
        "doneItems": [{"description": "a", "startTime": "08:00", "endTime": "09:00"}],
        "todoItems": [{"description": "b"}],
    });
    let res = send(&app, Method::POST, "/api/reports", Some("u1"), Some(mixed)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let unknown_status = json!({"name": "Ayu", "status": "Done"});
    let res = send(&app, Method::POST, "/api/reports", Some("u1"), Some(unknown_status)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].is_string());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/reports")
        .header("Authorization", format!("Bearer {}", token("u1")))
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn monthly_export_is_plain_text() {
    let app = build_app("http://127.0.0.1:1");
    send(&app, Method::POST, "/api/reports", Some("u1"), Some(complete_report("2025-09-01T09:00:00Z")))
        .await;

    let res = send(&app, Method::GET, "/api/reports/export?month=9&year=2025", Some("u1"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.text,
        "dailyreport\nAyu\nDate: Monday, 1 September 2025\n\nComplete:\n[done] Fix login bug (08:00-09:30)"
    );

    let missing = send(&app, Method::GET, "/api/reports/export?month=9", Some("u1"), None).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn summarize_without_reports_returns_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = build_app(&server.uri());

    let res = send(&app, Method::POST, "/api/summarize", Some("u1"), Some(json!({"month": "9", "year": 2025})))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.json(),
        json!({"activitySummary": NO_REPORTS_ACTIVITY, "resultSummary": NO_REPORTS_RESULT})
    );
}

#[tokio::test]
async fn summarize_validates_period() {
    let app = build_app("http://127.0.0.1:1");
    for body in [json!({"month": 9}), json!({"month": "abc", "year": 2025}), json!({"month": 0, "year": 2025})] {
        let res = send(&app, Method::POST, "/api/summarize", Some("u1"), Some(body)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn summarize_exhausted_retries_is_generic_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("secret upstream detail"))
        .expect(3)
        .mount(&server)
        .await;
    let app = build_app(&server.uri());
    send(&app, Method::POST, "/api/reports", Some("u1"), Some(complete_report("2025-09-01T09:00:00Z")))
        .await;

    let res = send(&app, Method::POST, "/api/summarize", Some("u1"), Some(json!({"month": 9, "year": 2025})))
        .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json(), json!({"error": "internal server error"}));
}

#[tokio::test]
async fn summarize_returns_parsed_sections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {
                "role": "assistant",
                "content": "[ACTIVITY_SUMMARY]\nA month of fixes.\n---SEPARATOR---\n[RESULT_SUMMARY]\nLogin works."
            }}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = build_app(&server.uri());
    send(&app, Method::POST, "/api/reports", Some("u1"), Some(complete_report("2025-09-01T09:00:00Z")))
        .await;

    let res = send(&app, Method::POST, "/api/summarize", Some("u1"), Some(json!({"month": 9, "year": 2025})))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.json(),
        json!({"activitySummary": "A month of fixes.", "resultSummary": "Login works."})
    );
}

#[tokio::test]
async fn saved_summaries_upsert_per_period() {
    let app = build_app("http://127.0.0.1:1");
    let first = json!({"month": 9, "year": 2025, "activitySummary": "a1", "resultSummary": "r1"});
    let second = json!({"month": "9", "year": "2025", "activitySummary": "a2", "resultSummary": "r2"});
    let res = send(&app, Method::POST, "/api/summaries", Some("u1"), Some(first)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    let res = send(&app, Method::POST, "/api/summaries", Some("u1"), Some(second)).await;
    assert_eq!(res.status, StatusCode::CREATED);

    let listed = send(&app, Method::GET, "/api/summaries", Some("u1"), None).await.json();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["activitySummary"], "a2");

    let one = send(&app, Method::GET, "/api/summaries/2025/9", Some("u1"), None).await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.json()["resultSummary"], "r2");

    let other_owner = send(&app, Method::GET, "/api/summaries/2025/9", Some("u2"), None).await;
    assert_eq!(other_owner.status, StatusCode::NOT_FOUND);

    let blank = json!({"month": 9, "year": 2025, "activitySummary": " ", "resultSummary": "r"});
    let res = send(&app, Method::POST, "/api/summaries", Some("u1"), Some(blank)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}
