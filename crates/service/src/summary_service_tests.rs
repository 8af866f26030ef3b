use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, TimeZone, Utc};
use daily_report_core::{
    DoneItem, MonthPeriod, ReportInput, ReportStatus, SummaryDraft, SummaryInput,
};
use daily_report_llm::{LlmClient, LlmError, RetryPolicy, NO_REPORTS_ACTIVITY, NO_REPORTS_RESULT};
use daily_report_storage::StorageBackend;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{ReportService, ServiceError, SummaryService};

struct Fixture {
    reports: Arc<ReportService>,
    summaries: SummaryService,
}

fn fixture(server: &MockServer) -> Fixture {
    let storage = Arc::new(StorageBackend::new_memory());
    let llm = LlmClient::new("test-key".to_owned(), server.uri())
        .unwrap()
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(5)));
    let reports =
        Arc::new(ReportService::new(Arc::clone(&storage), FixedOffset::east_opt(0).unwrap()));
    let summaries = SummaryService::new(storage, Arc::new(llm), Arc::clone(&reports));
    Fixture { reports, summaries }
}

fn september() -> MonthPeriod {
    MonthPeriod::new(9, 2025).unwrap()
}

async fn seed_completed_report(fx: &Fixture, owner: &str) {
    let input = ReportInput {
        name: "Ayu".to_owned(),
        status: ReportStatus::Complete,
        done_items: vec![DoneItem::new("Ship billing page", "09:00", "12:00")],
        todo_items: vec![],
        documentation_url: None,
        created_at: Some(Utc.with_ymd_and_hms(2025, 9, 15, 9, 0, 0).unwrap()),
    };
    fx.reports.create(owner, input).await.unwrap();
}

fn model_answer() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{"message": {
            "role": "assistant",
            "content": "[ACTIVITY_SUMMARY]\nSteady product work.\n---SEPARATOR---\n[RESULT_SUMMARY]\nBilling page shipped."
        }}]
    }))
}

#[tokio::test]
async fn no_reports_yields_placeholder_and_no_api_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(model_answer())
        .expect(0)
        .mount(&server)
        .await;
    let fx = fixture(&server);

    let draft = fx.summaries.generate("u1", september()).await.unwrap();
    assert_eq!(draft.activity_summary, NO_REPORTS_ACTIVITY);
    assert_eq!(draft.result_summary, NO_REPORTS_RESULT);
}

#[tokio::test]
async fn other_owners_reports_are_not_summarized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(model_answer())
        .expect(0)
        .mount(&server)
        .await;
    let fx = fixture(&server);
    seed_completed_report(&fx, "someone-else").await;

    let draft = fx.summaries.generate("u1", september()).await.unwrap();
    assert_eq!(draft.activity_summary, NO_REPORTS_ACTIVITY);
}

#[tokio::test]
async fn transient_failure_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(model_answer())
        .expect(1)
        .mount(&server)
        .await;
    let fx = fixture(&server);
    seed_completed_report(&fx, "u1").await;

    let draft = fx.summaries.generate("u1", september()).await.unwrap();
    assert_eq!(draft.activity_summary, "Steady product work.");
    assert_eq!(draft.result_summary, "Billing page shipped.");
}

#[tokio::test]
async fn fatal_failure_makes_one_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;
    let fx = fixture(&server);
    seed_completed_report(&fx, "u1").await;

    let err = fx.summaries.generate("u1", september()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Llm(LlmError::HttpStatus { code: 400, .. })));
}

#[tokio::test]
async fn saved_summary_is_unique_per_period() {
    let server = MockServer::start().await;
    let fx = fixture(&server);

    let first = SummaryInput::new(september(), SummaryDraft::new("a1", "r1")).unwrap();
    let second = SummaryInput::new(september(), SummaryDraft::new("a2", "r2")).unwrap();
    fx.summaries.upsert("u1", first).await.unwrap();
    let saved = fx.summaries.upsert("u1", second).await.unwrap();

    let listed = fx.summaries.list("u1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);
    assert_eq!(listed[0].activity_summary, "a2");

    let fetched = fx.summaries.get("u1", september()).await.unwrap();
    assert_eq!(fetched.result_summary, "r2");
    assert!(fx.summaries.get("u2", september()).await.unwrap_err().is_not_found());
}
