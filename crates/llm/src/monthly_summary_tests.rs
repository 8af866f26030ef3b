use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use daily_report_core::{DoneItem, Report, ReportInput, ReportStatus};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::LlmClient;
use crate::monthly_summary::*;
use crate::retry::RetryPolicy;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn report(created: DateTime<Utc>, items: &[&str]) -> Report {
    let input = ReportInput {
        name: "Ayu".to_owned(),
        status: ReportStatus::Complete,
        done_items: items.iter().map(|d| DoneItem::new(*d, "09:00", "10:00")).collect(),
        todo_items: vec![],
        documentation_url: None,
        created_at: Some(created),
    };
    Report::create("u1", input, created).unwrap()
}

#[test]
fn parses_well_formed_sections() {
    let text = "[ACTIVITY_SUMMARY]\nWe built things.\n---SEPARATOR---\n[RESULT_SUMMARY]\nThings exist.\n";
    let draft = parse_summary_sections(text);
    assert_eq!(draft.activity_summary, "We built things.");
    assert_eq!(draft.result_summary, "Things exist.");
}

#[test]
fn missing_separator_falls_back_for_result() {
    let draft = parse_summary_sections("[ACTIVITY_SUMMARY] Only one part");
    assert_eq!(draft.activity_summary, "Only one part");
    assert_eq!(draft.result_summary, RESULT_FALLBACK);
}

#[test]
fn blank_sections_fall_back() {
    let draft = parse_summary_sections("[ACTIVITY_SUMMARY]\n  \n---SEPARATOR---\n[RESULT_SUMMARY]");
    assert_eq!(draft.activity_summary, ACTIVITY_FALLBACK);
    assert_eq!(draft.result_summary, RESULT_FALLBACK);
}

#[test]
fn keeps_only_text_between_first_two_separators() {
    let draft = parse_summary_sections("a ---SEPARATOR--- b ---SEPARATOR--- c");
    assert_eq!(draft.activity_summary, "a");
    assert_eq!(draft.result_summary, "b");
}

#[test]
fn repeated_separator_never_leaks_into_result() {
    let draft = parse_summary_sections(
        "[ACTIVITY_SUMMARY]\na\n---SEPARATOR---\n[RESULT_SUMMARY]\nb\n---SEPARATOR---\nc",
    );
    assert_eq!(draft.activity_summary, "a");
    assert_eq!(draft.result_summary, "b");
    assert!(!draft.result_summary.contains("---SEPARATOR---"));
}

#[test]
fn report_blocks_use_day_labels_and_bullets() {
    let first = report(Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap(), &["design", "code"]);
    let second = report(Utc.with_ymd_and_hms(2025, 9, 2, 10, 0, 0).unwrap(), &["review"]);
    let blocks = render_report_blocks(&[first, second], utc());
    assert_eq!(
        blocks,
        "Date: Monday, 1 September\nActivities:\n- design\n- code\n\n---\n\n\
         Date: Tuesday, 2 September\nActivities:\n- review"
    );
}

#[test]
fn day_labels_follow_the_configured_offset() {
    let late = report(Utc.with_ymd_and_hms(2025, 9, 1, 20, 0, 0).unwrap(), &["deploy"]);
    let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
    let blocks = render_report_blocks(&[late], jakarta);
    assert!(blocks.starts_with("Date: Tuesday, 2 September"));
}

#[test]
fn prompt_carries_markers_and_reports() {
    let prompt = build_monthly_summary_prompt("Date: Monday, 1 September\nActivities:\n- x");
    assert!(prompt.contains(SECTION_SEPARATOR));
    assert!(prompt.contains(ACTIVITY_HEADER));
    assert!(prompt.contains(RESULT_HEADER));
    assert!(prompt.contains("- x"));
    assert!(prompt.contains("150 words"));
}

#[tokio::test]
async fn empty_period_returns_placeholder_without_calling_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = LlmClient::new("k".to_owned(), server.uri()).unwrap();
    let draft = client.generate_monthly_summary(&[], utc()).await.unwrap();
    assert_eq!(draft, no_reports_draft());
    assert_eq!(draft.activity_summary, NO_REPORTS_ACTIVITY);
    assert_eq!(draft.result_summary, NO_REPORTS_RESULT);
}

#[tokio::test]
async fn generates_and_parses_model_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {
                "role": "assistant",
                "content": "[ACTIVITY_SUMMARY]\nFocused work.\n---SEPARATOR---\n[RESULT_SUMMARY]\nShipped v2."
            }}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new("k".to_owned(), server.uri())
        .unwrap()
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(1)));
    let reports = [report(Utc.with_ymd_and_hms(2025, 9, 3, 9, 0, 0).unwrap(), &["ship v2"])];
    let draft = client.generate_monthly_summary(&reports, utc()).await.unwrap();
    assert_eq!(draft.activity_summary, "Focused work.");
    assert_eq!(draft.result_summary, "Shipped v2.");
}
