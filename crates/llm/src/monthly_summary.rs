use chrono::FixedOffset;
use daily_report_core::{format_day_label, Report, SummaryDraft};

use crate::ai_types::ChatRequest;
use crate::client::LlmClient;
use crate::error::LlmError;

/// Marker the model must place between the two sections.
pub const SECTION_SEPARATOR: &str = "---SEPARATOR---";
pub const ACTIVITY_HEADER: &str = "[ACTIVITY_SUMMARY]";
pub const RESULT_HEADER: &str = "[RESULT_SUMMARY]";

pub const NO_REPORTS_ACTIVITY: &str = "No reports found for the selected period.";
pub const NO_REPORTS_RESULT: &str = "Choose another period or add a report first.";

pub const ACTIVITY_FALLBACK: &str = "Failed to produce the activity summary.";
pub const RESULT_FALLBACK: &str = "Failed to produce the result summary.";

const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// The fixed pair returned when a period has no completed reports.
#[must_use]
pub fn no_reports_draft() -> SummaryDraft {
    SummaryDraft::new(NO_REPORTS_ACTIVITY, NO_REPORTS_RESULT)
}

/// One block per report: its day label and a bullet per done item.
#[must_use]
pub fn render_report_blocks(reports: &[Report], offset: FixedOffset) -> String {
    reports
        .iter()
        .map(|report| {
            let bullets = report
                .done_items
                .iter()
                .map(|item| format!("- {}", item.description.trim()))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "Date: {}\nActivities:\n{bullets}",
                format_day_label(report.created_at, offset)
            )
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

#[must_use]
pub fn build_monthly_summary_prompt(report_blocks: &str) -> String {
    format!(
        r#"You are an expert assistant who writes monthly work reports. Using the daily reports below, write TWO separate summaries as coherent narrative prose.

DAILY REPORTS:
{report_blocks}
---

YOUR TASK:

1. Activity summary:
   - Write a flowing, thematic narrative describing the work process, the main focus areas and the range of activities carried out.
   - IMPORTANT: do not mention specific dates (for example "Monday, 1 September"). Weave all activities into one story about what was worked on during the month.
   - Example of the expected style: "During the month, work centred on developing several projects... This included tasks ranging from front-end and back-end development to feature management..."
   - The summary must be longer than 150 words.

2. Result summary:
   - Describe the concrete, tangible outputs and deliverables of all these activities. Focus on what was produced.
   - The summary must be longer than 150 words.

Use exactly the following format as your FINAL answer, with nothing else. Put the marker '{SECTION_SEPARATOR}' between the two summaries:

{ACTIVITY_HEADER}
(activity summary here)
{SECTION_SEPARATOR}
{RESULT_HEADER}
(result summary here)"#
    )
}

/// Splits the model's answer on the first separator and strips the section
/// headers. A missing or blank section is replaced by its fallback text.
#[must_use]
pub fn parse_summary_sections(text: &str) -> SummaryDraft {
    // Text after a second separator is dropped.
    let mut parts = text.split(SECTION_SEPARATOR);
    let first = parts.next().unwrap_or_default();
    let second = parts.next();

    let activity = first.replacen(ACTIVITY_HEADER, "", 1);
    let activity = activity.trim();
    let result = second.map(|s| s.replacen(RESULT_HEADER, "", 1)).unwrap_or_default();
    let result = result.trim();

    SummaryDraft::new(
        if activity.is_empty() { ACTIVITY_FALLBACK } else { activity },
        if result.is_empty() { RESULT_FALLBACK } else { result },
    )
}

impl LlmClient {
    /// Generate the activity and result narratives for a month's completed reports.
    ///
    /// With no reports the placeholder pair is returned and no request is made.
    ///
    /// # Errors
    /// Returns an error if the chat completion fails after retries.
    pub async fn generate_monthly_summary(
        &self,
        reports: &[Report],
        offset: FixedOffset,
    ) -> Result<SummaryDraft, LlmError> {
        if reports.is_empty() {
            return Ok(no_reports_draft());
        }

        let prompt = build_monthly_summary_prompt(&render_report_blocks(reports, offset));
        let request = ChatRequest::user_prompt(self.model.clone(), prompt);
        let content = self.chat_completion(&request).await?;
        tracing::debug!(
            reports = reports.len(),
            chars = content.len(),
            "monthly summary generated"
        );
        Ok(parse_summary_sections(&content))
    }
}
