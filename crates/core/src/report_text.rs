//! Plain-text renderings of reports, in the "dailyreport" chat format.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Utc};

use crate::constants::{EXPORT_SEPARATOR, REPORT_TEXT_HEADER};
use crate::report::{DoneItem, Report, ReportStatus};

/// Day label such as `Monday, 1 September`, in the given offset.
#[must_use]
pub fn format_day_label(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%A, %-d %B").to_string()
}

/// Full date such as `Monday, 1 September 2025`, in the given offset.
#[must_use]
pub fn format_full_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%A, %-d %B %Y").to_string()
}

fn done_line(item: &DoneItem) -> String {
    let start = item.start_time.trim();
    let end = item.end_time.trim();
    if start.is_empty() || end.is_empty() {
        format!("[done] {}", item.description.trim())
    } else {
        format!("[done] {} ({start}-{end})", item.description.trim())
    }
}

/// Renders one report as the text users paste into their team chat.
#[must_use]
pub fn render_report_text(report: &Report) -> String {
    let mut output = format!("{REPORT_TEXT_HEADER}\n{}\n\n", report.name);

    match report.status {
        ReportStatus::Complete if !report.done_items.is_empty() => {
            output.push_str("Complete:\n");
            for item in report.done_items.iter().filter(|i| !i.description.trim().is_empty()) {
                _ = writeln!(output, "{}", done_line(item));
            }
        },
        ReportStatus::Incomplete if !report.todo_items.is_empty() => {
            output.push_str("Incomplete:\n");
            for item in report.todo_items.iter().filter(|i| !i.description.trim().is_empty()) {
                _ = writeln!(output, "[todo] {}", item.description.trim());
            }
        },
        _ => {},
    }

    output.trim_end().to_owned()
}

/// Renders a month of completed reports, dated, in the order given.
///
/// Returns an empty string when `reports` is empty.
#[must_use]
pub fn render_monthly_export(reports: &[Report], offset: FixedOffset) -> String {
    reports
        .iter()
        .map(|report| {
            let items =
                report.done_items.iter().map(done_line).collect::<Vec<_>>().join("\n");
            format!(
                "{REPORT_TEXT_HEADER}\n{}\nDate: {}\n\nComplete:\n{items}",
                report.name,
                format_full_date(report.created_at, offset)
            )
        })
        .collect::<Vec<_>>()
        .join(EXPORT_SEPARATOR)
}
