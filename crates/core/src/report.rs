use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Whether a daily report records finished work or planned work.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReportStatus {
    /// Work was done; the report carries done items.
    Complete,
    /// Work is still pending; the report carries todo items.
    Incomplete,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Incomplete => "Incomplete",
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "complete" => Ok(Self::Complete),
            "incomplete" => Ok(Self::Incomplete),
            other => Err(DomainError::InvalidReport(format!("unknown report status: {other}"))),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finished piece of work with its time window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DoneItem {
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl DoneItem {
    pub fn new(
        description: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            documentation_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub description: String,
}

impl TodoItem {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into() }
    }
}

/// A persisted daily report owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub done_items: Vec<DoneItem>,
    #[serde(default)]
    pub todo_items: Vec<TodoItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a report creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub name: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub done_items: Vec<DoneItem>,
    #[serde(default)]
    pub todo_items: Vec<TodoItem>,
    #[serde(default)]
    pub documentation_url: Option<String>,
    /// Back-dates the report; the server clock is used when absent.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Field-merge update: every provided field overwrites the stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub done_items: Option<Vec<DoneItem>>,
    #[serde(default)]
    pub todo_items: Option<Vec<TodoItem>>,
    #[serde(default)]
    pub documentation_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Report {
    /// Builds a new report for `owner_id` with a fresh id, validating the input.
    pub fn create(owner_id: &str, input: ReportInput, now: DateTime<Utc>) -> DomainResult<Self> {
        let report = Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_owned(),
            name: input.name.trim().to_owned(),
            status: input.status,
            done_items: input.done_items.into_iter().map(normalize_done_item).collect(),
            todo_items: input.todo_items,
            documentation_url: normalize_url(input.documentation_url),
            created_at: input.created_at.unwrap_or(now),
            updated_at: now,
        };
        report.validate()?;
        Ok(report)
    }

    /// Merges `patch` into this report and re-validates the merged result.
    pub fn apply_patch(&mut self, patch: ReportPatch, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = patch.name {
            self.name = name.trim().to_owned();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(done_items) = patch.done_items {
            self.done_items = done_items.into_iter().map(normalize_done_item).collect();
        }
        if let Some(todo_items) = patch.todo_items {
            self.todo_items = todo_items;
        }
        if patch.documentation_url.is_some() {
            self.documentation_url = normalize_url(patch.documentation_url);
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
        self.updated_at = now;
        self.validate()
    }

    /// Checks required fields and done/todo exclusivity.
    ///
    /// A `Complete` report must not carry todo items and an `Incomplete`
    /// report must not carry done items.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidReport("name is required".to_owned()));
        }
        for (idx, item) in self.done_items.iter().enumerate() {
            if item.description.trim().is_empty() {
                return Err(DomainError::InvalidReport(format!(
                    "done item {idx}: description is required"
                )));
            }
            if item.start_time.trim().is_empty() || item.end_time.trim().is_empty() {
                return Err(DomainError::InvalidReport(format!(
                    "done item {idx}: start and end time are required"
                )));
            }
        }
        if let Some(idx) = self.todo_items.iter().position(|t| t.description.trim().is_empty()) {
            return Err(DomainError::InvalidReport(format!(
                "todo item {idx}: description is required"
            )));
        }
        match self.status {
            ReportStatus::Complete if !self.todo_items.is_empty() => Err(
                DomainError::InvalidReport("a Complete report cannot have todo items".to_owned()),
            ),
            ReportStatus::Incomplete if !self.done_items.is_empty() => Err(
                DomainError::InvalidReport("an Incomplete report cannot have done items".to_owned()),
            ),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == ReportStatus::Complete
    }
}

fn normalize_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_owned()).filter(|u| !u.is_empty())
}

fn normalize_done_item(item: DoneItem) -> DoneItem {
    DoneItem { documentation_url: normalize_url(item.documentation_url), ..item }
}
