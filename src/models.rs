//! Frontend Models
//!
//! Data structures matching the remote `tasks` table.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Server-assigned task identity
pub type TaskId = i64;

/// Lowest and highest accepted priority
pub const PRIORITY_RANGE: std::ops::RangeInclusive<i32> = 1..=3;

/// Task status token (matches the `status` column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    /// Any token outside the known set; never sent back
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Unknown => "Unknown",
        }
    }
}

/// Task row as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: i32,
    /// Raw server timestamp; parsed only for display
    pub created_at: String,
}

impl Task {
    /// Creation time as `dd/mm/yyyy HH:MM`, or the raw value if unparseable
    pub fn created_label(&self) -> String {
        format_timestamp(&self.created_at)
    }
}

fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%d/%m/%Y %H:%M";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    // `timestamp without time zone` columns come back without an offset
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

/// Payload for creating a task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    /// Serialized as `null` when absent
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: i32,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: Option<String>, status: TaskStatus, priority: i32) -> Self {
        Self {
            title: title.into(),
            description,
            status,
            priority,
        }
    }
}

/// Partial payload for updating a task; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `Some(None)` clears the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none() && self.priority.is_none()
    }
}

impl From<TaskDraft> for TaskPatch {
    fn from(draft: TaskDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            status: Some(draft.status),
            priority: Some(draft.priority),
        }
    }
}

/// Sortable columns; the list is always ordered descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Priority,
    Title,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::CreatedAt, SortField::Priority, SortField::Title];

    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Priority => "priority",
            SortField::Title => "title",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "Newest",
            SortField::Priority => "Priority",
            SortField::Title => "Title",
        }
    }
}

/// Filter and sort selection for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub status: Option<TaskStatus>,
    pub sort: SortField,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_postgrest_row() {
        let json = r#"{"id":7,"title":"Write docs","description":null,"status":"in_progress","priority":2,"created_at":"2024-03-05T14:07:00.123456+00:00"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert!(task.description.is_none());
        assert_eq!(task.created_label(), "05/03/2024 14:07");
    }

    #[test]
    fn test_unexpected_row_values_still_decode() {
        let json = r#"[
            {"id":1,"title":"a","description":null,"status":"cancelled","priority":-1,"created_at":"2024-01-01T00:00:00+00:00"},
            {"id":2,"title":"b","description":"x","status":"pending","priority":400,"created_at":"2024-01-02T00:00:00+00:00"}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, TaskStatus::Unknown);
        assert_eq!(tasks[0].priority, -1);
        assert_eq!(tasks[1].status, TaskStatus::Pending);
        assert_eq!(tasks[1].priority, 400);
        assert_eq!(TaskStatus::parse("unknown"), None);
    }

    #[test]
    fn test_created_label_without_offset() {
        let task = Task {
            id: 1,
            title: "t".into(),
            description: None,
            status: TaskStatus::Pending,
            priority: 1,
            created_at: "2023-12-31T23:59:10".into(),
        };
        assert_eq!(task.created_label(), "31/12/2023 23:59");
    }

    #[test]
    fn test_created_label_falls_back_to_raw() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_draft_sends_null_description() {
        let draft = TaskDraft::new("A", None, TaskStatus::Pending, 1);
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("description").unwrap().is_null());
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = TaskPatch {
            status: Some(TaskStatus::Completed),
            description: Some(None),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["status"], "completed");
        assert!(obj["description"].is_null());
    }

    #[test]
    fn test_status_and_sort_tokens() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SortField::parse("priority"), Some(SortField::Priority));
        assert_eq!(SortField::parse("id"), None);
    }
}
