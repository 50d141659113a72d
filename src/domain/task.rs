use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Study subject. Which subjects a task may carry is constrained by the
/// owning user's exam track (see `User::allows_subject`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Mathematics,
    Biology,
}

impl Subject {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Mathematics => "Mathematics",
            Subject::Biology => "Biology",
        }
    }
}

/// Lifecycle status of a task.
///
/// Transitions only Pending → InProgress → {Completed, Aborted}. Completed
/// and Aborted are terminal; nothing ever moves back to Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Aborted,
}

impl TaskStatus {
    /// True for Completed and Aborted, the two frozen end states
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Aborted)
    }

    /// Status badge text for list rows
    pub fn badge(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "· PENDING",
            TaskStatus::InProgress => "⏱ IN PROGRESS",
            TaskStatus::Completed => "✓ COMPLETED",
            TaskStatus::Aborted => "✕ ABORTED",
        }
    }
}

/// A unit of study work
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique id
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Free-text name
    pub name: String,
    pub subject: Subject,
    /// Operator-specified estimate, in minutes. Fixed at creation.
    pub estimated_duration: u64,
    /// System-accumulated elapsed time, in seconds
    #[serde(default)]
    pub actual_duration: u64,
    pub status: TaskStatus,
    /// Creation timestamp, epoch milliseconds
    pub created_at: i64,
    #[serde(rename = "start_time", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(rename = "end_time", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl Task {
    /// Construct a fresh Pending task with a new id and zero elapsed time
    pub fn new(user_id: &str, name: String, subject: Subject, estimated_minutes: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name,
            subject,
            estimated_duration: estimated_minutes,
            actual_duration: 0,
            status: TaskStatus::Pending,
            created_at: Utc::now().timestamp_millis(),
            start_time: None,
            end_time: None,
        }
    }

    /// Estimate in seconds
    pub fn estimated_seconds(&self) -> u64 {
        self.estimated_duration * 60
    }

    /// Seconds left against the estimate, saturating at zero
    pub fn remaining_seconds(&self, elapsed: u64) -> u64 {
        self.estimated_seconds().saturating_sub(elapsed)
    }
}

/// Format whole seconds as "m:ss" for the countdown display
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_task_is_pending() {
        let task = Task::new("user_marvik", "Mechanics".to_string(), Subject::Physics, 60);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.actual_duration, 0);
        assert_eq!(task.estimated_duration, 60);
        assert!(task.start_time.is_none());
        assert!(task.end_time.is_none());
        assert!(!task.id.is_empty());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Aborted.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        // "In Progress" carries a space on the wire
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: TaskStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }

    #[test]
    fn test_task_wire_format_camel_case() {
        let mut task = Task::new("user_friend", "Botany".to_string(), Subject::Biology, 90);
        task.start_time = Some(1_700_000_000_000);
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"estimatedDuration\""));
        assert!(json.contains("\"actualDuration\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"start_time\""));
        assert!(!json.contains("\"end_time\"")); // absent until set
    }

    #[test]
    fn test_remaining_seconds() {
        let task = Task::new("user_marvik", "Calc".to_string(), Subject::Mathematics, 1);
        assert_eq!(task.estimated_seconds(), 60);
        assert_eq!(task.remaining_seconds(42), 18);
        assert_eq!(task.remaining_seconds(75), 0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(3600), "60:00");
    }
}
