use crate::domain::{DailyReport, Subject, Task, TaskStatus};
use crate::persistence::{atomic_write, read_file};
use anyhow::Result;
use chrono::{Duration, Local, Utc};
use std::path::{Path, PathBuf};

const TASKS_FILE: &str = "tasks.json";
const REPORTS_FILE: &str = "reports.json";
const USER_FILE: &str = "current_user";

/// Durable key-value persistence for the two record collections and the
/// active-user scalar. Storage is the sole source of truth across restarts;
/// every mutation is a read-modify-write of the full collection, written
/// atomically.
///
/// Reads are fail-soft: missing or malformed content yields an empty
/// collection, never an error. Writes propagate errors (no retry).
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn tasks_path(&self) -> PathBuf {
        self.dir.join(TASKS_FILE)
    }

    fn reports_path(&self) -> PathBuf {
        self.dir.join(REPORTS_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    /// Load all tasks. Missing or malformed content yields an empty list.
    pub fn load_tasks(&self) -> Vec<Task> {
        read_file(self.tasks_path())
            .ok()
            .filter(|content| !content.is_empty())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load all daily reports. Missing or malformed content yields an empty list.
    pub fn load_reports(&self) -> Vec<DailyReport> {
        read_file(self.reports_path())
            .ok()
            .filter(|content| !content.is_empty())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load the stored username, if someone is logged in
    pub fn load_active_user(&self) -> Option<String> {
        read_file(self.user_path())
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Store or clear the active username
    pub fn set_active_user(&self, username: Option<&str>) -> Result<()> {
        match username {
            Some(name) => atomic_write(self.user_path(), name),
            None => {
                let path = self.user_path();
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
                Ok(())
            }
        }
    }

    /// Replace-in-place by id (position preserved), else append
    pub fn upsert_task(&self, task: &Task) -> Result<()> {
        let mut tasks = self.load_tasks();
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task.clone(),
            None => tasks.push(task.clone()),
        }
        self.write_tasks(&tasks)
    }

    /// Replace-or-append keyed by (userId, date) equality, not by id.
    /// A second submission for the same day replaces the prior one.
    pub fn upsert_report(&self, report: &DailyReport) -> Result<()> {
        let mut reports = self.load_reports();
        match reports.iter_mut().find(|r| r.same_day(report)) {
            Some(existing) => *existing = report.clone(),
            None => reports.push(report.clone()),
        }
        self.write_reports(&reports)
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        atomic_write(self.tasks_path(), &json)
    }

    fn write_reports(&self, reports: &[DailyReport]) -> Result<()> {
        let json = serde_json::to_string_pretty(reports)?;
        atomic_write(self.reports_path(), &json)
    }

    /// One-time population of demonstration rows so the leaderboard has
    /// non-trivial numbers on first launch. Runs only when the task
    /// collection is empty; idempotent.
    pub fn seed_if_empty(&self) -> Result<()> {
        if !self.load_tasks().is_empty() {
            return Ok(());
        }

        let now = Utc::now().timestamp_millis();
        let seed = |id: &str, user_id: &str, name: &str, subject, est_min, actual_secs, age_ms| Task {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            subject,
            estimated_duration: est_min,
            actual_duration: actual_secs,
            status: TaskStatus::Completed,
            created_at: now - age_ms,
            start_time: None,
            end_time: None,
        };

        let tasks = vec![
            seed("1", "user_marvik", "Mechanics Review", Subject::Physics, 60, 3400, 86_400_000),
            seed("2", "user_marvik", "Calculus Problems", Subject::Mathematics, 45, 2700, 43_200_000),
            seed("3", "user_friend", "Botany Diagrams", Subject::Biology, 90, 5400, 90_000_000),
            seed("4", "user_friend", "Organic Chem", Subject::Chemistry, 60, 3500, 36_000_000),
        ];
        self.write_tasks(&tasks)?;

        let yesterday = Local::now().date_naive() - Duration::days(1);
        let reports = vec![
            DailyReport {
                id: "1".to_string(),
                user_id: "user_marvik".to_string(),
                date: yesterday,
                focus_rating: 8,
                questions_solved: 45,
                study_hours: 4.0,
                journal_notes: "Good flow".to_string(),
                mood_emoji: "🔥".to_string(),
            },
            DailyReport {
                id: "2".to_string(),
                user_id: "user_friend".to_string(),
                date: yesterday,
                focus_rating: 9,
                questions_solved: 60,
                study_hours: 5.0,
                journal_notes: "Crushed it".to_string(),
                mood_emoji: "🎯".to_string(),
            },
        ];
        self.write_reports(&reports)
    }
}
