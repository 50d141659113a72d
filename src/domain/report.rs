use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One journal entry per (user, calendar day). A second submission for the
/// same day replaces the first; the store keys on `(user_id, date)`, not `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub id: String,
    pub user_id: String,
    /// Calendar day in ISO form (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Self-rated focus, 1-10
    pub focus_rating: u8,
    pub questions_solved: u32,
    /// Placeholder carried from the original layout; the form writes 0
    #[serde(default)]
    pub study_hours: f64,
    pub journal_notes: String,
    /// One of the fixed mood glyphs
    pub mood_emoji: String,
}

impl DailyReport {
    pub fn new(
        user_id: &str,
        date: NaiveDate,
        focus_rating: u8,
        questions_solved: u32,
        journal_notes: String,
        mood_emoji: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            date,
            focus_rating,
            questions_solved,
            study_hours: 0.0,
            journal_notes,
            mood_emoji,
        }
    }

    /// The business key reports are upserted by
    pub fn same_day(&self, other: &DailyReport) -> bool {
        self.user_id == other.user_id && self.date == other.date
    }
}
