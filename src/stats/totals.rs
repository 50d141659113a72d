use crate::domain::{DailyReport, Subject, Task, TaskStatus, User};
use chrono::{Duration, NaiveDate};

/// Leaderboard figures for one user
#[derive(Debug, Clone, PartialEq)]
pub struct UserTotals {
    /// Sum of actualDuration over Completed tasks, in hours, one decimal
    pub total_hours: f64,
    /// Sum of questionsSolved over the user's daily reports
    pub questions_solved: u32,
    /// Count of Completed tasks
    pub completed_count: usize,
}

/// Convert accumulated seconds to hours with one-decimal rounding
pub fn round_hours(seconds: u64) -> f64 {
    (seconds as f64 / 3600.0 * 10.0).round() / 10.0
}

fn completed<'a>(user_id: &'a str, tasks: &'a [Task]) -> impl Iterator<Item = &'a Task> {
    tasks
        .iter()
        .filter(move |t| t.user_id == user_id && t.status == TaskStatus::Completed)
}

/// Fold the collections into one user's leaderboard figures. Pure and
/// re-derived on every read; the collections are small enough that no
/// caching is warranted.
pub fn user_totals(user_id: &str, tasks: &[Task], reports: &[DailyReport]) -> UserTotals {
    let total_seconds: u64 = completed(user_id, tasks).map(|t| t.actual_duration).sum();
    let questions_solved = reports
        .iter()
        .filter(|r| r.user_id == user_id)
        .map(|r| r.questions_solved)
        .sum();

    UserTotals {
        total_hours: round_hours(total_seconds),
        questions_solved,
        completed_count: completed(user_id, tasks).count(),
    }
}

/// Hours per subject over the user's Completed tasks, restricted to the
/// subjects their exam track offers
pub fn subject_breakdown(user: &User, tasks: &[Task]) -> Vec<(Subject, f64)> {
    user.target
        .subjects()
        .iter()
        .map(|&subject| {
            let seconds: u64 = completed(user.id, tasks)
                .filter(|t| t.subject == subject)
                .map(|t| t.actual_duration)
                .sum();
            (subject, round_hours(seconds))
        })
        .collect()
}

/// Average completed-session length in whole minutes; 0 with no completions
pub fn average_session_minutes(user_id: &str, tasks: &[Task]) -> u64 {
    let count = completed(user_id, tasks).count();
    if count == 0 {
        return 0;
    }
    let total_seconds: u64 = completed(user_id, tasks).map(|t| t.actual_duration).sum();
    (total_seconds as f64 / 60.0 / count as f64).round() as u64
}

/// Consecutive days with a daily report, counting back from today. When
/// today's report is not yet filed the streak counts from yesterday, so an
/// unfiled evening doesn't zero it.
pub fn current_streak_days(user_id: &str, reports: &[DailyReport], today: NaiveDate) -> u32 {
    let has_report = |day: NaiveDate| {
        reports
            .iter()
            .any(|r| r.user_id == user_id && r.date == day)
    };

    let mut day = if has_report(today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while has_report(day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// Which side of a head-to-head comparison wins. Strictly greater wins;
/// equal values are a tie and nobody gets the crown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crown {
    Left,
    Right,
}

pub fn crown(left: f64, right: f64) -> Option<Crown> {
    if left > right {
        Some(Crown::Left)
    } else if right > left {
        Some(Crown::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::USERS;
    use pretty_assertions::assert_eq;

    fn task(user_id: &str, subject: Subject, status: TaskStatus, secs: u64) -> Task {
        let mut t = Task::new(user_id, "t".to_string(), subject, 60);
        t.status = status;
        t.actual_duration = secs;
        t
    }

    fn report(user_id: &str, date: &str, questions: u32) -> DailyReport {
        DailyReport::new(
            user_id,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            7,
            questions,
            String::new(),
            "😊".to_string(),
        )
    }

    #[test]
    fn test_round_hours() {
        assert_eq!(round_hours(3600), 1.0);
        assert_eq!(round_hours(3400), 0.9);
        assert_eq!(round_hours(5400), 1.5);
        assert_eq!(round_hours(0), 0.0);
    }

    #[test]
    fn test_user_totals_counts_only_completed_tasks() {
        let tasks = vec![
            task("user_marvik", Subject::Physics, TaskStatus::Completed, 3400),
            task("user_marvik", Subject::Mathematics, TaskStatus::Completed, 2700),
            task("user_marvik", Subject::Physics, TaskStatus::Aborted, 9999),
            task("user_marvik", Subject::Physics, TaskStatus::Pending, 0),
            task("user_friend", Subject::Biology, TaskStatus::Completed, 5400),
        ];
        let reports = vec![
            report("user_marvik", "2024-01-01", 45),
            report("user_marvik", "2024-01-02", 5),
            report("user_friend", "2024-01-01", 60),
        ];

        let totals = user_totals("user_marvik", &tasks, &reports);
        // 3400 + 2700 = 6100s = 1.7h after rounding
        assert_eq!(totals.total_hours, 1.7);
        assert_eq!(totals.questions_solved, 50);
        assert_eq!(totals.completed_count, 2);
    }

    #[test]
    fn test_subject_breakdown_restricted_to_track() {
        let tasks = vec![
            task("user_marvik", Subject::Physics, TaskStatus::Completed, 3600),
            task("user_marvik", Subject::Mathematics, TaskStatus::Completed, 1800),
        ];
        let breakdown = subject_breakdown(&USERS[0], &tasks);
        assert_eq!(
            breakdown,
            vec![
                (Subject::Physics, 1.0),
                (Subject::Chemistry, 0.0),
                (Subject::Mathematics, 0.5),
            ]
        );
        // Biology never appears for the JEE track
        assert!(!breakdown.iter().any(|(s, _)| *s == Subject::Biology));
    }

    #[test]
    fn test_average_session_minutes() {
        assert_eq!(average_session_minutes("user_marvik", &[]), 0);

        let tasks = vec![
            task("user_marvik", Subject::Physics, TaskStatus::Completed, 3400),
            task("user_marvik", Subject::Physics, TaskStatus::Completed, 2700),
        ];
        // (3400 + 2700) / 60 / 2 = 50.83 → 51
        assert_eq!(average_session_minutes("user_marvik", &tasks), 51);
    }

    #[test]
    fn test_current_streak() {
        let today = NaiveDate::parse_from_str("2024-01-10", "%Y-%m-%d").unwrap();
        let reports = vec![
            report("user_marvik", "2024-01-09", 1),
            report("user_marvik", "2024-01-08", 1),
            report("user_marvik", "2024-01-06", 1), // gap on the 7th
            report("user_friend", "2024-01-10", 1),
        ];

        // Today unfiled: counts back from yesterday
        assert_eq!(current_streak_days("user_marvik", &reports, today), 2);
        // Today filed: counts today
        assert_eq!(current_streak_days("user_friend", &reports, today), 1);
        assert_eq!(current_streak_days("user_marvik", &[], today), 0);
    }

    #[test]
    fn test_crown_strictly_greater_wins() {
        assert_eq!(crown(1.7, 1.5), Some(Crown::Left));
        assert_eq!(crown(1.5, 1.7), Some(Crown::Right));
        assert_eq!(crown(1.5, 1.5), None);
        assert_eq!(crown(0.0, 0.0), None);
    }
}
