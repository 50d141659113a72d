use crate::domain::USERS;
use crate::persistence::RecordStore;
use crate::stats::totals::{
    average_session_minutes, crown, current_streak_days, subject_breakdown, user_totals, Crown,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::PathBuf;

/// Format hours with one decimal place
fn format_hours(hours: f64) -> String {
    format!("{:.1}h", hours)
}

fn crown_marks(winner: Option<Crown>) -> (&'static str, &'static str) {
    match winner {
        Some(Crown::Left) => ("👑 ", ""),
        Some(Crown::Right) => ("", "👑 "),
        None => ("", ""),
    }
}

/// Render the leaderboard and per-user breakdowns as a markdown file in the
/// data directory (or at an explicit output path).
pub fn generate_summary(
    store: &RecordStore,
    date: Option<NaiveDate>,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let summary_date = date.unwrap_or_else(|| Local::now().date_naive());

    let tasks = store.load_tasks();
    let reports = store.load_reports();

    let left = user_totals(USERS[0].id, &tasks, &reports);
    let right = user_totals(USERS[1].id, &tasks, &reports);

    let mut out = String::new();
    out.push_str(&format!("# Study HQ Summary - {}\n\n", summary_date));

    // Leaderboard section: the three head-to-head cards
    out.push_str("## Leaderboard\n\n");

    let (l, r) = crown_marks(crown(left.total_hours, right.total_hours));
    out.push_str("### The Grinder (total hours)\n\n");
    out.push_str(&format!(
        "- {}{}: {}\n- {}{}: {}\n\n",
        l,
        USERS[0].username,
        format_hours(left.total_hours),
        r,
        USERS[1].username,
        format_hours(right.total_hours),
    ));

    let (l, r) = crown_marks(crown(
        left.questions_solved as f64,
        right.questions_solved as f64,
    ));
    out.push_str("### The Solver (questions solved)\n\n");
    out.push_str(&format!(
        "- {}{}: {}\n- {}{}: {}\n\n",
        l, USERS[0].username, left.questions_solved, r, USERS[1].username, right.questions_solved,
    ));

    let (l, r) = crown_marks(crown(
        left.completed_count as f64,
        right.completed_count as f64,
    ));
    out.push_str("### The Finisher (tasks completed)\n\n");
    out.push_str(&format!(
        "- {}{}: {}\n- {}{}: {}\n\n",
        l, USERS[0].username, left.completed_count, r, USERS[1].username, right.completed_count,
    ));

    // Per-user sections
    for user in &USERS {
        out.push_str(&format!(
            "## {} {} [{}]\n\n",
            user.avatar,
            user.username,
            user.target.name()
        ));

        for (subject, hours) in subject_breakdown(user, &tasks) {
            out.push_str(&format!("- **{}:** {}\n", subject.name(), format_hours(hours)));
        }

        out.push_str(&format!(
            "- **Average Session:** {}m\n",
            average_session_minutes(user.id, &tasks)
        ));
        out.push_str(&format!(
            "- **Current Streak:** {} days\n\n",
            current_streak_days(user.id, &reports, summary_date)
        ));
    }

    let output = match output_path {
        Some(path) => path,
        None => crate::persistence::ensure_data_dir()?.join(format!("summary-{}.md", summary_date)),
    };

    fs::write(&output, out)?;

    Ok(output)
}
