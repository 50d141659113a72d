use crate::app::AppState;
use crate::domain::USERS;
use crate::stats::{crown, user_totals, Crown, UserTotals};
use crate::ui::styles::{border_style, crown_style, default_style, title_style, user_color};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Head-to-head leaderboard: one card per category, both operatives on
/// a shared bar scale
pub fn render_leaderboard(f: &mut Frame, app: &AppState, area: Rect) {
    let left = user_totals(USERS[0].id, &app.tasks, &app.reports);
    let right = user_totals(USERS[1].id, &app.tasks, &app.reports);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area);

    render_category(
        f,
        rows[0],
        "The Grinder · total study hours",
        left.total_hours,
        right.total_hours,
        |v| format!("{:.1}h", v),
    );
    render_category(
        f,
        rows[1],
        "The Solver · questions solved",
        left.questions_solved as f64,
        right.questions_solved as f64,
        |v| format!("{}", v as u64),
    );
    render_category(
        f,
        rows[2],
        "The Finisher · tasks completed",
        left.completed_count as f64,
        right.completed_count as f64,
        |v| format!("{}", v as u64),
    );

    render_verdict(f, rows[3], &left, &right);
}

fn render_category(
    f: &mut Frame,
    area: Rect,
    title: &str,
    left: f64,
    right: f64,
    fmt: impl Fn(f64) -> String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" {} ", title), title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let winner = crown(left, right);
    let max = left.max(right).max(f64::EPSILON);

    for (slot, (user, value, side)) in [
        (0usize, (&USERS[0], left, Crown::Left)),
        (2usize, (&USERS[1], right, Crown::Right)),
    ] {
        let crown_span = if winner == Some(side) {
            Span::styled(" 👑", crown_style())
        } else {
            Span::raw("")
        };
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::raw(user.avatar),
                Span::raw(" "),
                Span::styled(user.username, Style::default().fg(user_color(user))),
                crown_span,
            ])),
            rows[slot],
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(user_color(user)))
            .ratio((value / max).clamp(0.0, 1.0))
            .label(fmt(value));
        f.render_widget(gauge, rows[slot + 1]);
    }
}

/// Crown tally across the three categories
fn render_verdict(f: &mut Frame, area: Rect, left: &UserTotals, right: &UserTotals) {
    let mut left_crowns = 0;
    let mut right_crowns = 0;
    for (l, r) in [
        (left.total_hours, right.total_hours),
        (left.questions_solved as f64, right.questions_solved as f64),
        (left.completed_count as f64, right.completed_count as f64),
    ] {
        match crown(l, r) {
            Some(Crown::Left) => left_crowns += 1,
            Some(Crown::Right) => right_crowns += 1,
            None => {}
        }
    }

    let verdict = match crown(left_crowns as f64, right_crowns as f64) {
        Some(Crown::Left) => format!("  {} leads {} crowns to {}", USERS[0].username, left_crowns, right_crowns),
        Some(Crown::Right) => format!("  {} leads {} crowns to {}", USERS[1].username, right_crowns, left_crowns),
        None => "  Dead even. Back to work.".to_string(),
    };

    f.render_widget(
        Paragraph::new(Line::styled(verdict, default_style())),
        area,
    );
}
