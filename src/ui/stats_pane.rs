use crate::app::AppState;
use crate::stats::{average_session_minutes, current_streak_days, subject_breakdown, user_totals};
use crate::ui::styles::{border_style, default_style, subject_color, title_style};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Personal analytics: headline cards on top, hours-per-subject chart below
pub fn render_stats(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(user) = app.user else { return };

    let totals = user_totals(user.id, &app.tasks, &app.reports);
    let avg_minutes = average_session_minutes(user.id, &app.tasks);
    let streak = current_streak_days(user.id, &app.reports, Local::now().date_naive());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(rows[0]);

    render_card(f, cards[0], "Total Hours", format!("{:.1}h", totals.total_hours));
    render_card(f, cards[1], "Tasks Done", totals.completed_count.to_string());
    render_card(f, cards[2], "Avg Session", format!("{}m", avg_minutes));
    render_card(f, cards[3], "Streak", format!("{}d 🔥", streak));

    render_subject_chart(f, app, rows[1]);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String) {
    let paragraph = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(value, title_style()),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(format!(" {} ", title), default_style())),
    );
    f.render_widget(paragraph, area);
}

/// Hours per subject over completed tasks, one bar each. Bars are scaled
/// in tenths of an hour so a 1.5h subject still draws.
fn render_subject_chart(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(user) = app.user else { return };
    let breakdown = subject_breakdown(user, &app.tasks);

    let bars: Vec<Bar> = breakdown
        .iter()
        .map(|(subject, hours)| {
            Bar::default()
                .label(Line::raw(subject.name()))
                .value((hours * 10.0).round() as u64)
                .text_value(format!("{:.1}h", hours))
                .style(Style::default().fg(subject_color(*subject)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Hours by Subject ", title_style())),
        )
        .bar_width(12)
        .bar_gap(3)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}
