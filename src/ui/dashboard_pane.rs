use crate::app::AppState;
use crate::domain::task::format_clock;
use crate::ui::styles::{
    border_style, default_style, hint_style, paused_style, selected_style, status_style,
    subject_color, title_style, user_color,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

/// Render the dashboard: active-task timer on top, mission queue and
/// partner card below
pub fn render_dashboard(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    render_active_panel(f, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_queue(f, app, columns[0]);
    render_partner_card(f, app, columns[1]);
}

/// Active task panel with countdown and progress gauge
fn render_active_panel(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Active Mission ", title_style()));

    let Some(task) = app.active_task() else {
        let paragraph = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("  No Active Mission", default_style()),
            Line::styled(
                "  Select a task from the queue and press Enter, or add one with 'a'.",
                hint_style(),
            ),
        ])
        .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let elapsed = app.timer.elapsed_secs();
    let total = task.estimated_seconds();
    let remaining = task.remaining_seconds(elapsed);
    let ratio = if total > 0 {
        (elapsed as f64 / total as f64).min(1.0)
    } else {
        1.0
    };

    let state_span = if app.timer.is_paused() {
        Span::styled("⏸ PAUSED", paused_style())
    } else {
        Span::styled(task.status.badge(), status_style(task.status))
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(&task.name, title_style()),
            Span::raw("  "),
            Span::styled(task.subject.name(), Style::default().fg(subject_color(task.subject))),
        ])),
        lines[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            state_span,
            Span::raw("   remaining "),
            Span::styled(format_clock(remaining), default_style()),
            Span::raw("   elapsed "),
            Span::styled(format_clock(elapsed), default_style()),
        ])),
        lines[1],
    );

    let owner = crate::domain::user::by_id(&task.user_id).unwrap_or(&crate::domain::USERS[0]);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(user_color(owner)))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    f.render_widget(gauge, lines[3]);

    f.render_widget(
        Paragraph::new(Line::styled(
            " Space pause/resume · c complete · x abort",
            hint_style(),
        )),
        lines[4],
    );
}

/// Pending tasks for the logged-in user
fn render_queue(f: &mut Frame, app: &AppState, area: Rect) {
    let pending = app.pending_tasks();

    let items: Vec<ListItem> = if pending.is_empty() {
        vec![ListItem::new(Line::styled(
            "  Queue is empty. Press 'a' to add a task.",
            hint_style(),
        ))]
    } else {
        pending
            .iter()
            .enumerate()
            .map(|(index, task)| {
                let row_style = if index == app.queue_index {
                    selected_style()
                } else {
                    default_style()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", task.name), row_style),
                    Span::styled(
                        task.subject.name(),
                        Style::default().fg(subject_color(task.subject)),
                    ),
                    Span::styled(format!(" · {}m", task.estimated_duration), hint_style()),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Mission Queue ", title_style())),
    );
    f.render_widget(list, area);
}

/// Static partner summary card
fn render_partner_card(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(user) = app.user else { return };
    let partner = user.partner();

    let partner_completed = app
        .tasks
        .iter()
        .filter(|t| t.user_id == partner.id && t.status == crate::domain::TaskStatus::Completed)
        .count();

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::raw(partner.avatar),
            Span::raw(" "),
            Span::styled(partner.username, Style::default().fg(user_color(partner))),
            Span::styled(format!("  [{}]", partner.target.name()), hint_style()),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  Tasks completed: "),
            Span::styled(partner_completed.to_string(), default_style()),
        ]),
        Line::raw(""),
        Line::styled("  Check the leaderboard to compare.", hint_style()),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Partner Uplink ", title_style())),
    );
    f.render_widget(paragraph, area);
}
