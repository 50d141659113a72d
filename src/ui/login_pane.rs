use crate::app::AppState;
use crate::domain::USERS;
use crate::ui::styles::{
    border_style, default_style, error_style, hint_style, selected_style, title_style, user_color,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the login gate: operative selector plus passcode entry
pub fn render_login_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(48),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    let card = horizontal[1];

    let mut lines = Vec::new();
    lines.push(Line::raw(""));
    lines.push(Line::styled("  JOINT STUDY HQ", title_style()));
    lines.push(Line::styled("  secure terminal access", hint_style()));
    lines.push(Line::raw(""));

    for (index, user) in USERS.iter().enumerate() {
        let marker = if index == app.login_form.selected {
            "> "
        } else {
            "  "
        };
        let style = if index == app.login_form.selected {
            selected_style()
        } else {
            default_style()
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{}{} {} [{}]", marker, user.avatar, user.username, user.target.name()),
                style,
            ),
        ]));
    }

    lines.push(Line::raw(""));
    let masked = "•".repeat(app.login_form.passcode.chars().count());
    lines.push(Line::from(vec![
        Span::styled("  Passcode: ", hint_style()),
        Span::styled(masked, user_color(&USERS[app.login_form.selected])),
        Span::styled("█", default_style()),
    ]));
    lines.push(Line::raw(""));

    if let Some(error) = &app.login_form.error {
        lines.push(Line::styled(format!("  ⚠ {}", error), error_style()));
    } else {
        lines.push(Line::raw(""));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  ↑/↓ operative · Enter login · Esc quit",
        hint_style(),
    ));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Login ", title_style())),
    );
    f.render_widget(paragraph, card);
}
