use crate::domain::{Subject, TaskStatus, User};
use ratatui::style::{Color, Modifier, Style};

/// Theme color for an operative (neon cyan / neon pink in the original skin)
pub fn user_color(user: &User) -> Color {
    match user.username {
        "Marvik" => Color::Cyan,
        _ => Color::Magenta,
    }
}

/// Accent color per subject
pub fn subject_color(subject: Subject) -> Color {
    match subject {
        Subject::Physics => Color::Blue,
        Subject::Chemistry => Color::Yellow,
        Subject::Mathematics => Color::Red,
        Subject::Biology => Color::Green,
    }
}

/// Style for a status badge
pub fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Pending => Style::default().fg(Color::Gray),
        TaskStatus::InProgress => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        TaskStatus::Completed => Style::default().fg(Color::Green),
        TaskStatus::Aborted => Style::default().fg(Color::Red),
    }
}

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Winner crown style on the leaderboard
pub fn crown_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Paused timer style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Success/confirmation style
pub fn success_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}
