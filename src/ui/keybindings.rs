use crate::app::{AppState, Page, UiMode};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// One-row hint bar at the very top, adjusted to the current mode
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = match app.ui_mode {
        UiMode::AddingTask => " Tab field · ←/→ subject · Enter add · Esc cancel",
        UiMode::EditingReport => " Tab field · ←/→ adjust · Enter submit · Esc done",
        UiMode::Normal => match app.page {
            Page::Dashboard => {
                " 1-4 pages · ↑/↓ queue · Enter start · Space pause · c complete · x abort · a add · o logout · q quit"
            }
            Page::Report => " 1-4 pages · e edit report · o logout · q quit",
            _ => " 1-4 pages · o logout · q quit",
        },
    };

    f.render_widget(Paragraph::new(Line::styled(hints, hint_style())), area);
}
