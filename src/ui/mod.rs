pub mod dashboard_pane;
pub mod keybindings;
pub mod layout;
pub mod leaderboard_pane;
pub mod login_pane;
pub mod report_form;
pub mod stats_pane;
pub mod styles;
pub mod task_form;

use crate::app::{AppState, Page};
use crate::ui::styles::{border_style, hint_style, title_style, user_color};
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Top-level render dispatch. The login gate owns the whole screen until
/// an operative is authenticated.
pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();

    let Some(user) = app.user else {
        login_pane::render_login_pane(f, app, area);
        return;
    };

    let main = layout::create_layout(area);

    keybindings::render_keybindings(f, app, main.keybindings_area);

    let header = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::raw(user.avatar),
        Span::raw(" "),
        Span::styled(user.username, Style::default().fg(user_color(user))),
        Span::styled(format!("  [{}]", user.target.name()), hint_style()),
        Span::raw("   "),
        Span::styled(app.page.title(), title_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style()),
    );
    f.render_widget(header, main.header_area);

    match app.page {
        Page::Dashboard => dashboard_pane::render_dashboard(f, app, main.content_area),
        Page::Leaderboard => leaderboard_pane::render_leaderboard(f, app, main.content_area),
        Page::Report => report_form::render_report_form(f, app, main.content_area),
        Page::Stats => stats_pane::render_stats(f, app, main.content_area),
    }

    // Add-task form draws over whatever page is behind it
    if app.task_form.is_some() {
        task_form::render_task_form(f, app, area);
    }
}
