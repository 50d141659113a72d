use crate::app::{AppState, UiMode};
use crate::domain::MOODS;
use crate::ui::styles::{
    border_style, default_style, hint_style, selected_style, success_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the daily report page. The form edits in place; 'e' enters
/// editing mode and Esc leaves it.
pub fn render_report_form(f: &mut Frame, app: &AppState, area: Rect) {
    let form = &app.report_form;
    let editing = app.ui_mode == UiMode::EditingReport;

    let field_style = |index: usize| {
        if editing && form.editing_field == index {
            selected_style()
        } else {
            default_style()
        }
    };

    let today = Local::now().date_naive();
    let already_filed = app
        .reports
        .iter()
        .any(|r| app.user.map(|u| u.id) == Some(r.user_id.as_str()) && r.date == today);

    let mut lines = Vec::new();
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("  Date: "),
        Span::styled(today.to_string(), default_style()),
        if already_filed {
            Span::styled("  (filed today, submitting again overwrites)", hint_style())
        } else {
            Span::raw("")
        },
    ]));
    lines.push(Line::raw(""));

    // Focus rating as a filled bar out of 10
    let filled = "■".repeat(form.focus_rating as usize);
    let empty = "□".repeat(10 - form.focus_rating as usize);
    lines.push(Line::from(vec![
        Span::styled("  Focus rating  ", field_style(0)),
        Span::styled(filled, title_style()),
        Span::styled(empty, hint_style()),
        Span::styled(format!("  {}/10", form.focus_rating), default_style()),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::styled("  Questions solved  ", field_style(1)),
        Span::styled(&form.questions_text, default_style()),
    ]));
    lines.push(Line::raw(""));

    let mut mood_spans = vec![Span::styled("  Mood  ", field_style(2))];
    for (index, mood) in MOODS.iter().enumerate() {
        if index == form.mood_index {
            mood_spans.push(Span::styled(format!("[{}] ", mood), selected_style()));
        } else {
            mood_spans.push(Span::raw(format!(" {}  ", mood)));
        }
    }
    lines.push(Line::from(mood_spans));
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::styled("  Journal  ", field_style(3)),
        Span::styled(&form.notes, default_style()),
        if editing && form.editing_field == 3 {
            Span::styled("█", title_style())
        } else {
            Span::raw("")
        },
    ]));
    lines.push(Line::raw(""));

    if form.flash_active() {
        lines.push(Line::styled("  ✓ Report submitted", success_style()));
    } else {
        lines.push(Line::raw(""));
    }

    lines.push(Line::raw(""));
    let hint = if editing {
        "  Tab next field · ←/→ adjust · Enter submit · Esc done"
    } else {
        "  Press 'e' to edit today's report"
    };
    lines.push(Line::styled(hint, hint_style()));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Daily Report ", title_style())),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
