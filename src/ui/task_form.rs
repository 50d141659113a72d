use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add-task form as a centered modal
pub fn render_task_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.task_form else { return };
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let subjects = app.subject_choices();
    let subject_name = subjects
        .get(form.subject_index % subjects.len().max(1))
        .map(|s| s.name())
        .unwrap_or("-");

    let field_label = |index: usize, label: &str| {
        if form.editing_field == index {
            format!("{} (editing)", label)
        } else {
            label.to_string()
        }
    };
    let cursor = |index: usize| {
        if form.editing_field == index {
            Span::styled("█", modal_title_style())
        } else {
            Span::raw("")
        }
    };

    let mut lines = Vec::new();
    lines.push(Line::raw(""));
    lines.push(Line::raw(field_label(0, "Name:")));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(&form.name, modal_title_style()),
        cursor(0),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::raw(field_label(1, "Subject (←/→ to change):")));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(subject_name, modal_title_style()),
        cursor(1),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::raw(field_label(2, "Estimate (minutes):")));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(&form.estimate_text, modal_title_style()),
        cursor(2),
    ]));
    lines.push(Line::raw(""));

    lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
