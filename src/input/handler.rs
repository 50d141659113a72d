use crate::app::{AppState, Page, UiMode};
use crate::domain::MOODS;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    if app.user.is_none() {
        return handle_login(app, key);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_task_form(app, key),
        UiMode::EditingReport => handle_report_form(app, key),
    }
}

/// Keys at the login gate
fn handle_login(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            app.login_form.selected = 1 - app.login_form.selected;
            app.login_form.passcode.clear();
            app.login_form.error = None;
        }
        KeyCode::Backspace => {
            app.login_form.passcode.pop();
        }
        KeyCode::Enter => {
            app.try_login()?;
        }
        KeyCode::Char(c) => {
            app.login_form.passcode.push(c);
            app.login_form.error = None;
        }
        _ => {}
    }
    Ok(false)
}

/// Keys in normal mode: page switching plus dashboard controls
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),

        // Page switching
        KeyCode::Char('1') => app.page = Page::Dashboard,
        KeyCode::Char('2') => app.page = Page::Leaderboard,
        KeyCode::Char('3') => app.page = Page::Report,
        KeyCode::Char('4') => app.page = Page::Stats,

        // Logout
        KeyCode::Char('o') | KeyCode::Char('O') => {
            app.logout()?;
        }

        // Edit the daily report form
        KeyCode::Char('e') | KeyCode::Char('E') if app.page == Page::Report => {
            app.ui_mode = UiMode::EditingReport;
        }

        // Dashboard controls
        KeyCode::Up if app.page == Page::Dashboard => app.queue_up(),
        KeyCode::Down if app.page == Page::Dashboard => app.queue_down(),
        KeyCode::Enter if app.page == Page::Dashboard => {
            app.start_selected()?;
        }
        KeyCode::Char(' ') if app.page == Page::Dashboard => app.toggle_pause(),
        KeyCode::Char('c') | KeyCode::Char('C') if app.page == Page::Dashboard => {
            app.complete_active()?;
        }
        KeyCode::Char('x') | KeyCode::Char('X') if app.page == Page::Dashboard => {
            app.abort_active()?;
        }
        KeyCode::Char('a') | KeyCode::Char('A') if app.page == Page::Dashboard => {
            app.open_task_form();
        }

        _ => {}
    }
    Ok(false)
}

/// Keys while the add-task form is open
fn handle_task_form(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let subject_count = app.subject_choices().len().max(1);
    let Some(form) = app.task_form.as_mut() else {
        app.ui_mode = UiMode::Normal;
        return Ok(false);
    };

    match key.code {
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Enter => app.submit_task_form()?,
        KeyCode::Tab | KeyCode::Down => form.editing_field = (form.editing_field + 1) % 3,
        KeyCode::BackTab | KeyCode::Up => form.editing_field = (form.editing_field + 2) % 3,
        KeyCode::Left if form.editing_field == 1 => {
            form.subject_index = (form.subject_index + subject_count - 1) % subject_count;
        }
        KeyCode::Right if form.editing_field == 1 => {
            form.subject_index = (form.subject_index + 1) % subject_count;
        }
        KeyCode::Backspace => match form.editing_field {
            0 => {
                form.name.pop();
            }
            2 => {
                form.estimate_text.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match form.editing_field {
            0 => form.name.push(c),
            2 if c.is_ascii_digit() => form.estimate_text.push(c),
            _ => {}
        },
        _ => {}
    }
    Ok(false)
}

/// Keys while editing the daily report form
fn handle_report_form(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let form = &mut app.report_form;

    match key.code {
        KeyCode::Esc => app.ui_mode = UiMode::Normal,
        KeyCode::Enter => app.submit_report()?,
        KeyCode::Tab | KeyCode::Down => form.editing_field = (form.editing_field + 1) % 4,
        KeyCode::BackTab | KeyCode::Up => form.editing_field = (form.editing_field + 3) % 4,

        // Focus rating 1-10
        KeyCode::Left if form.editing_field == 0 => {
            form.focus_rating = form.focus_rating.saturating_sub(1).max(1);
        }
        KeyCode::Right if form.editing_field == 0 => {
            form.focus_rating = (form.focus_rating + 1).min(10);
        }

        // Mood glyph cycling
        KeyCode::Left if form.editing_field == 2 => {
            form.mood_index = (form.mood_index + MOODS.len() - 1) % MOODS.len();
        }
        KeyCode::Right if form.editing_field == 2 => {
            form.mood_index = (form.mood_index + 1) % MOODS.len();
        }

        KeyCode::Backspace => match form.editing_field {
            1 => {
                form.questions_text.pop();
            }
            3 => {
                form.notes.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match form.editing_field {
            1 if c.is_ascii_digit() => form.questions_text.push(c),
            3 => form.notes.push(c),
            _ => {}
        },
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Lifecycle;
    use crate::persistence::RecordStore;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn app() -> (tempfile::TempDir, AppState) {
        let dir = tempdir().unwrap();
        let app = AppState::new(Lifecycle::new(RecordStore::new(dir.path()))).unwrap();
        (dir, app)
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::from(code)).unwrap()
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_login_flow_via_keys() {
        let (_dir, mut app) = app();
        type_str(&mut app, "marvik123");
        assert!(!press(&mut app, KeyCode::Enter));
        assert_eq!(app.user.map(|u| u.username), Some("Marvik"));
    }

    #[test]
    fn test_login_switch_clears_passcode() {
        let (_dir, mut app) = app();
        type_str(&mut app, "abc");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.login_form.selected, 1);
        assert!(app.login_form.passcode.is_empty());
    }

    #[test]
    fn test_page_switching() {
        let (_dir, mut app) = app();
        type_str(&mut app, "marvik123");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.page, Page::Leaderboard);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.page, Page::Stats);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.page, Page::Dashboard);
    }

    #[test]
    fn test_add_task_via_form_keys() {
        let (_dir, mut app) = app();
        type_str(&mut app, "marvik123");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        type_str(&mut app, "Rotational Motion");
        // Move to subject, pick the second one
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        // Move to estimate, replace the default
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "45");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ui_mode, UiMode::Normal);
        let pending = app.pending_tasks();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Rotational Motion");
        assert_eq!(pending[0].estimated_duration, 45);
    }

    #[test]
    fn test_quit_from_normal_mode() {
        let (_dir, mut app) = app();
        type_str(&mut app, "marvik123");
        press(&mut app, KeyCode::Enter);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_report_form_rating_bounds() {
        let (_dir, mut app) = app();
        type_str(&mut app, "friend123");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.ui_mode, UiMode::EditingReport);

        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.report_form.focus_rating, 10);
        for _ in 0..20 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.report_form.focus_rating, 1);
    }
}
