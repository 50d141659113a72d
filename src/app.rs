use crate::domain::{user, DailyReport, Subject, Task, TaskStatus, User, MOODS};
use crate::lifecycle::Lifecycle;
use crate::notifications;
use crate::timer::{SessionTimer, TimerSignal};
use anyhow::Result;
use chrono::Local;
use std::time::Instant;

/// How long the report-submitted confirmation stays on screen
const SUBMIT_FLASH_SECS: u64 = 3;

/// Which page the main area is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Leaderboard,
    Report,
    Stats,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Leaderboard => "Leaderboard",
            Page::Report => "Daily Report",
            Page::Stats => "Stats",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingReport,
}

/// Login gate state
#[derive(Debug, Clone)]
pub struct LoginForm {
    /// Index into USERS
    pub selected: usize,
    pub passcode: String,
    pub error: Option<String>,
}

impl LoginForm {
    fn new() -> Self {
        Self {
            selected: 0,
            passcode: String::new(),
            error: None,
        }
    }
}

/// Input form state for adding a task
#[derive(Debug, Clone)]
pub struct TaskFormState {
    pub name: String,
    /// Index into the user's subject set
    pub subject_index: usize,
    pub estimate_text: String,
    pub editing_field: usize, // 0 = name, 1 = subject, 2 = estimate
}

impl TaskFormState {
    fn new() -> Self {
        Self {
            name: String::new(),
            subject_index: 0,
            estimate_text: "60".to_string(),
            editing_field: 0,
        }
    }
}

/// Daily report form state. Lives on the Report page permanently rather
/// than in a modal.
#[derive(Debug, Clone)]
pub struct ReportFormState {
    pub focus_rating: u8,
    pub questions_text: String,
    pub notes: String,
    pub mood_index: usize,
    pub editing_field: usize, // 0 = rating, 1 = questions, 2 = mood, 3 = notes
    pub submitted_at: Option<Instant>,
}

impl ReportFormState {
    fn new() -> Self {
        Self {
            focus_rating: 5,
            questions_text: "0".to_string(),
            notes: String::new(),
            mood_index: 0,
            editing_field: 0,
            submitted_at: None,
        }
    }

    /// Whether the submitted confirmation flash is still showing
    pub fn flash_active(&self) -> bool {
        self.submitted_at
            .map(|at| at.elapsed().as_secs() < SUBMIT_FLASH_SECS)
            .unwrap_or(false)
    }
}

/// Main application state
pub struct AppState {
    pub lifecycle: Lifecycle,
    /// Logged-in operative; None shows the login gate
    pub user: Option<&'static User>,
    pub page: Page,
    pub ui_mode: UiMode,
    /// Cached collections, refreshed after every write-through
    pub tasks: Vec<Task>,
    pub reports: Vec<DailyReport>,
    pub timer: SessionTimer,
    pub login_form: LoginForm,
    pub task_form: Option<TaskFormState>,
    pub report_form: ReportFormState,
    /// Selection in the pending-task queue
    pub queue_index: usize,
    estimate_notified: bool,
}

impl AppState {
    pub fn new(lifecycle: Lifecycle) -> Result<Self> {
        lifecycle.store().seed_if_empty()?;

        let mut app = Self {
            lifecycle,
            user: None,
            page: Page::Dashboard,
            ui_mode: UiMode::Normal,
            tasks: Vec::new(),
            reports: Vec::new(),
            timer: SessionTimer::new(),
            login_form: LoginForm::new(),
            task_form: None,
            report_form: ReportFormState::new(),
            queue_index: 0,
            estimate_notified: false,
        };

        // Auto-login when a session scalar survives from the last run
        if let Some(stored) = app.lifecycle.store().load_active_user() {
            if let Some(stored_user) = user::by_username(&stored) {
                app.user = Some(stored_user);
                app.refresh();
                app.resume_active();
            }
        }

        Ok(app)
    }

    /// Re-read both collections from the store (the sole source of truth)
    pub fn refresh(&mut self) {
        self.tasks = self.lifecycle.store().load_tasks();
        self.reports = self.lifecycle.store().load_reports();
        let pending = self.pending_tasks().len();
        if pending == 0 {
            self.queue_index = 0;
        } else if self.queue_index >= pending {
            self.queue_index = pending - 1;
        }
    }

    /// Bind the timer to a surviving In Progress task, seeding elapsed from
    /// its last checkpoint. A reload while "paused" resumes this way.
    fn resume_active(&mut self) {
        if let Some(task) = self.lifecycle.active_task() {
            self.timer.bind(&task.id, task.actual_duration);
            self.estimate_notified = false;
        }
    }

    // --- Login gate -------------------------------------------------------

    /// Attempt login with the gate's current selection and passcode. The
    /// core never sees credentials beyond this fixed-list check.
    pub fn try_login(&mut self) -> Result<()> {
        let candidate = &user::USERS[self.login_form.selected];
        if !user::check_passcode(candidate, &self.login_form.passcode) {
            self.login_form.error = Some("ACCESS DENIED: Invalid Credentials".to_string());
            self.login_form.passcode.clear();
            return Ok(());
        }

        self.lifecycle
            .store()
            .set_active_user(Some(candidate.username))?;
        self.user = Some(candidate);
        self.login_form = LoginForm::new();
        self.refresh();
        self.resume_active();
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        // Park progress; the task stays In Progress and resumes on the
        // next login exactly like a reload
        self.checkpoint_now()?;
        self.timer.clear();
        self.lifecycle.store().set_active_user(None)?;
        self.user = None;
        self.page = Page::Dashboard;
        self.ui_mode = UiMode::Normal;
        self.task_form = None;
        Ok(())
    }

    // --- Dashboard queries ------------------------------------------------

    pub fn active_task(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.status == TaskStatus::InProgress)
    }

    /// The logged-in user's Pending tasks, in stored order
    pub fn pending_tasks(&self) -> Vec<&Task> {
        let Some(user) = self.user else {
            return Vec::new();
        };
        self.tasks
            .iter()
            .filter(|t| t.user_id == user.id && t.status == TaskStatus::Pending)
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        let Some(user) = self.user else { return 0 };
        self.tasks
            .iter()
            .filter(|t| t.user_id == user.id && t.status == TaskStatus::Completed)
            .count()
    }

    pub fn queue_up(&mut self) {
        if self.queue_index > 0 {
            self.queue_index -= 1;
        }
    }

    pub fn queue_down(&mut self) {
        let pending = self.pending_tasks().len();
        if pending > 0 && self.queue_index < pending - 1 {
            self.queue_index += 1;
        }
    }

    // --- Lifecycle actions (all no-ops when rejected) ---------------------

    pub fn start_selected(&mut self) -> Result<()> {
        let Some(task_id) = self
            .pending_tasks()
            .get(self.queue_index)
            .map(|t| t.id.clone())
        else {
            return Ok(());
        };

        if let Some(started) = self.lifecycle.start_task(&task_id)?.applied() {
            self.timer.bind(&started.id, started.actual_duration);
            self.estimate_notified = false;
        }
        self.refresh();
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.timer.toggle_pause();
    }

    pub fn complete_active(&mut self) -> Result<()> {
        let Some(task_id) = self.timer.active_task_id().map(String::from) else {
            return Ok(());
        };
        let transition = self
            .lifecycle
            .complete_task(&task_id, self.timer.elapsed_secs())?;
        if let Some(task) = transition.applied() {
            notifications::notify_task_done(&task.name);
            self.timer.clear();
        }
        self.refresh();
        Ok(())
    }

    pub fn abort_active(&mut self) -> Result<()> {
        let Some(task_id) = self.timer.active_task_id().map(String::from) else {
            return Ok(());
        };
        if self
            .lifecycle
            .abort_task(&task_id, self.timer.elapsed_secs())?
            .applied()
            .is_some()
        {
            self.timer.clear();
        }
        self.refresh();
        Ok(())
    }

    /// Immediate durability write of the current elapsed count, used on
    /// quit and logout so at most the partial second is lost
    pub fn checkpoint_now(&mut self) -> Result<()> {
        if let Some(task_id) = self.timer.active_task_id().map(String::from) {
            self.lifecycle
                .checkpoint(&task_id, self.timer.elapsed_secs())?;
        }
        Ok(())
    }

    /// Advance the session timer from the event loop and act on whatever
    /// it emits: periodic checkpoints and the estimate-reached notice
    pub fn on_tick(&mut self, now: Instant) -> Result<()> {
        for signal in self.timer.poll(now) {
            if let TimerSignal::CheckpointDue { task_id, elapsed } = signal {
                self.lifecycle.checkpoint(&task_id, elapsed)?;
            }
        }

        if !self.estimate_notified {
            if let Some(task) = self.active_task() {
                if self.timer.elapsed_secs() >= task.estimated_seconds() {
                    notifications::notify_estimate_reached(&task.name);
                    self.estimate_notified = true;
                }
            }
        }
        Ok(())
    }

    // --- Task form --------------------------------------------------------

    pub fn open_task_form(&mut self) {
        self.task_form = Some(TaskFormState::new());
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn cancel_task_form(&mut self) {
        self.task_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Subjects offered to the logged-in user's form
    pub fn subject_choices(&self) -> &'static [Subject] {
        self.user.map(|u| u.target.subjects()).unwrap_or(&[])
    }

    pub fn submit_task_form(&mut self) -> Result<()> {
        let Some(user) = self.user else { return Ok(()) };
        let Some(form) = &self.task_form else {
            return Ok(());
        };

        let name = form.name.trim().to_string();
        let Ok(estimate) = form.estimate_text.trim().parse::<u64>() else {
            return Ok(()); // leave the form open for correction
        };
        if name.is_empty() || estimate == 0 {
            return Ok(());
        }
        let subjects = user.target.subjects();
        let subject = subjects[form.subject_index % subjects.len()];

        self.lifecycle.add_task(user, name, subject, estimate)?;
        self.refresh();
        self.cancel_task_form();
        Ok(())
    }

    // --- Daily report form ------------------------------------------------

    pub fn submit_report(&mut self) -> Result<()> {
        let Some(user) = self.user else { return Ok(()) };

        let questions = self
            .report_form
            .questions_text
            .trim()
            .parse::<u32>()
            .unwrap_or(0);
        let mood = MOODS[self.report_form.mood_index % MOODS.len()].to_string();
        let report = DailyReport::new(
            user.id,
            Local::now().date_naive(),
            self.report_form.focus_rating,
            questions,
            self.report_form.notes.clone(),
            mood,
        );

        self.lifecycle.store().upsert_report(&report)?;
        self.refresh();
        self.report_form.submitted_at = Some(Instant::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::RecordStore;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn app() -> (tempfile::TempDir, AppState) {
        let dir = tempdir().unwrap();
        let lifecycle = Lifecycle::new(RecordStore::new(dir.path()));
        let app = AppState::new(lifecycle).unwrap();
        (dir, app)
    }

    fn login_as(app: &mut AppState, index: usize) {
        app.login_form.selected = index;
        app.login_form.passcode = if index == 0 {
            "marvik123".to_string()
        } else {
            "friend123".to_string()
        };
        app.try_login().unwrap();
    }

    #[test]
    fn test_first_launch_seeds_store() {
        let (_dir, app) = app();
        assert_eq!(app.lifecycle.store().load_tasks().len(), 4);
    }

    #[test]
    fn test_login_rejects_bad_passcode() {
        let (_dir, mut app) = app();
        app.login_form.passcode = "wrong".to_string();
        app.try_login().unwrap();
        assert!(app.user.is_none());
        assert!(app.login_form.error.is_some());
        assert!(app.login_form.passcode.is_empty());
        assert!(app.lifecycle.store().load_active_user().is_none());
    }

    #[test]
    fn test_login_stores_session_and_loads_collections() {
        let (_dir, mut app) = app();
        login_as(&mut app, 0);
        assert_eq!(app.user.map(|u| u.username), Some("Marvik"));
        assert_eq!(
            app.lifecycle.store().load_active_user().as_deref(),
            Some("Marvik")
        );
        assert_eq!(app.tasks.len(), 4);
        assert_eq!(app.reports.len(), 2);
    }

    #[test]
    fn test_start_complete_through_app() {
        let (_dir, mut app) = app();
        login_as(&mut app, 0);

        app.open_task_form();
        {
            let form = app.task_form.as_mut().unwrap();
            form.name = "Thermo".to_string();
            form.subject_index = 0;
            form.estimate_text = "30".to_string();
        }
        app.submit_task_form().unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.pending_tasks().len(), 1);

        app.start_selected().unwrap();
        let active_id = app.active_task().unwrap().id.clone();
        assert_eq!(app.timer.active_task_id(), Some(active_id.as_str()));

        app.complete_active().unwrap();
        assert!(app.active_task().is_none());
        assert!(app.timer.active_task_id().is_none());
        let stored = app
            .lifecycle
            .store()
            .load_tasks()
            .into_iter()
            .find(|t| t.id == active_id)
            .unwrap();
        assert_eq!(stored.status, TaskStatus::Completed);
    }

    #[test]
    fn test_relogin_resumes_in_progress_task() {
        let (dir, mut app) = app();
        login_as(&mut app, 0);
        app.open_task_form();
        app.task_form.as_mut().unwrap().name = "Optics".to_string();
        app.submit_task_form().unwrap();
        app.start_selected().unwrap();
        let task_id = app.active_task().unwrap().id.clone();
        app.lifecycle.checkpoint(&task_id, 90).unwrap();
        drop(app);

        // Fresh process: session scalar survives, timer picks up at the
        // last checkpoint
        let lifecycle = Lifecycle::new(RecordStore::new(dir.path()));
        let app = AppState::new(lifecycle).unwrap();
        assert_eq!(app.user.map(|u| u.username), Some("Marvik"));
        assert_eq!(app.timer.active_task_id(), Some(task_id.as_str()));
        assert_eq!(app.timer.elapsed_secs(), 90);
    }

    #[test]
    fn test_submit_report_upserts_by_day() {
        let (_dir, mut app) = app();
        login_as(&mut app, 1);

        app.report_form.questions_text = "10".to_string();
        app.submit_report().unwrap();
        app.report_form.questions_text = "25".to_string();
        app.submit_report().unwrap();

        let today = Local::now().date_naive();
        let todays: Vec<_> = app
            .reports
            .iter()
            .filter(|r| r.user_id == "user_friend" && r.date == today)
            .collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].questions_solved, 25);
    }

    #[test]
    fn test_invalid_estimate_keeps_form_open() {
        let (_dir, mut app) = app();
        login_as(&mut app, 0);
        app.open_task_form();
        {
            let form = app.task_form.as_mut().unwrap();
            form.name = "Task".to_string();
            form.estimate_text = "abc".to_string();
        }
        app.submit_task_form().unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.task_form.is_some());
    }

    #[test]
    fn test_logout_parks_active_task() {
        let (_dir, mut app) = app();
        login_as(&mut app, 0);
        app.open_task_form();
        app.task_form.as_mut().unwrap().name = "Waves".to_string();
        app.submit_task_form().unwrap();
        app.start_selected().unwrap();

        app.logout().unwrap();
        assert!(app.user.is_none());
        assert!(app.timer.active_task_id().is_none());
        // Task remains In Progress in the store, like a reload
        assert!(app
            .lifecycle
            .store()
            .load_tasks()
            .iter()
            .any(|t| t.status == TaskStatus::InProgress));
    }
}
