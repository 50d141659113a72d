use crate::domain::{Subject, Task, TaskStatus, User};
use crate::persistence::RecordStore;
use anyhow::Result;
use chrono::Utc;
use thiserror::Error;

/// Why a lifecycle operation did not apply. The UI boundary treats every
/// rejection as a silent no-op; the reason exists for tests and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Reject {
    #[error("another task is already in progress")]
    AlreadyActive,
    #[error("task is not pending")]
    NotPending,
    #[error("task is not in progress")]
    NotInProgress,
    #[error("no task with that id")]
    UnknownTask,
    #[error("subject is not offered for this exam track")]
    SubjectNotAllowed,
}

/// Outcome of a transition attempt. Rejections never corrupt state: the
/// store is only written on the Applied path.
#[derive(Debug, Clone)]
pub enum Transition {
    Applied(Task),
    Rejected(Reject),
}

impl Transition {
    pub fn applied(&self) -> Option<&Task> {
        match self {
            Transition::Applied(task) => Some(task),
            Transition::Rejected(_) => None,
        }
    }

    #[cfg(test)]
    pub fn rejected(&self) -> Option<Reject> {
        match self {
            Transition::Applied(_) => None,
            Transition::Rejected(reason) => Some(*reason),
        }
    }
}

/// Owns the task state machine: creation, start, progress checkpointing,
/// completion, abort. Enforces the global single-active-task invariant by
/// checking the store itself, so the invariant survives reloads.
///
/// Persistence calls are synchronous write-throughs; a write failure is
/// fatal to the operation (no retry, no rollback needed since the
/// collection is rewritten whole).
#[derive(Debug, Clone)]
pub struct Lifecycle {
    store: RecordStore,
}

impl Lifecycle {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The single task, if any, currently In Progress - across both users
    pub fn active_task(&self) -> Option<Task> {
        self.store
            .load_tasks()
            .into_iter()
            .find(|t| t.status == TaskStatus::InProgress)
    }

    /// Construct and persist a fresh Pending task. Rejects a subject the
    /// owner's exam track does not offer.
    pub fn add_task(
        &self,
        user: &User,
        name: String,
        subject: Subject,
        estimated_minutes: u64,
    ) -> Result<Transition> {
        if !user.allows_subject(subject) {
            return Ok(Transition::Rejected(Reject::SubjectNotAllowed));
        }
        let task = Task::new(user.id, name, subject, estimated_minutes);
        self.store.upsert_task(&task)?;
        Ok(Transition::Applied(task))
    }

    /// Pending → InProgress. Rejected while any task is active, so at most
    /// one task is ever In Progress store-wide.
    pub fn start_task(&self, task_id: &str) -> Result<Transition> {
        let tasks = self.store.load_tasks();
        if tasks.iter().any(|t| t.status == TaskStatus::InProgress) {
            return Ok(Transition::Rejected(Reject::AlreadyActive));
        }
        let Some(mut task) = tasks.into_iter().find(|t| t.id == task_id) else {
            return Ok(Transition::Rejected(Reject::UnknownTask));
        };
        if task.status != TaskStatus::Pending {
            return Ok(Transition::Rejected(Reject::NotPending));
        }

        task.status = TaskStatus::InProgress;
        task.start_time = Some(Utc::now().timestamp_millis());
        self.store.upsert_task(&task)?;
        Ok(Transition::Applied(task))
    }

    /// Periodic durability write of in-progress elapsed time. Safe to call
    /// repeatedly; clamped so actualDuration never decreases while active.
    pub fn checkpoint(&self, task_id: &str, elapsed_seconds: u64) -> Result<Transition> {
        self.finish(task_id, elapsed_seconds, None)
    }

    /// InProgress → Completed. Stamps end time.
    pub fn complete_task(&self, task_id: &str, final_elapsed_seconds: u64) -> Result<Transition> {
        self.finish(task_id, final_elapsed_seconds, Some(TaskStatus::Completed))
    }

    /// InProgress → Aborted. No end time is recorded; that distinguishes an
    /// abort from a completion.
    pub fn abort_task(&self, task_id: &str, final_elapsed_seconds: u64) -> Result<Transition> {
        self.finish(task_id, final_elapsed_seconds, Some(TaskStatus::Aborted))
    }

    fn finish(
        &self,
        task_id: &str,
        elapsed_seconds: u64,
        terminal: Option<TaskStatus>,
    ) -> Result<Transition> {
        let Some(mut task) = self
            .store
            .load_tasks()
            .into_iter()
            .find(|t| t.id == task_id)
        else {
            return Ok(Transition::Rejected(Reject::UnknownTask));
        };
        if task.status != TaskStatus::InProgress {
            return Ok(Transition::Rejected(Reject::NotInProgress));
        }

        match terminal {
            None => {
                task.actual_duration = task.actual_duration.max(elapsed_seconds);
            }
            Some(status) => {
                task.actual_duration = elapsed_seconds;
                task.status = status;
                if status == TaskStatus::Completed {
                    task.end_time = Some(Utc::now().timestamp_millis());
                }
            }
        }
        self.store.upsert_task(&task)?;
        Ok(Transition::Applied(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::USERS;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn lifecycle() -> (tempfile::TempDir, Lifecycle) {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path());
        (dir, Lifecycle::new(store))
    }

    fn add(lc: &Lifecycle, user: &User, name: &str, subject: Subject) -> Task {
        lc.add_task(user, name.to_string(), subject, 60)
            .unwrap()
            .applied()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_add_task_rejects_off_track_subject() {
        let (_dir, lc) = lifecycle();
        // Marvik targets JEE; Biology is NEET-only
        let result = lc
            .add_task(&USERS[0], "Botany".into(), Subject::Biology, 30)
            .unwrap();
        assert_eq!(result.rejected(), Some(Reject::SubjectNotAllowed));
        assert!(lc.store().load_tasks().is_empty());
    }

    #[test]
    fn test_single_active_task_invariant() {
        let (_dir, lc) = lifecycle();
        let a = add(&lc, &USERS[0], "A", Subject::Physics);
        // Second user's task: the invariant is global, not per-user
        let b = add(&lc, &USERS[1], "B", Subject::Biology);

        assert!(lc.start_task(&a.id).unwrap().applied().is_some());
        let second = lc.start_task(&b.id).unwrap();
        assert_eq!(second.rejected(), Some(Reject::AlreadyActive));

        let in_progress: Vec<_> = lc
            .store()
            .load_tasks()
            .into_iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .collect();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id, a.id);
    }

    #[test]
    fn test_start_requires_pending() {
        let (_dir, lc) = lifecycle();
        let a = add(&lc, &USERS[0], "A", Subject::Physics);
        lc.start_task(&a.id).unwrap();
        lc.complete_task(&a.id, 10).unwrap();

        // Terminal task can't restart even with nothing active
        assert_eq!(
            lc.start_task(&a.id).unwrap().rejected(),
            Some(Reject::NotPending)
        );
        assert_eq!(
            lc.start_task("missing").unwrap().rejected(),
            Some(Reject::UnknownTask)
        );
    }

    #[test]
    fn test_checkpoint_is_monotone_and_last_write_wins() {
        let (_dir, lc) = lifecycle();
        let a = add(&lc, &USERS[0], "A", Subject::Physics);
        lc.start_task(&a.id).unwrap();

        lc.checkpoint(&a.id, 10).unwrap();
        lc.checkpoint(&a.id, 30).unwrap();
        assert_eq!(lc.store().load_tasks()[0].actual_duration, 30);

        // A stale, smaller checkpoint never decreases the stored value
        lc.checkpoint(&a.id, 20).unwrap();
        assert_eq!(lc.store().load_tasks()[0].actual_duration, 30);
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        let (_dir, lc) = lifecycle();
        let a = add(&lc, &USERS[0], "A", Subject::Physics);
        lc.start_task(&a.id).unwrap();
        lc.abort_task(&a.id, 25).unwrap();

        for attempt in [
            lc.checkpoint(&a.id, 99).unwrap(),
            lc.complete_task(&a.id, 99).unwrap(),
            lc.abort_task(&a.id, 99).unwrap(),
        ] {
            assert_eq!(attempt.rejected(), Some(Reject::NotInProgress));
        }

        let stored = &lc.store().load_tasks()[0];
        assert_eq!(stored.status, TaskStatus::Aborted);
        assert_eq!(stored.actual_duration, 25);
        assert!(stored.end_time.is_none());
    }

    #[test]
    fn test_complete_records_end_time_abort_does_not() {
        let (_dir, lc) = lifecycle();
        let a = add(&lc, &USERS[0], "A", Subject::Physics);
        let b = add(&lc, &USERS[0], "B", Subject::Chemistry);

        lc.start_task(&a.id).unwrap();
        lc.complete_task(&a.id, 42).unwrap();
        lc.start_task(&b.id).unwrap();
        lc.abort_task(&b.id, 7).unwrap();

        let tasks = lc.store().load_tasks();
        let done = tasks.iter().find(|t| t.id == a.id).unwrap();
        let dropped = tasks.iter().find(|t| t.id == b.id).unwrap();
        assert!(done.end_time.is_some());
        assert!(done.start_time.is_some());
        assert!(dropped.end_time.is_none());
    }

    #[test]
    fn test_mechanics_scenario() {
        // add Pending {Mechanics, Physics, 60m} → start → checkpoint 10 →
        // complete 42: Completed, actualDuration 42, end_time set, nothing
        // left In Progress for that user.
        let (_dir, lc) = lifecycle();
        let task = lc
            .add_task(&USERS[0], "Mechanics".into(), Subject::Physics, 60)
            .unwrap()
            .applied()
            .unwrap()
            .clone();
        assert_eq!(task.status, TaskStatus::Pending);

        lc.start_task(&task.id).unwrap();
        lc.checkpoint(&task.id, 10).unwrap();
        lc.complete_task(&task.id, 42).unwrap();

        let tasks = lc.store().load_tasks();
        let final_task = tasks.iter().find(|t| t.id == task.id).unwrap();
        assert_eq!(final_task.status, TaskStatus::Completed);
        assert_eq!(final_task.actual_duration, 42);
        assert!(final_task.end_time.is_some());
        assert!(!tasks
            .iter()
            .any(|t| t.user_id == USERS[0].id && t.status == TaskStatus::InProgress));
    }

    #[test]
    fn test_active_task_lookup() {
        let (_dir, lc) = lifecycle();
        assert!(lc.active_task().is_none());
        let a = add(&lc, &USERS[0], "A", Subject::Physics);
        lc.start_task(&a.id).unwrap();
        assert_eq!(lc.active_task().map(|t| t.id), Some(a.id.clone()));
        lc.complete_task(&a.id, 5).unwrap();
        assert!(lc.active_task().is_none());
    }
}
