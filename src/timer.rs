use std::time::{Duration, Instant};

/// Event-loop poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// How often in-progress elapsed time is checkpointed to the store, in
/// elapsed seconds. An unexpected termination loses at most this much.
pub const CHECKPOINT_EVERY_SECS: u64 = 10;

/// Get the event-loop poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// What a one-second advance produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerSignal {
    /// Elapsed time advanced one second
    Ticked { elapsed: u64 },
    /// Elapsed time advanced and crossed a checkpoint boundary
    CheckpointDue { task_id: String, elapsed: u64 },
}

/// Per-second ticking counter bound to the single globally active task.
///
/// Pause is a local flag only: it stops advancement but is never persisted
/// as a task state. The wall-clock `poll` converts real elapsed time into
/// whole-second `advance_second` calls, so drift does not accumulate and
/// the advancement logic stays deterministic for tests.
#[derive(Debug)]
pub struct SessionTimer {
    active_task_id: Option<String>,
    paused: bool,
    elapsed_secs: u64,
    last_poll: Option<Instant>,
    carry: Duration,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self {
            active_task_id: None,
            paused: false,
            elapsed_secs: 0,
            last_poll: None,
            carry: Duration::ZERO,
        }
    }

    /// Bind to a task, seeding elapsed from its stored actualDuration so a
    /// task that previously accumulated time resumes rather than restarts.
    pub fn bind(&mut self, task_id: &str, stored_elapsed_secs: u64) {
        self.active_task_id = Some(task_id.to_string());
        self.elapsed_secs = stored_elapsed_secs;
        self.paused = false;
        self.last_poll = None;
        self.carry = Duration::ZERO;
    }

    /// Unbind and stop ticking. Idempotent; must be called on every path
    /// that clears the active task so no orphaned ticking survives.
    pub fn clear(&mut self) {
        self.active_task_id = None;
        self.paused = false;
        self.elapsed_secs = 0;
        self.last_poll = None;
        self.carry = Duration::ZERO;
    }

    pub fn active_task_id(&self) -> Option<&str> {
        self.active_task_id.as_deref()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.active_task_id.is_some() && !self.paused
    }

    /// Toggle the local paused flag. Resuming restarts wall-clock
    /// accumulation from now, so paused time never counts.
    pub fn toggle_pause(&mut self) {
        if self.active_task_id.is_none() {
            return;
        }
        self.paused = !self.paused;
        self.last_poll = None;
        self.carry = Duration::ZERO;
    }

    /// Advance exactly one second. Every `CHECKPOINT_EVERY_SECS` elapsed
    /// seconds the caller is told to checkpoint through the lifecycle
    /// manager.
    pub fn advance_second(&mut self) -> Option<TimerSignal> {
        let task_id = self.active_task_id.as_ref()?;
        if self.paused {
            return None;
        }
        self.elapsed_secs += 1;
        if self.elapsed_secs % CHECKPOINT_EVERY_SECS == 0 {
            Some(TimerSignal::CheckpointDue {
                task_id: task_id.clone(),
                elapsed: self.elapsed_secs,
            })
        } else {
            Some(TimerSignal::Ticked {
                elapsed: self.elapsed_secs,
            })
        }
    }

    /// Advance by however many whole seconds of wall clock have passed
    /// since the previous poll, carrying the sub-second remainder.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerSignal> {
        if !self.is_running() {
            return Vec::new();
        }

        let since = match self.last_poll {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        self.last_poll = Some(now);
        self.carry += since;

        let mut signals = Vec::new();
        while self.carry >= Duration::from_secs(1) {
            self.carry -= Duration::from_secs(1);
            if let Some(signal) = self.advance_second() {
                signals.push(signal);
            }
        }
        signals
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}
