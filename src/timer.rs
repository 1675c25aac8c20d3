use crate::domain::{Action, AppState, TimerState};
use chrono::{DateTime, Duration, Utc};

/// Turns wall-clock time into `Tick` and `CompleteSession` actions
///
/// Remaining time is always recomputed from an absolute deadline, so a
/// slow or irregular host loop (or a suspended process) never drifts.
/// The deadline is the driver's only state and is never persisted.
#[derive(Debug, Default)]
pub struct TimerDriver {
    deadline: Option<DateTime<Utc>>,
}

impl TimerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the running interval ends, if one is being tracked
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// One scheduling opportunity: returns the action to dispatch, if any
    pub fn poll(&mut self, state: &AppState, now: DateTime<Utc>) -> Option<Action> {
        if state.timer_state != TimerState::Running {
            self.deadline = None;
            return None;
        }

        let deadline = *self
            .deadline
            .get_or_insert_with(|| now + Duration::seconds(i64::from(state.time_left)));

        let remaining = remaining_secs(deadline, now);
        if remaining <= 0 {
            // Cleared so the next run starts fresh from the new mode's time_left
            self.deadline = None;
            return Some(Action::CompleteSession);
        }

        let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
        if remaining != state.time_left {
            Some(Action::Tick(remaining))
        } else {
            None
        }
    }

    /// Sync with a freshly dispatched state: leaving RUNNING drops the deadline
    pub fn observe(&mut self, state: &AppState) {
        if state.timer_state != TimerState::Running {
            self.deadline = None;
        }
    }

    /// Drop any pending deadline (host loop is shutting down)
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Whole seconds until `deadline`, rounded up
pub fn remaining_secs(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (deadline - now).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms + 999) / 1000
}
