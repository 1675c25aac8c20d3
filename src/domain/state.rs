use super::enums::{TimerMode, TimerState};
use super::task::{DailyStat, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Focus session length in seconds
pub const FOCUS_SECS: u32 = 25 * 60;
/// Short break length in seconds
pub const SHORT_BREAK_SECS: u32 = 5 * 60;
/// Long break length in seconds
pub const LONG_BREAK_SECS: u32 = 20 * 60;
/// Growth points earned per completed focus session
pub const POINTS_PER_SESSION: u32 = 10;
/// Focus sessions per cycle before a long break
pub const SESSIONS_PER_CYCLE: u32 = 4;

/// The whole application state, replaced wholesale on every transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Newest first
    pub tasks: Vec<Task>,
    pub active_task_id: Option<String>,
    pub timer_mode: TimerMode,
    pub timer_state: TimerState,
    /// Seconds left in the current interval
    pub time_left: u32,
    /// Focus sessions since the last long break, in `0..SESSIONS_PER_CYCLE`
    pub sessions_since_long_break: u32,
    /// Keyed by local `YYYY-MM-DD`
    pub daily_stats: BTreeMap<String, DailyStat>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            active_task_id: None,
            timer_mode: TimerMode::Focus,
            timer_state: TimerState::Idle,
            time_left: FOCUS_SECS,
            sessions_since_long_break: 0,
            daily_stats: BTreeMap::new(),
        }
    }
}

impl AppState {
    /// The task the timer is currently growing, if any
    pub fn active_task(&self) -> Option<&Task> {
        let id = self.active_task_id.as_deref()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks still being worked on, in list order
    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_completed)
    }

    /// Harvested tasks, in list order
    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_completed)
    }

    /// Fraction of the current interval already elapsed (0.0 to 1.0)
    pub fn interval_progress(&self) -> f64 {
        let total = self.timer_mode.duration_secs();
        if total == 0 {
            return 1.0;
        }
        let elapsed = total.saturating_sub(self.time_left);
        elapsed as f64 / total as f64
    }
}

/// Format seconds as a "MM:SS" countdown
pub fn format_countdown(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
