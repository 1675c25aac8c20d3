use super::enums::{TimerMode, TimerState};
use super::state::AppState;

/// Every transition the state store accepts
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Prepend a new task; it becomes active if nothing is
    AddTask { title: String, total_sessions: u32 },
    SelectTask(String),
    SetTimerState(TimerState),
    /// Remaining seconds recomputed by the timer driver
    Tick(u32),
    /// Switch mode, reset the countdown and stop the timer
    SetMode(TimerMode),
    CompleteSession,
    CompleteTask(String),
    DeleteTask(String),
    /// Replace the whole state with an already-normalized snapshot
    LoadState(Box<AppState>),
}

impl Action {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddTask { .. } => "add_task",
            Action::SelectTask(_) => "select_task",
            Action::SetTimerState(_) => "set_timer_state",
            Action::Tick(_) => "tick",
            Action::SetMode(_) => "set_mode",
            Action::CompleteSession => "complete_session",
            Action::CompleteTask(_) => "complete_task",
            Action::DeleteTask(_) => "delete_task",
            Action::LoadState(_) => "load_state",
        }
    }
}
