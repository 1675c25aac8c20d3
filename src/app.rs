use crate::domain::{reduce, Action, AppState, Task, TimerMode, TimerState, UiMode, View};
use crate::env::{Environment, SystemEnvironment};
use crate::notifications;
use crate::persistence::{load_state, save_state};
use crate::timer::TimerDriver;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Session target pre-filled in the add form
pub const DEFAULT_FORM_SESSIONS: u32 = 4;
/// Largest session target the add form accepts
pub const MAX_FORM_SESSIONS: u32 = 20;

/// Input form state for planting a new task
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub title: String,
    pub sessions: u32,
    pub editing_field: usize, // 0 = title, 1 = sessions
}

impl Default for InputFormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            sessions: DEFAULT_FORM_SESSIONS,
            editing_field: 0,
        }
    }
}

/// Main application: the state store plus what the terminal UI needs
///
/// All transitions go through `dispatch`, which runs the reducer, keeps the
/// timer driver in sync and saves the new state.
pub struct App {
    pub state: AppState,
    env: Rc<dyn Environment>,
    driver: TimerDriver,
    state_path: PathBuf,
    pub view: View,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// Row in the garden list (open tasks first, then harvested)
    pub selected_index: usize,
    pub use_emoji: bool,
}

impl App {
    /// Load saved state from `state_path` using the system clock
    pub fn new(state_path: PathBuf) -> Self {
        Self::with_env(state_path, Rc::new(SystemEnvironment))
    }

    pub fn with_env(state_path: PathBuf, env: Rc<dyn Environment>) -> Self {
        let mut app = Self {
            state: AppState::default(),
            env,
            driver: TimerDriver::new(),
            state_path,
            view: View::Timer,
            ui_mode: UiMode::Normal,
            input_form: None,
            selected_index: 0,
            use_emoji: true,
        };

        let saved = load_state(&app.state_path);
        app.dispatch(Action::LoadState(Box::new(saved)));
        app
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Apply an action, then save. Save failures are logged and never propagate.
    pub fn dispatch(&mut self, action: Action) {
        if !matches!(action, Action::Tick(_)) {
            tracing::debug!(action = action.kind(), "Dispatch");
        }

        self.state = reduce(&self.state, action, self.env.as_ref());
        self.driver.observe(&self.state);
        self.clamp_selection();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = save_state(&self.state_path, &self.state) {
            tracing::warn!(path = %self.state_path.display(), error = %e, "Failed to save state");
        }
    }

    /// One host-loop iteration: let the driver turn elapsed time into actions
    pub fn tick(&mut self) {
        let now = self.env.now();
        if let Some(action) = self.driver.poll(&self.state, now) {
            let finished = self.state.timer_mode;
            let completed = action == Action::CompleteSession;
            self.dispatch(action);

            if completed {
                tracing::info!(
                    finished = finished.name(),
                    next = self.state.timer_mode.name(),
                    "Session complete"
                );
                notifications::notify_session_complete(finished, self.state.timer_mode);
            }
        }
    }

    /// Start, pause or resume the countdown
    pub fn toggle_timer(&mut self) {
        let next = match self.state.timer_state {
            TimerState::Running => TimerState::Paused,
            TimerState::Idle | TimerState::Paused => TimerState::Running,
        };
        self.dispatch(Action::SetTimerState(next));
    }

    /// Restart the current mode from its full duration
    pub fn reset_timer(&mut self) {
        self.dispatch(Action::SetMode(self.state.timer_mode));
    }

    /// Finish the current interval now
    pub fn complete_early(&mut self) {
        self.dispatch(Action::CompleteSession);
    }

    pub fn set_mode(&mut self, mode: TimerMode) {
        self.dispatch(Action::SetMode(mode));
    }

    /// Wall-clock time the running interval ends, if the driver has armed one
    pub fn session_deadline(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.driver.deadline()
    }

    /// Pause a running timer and cancel the driver before the host loop exits
    pub fn shutdown(&mut self) {
        if self.state.timer_state == TimerState::Running {
            self.dispatch(Action::SetTimerState(TimerState::Paused));
        }
        self.driver.cancel();
    }

    /// Add a task; blank titles are ignored and the target is clamped
    pub fn add_task(&mut self, title: &str, total_sessions: u32) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        self.dispatch(Action::AddTask {
            title: title.to_string(),
            total_sessions: total_sessions.clamp(1, MAX_FORM_SESSIONS),
        });
        true
    }

    /// Garden rows: open tasks first, then harvested ones
    pub fn task_rows(&self) -> Vec<&Task> {
        self.state
            .open_tasks()
            .chain(self.state.completed_tasks())
            .collect()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.task_rows().get(self.selected_index).copied()
    }

    fn selected_task_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.task_rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.task_rows().len() {
            self.selected_index += 1;
        }
    }

    /// Focus the selected task and jump to the timer
    pub fn focus_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if task.is_completed {
            return;
        }
        let id = task.id.clone();
        self.dispatch(Action::SelectTask(id));
        self.view = View::Timer;
    }

    /// Harvest the selected task
    pub fn complete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Action::CompleteTask(id));
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.dispatch(Action::DeleteTask(id));
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn next_view(&mut self) {
        self.view = self.view.next();
    }

    /// Open the plant-a-task form
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Toggle between the title and sessions fields
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    /// Add character to the current field; the sessions field only takes digits
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.title.push(c),
                1 => {
                    if let Some(digit) = c.to_digit(10) {
                        form.sessions = (form.sessions * 10 + digit).min(MAX_FORM_SESSIONS);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => {
                    form.title.pop();
                }
                1 => form.sessions /= 10,
                _ => {}
            }
        }
    }

    /// Step the session target up or down by one
    pub fn input_form_adjust_sessions(&mut self, delta: i32) {
        if let Some(form) = &mut self.input_form {
            let next = form.sessions as i32 + delta;
            form.sessions = next.clamp(1, MAX_FORM_SESSIONS as i32) as u32;
        }
    }

    /// Submit the form; an empty title keeps the form open
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        if self.add_task(&form.title, form.sessions) {
            self.ui_mode = UiMode::Normal;
        } else {
            self.input_form = Some(form);
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Today's local date according to the app clock
    pub fn today(&self) -> chrono::NaiveDate {
        crate::domain::local_date(self.env.now())
    }
}
