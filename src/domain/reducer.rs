use super::action::Action;
use super::enums::{TimerMode, TimerState};
use super::state::{AppState, FOCUS_SECS, POINTS_PER_SESSION, SESSIONS_PER_CYCLE};
use super::task::{date_key, Task};
use crate::env::Environment;

/// Apply one action to a state and return the next state
///
/// Total over its input: unknown ids and redundant transitions leave the
/// state unchanged. The only outside inputs are the clock and id source in `env`.
pub fn reduce(state: &AppState, action: Action, env: &dyn Environment) -> AppState {
    match action {
        Action::AddTask {
            title,
            total_sessions,
        } => {
            let task = Task::new(env.new_id(), title, total_sessions, env.now());
            let mut next = state.clone();
            if next.active_task_id.is_none() {
                next.active_task_id = Some(task.id.clone());
            }
            next.tasks.insert(0, task);
            next
        }

        Action::SelectTask(id) => {
            if state.find_task(&id).is_none() {
                return state.clone();
            }
            AppState {
                active_task_id: Some(id),
                ..state.clone()
            }
        }

        Action::SetTimerState(timer_state) => AppState {
            timer_state,
            ..state.clone()
        },

        Action::Tick(remaining) => AppState {
            time_left: remaining.min(state.timer_mode.duration_secs()),
            ..state.clone()
        },

        Action::SetMode(mode) => AppState {
            timer_mode: mode,
            time_left: mode.duration_secs(),
            timer_state: TimerState::Idle,
            ..state.clone()
        },

        Action::CompleteSession => complete_session(state, env),

        Action::CompleteTask(id) => {
            let mut next = state.clone();
            let now = env.now();
            if let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) {
                if !task.is_completed {
                    task.is_completed = true;
                    task.completed_at = Some(now);
                }
            }
            clear_active_if(&mut next, &id);
            next
        }

        Action::DeleteTask(id) => {
            let mut next = state.clone();
            next.tasks.retain(|t| t.id != id);
            clear_active_if(&mut next, &id);
            next
        }

        Action::LoadState(snapshot) => *snapshot,
    }
}

fn clear_active_if(state: &mut AppState, id: &str) {
    if state.active_task_id.as_deref() == Some(id) {
        state.active_task_id = None;
    }
}

/// Mode that follows a finished interval, and the new cycle counter
pub fn next_mode(finished: TimerMode, sessions_since_long_break: u32) -> (TimerMode, u32) {
    if finished != TimerMode::Focus {
        return (TimerMode::Focus, sessions_since_long_break);
    }

    let count = sessions_since_long_break + 1;
    if count >= SESSIONS_PER_CYCLE {
        (TimerMode::LongBreak, 0)
    } else {
        (TimerMode::ShortBreak, count)
    }
}

fn complete_session(state: &AppState, env: &dyn Environment) -> AppState {
    let mut next = state.clone();
    let is_focus = state.timer_mode == TimerMode::Focus;

    if is_focus {
        let today = date_key(env.now());
        let stat = next.daily_stats.entry(today).or_default();
        stat.sessions_completed = stat.sessions_completed.saturating_add(1);
        stat.growth_points = stat.growth_points.saturating_add(POINTS_PER_SESSION);
        stat.focus_time = stat.focus_time.saturating_add(u64::from(FOCUS_SECS));

        // No clamp against the target: working past the goal is recorded as-is.
        if let Some(active_id) = state.active_task_id.as_deref() {
            if let Some(task) = next.tasks.iter_mut().find(|t| t.id == active_id) {
                task.sessions_completed = task.sessions_completed.saturating_add(1);
            }
        }
    }

    let (mode, counter) = next_mode(state.timer_mode, state.sessions_since_long_break);
    next.timer_mode = mode;
    next.sessions_since_long_break = counter;
    next.time_left = mode.duration_secs();
    next.timer_state = TimerState::Idle;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::FixedEnvironment;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn test_env() -> FixedEnvironment {
        FixedEnvironment::new(Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap())
    }

    fn add(state: &AppState, env: &FixedEnvironment, title: &str, sessions: u32) -> AppState {
        reduce(
            state,
            Action::AddTask {
                title: title.to_string(),
                total_sessions: sessions,
            },
            env,
        )
    }

    #[test]
    fn test_add_task_prepends_and_activates_first() {
        let env = test_env();
        let state = add(&AppState::default(), &env, "First", 4);
        let state = add(&state, &env, "Second", 2);

        assert_eq!(state.tasks.len(), 2);
        assert_eq!(state.tasks[0].title, "Second");
        assert_eq!(state.tasks[1].title, "First");
        assert_eq!(state.active_task_id.as_deref(), Some("task-1"));
        assert_eq!(state.tasks[0].created_at, env.now());
        assert_eq!(state.tasks[0].sessions_completed, 0);
    }

    #[test]
    fn test_select_task() {
        let env = test_env();
        let state = add(&AppState::default(), &env, "A", 4);
        let state = add(&state, &env, "B", 4);

        let state = reduce(&state, Action::SelectTask("task-2".to_string()), &env);
        assert_eq!(state.active_task_id.as_deref(), Some("task-2"));

        let unchanged = reduce(&state, Action::SelectTask("nope".to_string()), &env);
        assert_eq!(unchanged, state);
    }

    #[test]
    fn test_set_timer_state_touches_nothing_else() {
        let env = test_env();
        let state = add(&AppState::default(), &env, "A", 4);
        let running = reduce(&state, Action::SetTimerState(TimerState::Running), &env);

        assert_eq!(running.timer_state, TimerState::Running);
        assert_eq!(
            AppState {
                timer_state: state.timer_state,
                ..running
            },
            state
        );
    }

    #[test]
    fn test_tick_sets_time_left_within_mode() {
        let env = test_env();
        let state = reduce(&AppState::default(), Action::Tick(1200), &env);
        assert_eq!(state.time_left, 1200);

        let state = reduce(&state, Action::Tick(9999), &env);
        assert_eq!(state.time_left, 1500);
    }

    #[test]
    fn test_set_mode_resets_and_stops() {
        let env = test_env();
        let mut state = AppState::default();
        state.timer_state = TimerState::Running;
        state.time_left = 100;

        let state = reduce(&state, Action::SetMode(TimerMode::LongBreak), &env);
        assert_eq!(state.timer_mode, TimerMode::LongBreak);
        assert_eq!(state.time_left, 1200);
        assert_eq!(state.timer_state, TimerState::Idle);
    }

    #[test]
    fn test_focus_completion_with_counter_below_three() {
        let env = test_env();
        let mut state = add(&AppState::default(), &env, "A", 4);
        state.sessions_since_long_break = 2;
        state.timer_state = TimerState::Running;

        let next = reduce(&state, Action::CompleteSession, &env);
        assert_eq!(next.timer_mode, TimerMode::ShortBreak);
        assert_eq!(next.sessions_since_long_break, 3);
        assert_eq!(next.time_left, 300);
        assert_eq!(next.timer_state, TimerState::Idle);
        assert_eq!(next.tasks[0].sessions_completed, 1);
    }

    #[test]
    fn test_focus_completion_at_counter_three_triggers_long_break() {
        let env = test_env();
        let mut state = AppState::default();
        state.sessions_since_long_break = 3;

        let next = reduce(&state, Action::CompleteSession, &env);
        assert_eq!(next.timer_mode, TimerMode::LongBreak);
        assert_eq!(next.sessions_since_long_break, 0);
        assert_eq!(next.time_left, 1200);
    }

    #[test]
    fn test_break_completion_returns_to_focus_without_stats() {
        let env = test_env();
        for mode in [TimerMode::ShortBreak, TimerMode::LongBreak] {
            for counter in 0..SESSIONS_PER_CYCLE {
                let mut state = add(&AppState::default(), &env, "A", 4);
                state.timer_mode = mode;
                state.sessions_since_long_break = counter;

                let next = reduce(&state, Action::CompleteSession, &env);
                assert_eq!(next.timer_mode, TimerMode::Focus);
                assert_eq!(next.time_left, 1500);
                assert_eq!(next.sessions_since_long_break, counter);
                assert_eq!(next.daily_stats, state.daily_stats);
                assert_eq!(next.tasks, state.tasks);
            }
        }
    }

    #[test]
    fn test_focus_completion_updates_daily_stat() {
        let env = test_env();
        let state = reduce(&AppState::default(), Action::CompleteSession, &env);
        let today = date_key(env.now());
        let stat = state.daily_stats[&today];
        assert_eq!(stat.sessions_completed, 1);
        assert_eq!(stat.growth_points, POINTS_PER_SESSION);
        assert_eq!(stat.focus_time, 1500);
    }

    #[test]
    fn test_focus_completion_saturates_loaded_counters() {
        let env = test_env();
        let mut state = add(&AppState::default(), &env, "Huge", 4);
        state.tasks[0].sessions_completed = u32::MAX;
        state.daily_stats.insert(
            date_key(env.now()),
            crate::domain::DailyStat {
                focus_time: u64::MAX,
                sessions_completed: u32::MAX,
                growth_points: u32::MAX - 5,
            },
        );

        let next = reduce(&state, Action::CompleteSession, &env);
        let stat = next.daily_stats[&date_key(env.now())];
        assert_eq!(stat.sessions_completed, u32::MAX);
        assert_eq!(stat.growth_points, u32::MAX);
        assert_eq!(stat.focus_time, u64::MAX);
        assert_eq!(next.tasks[0].sessions_completed, u32::MAX);
        assert_eq!(next.timer_mode, TimerMode::ShortBreak);
    }

    #[test]
    fn test_focus_completion_without_active_task() {
        let env = test_env();
        let mut state = add(&AppState::default(), &env, "A", 4);
        state.active_task_id = None;

        let next = reduce(&state, Action::CompleteSession, &env);
        assert_eq!(next.tasks[0].sessions_completed, 0);
        assert_eq!(next.daily_stats.len(), 1);
    }

    #[test]
    fn test_sessions_can_overshoot_target() {
        let env = test_env();
        let mut state = add(&AppState::default(), &env, "Small", 1);
        for _ in 0..3 {
            state = reduce(&state, Action::SetMode(TimerMode::Focus), &env);
            state = reduce(&state, Action::CompleteSession, &env);
        }
        assert_eq!(state.tasks[0].sessions_completed, 3);
        assert_eq!(state.tasks[0].total_sessions, 1);
        assert!(!state.tasks[0].is_completed);
    }

    #[test]
    fn test_complete_active_task_clears_selection() {
        let env = test_env();
        let state = add(&AppState::default(), &env, "A", 4);
        let next = reduce(&state, Action::CompleteTask("task-1".to_string()), &env);

        assert!(next.tasks[0].is_completed);
        assert_eq!(next.tasks[0].completed_at, Some(env.now()));
        assert!(next.active_task_id.is_none());
    }

    #[test]
    fn test_complete_other_task_keeps_selection() {
        let env = test_env();
        let state = add(&AppState::default(), &env, "A", 4);
        let state = add(&state, &env, "B", 4);
        let next = reduce(&state, Action::CompleteTask("task-2".to_string()), &env);

        assert_eq!(next.active_task_id.as_deref(), Some("task-1"));
        assert!(next.find_task("task-2").unwrap().is_completed);
    }

    #[test]
    fn test_complete_task_is_idempotent() {
        let env = test_env();
        let state = add(&AppState::default(), &env, "A", 4);
        let done = reduce(&state, Action::CompleteTask("task-1".to_string()), &env);
        let first_completed_at = done.tasks[0].completed_at;

        env.advance(chrono::Duration::hours(1));
        let again = reduce(&done, Action::CompleteTask("task-1".to_string()), &env);
        assert_eq!(again.tasks[0].completed_at, first_completed_at);

        let missing = reduce(&done, Action::CompleteTask("ghost".to_string()), &env);
        assert_eq!(missing, done);
    }

    #[test]
    fn test_delete_task() {
        let env = test_env();
        let state = add(&AppState::default(), &env, "A", 4);
        let state = add(&state, &env, "B", 4);

        let next = reduce(&state, Action::DeleteTask("task-2".to_string()), &env);
        assert_eq!(next.tasks.len(), 1);
        assert_eq!(next.active_task_id.as_deref(), Some("task-1"));

        let next = reduce(&next, Action::DeleteTask("task-1".to_string()), &env);
        assert!(next.tasks.is_empty());
        assert!(next.active_task_id.is_none());
    }

    #[test]
    fn test_load_state_replaces_everything() {
        let env = test_env();
        let mut snapshot = AppState::default();
        snapshot.timer_mode = TimerMode::ShortBreak;
        snapshot.time_left = 42;

        let current = add(&AppState::default(), &env, "A", 4);
        let next = reduce(&current, Action::LoadState(Box::new(snapshot.clone())), &env);
        assert_eq!(next, snapshot);
    }

    #[test]
    fn test_full_cycle_reaches_long_break() {
        let env = test_env();
        let mut state = add(&AppState::default(), &env, "Write report", 4);
        let mut modes = Vec::new();

        for _ in 0..4 {
            state = reduce(&state, Action::SetTimerState(TimerState::Running), &env);
            state = reduce(&state, Action::CompleteSession, &env);
            modes.push(state.timer_mode);
            if state.timer_mode == TimerMode::ShortBreak {
                state = reduce(&state, Action::CompleteSession, &env);
                assert_eq!(state.timer_mode, TimerMode::Focus);
            }
        }

        assert_eq!(
            modes,
            vec![
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::LongBreak
            ]
        );
        assert_eq!(state.sessions_since_long_break, 0);
        assert_eq!(state.time_left, 1200);
        assert_eq!(state.tasks[0].sessions_completed, 4);
        assert_eq!(state.daily_stats[&date_key(env.now())].sessions_completed, 4);
    }

    #[test]
    fn test_next_mode() {
        assert_eq!(next_mode(TimerMode::Focus, 0), (TimerMode::ShortBreak, 1));
        assert_eq!(next_mode(TimerMode::Focus, 3), (TimerMode::LongBreak, 0));
        assert_eq!(next_mode(TimerMode::ShortBreak, 2), (TimerMode::Focus, 2));
        assert_eq!(next_mode(TimerMode::LongBreak, 0), (TimerMode::Focus, 0));
    }
}
