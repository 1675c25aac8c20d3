use crate::domain::state::SESSIONS_PER_CYCLE;
use crate::domain::{AppState, DailyStat, Task, TimerMode, TimerState};
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Target given to tasks saved before targets existed
pub const DEFAULT_TOTAL_SESSIONS: u32 = 4;

/// Why a saved snapshot could not be used
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no saved state at {0}")]
    Missing(String),
    #[error("failed to read saved state: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved state is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of a task; every field may be absent in older snapshots
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawTask {
    id: Option<String>,
    title: Option<String>,
    total_sessions: Option<u32>,
    sessions_completed: Option<u32>,
    is_completed: Option<bool>,
    created_at: Option<i64>,
    completed_at: Option<i64>,
}

/// On-disk shape of the whole state
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSnapshot {
    tasks: Vec<RawTask>,
    active_task_id: Option<String>,
    timer_mode: Option<TimerMode>,
    timer_state: Option<TimerState>,
    time_left: Option<u32>,
    sessions_since_long_break: Option<u32>,
    daily_stats: BTreeMap<String, DailyStat>,
}

fn millis_to_utc(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

impl RawTask {
    /// Fill in defaults; tasks without an id cannot be referenced and are dropped
    fn into_task(self) -> Option<Task> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let total_sessions = match self.total_sessions {
            Some(n) if n > 0 => n,
            _ => DEFAULT_TOTAL_SESSIONS,
        };
        let completed_at = self.completed_at.and_then(millis_to_utc);
        // Without a creation time, the harvest time is the best known bound;
        // failing that the epoch marks the date as unknown.
        let created_at = self
            .created_at
            .and_then(millis_to_utc)
            .or(completed_at)
            .unwrap_or_default();

        Some(Task {
            id,
            title: self.title.unwrap_or_default(),
            total_sessions,
            sessions_completed: self.sessions_completed.unwrap_or(0),
            is_completed: self.is_completed.unwrap_or(false),
            created_at,
            completed_at,
        })
    }
}

/// Bring a snapshot of any older schema up to the current invariants
///
/// Every field added to the persisted state needs its default here.
fn migrate(raw: RawSnapshot) -> AppState {
    let defaults = AppState::default();

    let tasks: Vec<Task> = raw.tasks.into_iter().filter_map(RawTask::into_task).collect();

    // Only an open task can be active
    let active_task_id = raw
        .active_task_id
        .filter(|id| tasks.iter().any(|t| &t.id == id && !t.is_completed));

    let timer_mode = raw.timer_mode.unwrap_or(defaults.timer_mode);
    let time_left = raw
        .time_left
        .unwrap_or_else(|| timer_mode.duration_secs())
        .min(timer_mode.duration_secs());

    // The deadline is never saved, so a running timer comes back paused
    let timer_state = match raw.timer_state.unwrap_or(defaults.timer_state) {
        TimerState::Running => TimerState::Paused,
        other => other,
    };

    AppState {
        tasks,
        active_task_id,
        timer_mode,
        timer_state,
        time_left,
        sessions_since_long_break: raw.sessions_since_long_break.unwrap_or(0) % SESSIONS_PER_CYCLE,
        daily_stats: raw.daily_stats,
    }
}

/// Parse and migrate a snapshot from its JSON text
pub fn parse_snapshot(content: &str) -> Result<AppState, SnapshotError> {
    let raw: RawSnapshot = serde_json::from_str(content)?;
    Ok(migrate(raw))
}

/// Read and migrate the snapshot stored at `path`
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<AppState, SnapshotError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SnapshotError::Missing(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_snapshot(&content)
}

/// Load saved state, falling back to a fresh state on any problem
pub fn load_state<P: AsRef<Path>>(path: P) -> AppState {
    let path = path.as_ref();
    match read_snapshot(path) {
        Ok(state) => {
            tracing::info!(
                path = %path.display(),
                tasks = state.tasks.len(),
                days = state.daily_stats.len(),
                "Loaded saved state"
            );
            state
        }
        Err(SnapshotError::Missing(_)) => {
            tracing::info!(path = %path.display(), "No saved state, starting fresh");
            AppState::default()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Discarding unreadable saved state");
            AppState::default()
        }
    }
}

/// Serialize the full state and write it atomically
pub fn save_state<P: AsRef<Path>>(path: P, state: &AppState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
