use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task the user grows a tree for, one focus session at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID
    pub id: String,
    /// Task title
    pub title: String,
    /// Target number of focus sessions
    pub total_sessions: u32,
    /// Focus sessions completed so far (may exceed the target)
    pub sessions_completed: u32,
    /// Whether the task has been harvested
    pub is_completed: bool,
    /// When the task was created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// When the task was harvested
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: String, title: String, total_sessions: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            total_sessions,
            sessions_completed: 0,
            is_completed: false,
            created_at,
            completed_at: None,
        }
    }

    /// Progress as a percentage, uncapped (110 means one session past the goal)
    pub fn progress_percent(&self) -> u32 {
        if self.total_sessions == 0 {
            return 0;
        }
        ((self.sessions_completed as f64 / self.total_sessions as f64) * 100.0).round() as u32
    }
}

/// Aggregate of one calendar day's focus work
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyStat {
    /// Seconds of completed focus sessions
    pub focus_time: u64,
    pub sessions_completed: u32,
    pub growth_points: u32,
}

/// Local calendar date of an instant, as the `YYYY-MM-DD` key used for daily stats
pub fn date_key(at: DateTime<Utc>) -> String {
    local_date(at).format("%Y-%m-%d").to_string()
}

/// Local calendar date of an instant
pub fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_task() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let task = Task::new("t1".to_string(), "Write report".to_string(), 4, now);
        assert_eq!(task.sessions_completed, 0);
        assert!(!task.is_completed);
        assert!(task.completed_at.is_none());
        assert_eq!(task.created_at, now);
    }

    #[test]
    fn test_progress_percent() {
        let now = Utc::now();
        let mut task = Task::new("t1".to_string(), "Read".to_string(), 4, now);
        assert_eq!(task.progress_percent(), 0);
        task.sessions_completed = 2;
        assert_eq!(task.progress_percent(), 50);
        task.sessions_completed = 5;
        assert_eq!(task.progress_percent(), 125);
        task.total_sessions = 0;
        assert_eq!(task.progress_percent(), 0);
    }

    #[test]
    fn test_task_json_uses_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let task = Task::new("abc".to_string(), "Plant".to_string(), 3, now);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_123i64);
        assert_eq!(json["totalSessions"], 3);
        assert!(json.get("completedAt").is_none());
    }

    #[test]
    fn test_date_key_format() {
        let key = date_key(Utc::now());
        assert_eq!(key.len(), 10);
        assert_eq!(key.chars().nth(4), Some('-'));
        assert_eq!(key.chars().nth(7), Some('-'));
    }
}
