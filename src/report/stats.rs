use crate::domain::{tree_stage, AppState, DailyStat, TreeStage};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// All-time statistics across every recorded day
#[derive(Debug, PartialEq)]
pub struct GlobalStats {
    pub total_sessions: u64,
    pub total_focus_secs: u64,
    pub total_growth_points: u64,
    /// Completed tasks
    pub trees_harvested: usize,
    /// Open tasks
    pub trees_growing: usize,
    pub days_active: usize,
    /// Day with the most focus sessions (earliest on ties)
    pub best_day: Option<(String, u32)>,
}

/// One bar of the recent-activity chart
#[derive(Debug, Clone, PartialEq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub focus_secs: u64,
    pub sessions: u32,
    /// Bar height, where one hour of focus fills the bar
    pub bar_percent: u16,
}

impl DayActivity {
    /// Single-letter weekday label
    pub fn label(&self) -> &'static str {
        match self.date.weekday() {
            Weekday::Mon => "M",
            Weekday::Tue => "T",
            Weekday::Wed => "W",
            Weekday::Thu => "T",
            Weekday::Fri => "F",
            Weekday::Sat => "S",
            Weekday::Sun => "S",
        }
    }
}

/// Calculate all-time statistics
pub fn calculate_global_stats(state: &AppState) -> GlobalStats {
    let mut total_sessions: u64 = 0;
    let mut total_focus_secs: u64 = 0;
    let mut total_growth_points: u64 = 0;
    let mut best_day: Option<(String, u32)> = None;

    for (date, stat) in &state.daily_stats {
        // Saved stats are untrusted; sums saturate instead of overflowing
        total_sessions = total_sessions.saturating_add(u64::from(stat.sessions_completed));
        total_focus_secs = total_focus_secs.saturating_add(stat.focus_time);
        total_growth_points = total_growth_points.saturating_add(u64::from(stat.growth_points));

        let is_better = match &best_day {
            Some((_, best)) => stat.sessions_completed > *best,
            None => stat.sessions_completed > 0,
        };
        if is_better {
            best_day = Some((date.clone(), stat.sessions_completed));
        }
    }

    GlobalStats {
        total_sessions,
        total_focus_secs,
        total_growth_points,
        trees_harvested: state.completed_tasks().count(),
        trees_growing: state.open_tasks().count(),
        days_active: state
            .daily_stats
            .values()
            .filter(|s| s.sessions_completed > 0)
            .count(),
        best_day,
    }
}

/// Stat for one date, zero if nothing was recorded
pub fn stat_for(state: &AppState, date: NaiveDate) -> DailyStat {
    let key = date.format("%Y-%m-%d").to_string();
    state.daily_stats.get(&key).copied().unwrap_or_default()
}

/// Activity for the `days` days ending with `today`, oldest first
pub fn recent_activity(state: &AppState, today: NaiveDate, days: usize) -> Vec<DayActivity> {
    (0..days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset as i64);
            let stat = stat_for(state, date);
            let bar_percent = ((stat.focus_time as f64 / 3600.0) * 100.0).min(100.0) as u16;
            DayActivity {
                date,
                focus_secs: stat.focus_time,
                sessions: stat.sessions_completed,
                bar_percent,
            }
        })
        .collect()
}

/// How many harvested trees reached each growth stage
pub fn forest_stage_counts(state: &AppState) -> Vec<(TreeStage, usize)> {
    let stages = [
        TreeStage::Seed,
        TreeStage::Sprout,
        TreeStage::Sapling,
        TreeStage::Young,
        TreeStage::Mature,
    ];
    stages
        .iter()
        .map(|stage| {
            let count = state
                .completed_tasks()
                .filter(|t| tree_stage(t.sessions_completed, t.total_sessions) == *stage)
                .count();
            (*stage, count)
        })
        .collect()
}

/// Format seconds as "Xh Ym"
pub fn format_focus_time(secs: u64) -> String {
    let total_minutes = (secs as f64 / 60.0).round() as u64;
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use chrono::Utc;

    fn stat(focus_time: u64, sessions: u32) -> DailyStat {
        DailyStat {
            focus_time,
            sessions_completed: sessions,
            growth_points: sessions * 10,
        }
    }

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        state.daily_stats.insert("2024-06-01".to_string(), stat(3000, 2));
        state.daily_stats.insert("2024-06-02".to_string(), stat(7500, 5));
        state.daily_stats.insert("2024-06-03".to_string(), stat(1500, 1));

        let mut done = Task::new("a".to_string(), "Done".to_string(), 4, Utc::now());
        done.sessions_completed = 4;
        done.is_completed = true;
        let mut early = Task::new("b".to_string(), "Early".to_string(), 4, Utc::now());
        early.sessions_completed = 1;
        early.is_completed = true;
        let open = Task::new("c".to_string(), "Open".to_string(), 2, Utc::now());
        state.tasks = vec![done, early, open];
        state
    }

    #[test]
    fn test_global_stats() {
        let stats = calculate_global_stats(&sample_state());
        assert_eq!(stats.total_sessions, 8);
        assert_eq!(stats.total_focus_secs, 12000);
        assert_eq!(stats.total_growth_points, 80);
        assert_eq!(stats.trees_harvested, 2);
        assert_eq!(stats.trees_growing, 1);
        assert_eq!(stats.days_active, 3);
        assert_eq!(stats.best_day, Some(("2024-06-02".to_string(), 5)));
    }

    #[test]
    fn test_global_stats_huge_saved_values_do_not_overflow() {
        let json = r#"{ "dailyStats": {
            "2024-06-01": { "focusTime": 1500, "sessionsCompleted": 4000000000, "growthPoints": 4000000000 },
            "2024-06-02": { "focusTime": 1500, "sessionsCompleted": 4000000000, "growthPoints": 4000000000 }
        } }"#;
        let state = crate::persistence::snapshot::parse_snapshot(json).unwrap();

        let stats = calculate_global_stats(&state);
        assert_eq!(stats.total_sessions, 8_000_000_000);
        assert_eq!(stats.total_growth_points, 8_000_000_000);
        assert_eq!(stats.total_focus_secs, 3000);
        assert_eq!(stats.days_active, 2);
    }

    #[test]
    fn test_global_stats_empty() {
        let stats = calculate_global_stats(&AppState::default());
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.best_day, None);
    }

    #[test]
    fn test_recent_activity() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let days = recent_activity(&sample_state(), today, 7);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 5, 28).unwrap());
        assert_eq!(days[6].date, today);
        assert_eq!(days[0].bar_percent, 0);
        // 3000s is 83% of an hour; 7500s caps at 100
        assert_eq!(days[4].bar_percent, 83);
        assert_eq!(days[5].bar_percent, 100);
        assert_eq!(days[6].sessions, 1);
        assert_eq!(days[6].label(), "M");
    }

    #[test]
    fn test_forest_stage_counts() {
        let counts = forest_stage_counts(&sample_state());
        assert_eq!(counts[1], (TreeStage::Sprout, 1));
        assert_eq!(counts[4], (TreeStage::Mature, 1));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 2);
    }

    #[test]
    fn test_format_focus_time() {
        assert_eq!(format_focus_time(0), "0h 0m");
        assert_eq!(format_focus_time(1500), "0h 25m");
        assert_eq!(format_focus_time(12000), "3h 20m");
    }
}
