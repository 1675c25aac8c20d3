use serde::{Deserialize, Serialize};

/// Which kind of interval the timer is counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerMode {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    /// Fixed length of this mode in seconds
    pub fn duration_secs(&self) -> u32 {
        match self {
            Self::Focus => super::state::FOCUS_SECS,
            Self::ShortBreak => super::state::SHORT_BREAK_SECS,
            Self::LongBreak => super::state::LONG_BREAK_SECS,
        }
    }

    /// Display name for this mode
    pub fn name(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Contextual phrase shown under the countdown
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Focus => "Stay with it, the tree is growing",
            Self::ShortBreak => "Breathe and reset",
            Self::LongBreak => "A longer rest, you earned it",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Self::Focus)
    }
}

/// Run state of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Five-level growth ordinal derived from a task's session ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreeStage {
    Seed,
    Sprout,
    Sapling,
    Young,
    Mature,
}

impl TreeStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seed => "SEED",
            Self::Sprout => "SPROUT",
            Self::Sapling => "SAPLING",
            Self::Young => "YOUNG",
            Self::Mature => "MATURE",
        }
    }
}

/// The four navigable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Timer,
    Tasks,
    Forest,
    Stats,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Timer => "Timer",
            View::Tasks => "Garden",
            View::Forest => "Forest",
            View::Stats => "Insights",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::Timer, View::Tasks, View::Forest, View::Stats]
    }

    pub fn next(&self) -> View {
        match self {
            View::Timer => View::Tasks,
            View::Tasks => View::Forest,
            View::Forest => View::Stats,
            View::Stats => View::Timer,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_durations() {
        assert_eq!(TimerMode::Focus.duration_secs(), 1500);
        assert_eq!(TimerMode::ShortBreak.duration_secs(), 300);
        assert_eq!(TimerMode::LongBreak.duration_secs(), 1200);
    }

    #[test]
    fn test_timer_state_wire_names() {
        let json = serde_json::to_string(&TimerState::Running).unwrap();
        assert_eq!(json, "\"RUNNING\"");
        assert!(serde_json::from_str::<TimerState>("\"STOPPED\"").is_err());
    }

    #[test]
    fn test_mode_wire_names() {
        let json = serde_json::to_string(&TimerMode::ShortBreak).unwrap();
        assert_eq!(json, "\"SHORT_BREAK\"");
        let mode: TimerMode = serde_json::from_str("\"LONG_BREAK\"").unwrap();
        assert_eq!(mode, TimerMode::LongBreak);
    }

    #[test]
    fn test_view_cycle() {
        let mut view = View::Timer;
        for _ in 0..View::all().len() {
            view = view.next();
        }
        assert_eq!(view, View::Timer);
    }

    #[test]
    fn test_tree_stage_ordering() {
        assert!(TreeStage::Seed < TreeStage::Sprout);
        assert!(TreeStage::Young < TreeStage::Mature);
    }
}
