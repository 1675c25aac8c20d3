pub mod action;
pub mod enums;
pub mod growth;
pub mod reducer;
pub mod state;
pub mod task;

pub use action::Action;
pub use enums::{TimerMode, TimerState, TreeStage, UiMode, View};
pub use growth::{stage_art, stage_glyph, tree_stage};
pub use reducer::reduce;
pub use state::{format_countdown, AppState};
pub use task::{local_date, DailyStat, Task};
