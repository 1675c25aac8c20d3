pub mod generator;
pub mod stats;

pub use generator::generate_report;
pub use stats::{calculate_global_stats, format_focus_time, forest_stage_counts, recent_activity};
