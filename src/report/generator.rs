use crate::domain::{local_date, stage_glyph, tree_stage, AppState};
use crate::persistence::{atomic_write, report_file};
use crate::report::stats::{calculate_global_stats, format_focus_time, recent_activity, stat_for};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Build the markdown daily report for `date`
pub fn render_report(state: &AppState, date: NaiveDate) -> String {
    let day = stat_for(state, date);
    let global = calculate_global_stats(state);

    let mut report = String::new();

    report.push_str(&format!("# Grove Report - {}\n\n", date));

    // Day Section
    report.push_str("## Today\n\n");
    report.push_str(&format!("- **Focus Sessions:** {}\n", day.sessions_completed));
    report.push_str(&format!("- **Focus Time:** {}\n", format_focus_time(day.focus_time)));
    report.push_str(&format!("- **Growth Points:** {}\n\n", day.growth_points));

    // All-time Section
    report.push_str("## All Time\n\n");
    report.push_str(&format!("- **Sessions:** {}\n", global.total_sessions));
    report.push_str(&format!("- **Total Focus:** {}\n", format_focus_time(global.total_focus_secs)));
    report.push_str(&format!("- **Trees Harvested:** {}\n", global.trees_harvested));
    report.push_str(&format!("- **Days Active:** {}\n", global.days_active));
    if let Some((best_date, sessions)) = &global.best_day {
        report.push_str(&format!("- **Best Day:** {} ({} sessions)\n", best_date, sessions));
    }
    report.push('\n');

    // Last 7 days
    report.push_str("## Last 7 Days\n\n");
    report.push_str("| Date | Sessions | Focus |\n");
    report.push_str("|------|----------|-------|\n");
    for activity in recent_activity(state, date, 7) {
        report.push_str(&format!(
            "| {} | {} | {} |\n",
            activity.date,
            activity.sessions,
            format_focus_time(activity.focus_secs)
        ));
    }
    report.push('\n');

    // Harvested on this date
    let harvested: Vec<_> = state
        .completed_tasks()
        .filter(|t| t.completed_at.map(local_date) == Some(date))
        .collect();
    if !harvested.is_empty() {
        report.push_str("## Harvested\n\n");
        for task in harvested {
            let stage = tree_stage(task.sessions_completed, task.total_sessions);
            report.push_str(&format!(
                "- [x] {} **{}** ({}/{} sessions, {})\n",
                stage_glyph(stage, true),
                task.title,
                task.sessions_completed,
                task.total_sessions,
                stage.name()
            ));
        }
        report.push('\n');
    }

    // Still growing
    let growing: Vec<_> = state.open_tasks().collect();
    if !growing.is_empty() {
        report.push_str("## Growing\n\n");
        for task in growing {
            let stage = tree_stage(task.sessions_completed, task.total_sessions);
            let marker = if state.active_task_id.as_deref() == Some(task.id.as_str()) {
                "▶"
            } else {
                " "
            };
            report.push_str(&format!(
                "- [{}] {} **{}** ({}/{} sessions, {}%)\n",
                marker,
                stage_glyph(stage, true),
                task.title,
                task.sessions_completed,
                task.total_sessions,
                task.progress_percent()
            ));
        }
        report.push('\n');
    }

    report
}

/// Write the daily report and return where it went
pub fn generate_report(
    state: &AppState,
    date: NaiveDate,
    grove_dir: &Path,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let output = output_path.unwrap_or_else(|| report_file(grove_dir, date));
    atomic_write(&output, &render_report(state, date))?;
    tracing::info!(path = %output.display(), %date, "Report written");
    Ok(output)
}
