use crate::app::App;
use crate::domain::state::SESSIONS_PER_CYCLE;
use crate::domain::{format_countdown, stage_art, tree_stage, TimerState, TreeStage};
use crate::ui::layout::split_timer_area;
use crate::ui::styles::{
    border_style, default_style, gauge_style, hint_style, idle_style, paused_style, plant_style,
    running_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Status badge text and style for the timer state
fn state_badge(state: TimerState) -> (&'static str, Style) {
    match state {
        TimerState::Running => ("● RUNNING", running_style()),
        TimerState::Paused => ("❚❚ PAUSED", paused_style()),
        TimerState::Idle => ("○ READY", idle_style()),
    }
}

/// Dots showing progress through the 4-session cycle
pub fn cycle_dots(sessions_since_long_break: u32) -> String {
    (0..SESSIONS_PER_CYCLE)
        .map(|i| if i < sessions_since_long_break { '●' } else { '○' })
        .collect()
}

/// Render the home view: the active task's tree and the countdown
pub fn render_timer_pane(f: &mut Frame, app: &App, area: Rect) {
    let state = &app.state;
    let (tree_area, clock_area) = split_timer_area(area);

    let active = state.active_task();
    let stage = active
        .map(|t| tree_stage(t.sessions_completed, t.total_sessions))
        .unwrap_or(TreeStage::Seed);

    // Tree
    let mut tree_lines: Vec<Line> = stage_art(stage)
        .iter()
        .map(|row| Line::styled(*row, plant_style()))
        .collect();
    tree_lines.push(Line::raw(""));
    tree_lines.push(Line::styled(stage.name(), title_style()));

    let tree = Paragraph::new(tree_lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Your Tree ", title_style())),
    );
    f.render_widget(tree, tree_area);

    // Clock
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" {} ", state.timer_mode.name()),
            title_style(),
        ));
    let inner = block.inner(clock_area);
    f.render_widget(block, clock_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // countdown + badge
            Constraint::Length(1), // gauge
            Constraint::Min(0),    // task info
        ])
        .split(inner);

    let (badge, badge_style) = state_badge(state.timer_state);
    let badge_line = match app.session_deadline() {
        Some(deadline) => Line::from(vec![
            Span::styled(badge, badge_style),
            Span::styled(
                format!("  ends {}", deadline.with_timezone(&Local).format("%H:%M")),
                hint_style(),
            ),
        ]),
        None => Line::styled(badge, badge_style),
    };
    let countdown = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(format_countdown(state.time_left), default_style()),
        badge_line,
    ])
    .alignment(Alignment::Center);
    f.render_widget(countdown, rows[0]);

    let percent = (state.interval_progress() * 100.0).round().min(100.0) as u16;
    let gauge = Gauge::default()
        .gauge_style(gauge_style(state.timer_mode))
        .percent(percent)
        .label(format!("{}%", percent));
    f.render_widget(gauge, rows[1]);

    let mut info = vec![Line::raw("")];
    match active {
        Some(task) => {
            info.push(Line::from(vec![
                Span::styled("Growing: ", title_style()),
                Span::styled(task.title.clone(), default_style()),
            ]));
            info.push(Line::raw(format!(
                "Sessions: {}/{}",
                task.sessions_completed, task.total_sessions
            )));
        }
        None => {
            info.push(Line::styled(
                "No task selected. Plant one in the Garden (2).",
                hint_style(),
            ));
        }
    }
    info.push(Line::raw(format!(
        "Cycle: {}",
        cycle_dots(state.sessions_since_long_break)
    )));
    info.push(Line::raw(""));
    info.push(Line::styled(state.timer_mode.phrase(), hint_style()));

    f.render_widget(Paragraph::new(info).alignment(Alignment::Center), rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_dots() {
        assert_eq!(cycle_dots(0), "○○○○");
        assert_eq!(cycle_dots(3), "●●●○");
    }

    #[test]
    fn test_state_badge() {
        assert_eq!(state_badge(TimerState::Running).0, "● RUNNING");
        assert_eq!(state_badge(TimerState::Idle).0, "○ READY");
    }
}
