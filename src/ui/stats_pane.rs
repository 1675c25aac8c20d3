use crate::app::App;
use crate::report::stats::stat_for;
use crate::report::{calculate_global_stats, format_focus_time, recent_activity};
use crate::ui::layout::split_stats_area;
use crate::ui::styles::{border_style, default_style, hint_style, plant_style, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

/// Days shown in the activity chart
const CHART_DAYS: usize = 7;

fn render_card(f: &mut Frame, area: Rect, label: &str, value: String, detail: String) {
    let lines = vec![
        Line::raw(""),
        Line::styled(value, title_style()),
        Line::styled(detail, hint_style()),
    ];
    let card = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(format!(" {} ", label), default_style())),
    );
    f.render_widget(card, area);
}

/// Render the insights view: summary cards and the last week of focus
pub fn render_stats_pane(f: &mut Frame, app: &App, area: Rect) {
    let (cards_area, chart_area) = split_stats_area(area);
    let global = calculate_global_stats(&app.state);
    let today = stat_for(&app.state, app.today());

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(cards_area);

    render_card(
        f,
        cards[0],
        "Today",
        format_focus_time(today.focus_time),
        format!("{} sessions", today.sessions_completed),
    );
    render_card(
        f,
        cards[1],
        "Growth",
        format!("{} pts", today.growth_points),
        format!("{} all time", global.total_growth_points),
    );
    render_card(
        f,
        cards[2],
        "All Time",
        format_focus_time(global.total_focus_secs),
        format!(
            "{} sessions · {} days",
            global.total_sessions, global.days_active
        ),
    );
    render_card(
        f,
        cards[3],
        "Trees",
        format!("{} harvested", global.trees_harvested),
        format!("{} growing", global.trees_growing),
    );

    let activity = recent_activity(&app.state, app.today(), CHART_DAYS);
    let data: Vec<(&str, u64)> = activity
        .iter()
        .map(|day| (day.label(), day.bar_percent as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(
                    " Last 7 Days (1h fills a bar) ",
                    title_style(),
                )),
        )
        .data(data.as_slice())
        .max(100)
        .bar_width(5)
        .bar_gap(2)
        .bar_style(plant_style())
        .value_style(hint_style());
    f.render_widget(chart, chart_area);
}
