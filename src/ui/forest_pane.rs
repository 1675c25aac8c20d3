use crate::app::App;
use crate::domain::{stage_glyph, tree_stage};
use crate::report::forest_stage_counts;
use crate::ui::styles::{border_style, default_style, hint_style, plant_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of one tree tile in the gallery
const TILE_WIDTH: usize = 18;

fn truncate(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        title.to_string()
    } else {
        let cut: String = title.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Render the forest: every harvested task as a tree, plus stage totals
pub fn render_forest_pane(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let harvested: Vec<_> = app.state.completed_tasks().collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" Forest ({} trees) ", harvested.len()),
            title_style(),
        ));

    let lines: Vec<Line> = if harvested.is_empty() {
        vec![
            Line::raw(""),
            Line::styled(
                "  Your forest is empty. Harvest a task to plant your first tree.",
                hint_style(),
            ),
        ]
    } else {
        let inner_width = area.width.saturating_sub(2) as usize;
        let per_row = (inner_width / TILE_WIDTH).max(1);
        harvested
            .chunks(per_row)
            .flat_map(|row| {
                let trees: Vec<Span> = row
                    .iter()
                    .map(|t| {
                        let stage = tree_stage(t.sessions_completed, t.total_sessions);
                        let glyph = stage_glyph(stage, app.use_emoji);
                        Span::styled(
                            format!("{:<width$}", format!("  {}", glyph), width = TILE_WIDTH),
                            plant_style(),
                        )
                    })
                    .collect();
                let titles: Vec<Span> = row
                    .iter()
                    .map(|t| {
                        Span::styled(
                            format!(
                                "{:<width$}",
                                truncate(&t.title, TILE_WIDTH - 2),
                                width = TILE_WIDTH
                            ),
                            default_style(),
                        )
                    })
                    .collect();
                vec![Line::from(trees), Line::from(titles), Line::raw("")]
            })
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let mut summary: Vec<Span> = Vec::new();
    for (stage, count) in forest_stage_counts(&app.state) {
        summary.push(Span::styled(
            format!("{} ", stage_glyph(stage, app.use_emoji)),
            plant_style(),
        ));
        summary.push(Span::raw(format!("{} {}   ", stage.name(), count)));
    }
    let totals = Paragraph::new(Line::from(summary))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style()),
        );
    f.render_widget(totals, chunks[1]);
}
