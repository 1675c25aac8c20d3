pub mod forest_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod stats_pane;
pub mod styles;
pub mod tasks_pane;
pub mod timer_pane;

use crate::app::App;
use crate::domain::{UiMode, View};
use forest_pane::render_forest_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::{layout::Rect, text::Line, widgets::Tabs, Frame};
use stats_pane::render_stats_pane;
use styles::{hint_style, tab_active_style};
use tasks_pane::render_tasks_pane;
use timer_pane::render_timer_pane;

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(i, view)| Line::raw(format!("{} {}", i + 1, view.title())))
        .collect();
    let selected = View::all()
        .iter()
        .position(|v| *v == app.view)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(hint_style())
        .highlight_style(tab_active_style())
        .divider("│");
    f.render_widget(tabs, area);
}

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &App) {
    let size = f.size();
    let layout = create_layout(size);

    render_tabs(f, app, layout.tabs_area);

    match app.view {
        View::Timer => render_timer_pane(f, app, layout.content_area),
        View::Tasks => render_tasks_pane(f, app, layout.content_area),
        View::Forest => render_forest_pane(f, app, layout.content_area),
        View::Stats => render_stats_pane(f, app, layout.content_area),
    }

    render_keybindings(f, app.view, layout.keybindings_area);

    if app.ui_mode == UiMode::AddingTask {
        render_input_form(f, app, size);
    }
}
