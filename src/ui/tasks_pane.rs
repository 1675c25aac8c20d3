use crate::app::App;
use crate::domain::{stage_glyph, tree_stage, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, running_style, selected_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// One garden row: glyph, title, and session progress
fn task_line(task: &Task, is_active: bool, use_emoji: bool) -> Line<'static> {
    let stage = tree_stage(task.sessions_completed, task.total_sessions);
    let marker = if is_active { "▶ " } else { "  " };
    let progress = format!(
        "  {}/{} ({}%)",
        task.sessions_completed,
        task.total_sessions,
        task.progress_percent()
    );

    let title_style = if task.is_completed {
        done_style()
    } else if is_active {
        running_style()
    } else {
        default_style()
    };

    let mut spans = vec![
        Span::raw(marker),
        Span::raw(format!("{} ", stage_glyph(stage, use_emoji))),
        Span::styled(task.title.clone(), title_style),
        Span::styled(progress, hint_style()),
    ];
    if task.is_completed {
        spans.push(Span::styled("  harvested", done_style()));
    }
    Line::from(spans)
}

/// Render the garden: open tasks first, harvested tasks after
pub fn render_tasks_pane(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.task_rows();
    let open_count = app.state.open_tasks().count();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" Garden ({} growing) ", open_count),
            title_style(),
        ));

    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("  Nothing planted yet. Press a to plant a task.", hint_style()),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let active_id = app.state.active_task_id.as_deref();
    let mut items: Vec<ListItem> = Vec::with_capacity(rows.len() + 1);
    for (idx, task) in rows.iter().enumerate() {
        if idx == open_count && open_count > 0 {
            items.push(ListItem::new(Line::styled("  ── Harvested ──", hint_style())));
        }
        let line = task_line(task, active_id == Some(task.id.as_str()), app.use_emoji);
        let style = if idx == app.selected_index {
            selected_style()
        } else {
            default_style()
        };
        items.push(ListItem::new(line).style(style));
    }

    f.render_widget(List::new(items).block(block), area);
}
