use crate::app::{App, MAX_FORM_SESSIONS};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_line(value: String, editing: bool) -> Line<'static> {
    Line::from(vec![
        Span::raw("> "),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}

/// Render the plant-a-task form
pub fn render_input_form(f: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let title_label = if form.editing_field == 0 {
        "Task: (editing)"
    } else {
        "Task:"
    };
    let sessions_label = if form.editing_field == 1 {
        format!("Sessions (1-{}): (editing)", MAX_FORM_SESSIONS)
    } else {
        format!("Sessions (1-{}):", MAX_FORM_SESSIONS)
    };
    let sessions_value = if form.sessions == 0 {
        String::new()
    } else {
        form.sessions.to_string()
    };

    let lines = vec![
        Line::raw(""),
        Line::raw(title_label),
        field_line(form.title.clone(), form.editing_field == 0),
        Line::raw(""),
        Line::raw(sessions_label),
        field_line(sessions_value, form.editing_field == 1),
        Line::raw(""),
        Line::styled(
            "Tab switch field  ·  ↑/↓ sessions  ·  Enter plant  ·  Esc cancel",
            hint_style(),
        ),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Plant a Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
