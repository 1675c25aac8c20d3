use crate::domain::View;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the keys that work in a given view
pub fn hints_for(view: View) -> Vec<&'static str> {
    let mut hints = match view {
        View::Timer => vec![
            " Space start/pause   ",
            "r reset   ",
            "c complete   ",
            "f/s/l mode   ",
        ],
        View::Tasks => vec![
            " ↑/↓ select   ",
            "Enter focus   ",
            "a plant   ",
            "d harvest   ",
            "x delete   ",
        ],
        View::Forest | View::Stats => vec![" "],
    };
    hints.push("Tab/1-4 views   ");
    hints.push("q quit");
    hints
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, view: View, area: Rect) {
    let spans: Vec<Span> = hints_for(view).into_iter().map(Span::raw).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_view_can_quit() {
        for view in View::all() {
            let hints = hints_for(*view);
            assert_eq!(hints.last(), Some(&"q quit"));
        }
    }
}
