use crate::app::App;
use crate::domain::{TimerMode, UiMode, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
    }
}

/// Keys shared by every view, then the active view's own keys
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
        KeyCode::Tab => {
            app.next_view();
            return Ok(false);
        }
        KeyCode::Char('1') => {
            app.set_view(View::Timer);
            return Ok(false);
        }
        KeyCode::Char('2') => {
            app.set_view(View::Tasks);
            return Ok(false);
        }
        KeyCode::Char('3') => {
            app.set_view(View::Forest);
            return Ok(false);
        }
        KeyCode::Char('4') => {
            app.set_view(View::Stats);
            return Ok(false);
        }
        _ => {}
    }

    match app.view {
        View::Timer => handle_timer_keys(app, key),
        View::Tasks => handle_garden_keys(app, key),
        View::Forest | View::Stats => {}
    }
    Ok(false)
}

fn handle_timer_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => app.toggle_timer(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_timer(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.complete_early(),
        KeyCode::Char('f') | KeyCode::Char('F') => app.set_mode(TimerMode::Focus),
        KeyCode::Char('s') | KeyCode::Char('S') => app.set_mode(TimerMode::ShortBreak),
        KeyCode::Char('l') | KeyCode::Char('L') => app.set_mode(TimerMode::LongBreak),
        _ => {}
    }
}

fn handle_garden_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Enter => app.focus_selected(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.complete_selected(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.delete_selected(),
        _ => {}
    }
}

/// Handle keys while the plant-a-task form is open
fn handle_input_form_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab | KeyCode::BackTab => app.input_form_toggle_field(),
        KeyCode::Up => app.input_form_adjust_sessions(1),
        KeyCode::Down => app.input_form_adjust_sessions(-1),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}
