use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, FocusPane, InputMode};

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_prompt_editing(app, key),
    }
    Ok(())
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
        }

        KeyCode::Down | KeyCode::Char('j') => match app.focus {
            FocusPane::Industry => app.industry_down(),
            FocusPane::Mode => app.mode_down(),
            _ => {}
        },
        KeyCode::Up | KeyCode::Char('k') => match app.focus {
            FocusPane::Industry => app.industry_up(),
            FocusPane::Mode => app.mode_up(),
            _ => {}
        },

        // 'i' drops into the prompt editor from anywhere.
        KeyCode::Char('i') => {
            app.focus = FocusPane::Prompt;
            app.input_mode = InputMode::Editing;
            app.prompt_cursor = app.state.prompt().chars().count();
        }

        KeyCode::Enter => match app.focus {
            FocusPane::Prompt => {
                app.input_mode = InputMode::Editing;
                app.prompt_cursor = app.state.prompt().chars().count();
            }
            FocusPane::Submit => app.submit(),
            _ => {}
        },

        _ => {}
    }
}

fn handle_prompt_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            // The prompt is a textarea; Enter inserts a line break.
            insert_at_cursor(app, '\n');
        }
        KeyCode::Backspace => {
            if app.prompt_cursor > 0 {
                app.prompt_cursor -= 1;
                let mut prompt = app.state.prompt().to_string();
                let byte_pos = char_to_byte_index(&prompt, app.prompt_cursor);
                prompt.remove(byte_pos);
                app.state.set_prompt(prompt);
            }
        }
        KeyCode::Delete => {
            let char_count = app.state.prompt().chars().count();
            if app.prompt_cursor < char_count {
                let mut prompt = app.state.prompt().to_string();
                let byte_pos = char_to_byte_index(&prompt, app.prompt_cursor);
                prompt.remove(byte_pos);
                app.state.set_prompt(prompt);
            }
        }
        KeyCode::Left => {
            app.prompt_cursor = app.prompt_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.state.prompt().chars().count();
            app.prompt_cursor = (app.prompt_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.prompt_cursor = 0;
        }
        KeyCode::End => {
            app.prompt_cursor = app.state.prompt().chars().count();
        }
        KeyCode::Char(c) => {
            insert_at_cursor(app, c);
        }
        _ => {}
    }
}

fn insert_at_cursor(app: &mut App, c: char) {
    let mut prompt = app.state.prompt().to_string();
    let byte_pos = char_to_byte_index(&prompt, app.prompt_cursor);
    prompt.insert(byte_pos, c);
    app.state.set_prompt(prompt);
    app.prompt_cursor += 1;
}

/// Converts a char index to a byte index for String mutation. Needed because
/// prompts mix ASCII and CJK text.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
