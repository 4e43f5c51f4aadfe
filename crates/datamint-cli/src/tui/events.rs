use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use datamint_render::PreviewTab;

use crate::CliError;
use crate::tui::commands::{command_palette_matches, execute_command, set_context};
use crate::tui::state::App;

pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<(), CliError> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::PageUp => {
            app.scroll_offset = app.scroll_offset.saturating_add(5);
        }
        KeyCode::PageDown => {
            app.scroll_offset = app.scroll_offset.saturating_sub(5);
        }
        KeyCode::Tab => {
            app.preview.tab = app.preview.tab.next();
        }
        KeyCode::BackTab => {
            app.preview.tab = app.preview.tab.prev();
        }
        KeyCode::Down => {
            if app.input.starts_with('/') {
                let matches = command_palette_matches(&app.input);
                if !matches.is_empty() {
                    app.palette_select =
                        (app.palette_select + 1).min(matches.len().saturating_sub(1));
                }
            } else {
                move_preview(app, 1);
            }
        }
        KeyCode::Up => {
            if app.input.starts_with('/') {
                app.palette_select = app.palette_select.saturating_sub(1);
            } else {
                move_preview(app, -1);
            }
        }
        KeyCode::Enter => {
            if app.input.starts_with('/') {
                let matches = command_palette_matches(&app.input);
                if app.palette_select < matches.len()
                    && app.input.trim() != matches[app.palette_select].command
                {
                    app.input = matches[app.palette_select].command.to_string();
                    app.palette_select = 0;
                }
            }

            let input = app.input.drain(..).collect::<String>();
            let input = input.trim();

            if input.is_empty() {
                toggle_under_cursor(app);
                return Ok(());
            }

            app.record_command(input);
            if input.starts_with('/') {
                if let Err(err) = execute_command(app, input) {
                    app.push_message(format!("error: {err}"));
                }
            } else {
                set_context(app, input);
            }
            app.scroll_offset = 0;
            app.palette_select = 0;
        }
        KeyCode::Backspace => {
            app.input.pop();
            app.palette_select = 0;
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            app.input.push(ch);
            app.palette_select = 0;
        }
        _ => {}
    }
    Ok(())
}

fn move_preview(app: &mut App, delta: isize) {
    match app.preview.tab {
        PreviewTab::Json => {
            let count = app.tree_lines().len();
            app.preview.move_cursor(delta, count);
        }
        PreviewTab::Table | PreviewTab::Stats => {
            app.preview.scroll = app.preview.scroll.saturating_add_signed(delta);
        }
    }
}

fn toggle_under_cursor(app: &mut App) {
    if app.preview.tab != PreviewTab::Json {
        return;
    }
    let lines = app.tree_lines();
    if let Some(line) = lines.get(app.preview.cursor).filter(|line| line.is_toggleable()) {
        app.preview.expansion.toggle(&line.key);
    }
}
