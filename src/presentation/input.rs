use crate::application::{App, AppMode};
use crate::domain::GREEK_LETTERS;
use crate::infrastructure::ClipboardService;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::GreekPicker => Self::handle_greek_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode) {
        // Commands below may set a fresh status message.
        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::Left | KeyCode::Char('h') => app.move_left(),
            KeyCode::Right | KeyCode::Char('l') => app.move_right(),
            KeyCode::Tab | KeyCode::BackTab => app.switch_side(),
            KeyCode::Enter | KeyCode::F(2) => app.start_editing(),
            KeyCode::Backspace | KeyCode::Delete => app.clear_selected_cell(),
            KeyCode::Char('c') => app.compute(),
            KeyCode::Char('r') => app.reset(),
            KeyCode::Char('m') => {
                let result = ClipboardService::copy(&app.matlab_code);
                app.set_copy_result(result, "MATLAB");
            }
            KeyCode::Char('t') => {
                let result = ClipboardService::copy(&app.latex_code);
                app.set_copy_result(result, "LaTeX");
            }
            KeyCode::Char('g') => {
                app.mode = AppMode::GreekPicker;
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Backspace => app.delete_input_char(),
            KeyCode::Left => app.cursor_left(),
            KeyCode::Right => app.cursor_right(),
            KeyCode::Char(ch) => app.insert_input_char(ch),
            _ => {}
        }
    }

    fn handle_greek_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Char(ch) if ch.is_ascii_lowercase() => {
                let index = (ch as u8 - b'a') as usize;
                if let Some((letter, _)) = GREEK_LETTERS.get(index) {
                    app.insert_symbol(*letter);
                    app.mode = AppMode::Normal;
                }
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Side;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::empty());
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!((app.selected_row, app.selected_col), (1, 1));

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!((app.selected_row, app.selected_col), (0, 0));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.side, Side::Right);
    }

    #[test]
    fn test_editing_through_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::Editing));

        for ch in "x+1".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.left.get_cell(0, 0), "x+1");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.left.get_cell(0, 0), "");
    }

    #[test]
    fn test_greek_picker_inserts_letter() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('g'));
        assert!(matches!(app.mode, AppMode::GreekPicker));

        press(&mut app, KeyCode::Char('a'));
        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.left.get_cell(0, 0), "α");

        // Last palette key maps to omega.
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.left.get_cell(0, 0), "αω");

        // Keys past the palette are ignored and leave the picker open.
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Char('z'));
        assert!(matches!(app.mode, AppMode::GreekPicker));
        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Normal));
    }

    #[test]
    fn test_compute_key_runs_computation() {
        let mut app = App::default();
        app.left.set_cell(0, 0, "2");
        app.right.set_cell(0, 0, "3");

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.result.get_cell(0, 0), "6");

        press(&mut app, KeyCode::Char('r'));
        assert!(app.result.is_empty());
        assert!(app.left.is_empty());
    }

    #[test]
    fn test_help_mode_scrolling() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.mode, AppMode::Help));

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.help_scroll, 5);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 4);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.help_scroll, 0);

        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Normal));
    }
}
