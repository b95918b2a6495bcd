use crate::app::App;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle a key event. Returns true when the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if app.store.dialog().is_some() {
        handle_dialog_mode(app, key)
    } else {
        handle_normal_mode(app, key)
    }
}

/// Keys in normal (list) mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Start/stop the timer on the selected task
        KeyCode::Enter => {
            app.toggle_start_stop()?;
            Ok(false)
        }

        // Stop whatever is running, regardless of selection
        KeyCode::Char('s') => {
            app.store.stop_active_task();
            Ok(false)
        }

        // Expand/collapse
        KeyCode::Char(' ') | KeyCode::Char('o') => {
            app.toggle_open_selected();
            Ok(false)
        }

        // Dialogs
        KeyCode::Char('a') => {
            app.open_add_task_dialog();
            Ok(false)
        }
        KeyCode::Char('A') => {
            app.open_add_subtask_dialog()?;
            Ok(false)
        }
        KeyCode::Char('r') => {
            app.open_rename_dialog()?;
            Ok(false)
        }

        // Finish (remove) the selected subtree
        KeyCode::Char('d') => {
            app.finish_selected()?;
            Ok(false)
        }

        // Reset the selected task's elapsed time
        KeyCode::Char('x') => {
            app.reset_selected();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') => Ok(true),

        _ => Ok(false),
    }
}

/// Keys while a dialog is open: plain text editing plus confirm/cancel
fn handle_dialog_mode(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_dialog();
            Ok(false)
        }
        KeyCode::Enter => {
            app.commit_dialog()?;
            Ok(false)
        }
        KeyCode::Backspace => {
            app.dialog_backspace()?;
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.dialog_push_char(c)?;
            Ok(false)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, press(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_quit_key() {
        let mut app = App::new(Vec::new()).unwrap();
        assert!(handle_key(&mut app, press(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn test_add_task_through_keys() {
        let mut app = App::new(Vec::new()).unwrap();
        handle_key(&mut app, press(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Physics");
        handle_key(&mut app, press(KeyCode::Enter)).unwrap();

        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].title, "Physics");
        assert!(app.store.dialog().is_none());
    }

    #[test]
    fn test_q_types_into_dialog_instead_of_quitting() {
        let mut app = App::new(Vec::new()).unwrap();
        handle_key(&mut app, press(KeyCode::Char('a'))).unwrap();
        let quit = handle_key(&mut app, press(KeyCode::Char('q'))).unwrap();
        assert!(!quit);
        assert_eq!(app.store.dialog().unwrap().input(), "q");
    }

    #[test]
    fn test_escape_closes_dialog_without_creating() {
        let mut app = App::new(Vec::new()).unwrap();
        handle_key(&mut app, press(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "half-typed");
        handle_key(&mut app, press(KeyCode::Esc)).unwrap();

        assert!(app.store.dialog().is_none());
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn test_enter_starts_and_stops_selected() {
        let mut app = App::new(Vec::new()).unwrap();
        let id = app.store.create_task("task", None).unwrap();

        handle_key(&mut app, press(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.active_task_id(), Some(id));

        handle_key(&mut app, press(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.active_task_id(), None);
    }

    #[test]
    fn test_done_key_removes_selected_subtree() {
        let mut app = App::new(Vec::new()).unwrap();
        let root = app.store.create_task("root", None).unwrap();
        app.store.create_task("child", Some(root)).unwrap();

        handle_key(&mut app, press(KeyCode::Char('d'))).unwrap();
        assert!(app.store.tasks().is_empty());
    }
}
