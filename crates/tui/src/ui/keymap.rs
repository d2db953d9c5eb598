use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    NextField,
    Submit,
    Up,
    Down,
    Backspace,
    Input(char),
    None,
}

/// Translates a terminal key event; vim-style `j`/`k` move like the arrows.
pub fn map_key(key: KeyEvent) -> AppAction {
    // Windows reports releases too; only presses count.
    if key.kind == KeyEventKind::Release {
        return AppAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return AppAction::Quit;
        }
        return AppAction::None;
    }

    match key.code {
        KeyCode::Char('q') => AppAction::Quit,
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Up | KeyCode::Char('k') => AppAction::Up,
        KeyCode::Down | KeyCode::Char('j') => AppAction::Down,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

/// Key translation while a form has the keyboard: letters are text, so only
/// Ctrl+C quits.
pub fn map_text_key(key: KeyEvent) -> AppAction {
    if key.kind == KeyEventKind::Release {
        return AppAction::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return AppAction::Quit;
        }
        return AppAction::None;
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppAction::Quit
        );
    }

    #[test]
    fn plain_keys_map_to_actions() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), AppAction::Quit);
        assert_eq!(map_key(press(KeyCode::Enter)), AppAction::Submit);
        assert_eq!(map_key(press(KeyCode::Tab)), AppAction::NextField);
        assert_eq!(map_key(press(KeyCode::Char('j'))), AppAction::Down);
        assert_eq!(map_key(press(KeyCode::Char('k'))), AppAction::Up);
        assert_eq!(map_key(press(KeyCode::Char('+'))), AppAction::Input('+'));
        assert_eq!(map_key(press(KeyCode::F(5))), AppAction::None);
    }

    #[test]
    fn form_keys_type_letters_instead_of_acting() {
        assert_eq!(map_text_key(press(KeyCode::Char('q'))), AppAction::Input('q'));
        assert_eq!(map_text_key(press(KeyCode::Char('j'))), AppAction::Input('j'));
        assert_eq!(map_text_key(press(KeyCode::Backspace)), AppAction::Backspace);
        assert_eq!(
            map_text_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppAction::Quit
        );
    }
}
