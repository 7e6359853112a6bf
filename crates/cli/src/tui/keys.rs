use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The keys the editor reacts to. Escape sequences are already decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// A control code other than the named keys below (Ctrl+letter, Tab).
    Control(u8),
    Enter,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    F1,
    F2,
}

impl Key {
    /// Translate a crossterm key event. Releases and unmapped keys give `None`.
    pub fn from_crossterm(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let key = match event.code {
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::F(1) => Key::F1,
            KeyCode::F(2) => Key::F2,
            KeyCode::Tab => Key::Control(b'\t'),
            KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
                if !c.is_ascii_alphabetic() {
                    return None;
                }
                Key::Control(c.to_ascii_lowercase() as u8 & 0x1f)
            }
            KeyCode::Char(c) if !c.is_control() => Key::Char(c),
            _ => return None,
        };
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(Key::from_crossterm(press(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(Key::from_crossterm(press(KeyCode::Esc)), Some(Key::Escape));
        assert_eq!(Key::from_crossterm(press(KeyCode::Up)), Some(Key::Up));
        assert_eq!(Key::from_crossterm(press(KeyCode::F(1))), Some(Key::F1));
        assert_eq!(Key::from_crossterm(press(KeyCode::F(2))), Some(Key::F2));
        assert_eq!(Key::from_crossterm(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_printable_and_control() {
        assert_eq!(Key::from_crossterm(press(KeyCode::Char('a'))), Some(Key::Char('a')));
        assert_eq!(
            Key::from_crossterm(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Key::Char('A'))
        );
        assert_eq!(
            Key::from_crossterm(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Control(3))
        );
        assert_eq!(Key::from_crossterm(press(KeyCode::Tab)), Some(Key::Control(b'\t')));
    }

    #[test]
    fn test_release_ignored() {
        let mut event = press(KeyCode::Char('x'));
        event.kind = KeyEventKind::Release;
        assert_eq!(Key::from_crossterm(event), None);
    }
}
