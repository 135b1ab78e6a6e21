//! Keyboard input understood by the tokenizer.

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
    /// Any key the tokenizer has no dedicated handling for.
    Other,
}

impl Key {
    /// Keys whose keyup never schedules a search.
    pub(crate) fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::Tab | Key::BackTab | Key::Enter | Key::Escape | Key::Up | Key::Down
        )
    }
}

/// Result of handing a key to the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The tokenizer handled the key; the host must not apply a default action.
    Consumed,
    /// The tokenizer did not claim the key; the host may apply its own default
    /// (e.g. moving focus on Tab).
    Ignored,
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_crossterm_conversion() {
        assert_eq!(Key::from(KeyCode::Esc), Key::Escape);
        assert_eq!(Key::from(KeyCode::Char('x')), Key::Char('x'));
        assert_eq!(Key::from(KeyCode::CapsLock), Key::Other);
    }

    #[test]
    fn test_navigation_keys() {
        assert!(Key::Enter.is_navigation());
        assert!(Key::Down.is_navigation());
        assert!(!Key::Backspace.is_navigation());
        assert!(!Key::Char('a').is_navigation());
    }
}
