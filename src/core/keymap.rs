/// Key bindings: raw keys to engine commands.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A key as reported by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Space,
    Left,
    Right,
    Up,
    Down,
    Backspace,
    Escape,
    Char(char),
}

/// What a bound key asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Activate the highlighted choice, or advance when nothing is highlighted.
    Accept,
    Previous,
    Next,
    Back,
    Deselect,
}

/// The default bindings: Enter/Space accept, Left/a previous,
/// Right/d next, Backspace back, Escape deselect.
pub fn default_bindings() -> Vec<(Key, Command)> {
    vec![
        (Key::Enter, Command::Accept),
        (Key::Space, Command::Accept),
        (Key::Left, Command::Previous),
        (Key::Char('a'), Command::Previous),
        (Key::Char('A'), Command::Previous),
        (Key::Right, Command::Next),
        (Key::Char('d'), Command::Next),
        (Key::Char('D'), Command::Next),
        (Key::Backspace, Command::Back),
        (Key::Escape, Command::Deselect),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: FxHashMap<Key, Command>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

impl Keymap {
    /// An empty keymap.
    pub fn empty() -> Self {
        Self {
            bindings: FxHashMap::default(),
        }
    }

    pub fn from_bindings(bindings: impl IntoIterator<Item = (Key, Command)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Bind `key`, replacing any previous binding.
    pub fn bind(&mut self, key: Key, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: Key) {
        self.bindings.remove(&key);
    }

    pub fn command_for(&self, key: Key) -> Option<Command> {
        self.bindings.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let keymap = Keymap::default();
        assert_eq!(keymap.command_for(Key::Enter), Some(Command::Accept));
        assert_eq!(keymap.command_for(Key::Space), Some(Command::Accept));
        assert_eq!(keymap.command_for(Key::Char('a')), Some(Command::Previous));
        assert_eq!(keymap.command_for(Key::Right), Some(Command::Next));
        assert_eq!(keymap.command_for(Key::Backspace), Some(Command::Back));
        assert_eq!(keymap.command_for(Key::Escape), Some(Command::Deselect));
        assert_eq!(keymap.command_for(Key::Up), None);
    }

    #[test]
    fn remap() {
        let mut keymap = Keymap::default();
        keymap.bind(Key::Char('h'), Command::Previous);
        keymap.bind(Key::Char('l'), Command::Next);
        keymap.unbind(Key::Char('a'));
        assert_eq!(keymap.command_for(Key::Char('h')), Some(Command::Previous));
        assert_eq!(keymap.command_for(Key::Char('l')), Some(Command::Next));
        assert_eq!(keymap.command_for(Key::Char('a')), None);
    }
}
