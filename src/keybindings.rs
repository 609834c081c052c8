use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Key combos for the composer's two-key command sequences.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// The dead key `key` opens, if any.
    pub fn dead_key(&self, key: &KeyEvent) -> Option<Action> {
        Action::DEAD_KEYS
            .into_iter()
            .find(|action| self.matches(*action, key))
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(ResizeMode, KeyCombo::ctrl('s'));
        kb.add(MoveMode, KeyCombo::ctrl('p'));
        kb.add(WindowMode, KeyCombo::ctrl('w'));
        kb.add(QuitMode, KeyCombo::ctrl('q'));
        // Most terminals deliver Ctrl+H as Backspace and Ctrl+M as Enter.
        kb.add(SendToBack, KeyCombo::ctrl('h'));
        kb.add(
            SendToBack,
            KeyCombo::new(KeyCode::Backspace, KeyModifiers::NONE),
        );
        kb.add(ToggleMaximize, KeyCombo::ctrl('m'));
        kb.add(
            ToggleMaximize,
            KeyCombo::new(KeyCode::Enter, KeyModifiers::NONE),
        );
        kb.add(CloseWindow, KeyCombo::ctrl('c'));
        kb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_recognise_all_dead_keys() {
        let kb = KeyBindings::default();
        for (c, action) in [
            ('s', Action::ResizeMode),
            ('p', Action::MoveMode),
            ('w', Action::WindowMode),
            ('q', Action::QuitMode),
        ] {
            let ev = KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
            assert_eq!(kb.dead_key(&ev), Some(action));
        }
        let plain = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(kb.dead_key(&plain), None);
    }

    #[test]
    fn follow_ups_are_not_dead_keys() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::CloseWindow, &ev));
        assert_eq!(kb.dead_key(&ev), None);
    }

    #[test]
    fn combo_display() {
        assert_eq!(KeyCombo::ctrl('q').display(), "Ctrl+Q");
        let kb = KeyBindings::default();
        assert_eq!(kb.combos_for(Action::QuitMode), vec!["Ctrl+Q".to_string()]);
    }
}
