use crossterm::event::KeyEvent;

use crate::actions::Action;
use crate::layout::floating::DragKind;

/// Transient input state the composer carries between events: the pending
/// dead key, the drag in progress and the last mouse coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    dead_key: Option<(Action, KeyEvent)>,
    drag: DragKind,
    mouse_down: Option<(i32, i32)>,
    last_mouse: (i32, i32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dead_key(&self) -> Option<Action> {
        self.dead_key.map(|(action, _)| action)
    }

    /// Remember the dead key together with the key press that produced it,
    /// so it can be replayed if the sequence is abandoned.
    pub fn set_dead_key(&mut self, action: Action, key: KeyEvent) {
        self.dead_key = Some((action, key));
    }

    pub fn take_dead_key(&mut self) -> Option<(Action, KeyEvent)> {
        self.dead_key.take()
    }

    pub fn drag(&self) -> DragKind {
        self.drag
    }

    pub fn dragging(&self) -> bool {
        self.drag != DragKind::None
    }

    pub fn start_drag(&mut self, kind: DragKind, x: i32, y: i32) {
        self.drag = kind;
        self.last_mouse = (x, y);
    }

    pub fn end_drag(&mut self) -> DragKind {
        std::mem::take(&mut self.drag)
    }

    pub fn last_mouse(&self) -> (i32, i32) {
        self.last_mouse
    }

    pub fn set_last_mouse(&mut self, x: i32, y: i32) {
        self.last_mouse = (x, y);
    }

    pub fn mouse_down(&self) -> Option<(i32, i32)> {
        self.mouse_down
    }

    pub fn set_mouse_down(&mut self, x: i32, y: i32) {
        self.mouse_down = Some((x, y));
        self.last_mouse = (x, y);
    }

    /// Forget the pending press, e.g. once a widget grabs the mouse and the
    /// release will go to it instead.
    pub fn clear_mouse_down(&mut self) {
        self.mouse_down = None;
    }

    /// A release at the press coordinate counts as a click. The press is
    /// consumed either way.
    pub fn take_click(&mut self, x: i32, y: i32) -> bool {
        self.mouse_down.take() == Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn dead_key_is_taken_once() {
        let mut s = InputState::new();
        let key = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        s.set_dead_key(Action::WindowMode, key);
        assert_eq!(s.dead_key(), Some(Action::WindowMode));
        assert_eq!(s.take_dead_key(), Some((Action::WindowMode, key)));
        assert!(s.take_dead_key().is_none());
    }

    #[test]
    fn drag_lifecycle() {
        let mut s = InputState::new();
        assert!(!s.dragging());
        s.start_drag(DragKind::Move, 4, 5);
        assert!(s.dragging());
        assert_eq!(s.last_mouse(), (4, 5));
        assert_eq!(s.end_drag(), DragKind::Move);
        assert!(!s.dragging());
    }

    #[test]
    fn click_requires_matching_release() {
        let mut s = InputState::new();
        s.set_mouse_down(3, 3);
        assert!(!s.take_click(3, 4));
        s.set_mouse_down(3, 3);
        assert!(s.take_click(3, 3));
        assert!(!s.take_click(3, 3));
        s.set_mouse_down(3, 3);
        s.clear_mouse_down();
        assert_eq!(s.mouse_down(), None);
        assert_eq!(s.last_mouse(), (3, 3));
        assert!(!s.take_click(3, 3));
    }
}
