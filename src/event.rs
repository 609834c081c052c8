//! Toolkit event records.
//!
//! Events are plain `Copy` values. The composer copies them along the dispatch
//! chain and widgets never hold on to them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::widget::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Key press from the terminal.
    Key(KeyEvent),
    /// Raw mouse input in screen coordinates.
    Mouse(MouseEvent),
    /// Synthesized when a left release lands on the cell of the matching press.
    Click(MouseEvent),
    /// The terminal itself changed size.
    ScreenResize { width: i32, height: i32 },
    /// Notification sent to a window after the composer resized it.
    Resize { width: i32, height: i32 },
    /// Notification sent to a window after the composer moved it.
    Move { x: i32, y: i32 },
    /// Window gained (`true`) or lost (`false`) input focus.
    Activate(bool),
    /// Close request for a window; returning `true` accepts it.
    Close,
    /// Programmatic request to close the topmost window.
    CloseWindow,
    /// Re-run resize and placement for the given window.
    Layout(WidgetId),
    Redraw,
    Quit,
    /// Delivered directly to `target` once a delay scheduled with
    /// [`ComponentContext::post_after`](crate::component_context::ComponentContext::post_after)
    /// expires.
    Timer { target: WidgetId, token: u32 },
}

impl Event {
    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    pub fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Event::Mouse(MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        })
    }

    pub fn left_down(x: u16, y: u16) -> Self {
        Self::mouse(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    pub fn left_up(x: u16, y: u16) -> Self {
        Self::mouse(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    pub fn left_drag(x: u16, y: u16) -> Self {
        Self::mouse(MouseEventKind::Drag(MouseButton::Left), x, y)
    }

    /// Screen position of mouse and click events.
    pub fn position(&self) -> Option<(i32, i32)> {
        match self {
            Event::Mouse(mouse) | Event::Click(mouse) => {
                Some((mouse.column as i32, mouse.row as i32))
            }
            _ => None,
        }
    }

    pub fn is_key(&self, code: KeyCode) -> bool {
        matches!(self, Event::Key(key) if key.code == code)
    }

    /// Events that move keyboard focus to the control under the cursor.
    pub(crate) fn is_left_press(&self) -> bool {
        matches!(
            self,
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                ..
            })
        )
    }
}
