// Turns raw crossterm events into toolkit events: Shift+Tab becomes BackTab,
// key releases and repeats are filtered, terminal resizes become
// `ScreenResize`. Focus and paste notifications have no toolkit counterpart
// and are dropped.
use crossterm::event::{Event as RawEvent, KeyCode, KeyEventKind, KeyModifiers};

use crate::event::Event;

#[derive(Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: RawEvent) -> Option<Event> {
        match evt {
            RawEvent::Key(mut key) => {
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                if cfg!(windows) {
                    match key.kind {
                        KeyEventKind::Release => {
                            if key.code == KeyCode::Esc {
                                self.esc_down = false;
                            }
                            return None;
                        }
                        KeyEventKind::Repeat => return None,
                        KeyEventKind::Press => {}
                    }
                    if key.code == KeyCode::Esc {
                        if self.esc_down {
                            return None;
                        }
                        self.esc_down = true;
                    } else {
                        self.esc_down = false;
                    }
                } else if key.kind == KeyEventKind::Release {
                    return None;
                }
                Some(Event::Key(key))
            }
            RawEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            RawEvent::Resize(width, height) => Some(Event::ScreenResize {
                width: width as i32,
                height: height as i32,
            }),
            RawEvent::FocusGained | RawEvent::FocusLost | RawEvent::Paste(_) => None,
        }
    }
}
