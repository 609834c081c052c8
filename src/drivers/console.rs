use std::io;

use super::InputDriver;
use super::utils::KeyboardNormalizer;
use crate::event::Event;

/// Reads the controlling terminal through crossterm.
#[derive(Default)]
pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputDriver for ConsoleInputDriver {
    fn read(&mut self) -> io::Result<Event> {
        loop {
            let evt = crossterm::event::read()?;
            if let Some(normalized) = self.normalizer.normalize(evt) {
                return Ok(normalized);
            }
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            crossterm::execute!(io::stdout(), crossterm::event::EnableMouseCapture)
        } else {
            crossterm::execute!(io::stdout(), crossterm::event::DisableMouseCapture)
        }
    }
}
