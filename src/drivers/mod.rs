pub mod console;
pub mod output_driver;
pub mod utils;

use std::io;

pub use output_driver::{OutputDriver, TerminalOutputDriver};

use crate::event::Event;

/// Blocking source of toolkit events. The main loop reads it from its own
/// thread, so implementations must be `Send`.
pub trait InputDriver {
    fn read(&mut self) -> io::Result<Event>;

    /// Turn mouse reporting on or off. Called once before the first read.
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

impl<T: InputDriver + ?Sized> InputDriver for Box<T> {
    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}
