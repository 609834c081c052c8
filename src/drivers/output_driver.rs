use std::io::{self, Stdout};

use crossterm::event::DisableMouseCapture;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::error;

use crate::canvas::Canvas;
use crate::colors::Attr;
use crate::error::{Result, TvError};
use crate::geometry::Size;

pub trait OutputDriver {
    fn enter(&mut self) -> Result<()>;
    fn exit(&mut self) -> Result<()>;
    fn size(&self) -> Result<Size>;

    /// Clear the back buffer to `clear`, let `f` paint it, then flush once.
    fn draw<F>(&mut self, clear: Attr, f: F) -> Result<()>
    where
        F: FnOnce(&mut Canvas<'_>);
}

/// [`OutputDriver`] over any ratatui backend.
///
/// Built with [`TerminalOutputDriver::console`] it also owns raw mode and
/// the alternate screen and restores them on drop. Mouse capture is switched
/// on by the input driver; leaving the screen always switches it off.
pub struct TerminalOutputDriver<B: Backend> {
    terminal: Terminal<B>,
    owns_console: bool,
    entered: bool,
}

impl TerminalOutputDriver<CrosstermBackend<Stdout>> {
    pub fn console() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend).map_err(TvError::backend)?;
        Ok(Self {
            terminal,
            owns_console: true,
            entered: false,
        })
    }
}

impl<B: Backend> TerminalOutputDriver<B> {
    pub fn new(backend: B) -> Result<Self> {
        let terminal = Terminal::new(backend).map_err(TvError::backend)?;
        Ok(Self {
            terminal,
            owns_console: false,
            entered: false,
        })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.terminal.backend_mut()
    }
}

impl<B: Backend> OutputDriver for TerminalOutputDriver<B> {
    fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Ok(());
        }
        if self.owns_console {
            execute!(io::stdout(), EnterAlternateScreen)?;
            terminal::enable_raw_mode()?;
        }
        self.terminal.hide_cursor().map_err(TvError::backend)?;
        self.terminal.clear().map_err(TvError::backend)?;
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        if self.owns_console {
            terminal::disable_raw_mode()?;
            execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        }
        self.terminal.show_cursor().map_err(TvError::backend)?;
        Ok(())
    }

    fn size(&self) -> Result<Size> {
        let size = self.terminal.size().map_err(TvError::backend)?;
        Ok(Size::new(size.width as i32, size.height as i32))
    }

    fn draw<F>(&mut self, clear: Attr, f: F) -> Result<()>
    where
        F: FnOnce(&mut Canvas<'_>),
    {
        self.terminal
            .draw(move |frame| {
                let mut canvas = Canvas::new(frame.buffer_mut());
                canvas.clear(clear);
                f(&mut canvas);
            })
            .map(|_| ())
            .map_err(|err| {
                error!(%err, "terminal draw failed");
                TvError::backend(err)
            })
    }
}

impl<B: Backend> Drop for TerminalOutputDriver<B> {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;
    use ratatui::backend::TestBackend;

    #[test]
    fn reports_backend_size() {
        let driver = TerminalOutputDriver::new(TestBackend::new(40, 12)).unwrap();
        assert_eq!(driver.size().unwrap(), Size::new(40, 12));
    }

    #[test]
    fn draw_flushes_painted_cells() {
        let mut driver = TerminalOutputDriver::new(TestBackend::new(10, 2)).unwrap();
        driver.enter().unwrap();
        driver
            .draw(theme::desktop(), |canvas| {
                canvas.draw_text(1, 0, "hey", theme::control());
            })
            .unwrap();
        let buffer = driver.backend().buffer();
        assert_eq!(buffer[(1, 0)].symbol(), "h");
        assert_eq!(buffer[(3, 0)].symbol(), "y");
        driver.exit().unwrap();
    }
}
