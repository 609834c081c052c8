//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use tracing::Level;

use crate::constants::BUTTON_FLASH;
use crate::keybindings::KeyBindings;
use crate::window::BorderStyle;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Append log records here. `None` discards them: stdout and stderr
    /// belong to the UI.
    pub file: Option<PathBuf>,
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: Level::INFO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Border given to windows created through the composer.
    pub border: BorderStyle,
    /// How long a keyboard-pressed button stays visibly pressed.
    pub button_flash: Duration,
    pub keymap: KeyBindings,
    /// Ask the input driver for mouse reports.
    pub mouse: bool,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            border: BorderStyle::Single,
            button_flash: BUTTON_FLASH,
            keymap: KeyBindings::default(),
            mouse: true,
            log: LogConfig::default(),
        }
    }
}
