use ratatui::style::{Color, Style};

/// Foreground/background pair for a single cell.
///
/// `Color::Reset` in either slot means "not configured"; widgets resolve it
/// against the theme with [`Attr::or`] right before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr {
    pub fg: Color,
    pub bg: Color,
}

impl Attr {
    pub const UNSET: Attr = Attr::new(Color::Reset, Color::Reset);

    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Fill unset slots from `fallback`.
    pub fn or(self, fallback: Attr) -> Attr {
        Attr {
            fg: real_color(self.fg, fallback.fg),
            bg: real_color(self.bg, fallback.bg),
        }
    }

    pub fn with_fg(self, fg: Color) -> Attr {
        Attr { fg, ..self }
    }

    pub fn with_bg(self, bg: Color) -> Attr {
        Attr { bg, ..self }
    }

    pub fn style(self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

impl Default for Attr {
    fn default() -> Self {
        Attr::UNSET
    }
}

/// Resolve a configured color, falling back to the theme color when unset.
pub fn real_color(color: Color, fallback: Color) -> Color {
    if color == Color::Reset {
        fallback
    } else {
        color
    }
}
