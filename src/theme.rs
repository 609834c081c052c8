use ratatui::style::Color;

use crate::colors::Attr;

// Centralized default palette. Widgets keep `Color::Reset` for anything the
// application did not set explicitly and resolve it here at draw time.

// Screen
pub fn desktop() -> Attr {
    Attr::new(Color::White, Color::Black)
}

// Window chrome
pub fn window_active() -> Attr {
    Attr::new(Color::White, Color::Blue)
}
pub fn window_inactive() -> Attr {
    Attr::new(Color::Gray, Color::DarkGray)
}
pub fn window_title_active() -> Attr {
    Attr::new(Color::Yellow, Color::Blue)
}
pub fn window_buttons() -> Attr {
    Attr::new(Color::LightCyan, Color::Blue)
}

// Generic controls
pub fn control() -> Attr {
    Attr::new(Color::White, Color::Blue)
}
pub fn control_disabled() -> Attr {
    Attr::new(Color::DarkGray, Color::Blue)
}

// Button
pub fn button() -> Attr {
    Attr::new(Color::Black, Color::Gray)
}
pub fn button_active() -> Attr {
    Attr::new(Color::White, Color::Green)
}
pub fn button_shadow() -> Color {
    Color::Black
}

// Edit field
pub fn edit() -> Attr {
    Attr::new(Color::White, Color::DarkGray)
}
pub fn edit_active() -> Attr {
    Attr::new(Color::Black, Color::White)
}

// Progress bar
pub fn progress_empty() -> Attr {
    Attr::new(Color::White, Color::DarkGray)
}
pub fn progress_filled() -> Attr {
    Attr::new(Color::Black, Color::Cyan)
}

// Bar chart
pub fn bar_chart() -> Attr {
    Attr::new(Color::White, Color::Black)
}
