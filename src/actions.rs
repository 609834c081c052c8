use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Dead keys: consumed silently, they open a two-key sequence
    ResizeMode,
    MoveMode,
    WindowMode,
    QuitMode,
    // Follow-ups after `WindowMode`
    SendToBack,
    ToggleMaximize,
    CloseWindow,
}

impl Action {
    pub const DEAD_KEYS: [Action; 4] = [
        Action::ResizeMode,
        Action::MoveMode,
        Action::WindowMode,
        Action::QuitMode,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::ResizeMode => "Resize window (then arrows)",
            Action::MoveMode => "Move window (then arrows)",
            Action::WindowMode => "Window command",
            Action::QuitMode => "Quit (press twice)",
            Action::SendToBack => "Send window to back",
            Action::ToggleMaximize => "Maximize / restore window",
            Action::CloseWindow => "Close window",
        };
        write!(f, "{}", s)
    }
}
