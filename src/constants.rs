//! Shared crate-wide constants.

use std::time::Duration;

/// Smallest width a window may be shrunk to. Leaves room for both corners and
/// one title-button cell.
pub const WINDOW_MIN_WIDTH: i32 = 8;

/// Smallest height a window may be shrunk to: top border, one content row and
/// bottom border.
pub const WINDOW_MIN_HEIGHT: i32 = 3;

/// How long a keyboard-pressed button stays visually depressed before the
/// delayed redraw releases it.
pub const BUTTON_FLASH: Duration = Duration::from_millis(100);

/// Scale weight meaning "keep the minimal size".
pub const FIXED: i32 = 0;
