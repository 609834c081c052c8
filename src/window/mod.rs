//! Top-level windows managed by the composer.

pub mod decorator;

use std::fmt;

pub use decorator::BorderStyle;

use crate::canvas::Canvas;
use crate::component_context::ComponentContext;
use crate::constants::{WINDOW_MIN_HEIGHT, WINDOW_MIN_WIDTH};
use crate::event::Event;
use crate::geometry::{ClipRect, Size};
use crate::theme;
use crate::widget::{Control, HitResult, Widget};

/// Capabilities the composer needs from a window, queried through
/// [`Widget::as_top_level`] instead of downcasting.
pub trait TopLevel {
    fn sizable(&self) -> bool;
    fn movable(&self) -> bool;
    fn maximized(&self) -> bool;
    /// Toggle between full-screen and the geometry the window had before.
    fn set_maximized(&mut self, maximized: bool, screen: Size);
    fn title_buttons(&self) -> TitleButtons;
}

/// Which title-bar buttons a window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleButtons {
    pub bottom: bool,
    pub maximize: bool,
    pub close: bool,
}

impl TitleButtons {
    pub const ALL: TitleButtons = TitleButtons {
        bottom: true,
        maximize: true,
        close: true,
    };
    pub const NONE: TitleButtons = TitleButtons {
        bottom: false,
        maximize: false,
        close: false,
    };

    pub fn count(self) -> i32 {
        [self.bottom, self.maximize, self.close]
            .into_iter()
            .filter(|b| *b)
            .count() as i32
    }
}

type CloseHandler = Box<dyn FnMut() -> bool>;

pub struct Window {
    base: Control,
    border: BorderStyle,
    buttons: TitleButtons,
    sizable: bool,
    movable: bool,
    maximized: bool,
    restore: Option<ClipRect>,
    on_close: Option<CloseHandler>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.base.title())
            .field("rect", &self.base.rect())
            .field("border", &self.border)
            .field("maximized", &self.maximized)
            .finish_non_exhaustive()
    }
}

impl Window {
    pub fn new(title: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        let mut base = Control::new();
        base.set_title(title);
        base.set_constraints(WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT);
        base.set_pos(x, y);
        base.set_size(width, height);
        base.set_paddings(1, 1);
        base.set_tab_stop(false);
        Self {
            base,
            border: BorderStyle::default(),
            buttons: TitleButtons::ALL,
            sizable: true,
            movable: true,
            maximized: false,
            restore: None,
            on_close: None,
        }
    }

    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    pub fn with_buttons(mut self, buttons: TitleButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_sizable(mut self, sizable: bool) -> Self {
        self.sizable = sizable;
        self
    }

    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.base.set_modal(modal);
        self
    }

    /// Called when the window is asked to close; returning `false` keeps it
    /// open.
    pub fn on_close(mut self, handler: impl FnMut() -> bool + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn set_border(&mut self, border: BorderStyle) {
        self.border = border;
    }

    /// Title-bar button glyphs and the column each one occupies, laid out
    /// as `[_^x]` against the top-right corner.
    fn button_cells(&self) -> Vec<(i32, char, HitResult)> {
        let rect = self.base.rect();
        let count = self.buttons.count();
        if count == 0 {
            return Vec::new();
        }
        let mut x = rect.right() - 1 - (count + 2) + 1;
        let mut cells = Vec::new();
        let maximize = if self.maximized { 'v' } else { '^' };
        for (shown, ch, hit) in [
            (self.buttons.bottom, '_', HitResult::ButtonBottom),
            (self.buttons.maximize, maximize, HitResult::ButtonMaximize),
            (self.buttons.close, 'x', HitResult::ButtonClose),
        ] {
            if shown {
                cells.push((x, ch, hit));
                x += 1;
            }
        }
        cells
    }
}

impl Widget for Window {
    fn base(&self) -> &Control {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Control {
        &mut self.base
    }

    fn draw(&self, canvas: &mut Canvas) {
        let rect = self.base.rect();
        let attr = self
            .base
            .resolve_colors(theme::window_inactive(), theme::window_active());
        canvas.fill_rect(rect, ' ', attr);
        decorator::draw_border(canvas, rect, self.border, attr);

        let buttons = self.button_cells();
        let reserved = if buttons.is_empty() {
            0
        } else {
            buttons.len() as i32 + 2
        };
        let title_attr = if self.base.active() {
            theme::window_title_active().or(attr)
        } else {
            attr
        };
        decorator::draw_title(canvas, rect, self.base.title(), reserved, title_attr);

        if let (Some(first), Some(last)) = (buttons.first(), buttons.last()) {
            let button_attr = if self.base.active() {
                theme::window_buttons()
            } else {
                attr
            };
            canvas.put(first.0 - 1, rect.y, '[', attr);
            for (x, ch, _) in &buttons {
                canvas.put(*x, rect.y, *ch, button_attr);
            }
            canvas.put(last.0 + 1, rect.y, ']', attr);
        }
    }

    fn hit_test(&self, x: i32, y: i32) -> HitResult {
        match self.base.hit_test(x, y) {
            HitResult::Border => {}
            other => return other,
        }
        let rect = self.base.rect();
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        if y == rect.y {
            if x == rect.x {
                return HitResult::TopLeft;
            }
            if x == right {
                return HitResult::TopRight;
            }
            return self
                .button_cells()
                .into_iter()
                .find(|(bx, _, _)| *bx == x)
                .map_or(HitResult::Top, |(_, _, hit)| hit);
        }
        if y == bottom {
            if x == rect.x {
                return HitResult::BottomLeft;
            }
            if x == right {
                return HitResult::BottomRight;
            }
            return HitResult::Bottom;
        }
        if x == rect.x {
            return HitResult::Left;
        }
        if x == right {
            return HitResult::Right;
        }
        HitResult::Border
    }

    fn process_event(&mut self, event: &Event, _ctx: &mut ComponentContext) -> bool {
        match event {
            Event::Close => match self.on_close.as_mut() {
                Some(handler) => handler(),
                None => true,
            },
            _ => false,
        }
    }

    fn as_top_level(&self) -> Option<&dyn TopLevel> {
        Some(self)
    }

    fn as_top_level_mut(&mut self) -> Option<&mut dyn TopLevel> {
        Some(self)
    }
}

impl TopLevel for Window {
    fn sizable(&self) -> bool {
        self.sizable
    }

    fn movable(&self) -> bool {
        self.movable
    }

    fn maximized(&self) -> bool {
        self.maximized
    }

    fn set_maximized(&mut self, maximized: bool, screen: Size) {
        if maximized == self.maximized {
            return;
        }
        if maximized {
            self.restore = Some(self.base.rect());
            self.base.set_pos(0, 0);
            self.base.set_size(screen.width, screen.height);
        } else if let Some(rect) = self.restore.take() {
            self.base.set_pos(rect.x, rect.y);
            self.base.set_size(rect.width, rect.height);
        }
        self.maximized = maximized;
    }

    fn title_buttons(&self) -> TitleButtons {
        self.buttons
    }
}
