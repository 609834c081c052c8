use std::fmt;
use std::time::Duration;

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};

use crate::canvas::Canvas;
use crate::component_context::ComponentContext;
use crate::constants::BUTTON_FLASH;
use crate::event::Event;
use crate::geometry::ClipRect;
use crate::theme;
use crate::widget::{Align, Control, Widget};

type ClickHandler = Box<dyn FnMut(&mut ComponentContext)>;

const RELEASE_TOKEN: u32 = 1;

/// Push button with a drop shadow.
///
/// Space fires `on_click` and shows the button pressed for a short flash.
/// A mouse press grabs input until the release; the release fires
/// `on_click` only if it lands on the button.
pub struct Button {
    base: Control,
    pressed: bool,
    flash: Duration,
    on_click: Option<ClickHandler>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("title", &self.base.title())
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

impl Button {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let mut base = Control::new();
        let width = (title.chars().count() as i32 + 3).max(6);
        base.set_constraints(width, 2);
        base.set_align(Align::Center);
        base.set_title(title);
        Self {
            base,
            pressed: false,
            flash: BUTTON_FLASH,
            on_click: None,
        }
    }

    pub fn with_flash(mut self, flash: Duration) -> Self {
        self.flash = flash;
        self
    }

    pub fn on_click(mut self, handler: impl FnMut(&mut ComponentContext) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    fn click(&mut self, ctx: &mut ComponentContext) {
        if let Some(handler) = self.on_click.as_mut() {
            handler(ctx);
        }
    }
}

impl Widget for Button {
    fn base(&self) -> &Control {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Control {
        &mut self.base
    }

    fn draw(&self, canvas: &mut Canvas) {
        let rect = self.base.rect();
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let attr = if !self.base.enabled() {
            self.base.colors().or(theme::control_disabled())
        } else {
            self.base.resolve_colors(theme::button(), theme::button_active())
        };
        let face_w = rect.width - 1;
        let face_h = rect.height - 1;
        let dy = (face_h - 1) / 2;

        let face = if self.pressed {
            ClipRect::new(rect.x + 1, rect.y + 1, face_w, face_h)
        } else {
            let shadow = theme::control().with_fg(theme::button_shadow());
            canvas.fill_rect(
                ClipRect::new(rect.x + 1, rect.bottom() - 1, face_w, 1),
                '▀',
                shadow,
            );
            canvas.fill_rect(
                ClipRect::new(rect.right() - 1, rect.y + 1, 1, face_h - 1),
                '█',
                shadow,
            );
            ClipRect::new(rect.x, rect.y, face_w, face_h)
        };
        canvas.fill_rect(face, ' ', attr);
        canvas.draw_text_aligned(
            face.x,
            face.y + dy,
            face.width,
            self.base.title(),
            self.base.align(),
            attr,
        );
    }

    fn process_event(&mut self, event: &Event, ctx: &mut ComponentContext) -> bool {
        if !self.base.enabled() {
            return false;
        }
        match event {
            Event::Key(key) if key.code == KeyCode::Char(' ') && !self.pressed => {
                self.pressed = true;
                ctx.schedule(self.flash, RELEASE_TOKEN);
                self.click(ctx);
                true
            }
            Event::Key(key) if key.code == KeyCode::Esc && self.pressed => {
                self.pressed = false;
                ctx.release_events();
                true
            }
            Event::Timer {
                token: RELEASE_TOKEN,
                ..
            } => {
                self.pressed = false;
                true
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.pressed = true;
                    ctx.grab_events();
                    true
                }
                MouseEventKind::Up(_) if self.pressed => {
                    ctx.release_events();
                    self.pressed = false;
                    if self
                        .base
                        .rect()
                        .contains(mouse.column as i32, mouse.row as i32)
                    {
                        self.click(ctx);
                    }
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}
