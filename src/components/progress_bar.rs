use crate::canvas::Canvas;
use crate::colors::Attr;
use crate::geometry::ClipRect;
use crate::theme;
use crate::widget::{Align, Control, Pack, Widget};

const FILLED: char = '█';
const EMPTY: char = '░';

/// Progress indicator for a value in `[min, max]`.
///
/// The filled part uses the active colors, the rest the normal colors, in
/// both directions. Horizontal bars may show a title template with
/// `{{percent}}`, `{{value}}`, `{{min}}` and `{{max}}` placeholders.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    base: Control,
    direction: Pack,
    min: i32,
    max: i32,
    value: i32,
}

impl ProgressBar {
    /// A bar of at least `width` x `height` cells with limits `0..=10`.
    pub fn new(width: i32, height: i32) -> Self {
        let mut base = Control::new();
        base.set_constraints(width.max(1), height.max(1));
        base.set_tab_stop(false);
        base.set_align(Align::Center);
        Self {
            base,
            direction: Pack::Horizontal,
            min: 0,
            max: 10,
            value: 0,
        }
    }

    pub fn with_direction(mut self, direction: Pack) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_limits(mut self, min: i32, max: i32) -> Self {
        self.set_limits(min, max);
        self
    }

    pub fn with_title(mut self, template: impl Into<String>) -> Self {
        self.base.set_title(template);
        self
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Clamped to the limits.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max.max(self.min));
    }

    pub fn limits(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    pub fn set_limits(&mut self, min: i32, max: i32) {
        self.min = min;
        self.max = max;
        if self.value < min {
            self.value = min;
        }
        if self.value > max {
            self.value = max;
        }
    }

    /// Advance by one, stopping at the maximum. Returns the new value.
    pub fn step(&mut self) -> i32 {
        self.value = self.value.saturating_add(1).min(self.max);
        self.value
    }

    pub fn percent(&self) -> i32 {
        if self.value >= self.max {
            100
        } else if self.value > self.min {
            let done = i64::from(self.value) - i64::from(self.min);
            let range = i64::from(self.max) - i64::from(self.min);
            (100 * done / range) as i32
        } else {
            0
        }
    }

    /// The title with placeholders expanded.
    pub fn title_text(&self) -> String {
        self.base
            .title()
            .replace("{{percent}}", &self.percent().to_string())
            .replace("{{value}}", &self.value.to_string())
            .replace("{{min}}", &self.min.to_string())
            .replace("{{max}}", &self.max.to_string())
    }

    fn draw_title(&self, canvas: &mut Canvas, rect: ClipRect, filled: i32, on: Attr, off: Attr) {
        let title = self.title_text();
        if title.is_empty() {
            return;
        }
        let text = crate::canvas::truncate_to_width(&title, rect.width as usize);
        let len = text.chars().count() as i32;
        let shift = match self.base.align() {
            Align::Left => 0,
            Align::Center => (rect.width - len) / 2,
            Align::Right => rect.width - len,
        };
        for (i, ch) in text.chars().enumerate() {
            let col = shift + i as i32;
            let attr = if col < filled { on } else { off };
            canvas.put(rect.x + col, rect.y, ch, attr);
        }
    }
}

impl Widget for ProgressBar {
    fn base(&self) -> &Control {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Control {
        &mut self.base
    }

    fn draw(&self, canvas: &mut Canvas) {
        if self.max <= self.min {
            return;
        }
        let rect = self.base.rect();
        let off = self.base.colors().or(theme::progress_empty());
        let on = self.base.active_colors().or(theme::progress_filled());
        let percent = self.percent();

        match self.direction {
            Pack::Horizontal => {
                let filled = percent * rect.width / 100;
                canvas.fill_rect(ClipRect::new(rect.x, rect.y, filled, rect.height), FILLED, on);
                canvas.fill_rect(
                    ClipRect::new(rect.x + filled, rect.y, rect.width - filled, rect.height),
                    EMPTY,
                    off,
                );
                self.draw_title(canvas, rect, filled, on, off);
            }
            Pack::Vertical => {
                let filled = percent * rect.height / 100;
                let empty = rect.height - filled;
                canvas.fill_rect(ClipRect::new(rect.x, rect.y, rect.width, empty), EMPTY, off);
                canvas.fill_rect(
                    ClipRect::new(rect.x, rect.y + empty, rect.width, filled),
                    FILLED,
                    on,
                );
            }
        }
    }
}
