//! Canvas: a clipped drawing surface over a ratatui `Buffer`.
//!
//! Widgets draw in signed screen coordinates. Every write goes through the
//! current clip rectangle (top of the clip stack, or the whole buffer), so a
//! control scrolled or dragged partly off-screen never writes outside its
//! region and never indexes outside the buffer.

use ratatui::buffer::Buffer;

use crate::colors::Attr;
use crate::geometry::ClipRect;
use crate::widget::Align;

pub struct Canvas<'a> {
    area: ClipRect,
    buffer: &'a mut Buffer,
    clips: Vec<ClipRect>,
}

impl<'a> Canvas<'a> {
    pub fn new(buffer: &'a mut Buffer) -> Self {
        let area = ClipRect::from(buffer.area);
        Self {
            area,
            buffer,
            clips: Vec::new(),
        }
    }

    /// Whole drawable area.
    pub fn area(&self) -> ClipRect {
        self.area
    }

    /// Region writes are currently confined to.
    pub fn clip(&self) -> ClipRect {
        self.clips.last().copied().unwrap_or(self.area)
    }

    pub fn buffer(&self) -> &Buffer {
        self.buffer
    }

    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    /// Narrow the clip region to `rect`. The result never exceeds the
    /// region already in force.
    pub fn push_clip(&mut self, rect: ClipRect) {
        self.clips.push(rect.intersection(self.clip()));
    }

    pub fn pop_clip(&mut self) {
        self.clips.pop();
    }

    /// Run `f` with `rect` as the clip region, restoring the previous clip
    /// afterwards.
    pub fn with_clip<R>(&mut self, rect: ClipRect, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.clips.len();
        self.push_clip(rect);
        let out = f(self);
        self.clips.truncate(depth);
        out
    }

    pub fn put(&mut self, x: i32, y: i32, ch: char, attr: Attr) {
        if !self.clip().contains(x, y) {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x as u16, y as u16)) {
            cell.set_char(ch);
            cell.set_fg(attr.fg);
            cell.set_bg(attr.bg);
        }
    }

    /// Fill `rect` with `ch`.
    pub fn fill_rect(&mut self, rect: ClipRect, ch: char, attr: Attr) {
        let visible = rect.intersection(self.clip());
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                self.put(x, y, ch, attr);
            }
        }
    }

    pub fn clear(&mut self, attr: Attr) {
        self.fill_rect(self.area, ' ', attr);
    }

    /// Write `text` left to right starting at (x, y), one cell per char.
    /// Returns the number of cells consumed, including clipped ones.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, attr: Attr) -> i32 {
        let mut cx = x;
        for ch in text.chars() {
            self.put(cx, y, ch, attr);
            cx += 1;
        }
        cx - x
    }

    /// Write `text` into a `width`-cell slot, truncating and aligning it.
    pub fn draw_text_aligned(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        text: &str,
        align: Align,
        attr: Attr,
    ) {
        if width <= 0 {
            return;
        }
        let text = truncate_to_width(text, width as usize);
        let len = text.chars().count() as i32;
        let offset = match align {
            Align::Left => 0,
            Align::Center => (width - len) / 2,
            Align::Right => width - len,
        };
        self.draw_text(x + offset, y, &text, attr);
    }
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn writes_outside_clip_are_dropped() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 6, 2));
        let mut canvas = Canvas::new(&mut buffer);
        canvas.with_clip(ClipRect::new(1, 0, 3, 1), |c| {
            c.draw_text(-2, 0, "abcdefgh", Attr::UNSET);
            c.put(1, 1, 'x', Attr::UNSET);
        });
        assert_eq!(canvas.clip_depth(), 0);
        assert_eq!(row(&buffer, 0), " def  ");
        assert_eq!(row(&buffer, 1), "      ");
    }

    #[test]
    fn nested_clip_restores_on_exit() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 4, 1));
        let mut canvas = Canvas::new(&mut buffer);
        canvas.push_clip(ClipRect::new(0, 0, 2, 1));
        canvas.with_clip(ClipRect::new(1, 0, 1, 1), |c| {
            assert_eq!(c.clip(), ClipRect::new(1, 0, 1, 1));
        });
        assert_eq!(canvas.clip(), ClipRect::new(0, 0, 2, 1));
        canvas.pop_clip();
        assert_eq!(canvas.clip(), canvas.area());
    }

    #[test]
    fn inner_clip_cannot_widen_outer() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 8, 1));
        let mut canvas = Canvas::new(&mut buffer);
        canvas.with_clip(ClipRect::new(1, 0, 3, 1), |c| {
            c.with_clip(ClipRect::new(0, 0, 8, 1), |c| {
                assert_eq!(c.clip(), ClipRect::new(1, 0, 3, 1));
                c.draw_text(0, 0, "abcdefgh", Attr::UNSET);
            });
        });
        assert_eq!(row(&buffer, 0), " bcd    ");
    }

    #[test]
    fn fill_rect_sets_attributes() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 3, 3));
        let mut canvas = Canvas::new(&mut buffer);
        canvas.fill_rect(
            ClipRect::new(1, 1, 5, 5),
            '#',
            Attr::new(Color::Red, Color::Blue),
        );
        assert_eq!(row(&buffer, 0), "   ");
        assert_eq!(row(&buffer, 2), " ##");
        assert_eq!(buffer[(2u16, 2u16)].bg, Color::Blue);
    }

    #[test]
    fn aligned_text() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 7, 1));
        let mut canvas = Canvas::new(&mut buffer);
        canvas.draw_text_aligned(0, 0, 7, "ok", Align::Right, Attr::UNSET);
        canvas.draw_text_aligned(0, 0, 7, "mid", Align::Center, Attr::UNSET);
        assert_eq!(row(&buffer, 0), "  midok");
    }
}
