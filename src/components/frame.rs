use crate::canvas::Canvas;
use crate::theme;
use crate::widget::{Control, Widget};
use crate::window::BorderStyle;
use crate::window::decorator::{draw_border, draw_title};

/// Plain container, optionally outlined with a titled border.
#[derive(Debug, Clone)]
pub struct Frame {
    base: Control,
    border: BorderStyle,
}

impl Frame {
    pub fn new() -> Self {
        let mut base = Control::new();
        base.set_tab_stop(false);
        Self {
            base,
            border: BorderStyle::None,
        }
    }

    /// A frame drawn with `border`. The border takes one cell of padding on
    /// each side.
    pub fn bordered(border: BorderStyle, title: impl Into<String>) -> Self {
        let mut frame = Self::new();
        frame.set_border(border);
        frame.base.set_title(title);
        frame
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn set_border(&mut self, border: BorderStyle) {
        self.border = border;
        let pad = if border == BorderStyle::None { 0 } else { 1 };
        self.base.set_paddings(pad, pad);
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Frame {
    fn base(&self) -> &Control {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Control {
        &mut self.base
    }

    fn draw(&self, canvas: &mut Canvas) {
        let rect = self.base.rect();
        let attr = self.base.colors().or(theme::control());
        canvas.fill_rect(rect, ' ', attr);
        if self.border != BorderStyle::None {
            draw_border(canvas, rect, self.border, attr);
            draw_title(canvas, rect, self.base.title(), 0, attr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn border_sets_padding() {
        let mut frame = Frame::bordered(BorderStyle::Single, "x");
        assert_eq!(frame.base().paddings(), Size::new(1, 1));
        frame.set_border(BorderStyle::None);
        assert_eq!(frame.base().paddings(), Size::new(0, 0));
        assert!(!frame.base().tab_stop());
    }
}
