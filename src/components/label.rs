use crate::canvas::Canvas;
use crate::theme;
use crate::widget::{Control, Widget};

/// Single line of static text.
#[derive(Debug, Clone)]
pub struct Label {
    base: Control,
    text: String,
}

impl Label {
    /// The minimal width is the text length.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut base = Control::new();
        base.set_tab_stop(false);
        base.set_constraints(text.chars().count() as i32, 1);
        Self { base, text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The constraint is left alone so the layout stays
    /// stable; longer text is truncated when drawn.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
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
        canvas.draw_text_aligned(
            rect.x,
            rect.y + (rect.height - 1) / 2,
            rect.width,
            &self.text,
            self.base.align(),
            attr,
        );
    }
}
