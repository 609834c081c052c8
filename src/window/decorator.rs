use crate::canvas::Canvas;
use crate::colors::Attr;
use crate::geometry::ClipRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    None,
    #[default]
    Single,
    Double,
    Thick,
}

impl BorderStyle {
    /// Corner and edge glyphs: top-left, top-right, bottom-left,
    /// bottom-right, horizontal, vertical.
    fn glyphs(self) -> [char; 6] {
        match self {
            BorderStyle::None => [' '; 6],
            BorderStyle::Single => ['┌', '┐', '└', '┘', '─', '│'],
            BorderStyle::Double => ['╔', '╗', '╚', '╝', '═', '║'],
            BorderStyle::Thick => ['┏', '┓', '┗', '┛', '━', '┃'],
        }
    }

    pub fn parse(name: &str) -> Option<BorderStyle> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(BorderStyle::None),
            "single" => Some(BorderStyle::Single),
            "double" => Some(BorderStyle::Double),
            "thick" => Some(BorderStyle::Thick),
            _ => None,
        }
    }
}

/// Outline `rect` with the glyphs of `style`. Writes outside the canvas clip
/// are dropped.
pub fn draw_border(canvas: &mut Canvas, rect: ClipRect, style: BorderStyle, attr: Attr) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let [tl, tr, bl, br, h, v] = style.glyphs();
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    for x in rect.x + 1..right {
        canvas.put(x, rect.y, h, attr);
        canvas.put(x, bottom, h, attr);
    }
    for y in rect.y + 1..bottom {
        canvas.put(rect.x, y, v, attr);
        canvas.put(right, y, v, attr);
    }
    canvas.put(rect.x, rect.y, tl, attr);
    canvas.put(right, rect.y, tr, attr);
    canvas.put(rect.x, bottom, bl, attr);
    canvas.put(right, bottom, br, attr);
}

/// Title text on the top border, starting two cells in and never running
/// into the last `reserved` cells.
pub fn draw_title(canvas: &mut Canvas, rect: ClipRect, title: &str, reserved: i32, attr: Attr) {
    if title.is_empty() {
        return;
    }
    let room = rect.width - 4 - reserved;
    if room <= 0 {
        return;
    }
    let text = crate::canvas::truncate_to_width(title, room as usize);
    canvas.draw_text(rect.x + 2, rect.y, &text, attr);
}
