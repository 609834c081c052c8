use std::fmt;

use ratatui::style::Color;

use crate::canvas::{Canvas, truncate_to_width};
use crate::colors::{Attr, real_color};
use crate::geometry::ClipRect;
use crate::theme;
use crate::widget::{Control, Widget};

const BAR: char = '█';
const AXIS: char = '─';
const RULER: char = '│';
const CORNER: char = '└';
const MARK: char = '┬';

/// One bar: its value, the title under it, and optional colors and fill
/// character. Unset colors fall back to the chart's.
#[derive(Debug, Clone, PartialEq)]
pub struct BarData {
    pub value: f64,
    pub title: String,
    pub fg: Color,
    pub bg: Color,
    pub ch: Option<char>,
}

impl BarData {
    pub fn new(value: f64, title: impl Into<String>) -> Self {
        Self {
            value,
            title: title.into(),
            fg: Color::Reset,
            bg: Color::Reset,
            ch: None,
        }
    }

    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn with_char(mut self, ch: char) -> Self {
        self.ch = Some(ch);
        self
    }
}

/// What the cell painter gets for every cell of a bar. Only `fg`, `bg` and
/// `ch` are read back.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDataCell {
    pub title: String,
    pub index: usize,
    /// Value at the height of this cell.
    pub value: f64,
    /// Value of the whole bar.
    pub bar_max: f64,
    /// Largest value in the chart.
    pub total_max: f64,
    pub fg: Color,
    pub bg: Color,
    pub ch: char,
}

type CellPainter = Box<dyn Fn(&mut BarDataCell)>;

/// Vertical bar chart.
///
/// Bars share one width: `min_bar_width`, or with autosize the widest that
/// lets every bar fit, never below `min_bar_width`. Bars that do not fit are
/// not drawn. A value column on the left shows when `value_width` is
/// positive, the horizontal axis with bar titles when `show_titles` is on,
/// and a legend on the right when `legend_width` is over 3. Either side
/// panel is dropped when it would take half of the chart.
pub struct BarChart {
    base: Control,
    data: Vec<BarData>,
    auto_size: bool,
    gap: i32,
    bar_width: i32,
    legend_width: i32,
    value_width: i32,
    show_titles: bool,
    show_marks: bool,
    painter: Option<CellPainter>,
}

impl fmt::Debug for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarChart")
            .field("data", &self.data)
            .field("auto_size", &self.auto_size)
            .field("bar_width", &self.bar_width)
            .finish_non_exhaustive()
    }
}

impl BarChart {
    pub fn new(width: i32, height: i32) -> Self {
        let mut base = Control::new();
        base.set_constraints(width.max(1), height.max(1));
        base.set_tab_stop(false);
        Self {
            base,
            data: Vec::new(),
            auto_size: false,
            gap: 0,
            bar_width: 3,
            legend_width: 0,
            value_width: 0,
            show_titles: true,
            show_marks: false,
            painter: None,
        }
    }

    pub fn with_data(mut self, data: impl IntoIterator<Item = BarData>) -> Self {
        self.set_data(data);
        self
    }

    pub fn with_auto_size(mut self, auto: bool) -> Self {
        self.auto_size = auto;
        self
    }

    pub fn with_bar_gap(mut self, gap: i32) -> Self {
        self.set_bar_gap(gap);
        self
    }

    pub fn with_legend_width(mut self, width: i32) -> Self {
        self.legend_width = width;
        self
    }

    pub fn with_value_width(mut self, width: i32) -> Self {
        self.value_width = width;
        self
    }

    /// Replace the per-cell look of the bars. The painter sees the value at
    /// each cell's height and may change its colors and character.
    pub fn on_draw_cell(mut self, painter: impl Fn(&mut BarDataCell) + 'static) -> Self {
        self.painter = Some(Box::new(painter));
        self
    }

    pub fn data(&self) -> &[BarData] {
        &self.data
    }

    pub fn add_data(&mut self, item: BarData) {
        self.data.push(item);
    }

    pub fn set_data(&mut self, data: impl IntoIterator<Item = BarData>) {
        self.data = data.into_iter().collect();
    }

    pub fn clear_data(&mut self) {
        self.data.clear();
    }

    pub fn auto_size(&self) -> bool {
        self.auto_size
    }

    pub fn set_auto_size(&mut self, auto: bool) {
        self.auto_size = auto;
    }

    pub fn bar_gap(&self) -> i32 {
        self.gap
    }

    pub fn set_bar_gap(&mut self, gap: i32) {
        self.gap = gap.max(0);
    }

    pub fn min_bar_width(&self) -> i32 {
        self.bar_width
    }

    pub fn set_min_bar_width(&mut self, width: i32) {
        self.bar_width = width.max(1);
    }

    pub fn legend_width(&self) -> i32 {
        self.legend_width
    }

    pub fn set_legend_width(&mut self, width: i32) {
        self.legend_width = width;
    }

    pub fn value_width(&self) -> i32 {
        self.value_width
    }

    pub fn set_value_width(&mut self, width: i32) {
        self.value_width = width;
    }

    pub fn show_titles(&self) -> bool {
        self.show_titles
    }

    pub fn set_show_titles(&mut self, show: bool) {
        self.show_titles = show;
    }

    /// Marks under the axis need `show_titles` as well.
    pub fn show_marks(&self) -> bool {
        self.show_marks
    }

    pub fn set_show_marks(&mut self, show: bool) {
        self.show_marks = show;
    }

    /// Width every bar is drawn with at the current size.
    pub fn bar_width(&self) -> i32 {
        if self.data.is_empty() {
            return 0;
        }
        if !self.auto_size {
            return self.bar_width;
        }
        let (_, width) = self.bar_area();
        let count = self.data.len() as i32;
        let needed = count * self.bar_width + (count - 1) * self.gap;
        if needed >= width {
            return self.bar_width;
        }
        ((width - (count - 1) * self.gap) / count).max(1)
    }

    fn bar_height(&self) -> i32 {
        let height = self.base.size().height;
        if self.show_titles { height - 2 } else { height }
    }

    /// Start column (relative to the chart) and width of the bar area.
    fn bar_area(&self) -> (i32, i32) {
        let mut width = self.base.size().width;
        let mut pos = 0;
        if self.value_width < width / 2 {
            width -= self.value_width + 1;
            pos = self.value_width + 1;
        }
        if self.legend_width < width / 2 {
            width -= self.legend_width;
        }
        (pos, width)
    }

    /// Rows per unit of value, and the largest value.
    fn scale(&self) -> Option<(f64, f64)> {
        let height = self.bar_height();
        if height <= 1 {
            return None;
        }
        let max = self
            .data
            .iter()
            .map(|d| d.value)
            .fold(f64::NEG_INFINITY, f64::max);
        if max.is_nan() || max <= 0.0 {
            return None;
        }
        Some((f64::from(height) / max, max))
    }

    fn draw_rulers(&self, canvas: &mut Canvas, attr: Attr) {
        if self.value_width <= 0 && self.legend_width <= 0 && !self.show_titles {
            return;
        }
        let rect = self.base.rect();
        let (mut pos, mut width) = self.bar_area();
        let height = self.bar_height();
        if pos > 0 {
            pos -= 1;
            width += 1;
        }
        if pos > 0 {
            for dy in 0..height {
                canvas.put(rect.x + pos, rect.y + dy, RULER, attr);
            }
        }
        if self.show_titles {
            for dx in 0..width {
                canvas.put(rect.x + pos + dx, rect.y + height, AXIS, attr);
            }
            if pos > 0 {
                canvas.put(rect.x + pos, rect.y + height, CORNER, attr);
            }
        }
    }

    fn draw_values(&self, canvas: &mut Canvas, attr: Attr) {
        let width = self.value_width;
        let (pos, _) = self.bar_area();
        if width <= 0 || pos == 0 {
            return;
        }
        let Some((_, max)) = self.scale() else {
            return;
        };
        let rect = self.base.rect();
        let height = self.bar_height();
        for dy in (0..height - 1).step_by(2) {
            let value = f64::from(height - dy) / f64::from(height) * max;
            let text = format!("{value:>w$.2}", w = width as usize);
            let text = truncate_to_width(&text, width as usize);
            canvas.draw_text(rect.x, rect.y + dy, &text, attr);
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas, attr: Attr) {
        let rect = self.base.rect();
        let (pos, width) = self.bar_area();
        let x = rect.x + pos + width;
        if pos + width >= rect.width - 3 {
            return;
        }
        for (idx, item) in self.data.iter().enumerate().take(rect.height.max(0) as usize) {
            let y = rect.y + idx as i32;
            let swatch = Attr::new(item.fg, item.bg).or(attr);
            canvas.put(x, y, item.ch.unwrap_or(BAR), swatch);
            let text = format!(" - {}", item.title);
            let text = truncate_to_width(&text, self.legend_width as usize);
            canvas.draw_text(x + 1, y, &text, attr);
        }
    }

    fn draw_bars(&self, canvas: &mut Canvas, attr: Attr) {
        let (start, width) = self.bar_area();
        let bar_w = self.bar_width();
        if width < 2 || bar_w == 0 {
            return;
        }
        let Some((coeff, max)) = self.scale() else {
            return;
        };
        let rect = self.base.rect();
        let height = self.bar_height();

        let mut pos = start;
        for (index, item) in self.data.iter().enumerate() {
            if pos + bar_w > start + width {
                break;
            }
            let x = rect.x + pos;
            let fg = real_color(item.fg, attr.fg);
            let bg = real_color(item.bg, attr.bg);
            let ch = item.ch.unwrap_or(BAR);
            let bar_h = ((item.value * coeff) as i32).clamp(0, height);

            match &self.painter {
                None => canvas.fill_rect(
                    ClipRect::new(x, rect.y + height - bar_h, bar_w, bar_h),
                    ch,
                    Attr::new(fg, bg),
                ),
                Some(painter) => {
                    for dy in 0..bar_h {
                        let mut cell = BarDataCell {
                            title: item.title.clone(),
                            index,
                            value: max * f64::from(dy + 1) / f64::from(height),
                            bar_max: item.value,
                            total_max: max,
                            fg,
                            bg,
                            ch,
                        };
                        painter(&mut cell);
                        let y = rect.y + height - 1 - dy;
                        for dx in 0..bar_w {
                            canvas.put(x + dx, y, cell.ch, Attr::new(cell.fg, cell.bg));
                        }
                    }
                }
            }

            if self.show_titles {
                if self.show_marks {
                    canvas.put(x + bar_w / 2, rect.y + height, MARK, attr);
                }
                let title = truncate_to_width(&item.title, bar_w as usize);
                let shift = (bar_w - title.chars().count() as i32) / 2;
                canvas.draw_text(x + shift, rect.y + height + 1, &title, attr);
            }
            pos += bar_w + self.gap;
        }
    }
}

impl Widget for BarChart {
    fn base(&self) -> &Control {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Control {
        &mut self.base
    }

    fn draw(&self, canvas: &mut Canvas) {
        let attr = self.base.colors().or(theme::bar_chart());
        canvas.fill_rect(self.base.rect(), ' ', attr);
        if self.data.is_empty() {
            return;
        }
        self.draw_rulers(canvas, attr);
        self.draw_values(canvas, attr);
        self.draw_legend(canvas, attr);
        self.draw_bars(canvas, attr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    fn chart(width: i32, height: i32) -> BarChart {
        let mut chart = BarChart::new(width, height)
            .with_data([BarData::new(2.0, "a"), BarData::new(4.0, "b")]);
        chart.base_mut().set_size(width, height);
        chart
    }

    fn render(chart: &BarChart) -> Buffer {
        let size = chart.base().size();
        let mut buffer = Buffer::empty(Rect::new(0, 0, size.width as u16, size.height as u16));
        chart.draw(&mut Canvas::new(&mut buffer));
        buffer
    }

    fn sym(buffer: &Buffer, x: u16, y: u16) -> &str {
        buffer[(x, y)].symbol()
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        let buffer = render(&chart(20, 8));
        // bar height 6 with the axis row and the title row below
        assert_eq!(sym(&buffer, 1, 5), "█");
        assert_eq!(sym(&buffer, 1, 3), "█");
        assert_eq!(sym(&buffer, 1, 2), " ");
        assert_eq!(sym(&buffer, 4, 0), "█");
        assert_eq!(sym(&buffer, 7, 0), " ");
        assert_eq!(sym(&buffer, 0, 6), "─");
        assert_eq!(sym(&buffer, 2, 7), "a");
        assert_eq!(sym(&buffer, 5, 7), "b");
    }

    #[test]
    fn autosize_widens_bars_to_fill_the_area() {
        let mut c = chart(20, 8).with_bar_gap(1);
        assert_eq!(c.bar_width(), 3);
        c.set_auto_size(true);
        assert_eq!(c.bar_width(), 9);
        // never narrower than the minimum
        c.set_min_bar_width(12);
        assert_eq!(c.bar_width(), 12);
        c.clear_data();
        assert_eq!(c.bar_width(), 0);
    }

    #[test]
    fn bars_that_do_not_fit_are_dropped() {
        let mut c = chart(8, 5);
        c.add_data(BarData::new(1.0, "c"));
        // area is 7 wide: two bars of 3 fit, the third does not
        let buffer = render(&c);
        assert_eq!(sym(&buffer, 4, 0), "█");
        assert_eq!(sym(&buffer, 7, 2), " ");
    }

    #[test]
    fn value_column_and_ruler() {
        let c = chart(20, 8).with_value_width(5);
        let buffer = render(&c);
        let row = |y: u16| -> String { (0..5u16).map(|x| sym(&buffer, x, y).to_string()).collect() };
        assert_eq!(row(0), " 4.00");
        assert_eq!(row(2), " 2.67");
        assert_eq!(row(4), " 1.33");
        assert_eq!(sym(&buffer, 5, 0), "│");
        assert_eq!(sym(&buffer, 5, 6), "└");
        assert_eq!(sym(&buffer, 6, 6), "─");
        assert_eq!(sym(&buffer, 6, 5), "█");
    }

    #[test]
    fn legend_lists_bars_with_their_colors() {
        let mut c = chart(30, 8).with_legend_width(8);
        c.set_data([
            BarData::new(2.0, "alpha").with_colors(Color::Red, Color::Reset),
            BarData::new(4.0, "b").with_char('#'),
        ]);
        let buffer = render(&c);
        let row = |y: u16| -> String { (22..30u16).map(|x| sym(&buffer, x, y).to_string()).collect() };
        assert_eq!(row(0), "█ - alph");
        assert_eq!(row(1), "# - b   ");
        assert_eq!(buffer[(22u16, 0u16)].fg, Color::Red);
        assert_eq!(buffer[(22u16, 0u16)].bg, theme::bar_chart().bg);

        // a legend of 3 cells or less is not drawn
        c.set_legend_width(3);
        let buffer = render(&c);
        assert_ne!(sym(&buffer, 28, 0), "-");
    }

    #[test]
    fn marks_under_each_bar() {
        let mut c = chart(20, 8).with_bar_gap(1);
        c.set_show_marks(true);
        let buffer = render(&c);
        assert_eq!(sym(&buffer, 2, 6), "┬");
        assert_eq!(sym(&buffer, 6, 6), "┬");
        c.set_show_titles(false);
        let buffer = render(&c);
        // no axis: bars take the full height
        assert_eq!(sym(&buffer, 5, 7), "█");
        assert_eq!(sym(&buffer, 2, 6), "█");
    }

    #[test]
    fn cell_painter_recolors_by_height() {
        let c = chart(20, 8).on_draw_cell(|cell| {
            if cell.value > cell.total_max / 2.0 {
                cell.ch = '#';
                cell.fg = Color::Red;
            }
        });
        let buffer = render(&c);
        assert_eq!(sym(&buffer, 4, 0), "#");
        assert_eq!(buffer[(4u16, 0u16)].fg, Color::Red);
        assert_eq!(sym(&buffer, 4, 3), "█");
        assert_eq!(sym(&buffer, 1, 5), "█");
    }

    #[test]
    fn nothing_but_background_without_data() {
        let mut c = chart(10, 5);
        c.clear_data();
        let buffer = render(&c);
        assert!((0..10u16).all(|x| sym(&buffer, x, 3) == " "));
    }
}
