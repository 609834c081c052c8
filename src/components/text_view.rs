use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

use crate::canvas::Canvas;
use crate::colors::Attr;
use crate::component_context::ComponentContext;
use crate::event::Event;
use crate::theme;
use crate::widget::{Control, Widget};

use super::scroll_bar::{self, Orientation};

/// Read-only, scrollable list of text lines.
///
/// The rightmost column holds a vertical scroll bar. Without word wrap the
/// bottom row holds a horizontal one and long lines are cut at the right
/// edge; with word wrap they continue on the following rows. With
/// autoscroll on, new text scrolls the view to the end, which suits log
/// panes. A maximum item count turns the view into a FIFO: the oldest lines
/// go first.
///
/// Scrolling positions count display rows, so in word-wrap mode one long
/// line may take several positions.
#[derive(Debug, Clone)]
pub struct TextView {
    base: Control,
    lines: Vec<String>,
    lengths: Vec<usize>,
    top: usize,
    left: usize,
    word_wrap: bool,
    autoscroll: bool,
    max_items: Option<usize>,
}

impl TextView {
    /// A view of at least `width` x `height` cells, including its scroll
    /// bars.
    pub fn new(width: i32, height: i32) -> Self {
        let mut base = Control::new();
        base.set_constraints(width.max(3), height.max(3));
        Self {
            base,
            lines: Vec::new(),
            lengths: Vec::new(),
            top: 0,
            left: 0,
            word_wrap: false,
            autoscroll: false,
            max_items: None,
        }
    }

    pub fn with_word_wrap(mut self, wrap: bool) -> Self {
        self.set_word_wrap(wrap);
        self
    }

    pub fn with_autoscroll(mut self, autoscroll: bool) -> Self {
        self.autoscroll = autoscroll;
        self
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.set_max_items(Some(max));
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// First display row shown.
    pub fn top_row(&self) -> usize {
        self.top
    }

    /// Columns scrolled off the left edge.
    pub fn left_shift(&self) -> usize {
        self.left
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    /// Switch wrapping, keeping the line at the top of the view in place.
    pub fn set_word_wrap(&mut self, wrap: bool) {
        if wrap == self.word_wrap {
            return;
        }
        let line = self.line_at_row(self.top);
        self.word_wrap = wrap;
        self.left = 0;
        self.top = self.first_row_of(line);
        self.clamp_top();
    }

    pub fn autoscroll(&self) -> bool {
        self.autoscroll
    }

    pub fn set_autoscroll(&mut self, autoscroll: bool) {
        self.autoscroll = autoscroll;
    }

    pub fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// `None` keeps every line. A lower limit drops the oldest lines right
    /// away.
    pub fn set_max_items(&mut self, max: Option<usize>) {
        self.max_items = max;
        self.apply_limit();
    }

    /// Replace the content.
    pub fn set_text<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.clear();
        self.lengths.clear();
        self.top = 0;
        self.left = 0;
        self.add_text(lines);
    }

    /// Append lines at the end.
    pub fn add_text<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            let line = line.into();
            self.lengths.push(line.chars().count());
            self.lines.push(line);
        }
        self.apply_limit();
        if self.autoscroll {
            self.end();
        }
    }

    /// Replace the content with the lines of `path`, trailing blanks
    /// stripped.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let reader = BufReader::new(File::open(path)?);
        let lines = reader
            .lines()
            .map(|line| line.map(|l| l.trim_end_matches(' ').to_string()))
            .collect::<io::Result<Vec<_>>>()?;
        self.set_text(lines);
        Ok(())
    }

    pub fn home(&mut self) {
        self.top = 0;
    }

    /// Scroll so the last row sits at the bottom of the view.
    pub fn end(&mut self) {
        self.top = self.max_top();
    }

    fn apply_limit(&mut self) {
        let Some(max) = self.max_items else {
            return;
        };
        if self.lines.len() > max {
            let extra = self.lines.len() - max;
            self.lines.drain(..extra);
            self.lengths.drain(..extra);
        }
        self.clamp_top();
    }

    fn output_width(&self) -> usize {
        (self.base.size().width - 1).max(1) as usize
    }

    fn output_height(&self) -> usize {
        let height = self.base.size().height;
        let rows = if self.word_wrap { height } else { height - 1 };
        rows.max(0) as usize
    }

    fn rows_of(&self, length: usize) -> usize {
        if self.word_wrap {
            length.div_ceil(self.output_width()).max(1)
        } else {
            1
        }
    }

    /// Display rows the whole content takes.
    pub fn virtual_height(&self) -> usize {
        if !self.word_wrap {
            return self.lines.len();
        }
        self.lengths.iter().map(|len| self.rows_of(*len)).sum()
    }

    /// Width of the widest line, never less than the output area.
    pub fn virtual_width(&self) -> usize {
        let widest = self.lengths.iter().copied().max().unwrap_or(0);
        widest.max(self.output_width())
    }

    fn max_top(&self) -> usize {
        self.virtual_height().saturating_sub(self.output_height())
    }

    fn max_left(&self) -> usize {
        self.virtual_width() - self.output_width()
    }

    fn clamp_top(&mut self) {
        self.top = self.top.min(self.max_top());
    }

    fn line_at_row(&self, row: usize) -> usize {
        let mut start = 0;
        for (idx, len) in self.lengths.iter().enumerate() {
            let rows = self.rows_of(*len);
            if row < start + rows {
                return idx;
            }
            start += rows;
        }
        self.lines.len().saturating_sub(1)
    }

    fn first_row_of(&self, line: usize) -> usize {
        self.lengths
            .iter()
            .take(line)
            .map(|len| self.rows_of(*len))
            .sum()
    }

    fn move_up(&mut self, rows: usize) {
        self.top = self.top.saturating_sub(rows);
    }

    fn move_down(&mut self, rows: usize) {
        self.top = (self.top + rows).min(self.max_top());
    }

    fn move_left(&mut self) {
        if !self.word_wrap {
            self.left = self.left.saturating_sub(1);
        }
    }

    fn move_right(&mut self) {
        if !self.word_wrap && self.left < self.max_left() {
            self.left += 1;
        }
    }

    fn process_key(&mut self, code: KeyCode) -> bool {
        let page = self.output_height().max(1);
        match code {
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            KeyCode::Up => self.move_up(1),
            KeyCode::Down => self.move_down(1),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::PageUp => self.move_up(page),
            KeyCode::PageDown => self.move_down(page),
            _ => return false,
        }
        true
    }

    /// Left press on one of the scroll bars.
    fn process_bar_press(&mut self, mouse: &MouseEvent) -> bool {
        let rect = self.base.rect();
        let dx = mouse.column as i32 - rect.x;
        let dy = mouse.row as i32 - rect.y;
        let out_h = self.output_height() as i32;

        if dx == rect.width - 1 && dy < out_h {
            if dy == 0 {
                self.move_up(1);
            } else if dy == out_h - 1 {
                self.move_down(1);
            } else if let Some(row) = scroll_bar::item_by_thumb(dy, self.max_top() + 1, out_h) {
                self.top = row.min(self.max_top());
            }
            return true;
        }
        if self.word_wrap || dy != rect.height - 1 || dx >= rect.width - 1 {
            return false;
        }
        let bar = rect.width - 1;
        if dx == 0 {
            self.move_left();
        } else if dx == bar - 1 {
            self.move_right();
        } else if let Some(col) = scroll_bar::item_by_thumb(dx, self.max_left() + 1, bar) {
            self.left = col.min(self.max_left());
        }
        true
    }

    fn draw_lines(&self, canvas: &mut Canvas, attr: Attr) {
        let rect = self.base.rect();
        let width = self.output_width();
        let height = self.output_height();
        let mut row = 0;
        for (line, len) in self.lines.iter().zip(&self.lengths) {
            if row >= self.top + height {
                break;
            }
            let rows = self.rows_of(*len);
            if row + rows <= self.top {
                row += rows;
                continue;
            }
            for part in 0..rows {
                let screen_row = row + part;
                if screen_row < self.top || screen_row >= self.top + height {
                    continue;
                }
                let skip = if self.word_wrap {
                    part * width
                } else {
                    self.left
                };
                let text: String = line.chars().skip(skip).take(width).collect();
                let y = rect.y + (screen_row - self.top) as i32;
                canvas.draw_text(rect.x, y, &text, attr);
            }
            row += rows;
        }
    }
}

impl Widget for TextView {
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
            .resolve_colors(theme::edit(), theme::edit_active());
        canvas.fill_rect(rect, ' ', attr);
        self.draw_lines(canvas, attr);

        let out_h = self.output_height() as i32;
        let thumb = scroll_bar::thumb_position(self.top, self.max_top() + 1, out_h);
        scroll_bar::draw(
            canvas,
            rect.right() - 1,
            rect.y,
            out_h,
            Orientation::Vertical,
            thumb,
            attr,
        );
        if !self.word_wrap {
            let bar = rect.width - 1;
            let thumb = scroll_bar::thumb_position(self.left, self.max_left() + 1, bar);
            scroll_bar::draw(
                canvas,
                rect.x,
                rect.bottom() - 1,
                bar,
                Orientation::Horizontal,
                thumb,
                attr,
            );
        }
    }

    fn process_event(&mut self, event: &Event, _ctx: &mut ComponentContext) -> bool {
        if !self.base.active() || !self.base.enabled() {
            return false;
        }
        match event {
            Event::Key(key) => self.process_key(key.code),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self.process_bar_press(mouse),
                MouseEventKind::ScrollUp => {
                    self.move_up(1);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.move_down(1);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetId;
    use crossterm::event::KeyModifiers;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use std::io::Write;

    fn view(width: i32, height: i32) -> TextView {
        let mut view = TextView::new(width, height);
        view.base_mut().set_size(width, height);
        view.base_mut().set_active(true);
        view
    }

    fn press(view: &mut TextView, code: KeyCode) -> bool {
        let mut ctx = ComponentContext::new(WidgetId::DETACHED);
        view.process_event(&Event::key(code, KeyModifiers::NONE), &mut ctx)
    }

    fn rows(view: &TextView) -> Vec<String> {
        let size = view.base().size();
        let mut buffer = Buffer::empty(Rect::new(0, 0, size.width as u16, size.height as u16));
        view.draw(&mut Canvas::new(&mut buffer));
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn scrolls_vertically_within_content() {
        let mut v = view(6, 4);
        v.set_text((0..10).map(|i| format!("line{i}")));
        assert_eq!(v.virtual_height(), 10);
        press(&mut v, KeyCode::Up);
        assert_eq!(v.top_row(), 0);
        press(&mut v, KeyCode::PageDown);
        assert_eq!(v.top_row(), 3);
        press(&mut v, KeyCode::End);
        assert_eq!(v.top_row(), 7);
        press(&mut v, KeyCode::Down);
        assert_eq!(v.top_row(), 7);
        press(&mut v, KeyCode::Home);
        assert_eq!(v.top_row(), 0);
    }

    #[test]
    fn horizontal_scroll_shows_the_tail_of_long_lines() {
        let mut v = view(5, 3);
        v.set_text(["abcdefgh", "xy"]);
        for _ in 0..10 {
            press(&mut v, KeyCode::Right);
        }
        assert_eq!(v.left_shift(), 4);
        let out = rows(&v);
        assert_eq!(out[0], "efgh▲");
        assert_eq!(out[1], "    ▼");
        assert!(out[2].starts_with('◄'));
        press(&mut v, KeyCode::Left);
        assert_eq!(v.left_shift(), 3);
    }

    #[test]
    fn word_wrap_splits_lines_and_keeps_position() {
        let mut v = view(5, 4);
        v.set_text(["abcdefghij", "k", "lmnop", "q", "r", "s", "t"]);
        v.set_word_wrap(true);
        assert_eq!(v.virtual_height(), 10);
        let out = rows(&v);
        assert!(out[0].starts_with("abcd"));
        assert!(out[1].starts_with("efgh"));
        assert!(out[2].starts_with("ij  "));
        assert!(out[3].starts_with("k   "));

        // the line at the top stays there across a wrap switch
        v.set_word_wrap(false);
        press(&mut v, KeyCode::Down);
        press(&mut v, KeyCode::Down);
        assert_eq!(v.top_row(), 2);
        v.set_word_wrap(true);
        assert_eq!(v.top_row(), 4);
        assert!(rows(&v)[0].starts_with("lmno"));
        v.set_word_wrap(false);
        assert_eq!(v.top_row(), 2);

        v.set_word_wrap(true);
        assert!(press(&mut v, KeyCode::Right));
        assert_eq!(v.left_shift(), 0);
    }

    #[test]
    fn autoscroll_follows_new_text() {
        let mut v = view(10, 4).with_autoscroll(true);
        v.add_text(["a", "b", "c"]);
        assert_eq!(v.top_row(), 0);
        v.add_text(["d", "e", "f"]);
        assert_eq!(v.top_row(), 3);

        v.set_autoscroll(false);
        v.add_text(["g"]);
        assert_eq!(v.top_row(), 3);
    }

    #[test]
    fn max_items_drops_oldest_lines() {
        let mut v = view(10, 4).with_max_items(3);
        v.add_text(["1", "2", "3", "4"]);
        assert_eq!(v.lines(), ["2", "3", "4"]);
        v.set_max_items(Some(1));
        assert_eq!(v.item_count(), 1);
        assert_eq!(v.lines()[0], "4");
        v.set_max_items(None);
        v.add_text(["5", "6"]);
        assert_eq!(v.item_count(), 3);
    }

    #[test]
    fn scroll_bar_clicks() {
        let mut v = view(6, 7);
        v.set_text((0..21).map(|i| i.to_string()));
        let mut ctx = ComponentContext::new(WidgetId::DETACHED);
        // output height 6: down arrow at row 5, track rows 1..=4
        v.process_event(&Event::left_down(5, 5), &mut ctx);
        assert_eq!(v.top_row(), 1);
        v.process_event(&Event::left_down(5, 4), &mut ctx);
        assert_eq!(v.top_row(), 15);
        v.process_event(&Event::left_down(5, 0), &mut ctx);
        assert_eq!(v.top_row(), 14);
        // a click on the text itself is not for the view
        assert!(!v.process_event(&Event::left_down(1, 1), &mut ctx));
    }

    #[test]
    fn inactive_view_ignores_input() {
        let mut v = TextView::new(6, 4);
        v.set_text(["a", "b", "c", "d", "e"]);
        assert!(!press(&mut v, KeyCode::Down));
    }

    #[test]
    fn loads_file_trimming_trailing_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first   ").unwrap();
        writeln!(file, "  second").unwrap();
        let mut v = view(12, 4);
        v.load_file(file.path()).unwrap();
        assert_eq!(v.lines(), ["first", "  second"]);
        assert!(v.load_file("/nonexistent/term-tv/file").is_err());
    }
}
