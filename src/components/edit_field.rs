use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::canvas::Canvas;
use crate::colors::Attr;
use crate::component_context::ComponentContext;
use crate::event::Event;
use crate::theme;
use crate::widget::{Control, Widget};

type ChangeHandler = Box<dyn FnMut(&str, &mut ComponentContext)>;
type KeyHook = Box<dyn FnMut(&KeyEvent) -> bool>;

/// Single-line text editor.
///
/// While focused it consumes printable characters, Backspace, Delete,
/// Left/Right, Home/End and Ctrl+R (clear). Enter and Tab are left for the
/// parent. The view scrolls horizontally to keep the cursor visible.
pub struct EditField {
    base: Control,
    text: Vec<char>,
    cursor: usize,
    offset: usize,
    max_len: Option<usize>,
    password: bool,
    read_only: bool,
    on_change: Option<ChangeHandler>,
    on_key_press: Option<KeyHook>,
}

impl fmt::Debug for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditField")
            .field("text", &self.text())
            .field("cursor", &self.cursor)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl EditField {
    /// `width` 0 sizes the field to the initial text plus the cursor cell.
    pub fn new(text: impl Into<String>, width: i32) -> Self {
        let text: Vec<char> = text.into().chars().collect();
        let width = if width <= 0 {
            text.len() as i32 + 1
        } else {
            width
        };
        let mut base = Control::new();
        base.set_constraints(width, 1);
        let mut field = Self {
            base,
            cursor: 0,
            text,
            offset: 0,
            max_len: None,
            password: false,
            read_only: false,
            on_change: None,
            on_key_press: None,
        };
        field.end();
        field
    }

    pub fn with_password(mut self, password: bool) -> Self {
        self.password = password;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_max_length(mut self, max_len: usize) -> Self {
        self.set_max_length(Some(max_len));
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(&str, &mut ComponentContext) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Runs before the built-in key handling; returning `true` consumes the
    /// key.
    pub fn on_key_press(mut self, hook: impl FnMut(&KeyEvent) -> bool + 'static) -> Self {
        self.on_key_press = Some(Box::new(hook));
        self
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into().chars().collect();
        if let Some(max) = self.max_len {
            self.text.truncate(max);
        }
        self.end();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// `None` removes the limit. Longer text is truncated right away.
    pub fn set_max_length(&mut self, max_len: Option<usize>) {
        self.max_len = max_len;
        if let Some(max) = max_len
            && self.text.len() > max
        {
            self.text.truncate(max);
            self.cursor = self.cursor.min(max);
            self.scroll_to_cursor();
        }
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn visible_width(&self) -> usize {
        self.base.size().width.max(1) as usize
    }

    fn scroll_to_cursor(&mut self) {
        let width = self.visible_width();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + width {
            self.offset = self.cursor + 1 - width;
        }
    }

    fn insert(&mut self, ch: char) -> bool {
        if self.read_only || self.max_len.is_some_and(|max| self.text.len() >= max) {
            return false;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += 1;
        self.scroll_to_cursor();
        true
    }

    fn backspace(&mut self) -> bool {
        if self.read_only || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.text.remove(self.cursor);
        self.scroll_to_cursor();
        true
    }

    fn delete(&mut self) -> bool {
        if self.read_only || self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    fn clear(&mut self) -> bool {
        if self.read_only || self.text.is_empty() {
            return false;
        }
        self.text.clear();
        self.cursor = 0;
        self.offset = 0;
        true
    }

    fn home(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn end(&mut self) {
        self.cursor = self.text.len();
        self.scroll_to_cursor();
    }

    fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.scroll_to_cursor();
        }
    }

    fn right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor += 1;
            self.scroll_to_cursor();
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<bool> {
        let changed = match key.code {
            KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => return None,
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.left();
                false
            }
            KeyCode::Right => {
                self.right();
                false
            }
            KeyCode::Home => {
                self.home();
                false
            }
            KeyCode::End => {
                self.end();
                false
            }
            KeyCode::Char('r') if key.modifiers == KeyModifiers::CONTROL => self.clear(),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(ch)
            }
            _ => return None,
        };
        Some(changed)
    }
}

impl Widget for EditField {
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

        let width = rect.width.max(0) as usize;
        for (i, ch) in self.text.iter().skip(self.offset).take(width).enumerate() {
            let ch = if self.password { '*' } else { *ch };
            canvas.put(rect.x + i as i32, rect.y, ch, attr);
        }
        if self.base.active() {
            let col = self.cursor - self.offset;
            let under = match self.text.get(self.cursor) {
                Some(_) if self.password => '*',
                Some(ch) => *ch,
                None => ' ',
            };
            canvas.put(rect.x + col as i32, rect.y, under, Attr::new(attr.bg, attr.fg));
        }
    }

    fn process_event(&mut self, event: &Event, ctx: &mut ComponentContext) -> bool {
        if !self.base.active() || !self.base.enabled() {
            return false;
        }
        let Event::Key(key) = event else {
            return false;
        };
        if key.code != KeyCode::Tab
            && let Some(hook) = self.on_key_press.as_mut()
            && hook(key)
        {
            return true;
        }
        match self.handle_key(key) {
            None => false,
            Some(changed) => {
                if changed && let Some(handler) = self.on_change.as_mut() {
                    let text: String = self.text.iter().collect();
                    handler(&text, ctx);
                }
                true
            }
        }
    }
}
