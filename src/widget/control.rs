use std::cell::Cell;

use ratatui::style::Color;

use crate::colors::Attr;
use crate::constants::FIXED;
use crate::geometry::{ClipRect, Point, Size};
use crate::widget::{Align, HitResult, Pack, WidgetId};

/// State every control shares, embedded in each concrete widget.
///
/// Colors set to `Color::Reset` are unset and resolve against the theme at
/// draw time. Parent and children are arena handles; the tree maintains
/// them, so they have no public setters here.
#[derive(Debug, Clone)]
pub struct Control {
    id: WidgetId,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    pos: Point,
    size: Size,
    min_size: Size,
    scale: i32,
    visible: bool,
    enabled: bool,
    active: bool,
    tab_stop: bool,
    modal: bool,
    clipped: bool,
    pack: Pack,
    padding: Size,
    gaps: Size,
    align: Align,
    fg: Color,
    bg: Color,
    fg_active: Color,
    bg_active: Color,
    title: String,
    clipper: Cell<Option<ClipRect>>,
}

impl Default for Control {
    fn default() -> Self {
        Self::new()
    }
}

impl Control {
    pub fn new() -> Self {
        Self {
            id: WidgetId::DETACHED,
            parent: None,
            children: Vec::new(),
            pos: Point::default(),
            size: Size::default(),
            min_size: Size::default(),
            scale: FIXED,
            visible: true,
            enabled: true,
            active: false,
            tab_stop: true,
            modal: false,
            clipped: false,
            pack: Pack::Horizontal,
            padding: Size::default(),
            gaps: Size::default(),
            align: Align::Left,
            fg: Color::Reset,
            bg: Color::Reset,
            fg_active: Color::Reset,
            bg_active: Color::Reset,
            title: String::new(),
            clipper: Cell::new(None),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// First assignment wins.
    pub(crate) fn set_parent(&mut self, parent: WidgetId) {
        if self.parent.is_none() {
            self.parent = Some(parent);
        }
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<WidgetId> {
        &mut self.children
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn set_pos(&mut self, x: i32, y: i32) {
        self.pos = Point::new(x, y);
        self.clipper.set(None);
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize, never going below the minimal-size constraint.
    pub fn set_size(&mut self, width: i32, height: i32) {
        let size = Size::new(width, height).max(self.min_size);
        if size != self.size {
            self.size = size;
            self.clipper.set(None);
        }
    }

    pub fn rect(&self) -> ClipRect {
        ClipRect::from_parts(self.pos, self.size)
    }

    pub fn constraints(&self) -> Size {
        self.min_size
    }

    /// Set the minimal size and grow the current size to honor it.
    pub fn set_constraints(&mut self, min_width: i32, min_height: i32) {
        self.min_size = Size::new(min_width, min_height);
        let size = self.size;
        self.set_size(size.width, size.height);
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Negative weights are ignored.
    pub fn set_scale(&mut self, scale: i32) {
        if scale >= 0 {
            self.scale = scale;
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Visibility changes relayout the window, so the public entry point is
    /// [`WidgetTree::set_visible`](crate::widget::WidgetTree::set_visible).
    pub(crate) fn set_visible_flag(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn tab_stop(&self) -> bool {
        self.tab_stop
    }

    pub fn set_tab_stop(&mut self, tab_stop: bool) {
        self.tab_stop = tab_stop;
    }

    pub fn modal(&self) -> bool {
        self.modal
    }

    pub fn set_modal(&mut self, modal: bool) {
        self.modal = modal;
    }

    pub fn clipped(&self) -> bool {
        self.clipped
    }

    pub fn set_clipped(&mut self, clipped: bool) {
        self.clipped = clipped;
        self.clipper.set(None);
    }

    pub fn pack(&self) -> Pack {
        self.pack
    }

    pub fn set_pack(&mut self, pack: Pack) {
        self.pack = pack;
    }

    pub fn paddings(&self) -> Size {
        self.padding
    }

    /// Negative values leave the current padding untouched.
    pub fn set_paddings(&mut self, px: i32, py: i32) {
        if px >= 0 {
            self.padding.width = px;
        }
        if py >= 0 {
            self.padding.height = py;
        }
        self.clipper.set(None);
    }

    pub fn gaps(&self) -> Size {
        self.gaps
    }

    pub fn set_gaps(&mut self, gx: i32, gy: i32) {
        if gx >= 0 {
            self.gaps.width = gx;
        }
        if gy >= 0 {
            self.gaps.height = gy;
        }
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn set_align(&mut self, align: Align) {
        self.align = align;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn colors(&self) -> Attr {
        Attr::new(self.fg, self.bg)
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.fg = color;
    }

    pub fn set_back_color(&mut self, color: Color) {
        self.bg = color;
    }

    pub fn active_colors(&self) -> Attr {
        Attr::new(self.fg_active, self.bg_active)
    }

    pub fn set_active_text_color(&mut self, color: Color) {
        self.fg_active = color;
    }

    pub fn set_active_back_color(&mut self, color: Color) {
        self.bg_active = color;
    }

    /// Colors for the current state, unset slots taken from `normal` or
    /// `active` theme entries.
    pub fn resolve_colors(&self, normal: Attr, active: Attr) -> Attr {
        if self.active {
            self.active_colors().or(active)
        } else {
            self.colors().or(normal)
        }
    }

    pub(crate) fn cached_clipper(&self) -> Option<ClipRect> {
        self.clipper.get()
    }

    pub(crate) fn cache_clipper(&self, rect: ClipRect) {
        self.clipper.set(Some(rect));
    }

    /// Outermost row and column count as border, everything strictly inside
    /// as inside.
    pub fn hit_test(&self, x: i32, y: i32) -> HitResult {
        let Point { x: cx, y: cy } = self.pos;
        let Size { width, height } = self.size;
        if x > cx && x < cx + width - 1 && y > cy && y < cy + height - 1 {
            return HitResult::Inside;
        }
        if (x == cx || x == cx + width - 1) && y >= cy && y < cy + height {
            return HitResult::Border;
        }
        if (y == cy || y == cy + height - 1) && x >= cx && x < cx + width {
            return HitResult::Border;
        }
        HitResult::Outside
    }
}
