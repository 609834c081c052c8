//! Widget capability interface.
//!
//! Every control is a [`Widget`]: a trait object stored in the
//! [`WidgetTree`] arena and addressed by [`WidgetId`]. Shared state
//! (geometry, flags, colors, links) lives in the embedded [`Control`]; the
//! trait only carries what differs between control kinds.

mod control;
mod tree;

use std::any::Any;

pub use control::Control;
pub use tree::WidgetTree;

use crate::canvas::Canvas;
use crate::component_context::ComponentContext;
use crate::event::Event;
use crate::window::TopLevel;

/// Handle to a node in a [`WidgetTree`]. Never reused while the tree lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

impl WidgetId {
    /// Placeholder carried by controls not yet inserted into a tree.
    pub const DETACHED: WidgetId = WidgetId(usize::MAX);

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pack {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Region of a widget under a screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    Outside,
    Inside,
    Border,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    ButtonClose,
    ButtonBottom,
    ButtonMaximize,
}

pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub trait Widget: AsAny {
    fn base(&self) -> &Control;
    fn base_mut(&mut self) -> &mut Control;

    /// Paint this control only. Children are drawn by the tree afterwards,
    /// inside the control's clip region.
    fn draw(&self, canvas: &mut Canvas);

    fn hit_test(&self, x: i32, y: i32) -> HitResult {
        self.base().hit_test(x, y)
    }

    /// Handle `event`. Returning `true` claims it and stops bubbling.
    fn process_event(&mut self, _event: &Event, _ctx: &mut ComponentContext) -> bool {
        false
    }

    /// Window-level capabilities, for widgets the composer manages.
    fn as_top_level(&self) -> Option<&dyn TopLevel> {
        None
    }

    fn as_top_level_mut(&mut self) -> Option<&mut dyn TopLevel> {
        None
    }

    fn with_scale(mut self, scale: i32) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_scale(scale);
        self
    }

    fn with_pack(mut self, pack: Pack) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_pack(pack);
        self
    }

    fn with_paddings(mut self, px: i32, py: i32) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_paddings(px, py);
        self
    }

    fn with_gaps(mut self, gx: i32, gy: i32) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_gaps(gx, gy);
        self
    }

    fn with_constraints(mut self, min_width: i32, min_height: i32) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_constraints(min_width, min_height);
        self
    }

    fn with_align(mut self, align: Align) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_align(align);
        self
    }

    fn with_clipped(mut self, clipped: bool) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_clipped(clipped);
        self
    }

    fn with_tab_stop(mut self, tab_stop: bool) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_tab_stop(tab_stop);
        self
    }
}
