//! Per-dispatch context handed to `Widget::process_event`.
//!
//! Widgets never touch the composer or the queue directly. They record
//! requests here (grab input, post an event, schedule a timer, run a deferred
//! tree update) and the composer applies them once the handler returns.

use std::fmt;
use std::time::Duration;

use crate::event::Event;
use crate::widget::{WidgetId, WidgetTree};

pub type TreeUpdate = Box<dyn FnOnce(&mut WidgetTree)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GrabRequest {
    Grab(WidgetId),
    Release(WidgetId),
}

pub struct ComponentContext {
    target: WidgetId,
    grab: Option<GrabRequest>,
    posted: Vec<Event>,
    delayed: Vec<(Duration, Event)>,
    updates: Vec<TreeUpdate>,
}

impl fmt::Debug for ComponentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentContext")
            .field("target", &self.target)
            .field("grab", &self.grab)
            .field("posted", &self.posted)
            .field("delayed", &self.delayed)
            .field("updates", &self.updates.len())
            .finish()
    }
}

impl ComponentContext {
    pub fn new(target: WidgetId) -> Self {
        Self {
            target,
            grab: None,
            posted: Vec::new(),
            delayed: Vec::new(),
            updates: Vec::new(),
        }
    }

    /// Widget currently handling the event.
    pub fn target(&self) -> WidgetId {
        self.target
    }

    pub(crate) fn retarget(&mut self, target: WidgetId) {
        self.target = target;
    }

    /// Make the current widget the exclusive consumer of all input.
    pub fn grab_events(&mut self) {
        self.grab = Some(GrabRequest::Grab(self.target));
    }

    /// Give up an exclusive grab held by the current widget.
    pub fn release_events(&mut self) {
        self.grab = Some(GrabRequest::Release(self.target));
    }

    /// Queue `event` for the main loop.
    pub fn post(&mut self, event: Event) {
        self.posted.push(event);
    }

    /// Queue `event` once `delay` has elapsed.
    pub fn post_after(&mut self, delay: Duration, event: Event) {
        self.delayed.push((delay, event));
    }

    /// Deliver a [`Event::Timer`] carrying `token` back to the current
    /// widget after `delay`.
    pub fn schedule(&mut self, delay: Duration, token: u32) {
        let target = self.target;
        self.post_after(delay, Event::Timer { target, token });
    }

    /// Run `f` against the widget tree after the handler returns. This is how
    /// callbacks change other widgets.
    pub fn update(&mut self, f: impl FnOnce(&mut WidgetTree) + 'static) {
        self.updates.push(Box::new(f));
    }

    pub(crate) fn take_grab(&mut self) -> Option<GrabRequest> {
        self.grab.take()
    }

    pub(crate) fn into_parts(self) -> (Vec<Event>, Vec<(Duration, Event)>, Vec<TreeUpdate>) {
        (self.posted, self.delayed, self.updates)
    }
}
