//! The composer: window stack, input routing and screen composition.
//!
//! The composer owns the widget tree and the ordered list of top-level
//! windows (last = topmost = active). Every event from the main loop goes
//! through [`Composer::process_event`], which routes it:
//!
//! - to the exclusive consumer when a widget grabbed input,
//! - through the dead-key machine for the two-key window commands,
//! - to window chrome (title buttons, drag and resize borders),
//! - or to the active window, where it reaches the focused control (keys) or
//!   the control under the cursor (mouse) and bubbles up towards the window.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, trace};

use crate::actions::Action;
use crate::canvas::Canvas;
use crate::component_context::{ComponentContext, GrabRequest};
use crate::config::Config;
use crate::event::Event;
use crate::event_loop::ControlFlow;
use crate::geometry::Size;
use crate::layout::floating::{self, DragKind};
use crate::state::InputState;
use crate::theme;
use crate::widget::{HitResult, WidgetId, WidgetTree};
use crate::window::{BorderStyle, TopLevel, Window};

pub struct Composer {
    tree: WidgetTree,
    windows: Vec<WidgetId>,
    consumer: Option<WidgetId>,
    input: InputState,
    screen: Size,
    config: Config,
    posted: Vec<Event>,
    delayed: Vec<(Duration, Event)>,
}

impl Composer {
    pub fn new(screen: Size, config: Config) -> Self {
        Self {
            tree: WidgetTree::new(),
            windows: Vec::new(),
            consumer: None,
            input: InputState::new(),
            screen,
            config,
            posted: Vec::new(),
            delayed: Vec::new(),
        }
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn screen_size(&self) -> Size {
        self.screen
    }

    pub fn border_style(&self) -> BorderStyle {
        self.config.border
    }

    pub fn set_border_style(&mut self, border: BorderStyle) {
        self.config.border = border;
    }

    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    /// Create a window with the configured border and make it active.
    pub fn create_window(
        &mut self,
        title: impl Into<String>,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> WidgetId {
        let window = Window::new(title, x, y, width, height).with_border(self.config.border);
        self.add_window(window)
    }

    /// Put `window` on top of the stack and activate it.
    pub fn add_window(&mut self, window: Window) -> WidgetId {
        let id = self.tree.insert(window);
        self.windows.push(id);
        debug!(window = ?id, title = self.tree.get(id).base().title(), "window opened");
        self.set_active_flags(id);
        let others = self.windows.len() > 1;
        if others {
            let previous = self.windows[self.windows.len() - 2];
            self.send_to_window(previous, &Event::Activate(false));
        }
        self.send_to_window(id, &Event::Activate(true));
        id
    }

    /// Windows bottom to top.
    pub fn windows(&self) -> &[WidgetId] {
        &self.windows
    }

    pub fn top_window(&self) -> Option<WidgetId> {
        self.windows.last().copied()
    }

    pub fn consumer(&self) -> Option<WidgetId> {
        self.consumer
    }

    /// Route all input to `id` until [`Composer::release_events`].
    pub fn grab_events(&mut self, id: WidgetId) {
        trace!(widget = ?id, "input grabbed");
        self.consumer = Some(id);
    }

    pub fn release_events(&mut self) {
        if let Some(id) = self.consumer.take() {
            trace!(widget = ?id, "input released");
        }
    }

    /// The exclusive consumer, dropping it first if it was removed from the
    /// tree while holding the grab.
    fn live_consumer(&mut self) -> Option<WidgetId> {
        let id = self.consumer?;
        if self.tree.contains(id) {
            return Some(id);
        }
        debug!(widget = ?id, "grab holder is gone, input released");
        self.consumer = None;
        None
    }

    /// Events posted by widgets since the last call.
    pub fn take_posted(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.posted)
    }

    /// Delayed events scheduled by widgets since the last call.
    pub fn take_delayed(&mut self) -> Vec<(Duration, Event)> {
        std::mem::take(&mut self.delayed)
    }

    fn top_level(&self, id: WidgetId) -> Option<&dyn TopLevel> {
        self.tree.try_get(id).and_then(|w| w.as_top_level())
    }

    fn is_modal(&self, id: WidgetId) -> bool {
        self.tree.try_get(id).is_some_and(|w| w.base().modal())
    }

    fn set_active_flags(&mut self, active: WidgetId) {
        for id in &self.windows {
            self.tree
                .get_mut(*id)
                .base_mut()
                .set_active(*id == active);
        }
    }

    /// Raise `id` to the top and make it the only active window. Activating
    /// the top window again just reasserts the flags. Returns `false` for
    /// ids the composer does not manage.
    pub fn activate_window(&mut self, id: WidgetId) -> bool {
        let Some(pos) = self.windows.iter().position(|w| *w == id) else {
            return false;
        };
        let previous = self.top_window();
        if pos + 1 != self.windows.len() {
            self.windows.remove(pos);
            self.windows.push(id);
        }
        self.set_active_flags(id);
        if previous != Some(id) {
            debug!(window = ?id, "window activated");
            if let Some(previous) = previous {
                self.send_to_window(previous, &Event::Activate(false));
            }
            self.send_to_window(id, &Event::Activate(true));
        }
        true
    }

    /// Rotate the top window to the bottom until a visible window is on
    /// top. Refused for fewer than two windows or a modal top window.
    pub fn send_to_back(&mut self) -> bool {
        let Some(top) = self.top_window() else {
            return false;
        };
        if self.windows.len() < 2 || self.is_modal(top) {
            return false;
        }
        let any_visible = self
            .windows
            .iter()
            .any(|w| self.tree.get(*w).base().visible());
        if !any_visible {
            return false;
        }

        self.send_to_window(top, &Event::Activate(false));
        loop {
            self.windows.rotate_right(1);
            let Some(next) = self.top_window() else {
                return false;
            };
            if self.tree.get(next).base().visible() {
                break;
            }
        }
        let Some(next) = self.top_window() else {
            return false;
        };
        debug!(window = ?top, now_top = ?next, "window sent to back");
        self.set_active_flags(next);
        self.send_to_window(next, &Event::Activate(true));
        true
    }

    /// Ask the top window to close. The last window quits the application;
    /// any other is destroyed only if it accepts the close event.
    pub fn close_top_window(&mut self) -> ControlFlow {
        let Some(top) = self.top_window() else {
            return ControlFlow::Quit;
        };
        if self.windows.len() == 1 {
            debug!(window = ?top, "closing last window");
            return ControlFlow::Quit;
        }
        if !self.send_to_window(top, &Event::Close) {
            debug!(window = ?top, "close vetoed");
            return ControlFlow::Continue;
        }
        self.destroy_window(top)
    }

    /// Remove `id` from the stack and the tree without asking. Quits when no
    /// window is left.
    pub fn destroy_window(&mut self, id: WidgetId) -> ControlFlow {
        let Some(pos) = self.windows.iter().position(|w| *w == id) else {
            return ControlFlow::Continue;
        };
        if let Some(consumer) = self.consumer
            && (consumer == id || self.tree.is_ancestor(id, consumer))
        {
            self.consumer = None;
        }
        self.windows.remove(pos);
        self.tree.destroy(id);
        debug!(window = ?id, "window closed");

        let Some(top) = self.top_window() else {
            return ControlFlow::Quit;
        };
        self.set_active_flags(top);
        self.send_to_window(top, &Event::Activate(true));
        ControlFlow::Continue
    }

    /// Topmost visible window under (x, y) and the region hit.
    pub fn window_at(&self, x: i32, y: i32) -> Option<(WidgetId, HitResult)> {
        self.windows.iter().rev().find_map(|id| {
            let widget = self.tree.get(*id);
            if !widget.base().visible() {
                return None;
            }
            match widget.hit_test(x, y) {
                HitResult::Outside => None,
                hit => Some((*id, hit)),
            }
        })
    }

    pub fn process_event(&mut self, event: Event) -> ControlFlow {
        match event {
            Event::Key(key) => self.process_key(key),
            Event::Mouse(mouse) => self.process_mouse(mouse),
            Event::ScreenResize { width, height } => {
                self.screen = Size::new(width, height);
                self.refit_maximized();
                ControlFlow::Continue
            }
            Event::CloseWindow => self.close_top_window(),
            Event::Layout(target) => {
                if self.tree.contains(target) {
                    let root = self.tree.root_of(target);
                    self.tree.relayout(root);
                }
                ControlFlow::Continue
            }
            Event::Timer { target, .. } => {
                if self.tree.contains(target) {
                    self.deliver(target, &event);
                }
                ControlFlow::Continue
            }
            Event::Quit => ControlFlow::Quit,
            Event::Redraw => ControlFlow::Continue,
            Event::Click(_)
            | Event::Resize { .. }
            | Event::Move { .. }
            | Event::Activate(_)
            | Event::Close => {
                self.send_to_active(&event);
                ControlFlow::Continue
            }
        }
    }

    fn refit_maximized(&mut self) {
        let screen = self.screen;
        for id in self.windows.clone() {
            let Some(top_level) = self.tree.get_mut(id).as_top_level_mut() else {
                continue;
            };
            if top_level.maximized() {
                self.tree
                    .get_mut(id)
                    .base_mut()
                    .set_size(screen.width, screen.height);
                self.tree.relayout(id);
            }
        }
    }

    fn process_key(&mut self, key: KeyEvent) -> ControlFlow {
        if let Some(consumer) = self.live_consumer() {
            self.deliver(consumer, &Event::Key(key));
            return ControlFlow::Continue;
        }

        if let Some((dead, dead_key)) = self.input.take_dead_key() {
            if key.code == KeyCode::Esc {
                trace!(?dead, "key sequence cancelled");
                return ControlFlow::Continue;
            }
            let arrow = matches!(
                key.code,
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
            );
            let keys = &self.config.keymap;
            match dead {
                Action::QuitMode if keys.matches(Action::QuitMode, &key) => {
                    debug!("quit requested from keyboard");
                    return ControlFlow::Quit;
                }
                Action::ResizeMode if arrow => {
                    self.resize_top_window(key.code);
                    return ControlFlow::Continue;
                }
                Action::MoveMode if arrow => {
                    self.move_top_window(key.code);
                    return ControlFlow::Continue;
                }
                Action::WindowMode if keys.matches(Action::SendToBack, &key) => {
                    self.send_to_back();
                    return ControlFlow::Continue;
                }
                Action::WindowMode if keys.matches(Action::ToggleMaximize, &key) => {
                    self.toggle_maximize();
                    return ControlFlow::Continue;
                }
                Action::WindowMode if keys.matches(Action::CloseWindow, &key) => {
                    return self.close_top_window();
                }
                _ => {}
            }
            trace!(?dead, ?key, "key sequence abandoned, replaying");
            self.send_to_active(&Event::Key(dead_key));
            self.send_to_active(&Event::Key(key));
            return ControlFlow::Continue;
        }

        if let Some(action) = self.config.keymap.dead_key(&key) {
            trace!(?action, "dead key");
            self.input.set_dead_key(action, key);
            return ControlFlow::Continue;
        }

        self.send_to_active(&Event::Key(key));
        ControlFlow::Continue
    }

    fn resize_top_window(&mut self, code: KeyCode) {
        let Some(top) = self.top_window() else {
            return;
        };
        if !self.top_level(top).is_some_and(|t| t.sizable()) {
            return;
        }
        let base = self.tree.get(top).base();
        let Some(size) =
            floating::nudge_resize(base.rect(), code, base.constraints(), self.screen)
        else {
            return;
        };
        self.tree
            .get_mut(top)
            .base_mut()
            .set_size(size.width, size.height);
        self.tree.relayout(top);
        self.send_to_window(
            top,
            &Event::Resize {
                width: size.width,
                height: size.height,
            },
        );
    }

    fn move_top_window(&mut self, code: KeyCode) {
        let Some(top) = self.top_window() else {
            return;
        };
        if !self.top_level(top).is_some_and(|t| t.movable()) {
            return;
        }
        let rect = self.tree.get(top).base().rect();
        let Some(next) = floating::nudge_move(rect, code, self.screen) else {
            return;
        };
        self.tree.get_mut(top).base_mut().set_pos(next.x, next.y);
        self.tree.place_children(top);
        self.send_to_window(top, &Event::Move { x: next.x, y: next.y });
    }

    /// Flip the top window between maximized and restored. Needs a sizable
    /// window showing the maximize button.
    pub fn toggle_maximize(&mut self) -> bool {
        let Some(top) = self.top_window() else {
            return false;
        };
        let screen = self.screen;
        let Some(top_level) = self.tree.get_mut(top).as_top_level_mut() else {
            return false;
        };
        if !top_level.sizable() || !top_level.title_buttons().maximize {
            return false;
        }
        let maximized = !top_level.maximized();
        top_level.set_maximized(maximized, screen);
        self.tree.relayout(top);
        let size = self.tree.get(top).base().size();
        debug!(window = ?top, maximized, "window maximize toggled");
        self.send_to_window(
            top,
            &Event::Resize {
                width: size.width,
                height: size.height,
            },
        );
        true
    }

    fn process_mouse(&mut self, mouse: MouseEvent) -> ControlFlow {
        let event = Event::Mouse(mouse);
        if let Some(consumer) = self.live_consumer() {
            self.deliver(consumer, &event);
            return ControlFlow::Continue;
        }
        let Some(top) = self.top_window() else {
            return ControlFlow::Continue;
        };
        let (x, y) = (mouse.column as i32, mouse.row as i32);
        let dragging = self.input.dragging();
        let (view, hit) = match self.window_at(x, y) {
            _ if dragging => (Some(top), HitResult::Inside),
            Some((id, hit)) => (Some(id), hit),
            None => (None, HitResult::Outside),
        };

        if view == Some(top) {
            match mouse.kind {
                MouseEventKind::Up(_) if dragging => {
                    let kind = self.input.end_drag();
                    trace!(?kind, "drag finished");
                    return ControlFlow::Continue;
                }
                MouseEventKind::Drag(_) | MouseEventKind::Moved if dragging => {
                    self.drag_top_window(top, x, y);
                    return ControlFlow::Continue;
                }
                MouseEventKind::Down(MouseButton::Left) if hit != HitResult::Inside => {
                    return self.press_window_chrome(top, hit, x, y);
                }
                _ => {}
            }
        } else if !self.is_modal(top) {
            if let Some(view) = view {
                self.activate_window(view);
            }
            return ControlFlow::Continue;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.input.set_mouse_down(x, y);
                self.send_to_active(&event);
            }
            MouseEventKind::Up(_) => {
                self.send_to_active(&event);
                if self.input.take_click(x, y) {
                    self.send_to_active(&Event::Click(mouse));
                }
            }
            _ => {
                self.send_to_active(&event);
            }
        }
        ControlFlow::Continue
    }

    /// Left press on the border or title bar of the active window.
    fn press_window_chrome(&mut self, top: WidgetId, hit: HitResult, x: i32, y: i32) -> ControlFlow {
        match hit {
            HitResult::ButtonClose => return self.close_top_window(),
            HitResult::ButtonBottom => {
                self.send_to_back();
            }
            HitResult::ButtonMaximize => {
                self.toggle_maximize();
            }
            _ => {
                self.input.set_mouse_down(x, y);
                let kind = DragKind::from_hit(hit);
                let allowed = self.top_level(top).is_some_and(|t| {
                    (kind == DragKind::Move && t.movable()) || (kind.is_resize() && t.sizable())
                });
                if allowed {
                    trace!(?kind, x, y, "drag started");
                    self.input.start_drag(kind, x, y);
                }
            }
        }
        ControlFlow::Continue
    }

    fn drag_top_window(&mut self, top: WidgetId, x: i32, y: i32) {
        let (last_x, last_y) = self.input.last_mouse();
        let (dx, dy) = (x - last_x, y - last_y);
        if dx == 0 && dy == 0 {
            return;
        }
        let base = self.tree.get(top).base();
        let rect = base.rect();
        let next = floating::apply_drag(
            self.input.drag(),
            rect,
            dx,
            dy,
            self.screen,
            base.constraints(),
        );
        let Some(next) = next else {
            trace!(dx, dy, "drag rejected");
            return;
        };
        self.input.set_last_mouse(x, y);

        let base = self.tree.get_mut(top).base_mut();
        base.set_pos(next.x, next.y);
        base.set_size(next.width, next.height);
        self.tree.relayout(top);

        if (next.x, next.y) != (rect.x, rect.y) {
            self.send_to_window(top, &Event::Move { x: next.x, y: next.y });
        }
        if (next.width, next.height) != (rect.width, rect.height) {
            self.send_to_window(
                top,
                &Event::Resize {
                    width: next.width,
                    height: next.height,
                },
            );
        }
    }

    /// Send `event` to the active window's subtree. Returns whether a widget
    /// claimed it.
    pub fn send_to_active(&mut self, event: &Event) -> bool {
        match self.top_window() {
            Some(top) => self.send_to_window(top, event),
            None => false,
        }
    }

    /// Route `event` inside `window`: keys start at the focused control,
    /// pointer events at the control under the cursor, and both bubble up to
    /// the window. Anything else goes to the window itself.
    pub fn send_to_window(&mut self, window: WidgetId, event: &Event) -> bool {
        let mut ctx = ComponentContext::new(window);
        let handled = match event {
            Event::Key(key) => {
                let start = self.tree.active_control(window).unwrap_or(window);
                let handled = self.bubble(start, window, event, &mut ctx);
                if !handled && matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                    self.tree.focus_next(window, key.code == KeyCode::Tab);
                    true
                } else {
                    handled
                }
            }
            Event::Mouse(mouse) | Event::Click(mouse) => {
                let start = self
                    .tree
                    .control_at(window, mouse.column as i32, mouse.row as i32);
                if event.is_left_press() && start != window {
                    let base = self.tree.get(start).base();
                    if base.tab_stop() && base.enabled() {
                        self.tree.activate_control(window, start);
                    }
                }
                self.bubble(start, window, event, &mut ctx)
            }
            _ => self.call(window, event, &mut ctx),
        };
        self.finish(ctx);
        handled
    }

    /// Deliver `event` to `target` alone, without bubbling.
    pub fn deliver(&mut self, target: WidgetId, event: &Event) -> bool {
        let mut ctx = ComponentContext::new(target);
        let handled = self.call(target, event, &mut ctx);
        self.finish(ctx);
        handled
    }

    fn bubble(
        &mut self,
        start: WidgetId,
        window: WidgetId,
        event: &Event,
        ctx: &mut ComponentContext,
    ) -> bool {
        let mut current = Some(start);
        while let Some(id) = current {
            if self.call(id, event, ctx) {
                return true;
            }
            if id == window {
                break;
            }
            current = self.tree.parent(id);
        }
        false
    }

    fn call(&mut self, id: WidgetId, event: &Event, ctx: &mut ComponentContext) -> bool {
        let Some(widget) = self.tree.try_get_mut(id) else {
            return false;
        };
        if !widget.base().enabled() {
            return false;
        }
        ctx.retarget(id);
        let handled = widget.process_event(event, ctx);
        match ctx.take_grab() {
            Some(GrabRequest::Grab(target)) => {
                self.input.clear_mouse_down();
                self.grab_events(target);
            }
            Some(GrabRequest::Release(target)) if self.consumer == Some(target) => {
                self.release_events();
            }
            _ => {}
        }
        handled
    }

    fn finish(&mut self, ctx: ComponentContext) {
        let (posted, delayed, updates) = ctx.into_parts();
        self.posted.extend(posted);
        self.delayed.extend(delayed);
        for update in updates {
            update(&mut self.tree);
        }
    }

    /// Paint the desktop, then every visible window bottom to top.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.clear(theme::desktop());
        for id in &self.windows {
            let base = self.tree.get(*id).base();
            if !base.visible() {
                continue;
            }
            canvas.with_clip(base.rect(), |canvas| self.tree.draw(*id, canvas));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Button, EditField, Label};
    use crate::widget::{Pack, Widget};
    use crossterm::event::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn composer() -> Composer {
        Composer::new(Size::new(80, 25), Config::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::key(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> Event {
        Event::key(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn rect_of(c: &Composer, id: WidgetId) -> crate::geometry::ClipRect {
        c.tree().get(id).base().rect()
    }

    /// Records every key that reaches it.
    struct KeySink {
        base: crate::widget::Control,
        seen: Rc<RefCell<Vec<KeyCode>>>,
    }

    impl Widget for KeySink {
        fn base(&self) -> &crate::widget::Control {
            &self.base
        }
        fn base_mut(&mut self) -> &mut crate::widget::Control {
            &mut self.base
        }
        fn draw(&self, _canvas: &mut Canvas) {}
        fn process_event(&mut self, event: &Event, _ctx: &mut ComponentContext) -> bool {
            if let Event::Key(k) = event {
                self.seen.borrow_mut().push(k.code);
                return true;
            }
            false
        }
    }

    fn with_sink(c: &mut Composer) -> (WidgetId, Rc<RefCell<Vec<KeyCode>>>) {
        let win = c.create_window("sink", 2, 2, 30, 10);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut sink = KeySink {
            base: crate::widget::Control::new(),
            seen: seen.clone(),
        };
        sink.base.set_constraints(3, 1);
        let id = c.tree_mut().add(win, sink);
        c.tree_mut().activate_control(win, id);
        (win, seen)
    }

    #[test]
    fn activation_raises_and_sets_flags() {
        let mut c = composer();
        let a = c.create_window("a", 0, 0, 20, 5);
        let b = c.create_window("b", 5, 5, 20, 5);
        assert_eq!(c.top_window(), Some(b));
        assert!(c.activate_window(a));
        assert_eq!(c.windows(), &[b, a]);
        assert!(c.tree().get(a).base().active());
        assert!(!c.tree().get(b).base().active());
        // re-activating the top only reasserts flags
        c.tree_mut().get_mut(b).base_mut().set_active(true);
        assert!(c.activate_window(a));
        assert_eq!(c.windows(), &[b, a]);
        assert!(!c.tree().get(b).base().active());
    }

    #[test]
    fn closing_sole_window_quits() {
        let mut c = composer();
        c.create_window("only", 0, 0, 20, 5);
        assert_eq!(c.close_top_window(), ControlFlow::Quit);
    }

    #[test]
    fn closing_one_of_many_activates_new_top() {
        let mut c = composer();
        let a = c.create_window("a", 0, 0, 20, 5);
        let b = c.create_window("b", 5, 5, 20, 5);
        assert_eq!(c.close_top_window(), ControlFlow::Continue);
        assert_eq!(c.windows(), &[a]);
        assert!(!c.tree().contains(b));
        assert!(c.tree().get(a).base().active());
    }

    #[test]
    fn vetoed_close_keeps_window() {
        let mut c = composer();
        c.create_window("a", 0, 0, 20, 5);
        let b = c.add_window(Window::new("b", 5, 5, 20, 5).on_close(|| false));
        assert_eq!(c.close_top_window(), ControlFlow::Continue);
        assert_eq!(c.top_window(), Some(b));
    }

    #[test]
    fn dead_key_then_arrow_resizes() {
        let mut c = composer();
        let w = c.create_window("a", 0, 0, 20, 5);
        c.process_event(ctrl('s'));
        c.process_event(key(KeyCode::Right));
        assert_eq!(c.tree().get(w).base().size(), Size::new(21, 5));
        c.process_event(ctrl('p'));
        c.process_event(key(KeyCode::Down));
        assert_eq!(rect_of(&c, w).y, 1);
    }

    #[test]
    fn dead_key_then_escape_does_nothing() {
        let mut c = composer();
        let (_, seen) = with_sink(&mut c);
        c.process_event(ctrl('s'));
        c.process_event(key(KeyCode::Esc));
        assert!(seen.borrow().is_empty());
        assert!(c.input_state().dead_key().is_none());
    }

    #[test]
    fn abandoned_sequence_replays_both_keys() {
        let mut c = composer();
        let (_, seen) = with_sink(&mut c);
        c.process_event(ctrl('s'));
        c.process_event(key(KeyCode::Char('x')));
        assert_eq!(
            *seen.borrow(),
            vec![KeyCode::Char('s'), KeyCode::Char('x')]
        );
    }

    #[test]
    fn quit_needs_two_presses() {
        let mut c = composer();
        c.create_window("a", 0, 0, 20, 5);
        assert_eq!(c.process_event(ctrl('q')), ControlFlow::Continue);
        assert_eq!(c.process_event(ctrl('q')), ControlFlow::Quit);
    }

    #[test]
    fn window_commands() {
        let mut c = composer();
        let a = c.create_window("a", 0, 0, 20, 5);
        let b = c.create_window("b", 5, 5, 20, 5);
        c.process_event(ctrl('w'));
        c.process_event(ctrl('h'));
        assert_eq!(c.windows(), &[b, a]);
        assert!(c.tree().get(a).base().active());

        c.process_event(ctrl('w'));
        c.process_event(ctrl('m'));
        assert_eq!(rect_of(&c, a).width, 80);
        c.process_event(ctrl('w'));
        c.process_event(ctrl('m'));
        assert_eq!(rect_of(&c, a).width, 20);

        c.process_event(ctrl('w'));
        c.process_event(ctrl('c'));
        assert_eq!(c.windows(), &[b]);
    }

    #[test]
    fn modal_window_blocks_send_to_back_and_click_activation() {
        let mut c = composer();
        let a = c.create_window("a", 0, 0, 20, 5);
        let m = c.add_window(Window::new("m", 40, 10, 20, 5).with_modal(true));
        assert!(!c.send_to_back());
        c.process_event(Event::left_down(3, 2));
        assert_eq!(c.top_window(), Some(m));
        assert!(!c.tree().get(a).base().active());
    }

    #[test]
    fn click_on_inactive_window_activates_it() {
        let mut c = composer();
        let a = c.create_window("a", 0, 0, 20, 5);
        c.create_window("b", 40, 10, 20, 5);
        c.process_event(Event::left_down(3, 2));
        assert_eq!(c.top_window(), Some(a));
    }

    #[test]
    fn title_drag_moves_and_rejects_off_screen() {
        let mut c = composer();
        let w = c.create_window("a", 10, 5, 20, 5);
        c.process_event(Event::left_down(12, 5));
        assert_eq!(c.input_state().drag(), DragKind::Move);
        c.process_event(Event::left_drag(15, 7));
        assert_eq!((rect_of(&c, w).x, rect_of(&c, w).y), (13, 7));
        c.process_event(Event::left_drag(0, 7));
        assert_eq!(rect_of(&c, w).x, 13);
        c.process_event(Event::left_up(0, 7));
        assert_eq!(c.input_state().drag(), DragKind::None);
    }

    #[test]
    fn corner_drag_resizes() {
        let mut c = composer();
        let w = c.create_window("a", 10, 5, 20, 6);
        c.process_event(Event::left_down(29, 10));
        c.process_event(Event::left_drag(33, 12));
        assert_eq!(c.tree().get(w).base().size(), Size::new(24, 8));
        c.process_event(Event::left_up(33, 12));
    }

    #[test]
    fn close_button_closes_top() {
        let mut c = composer();
        let a = c.create_window("a", 0, 0, 20, 5);
        let b = c.create_window("b", 30, 0, 20, 5);
        let close_x = rect_of(&c, b).right() - 3;
        c.process_event(Event::left_down(close_x as u16, 0));
        assert_eq!(c.windows(), &[a]);
    }

    #[test]
    fn button_grab_routes_input_exclusively() {
        let mut c = composer();
        let win = c.create_window("a", 0, 0, 30, 8);
        let clicks = Rc::new(RefCell::new(0));
        let seen = clicks.clone();
        let button = c.tree_mut().add(
            win,
            Button::new("Go").on_click(move |_| *seen.borrow_mut() += 1),
        );
        let pos = c.tree().get(button).base().pos();
        c.process_event(Event::left_down(pos.x as u16, pos.y as u16));
        assert_eq!(c.consumer(), Some(button));
        assert!(c.tree().get(button).base().active());
        // release far away still goes to the button, which releases the grab
        c.process_event(Event::left_up(70, 20));
        assert_eq!(c.consumer(), None);
        assert_eq!(*clicks.borrow(), 0);
    }

    #[test]
    fn grabbed_press_never_becomes_a_later_click() {
        let mut c = composer();
        let win = c.create_window("a", 0, 0, 30, 8);
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut holder = ClickSink {
            base: crate::widget::Control::new(),
            seen: clicks.clone(),
        };
        holder.base.set_tab_stop(false);
        holder.base.set_constraints(20, 1);
        let holder = c.tree_mut().add(win, holder);
        let button = c.tree_mut().add(holder, Button::new("Go"));

        let pos = c.tree().get(button).base().pos();
        let (px, py) = (pos.x as u16, pos.y as u16);
        c.process_event(Event::left_down(px, py));
        assert_eq!(c.consumer(), Some(button));
        assert_eq!(c.input_state().mouse_down(), None);
        c.process_event(Event::left_up(70, 20));
        assert_eq!(c.consumer(), None);

        // the release on the old press cell is not paired with that press
        c.process_event(Event::left_up(px, py));
        assert!(clicks.borrow().is_empty());

        let edge = c.tree().get(holder).base().rect().right() - 1;
        c.process_event(Event::left_down(edge as u16, py));
        c.process_event(Event::left_up(edge as u16, py));
        assert_eq!(*clicks.borrow(), vec![(edge as u16, py)]);
    }

    /// Records every `Click` that reaches it.
    struct ClickSink {
        base: crate::widget::Control,
        seen: Rc<RefCell<Vec<(u16, u16)>>>,
    }

    impl Widget for ClickSink {
        fn base(&self) -> &crate::widget::Control {
            &self.base
        }
        fn base_mut(&mut self) -> &mut crate::widget::Control {
            &mut self.base
        }
        fn draw(&self, _canvas: &mut Canvas) {}
        fn process_event(&mut self, event: &Event, _ctx: &mut ComponentContext) -> bool {
            if let Event::Click(m) = event {
                self.seen.borrow_mut().push((m.column, m.row));
                return true;
            }
            false
        }
    }

    #[test]
    fn destroyed_grab_holder_releases_input() {
        let mut c = composer();
        let other = c.create_window("other", 40, 0, 20, 5);
        let (win, seen) = with_sink(&mut c);
        let sink = c.tree().active_control(win).expect("sink is focused");

        let button = c.tree_mut().add(win, Button::new("Go"));
        let pos = c.tree().get(button).base().pos();
        c.process_event(Event::left_down(pos.x as u16, pos.y as u16));
        assert_eq!(c.consumer(), Some(button));
        c.tree_mut().destroy(button);
        c.tree_mut().activate_control(win, sink);
        c.process_event(key(KeyCode::Char('z')));
        assert_eq!(c.consumer(), None);
        assert_eq!(*seen.borrow(), vec![KeyCode::Char('z')]);

        let button = c.tree_mut().add(win, Button::new("Again"));
        let pos = c.tree().get(button).base().pos();
        c.process_event(Event::left_down(pos.x as u16, pos.y as u16));
        assert_eq!(c.consumer(), Some(button));
        c.tree_mut().destroy(button);
        c.process_event(Event::left_down(45, 2));
        c.process_event(Event::left_up(45, 2));
        assert_eq!(c.consumer(), None);
        assert_eq!(c.top_window(), Some(other));
    }

    #[test]
    fn tab_cycles_focus_and_keys_reach_focused_editor() {
        let mut c = composer();
        let win = c.create_window("form", 0, 0, 30, 8);
        c.tree_mut()
            .get_mut(win)
            .base_mut()
            .set_pack(Pack::Vertical);
        c.tree_mut().add(win, Label::new("Name"));
        let edit = c.tree_mut().add(win, EditField::new("", 10));
        let ok = c.tree_mut().add(win, Button::new("OK"));

        c.process_event(key(KeyCode::Tab));
        assert_eq!(c.tree().active_control(win), Some(edit));
        c.process_event(key(KeyCode::Char('h')));
        c.process_event(key(KeyCode::Char('i')));
        let text = c.tree().get_as::<EditField>(edit).map(|e| e.text());
        assert_eq!(text.as_deref(), Some("hi"));
        c.process_event(key(KeyCode::Tab));
        assert_eq!(c.tree().active_control(win), Some(ok));
        c.process_event(key(KeyCode::BackTab));
        assert_eq!(c.tree().active_control(win), Some(edit));
    }

    #[test]
    fn button_space_schedules_timer_and_timer_releases() {
        let mut c = composer();
        let win = c.create_window("a", 0, 0, 30, 8);
        let button = c.tree_mut().add(win, Button::new("Go"));
        c.tree_mut().activate_control(win, button);
        c.process_event(key(KeyCode::Char(' ')));
        let delayed = c.take_delayed();
        assert_eq!(delayed.len(), 1);
        assert!(c.tree().get_as::<Button>(button).is_some_and(|b| b.pressed()));
        c.process_event(delayed[0].1);
        assert!(c.tree().get_as::<Button>(button).is_some_and(|b| !b.pressed()));
    }

    #[test]
    fn screen_resize_refits_maximized_windows() {
        let mut c = composer();
        let w = c.create_window("a", 3, 3, 20, 5);
        assert!(c.toggle_maximize());
        c.process_event(Event::ScreenResize {
            width: 100,
            height: 30,
        });
        assert_eq!(c.tree().get(w).base().size(), Size::new(100, 30));
    }

    #[test]
    fn clipped_child_wider_than_window_stays_inside_border() {
        use crate::components::Frame;
        use ratatui::buffer::Buffer;
        use ratatui::layout::Rect;

        let mut c = composer();
        let win = c.create_window("w", 0, 0, 20, 6);
        let frame = c.tree_mut().add(
            win,
            Frame::new().with_clipped(true).with_constraints(40, 3),
        );
        c.tree_mut().add(frame, Label::new("X".repeat(38)));
        // shrink the window back without a layout pass
        let base = c.tree_mut().get_mut(win).base_mut();
        base.set_constraints(8, 3);
        base.set_size(20, 6);
        assert_eq!(rect_of(&c, frame).width, 40);

        let mut buffer = Buffer::empty(Rect::new(0, 0, 60, 10));
        c.draw(&mut Canvas::new(&mut buffer));
        for y in 0..10u16 {
            for x in 20..60u16 {
                assert_ne!(buffer[(x, y)].symbol(), "X", "cell {x},{y}");
            }
        }
        for y in 1..5u16 {
            assert_eq!(buffer[(19u16, y)].symbol(), "│");
        }
        assert!((1..5u16).any(|y| buffer[(1u16, y)].symbol() == "X"));
    }

    #[test]
    fn deferred_updates_run_after_dispatch() {
        let mut c = composer();
        let win = c.create_window("a", 0, 0, 30, 8);
        c.tree_mut().get_mut(win).base_mut().set_pack(Pack::Vertical);
        let label = c.tree_mut().add(win, Label::new("before"));
        let button = c.tree_mut().add(
            win,
            Button::new("Go").on_click(move |ctx| {
                ctx.update(move |tree| {
                    if let Some(l) = tree.get_as_mut::<Label>(label) {
                        l.set_text("after");
                    }
                })
            }),
        );
        c.tree_mut().activate_control(win, button);
        c.process_event(key(KeyCode::Char(' ')));
        let text = c.tree().get_as::<Label>(label).map(|l| l.text().to_string());
        assert_eq!(text.as_deref(), Some("after"));
    }
}
