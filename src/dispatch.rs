//! Focus and hit lookup inside one window's subtree.

use crate::widget::{HitResult, WidgetId, WidgetTree};

impl WidgetTree {
    /// Descendants of `root` (excluding it) in pre-order, not descending
    /// into hidden nodes.
    fn shown_descendants(&self, root: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack: Vec<WidgetId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if !self.get(id).base().visible() {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Controls that can take keyboard focus, in tab order.
    pub fn tab_stops(&self, root: WidgetId) -> Vec<WidgetId> {
        self.shown_descendants(root)
            .into_iter()
            .filter(|id| {
                let base = self.get(*id).base();
                base.tab_stop() && base.enabled()
            })
            .collect()
    }

    /// The focused control below `root`, if any.
    pub fn active_control(&self, root: WidgetId) -> Option<WidgetId> {
        self.shown_descendants(root).into_iter().find(|id| {
            let base = self.get(*id).base();
            base.active() && base.tab_stop() && base.enabled()
        })
    }

    /// Focus `id`, clearing the flag on every other control below `root`.
    pub fn activate_control(&mut self, root: WidgetId, id: WidgetId) {
        for other in self.subtree(root).into_iter().skip(1) {
            let active = other == id;
            let base = self.get_mut(other).base_mut();
            if base.active() != active {
                base.set_active(active);
            }
        }
    }

    /// Move focus to the next (or previous) tab stop, wrapping around.
    pub fn focus_next(&mut self, root: WidgetId, forward: bool) -> Option<WidgetId> {
        let stops = self.tab_stops(root);
        if stops.is_empty() {
            return None;
        }
        let current = self
            .active_control(root)
            .and_then(|a| stops.iter().position(|s| *s == a));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => stops.len() - 1,
            (Some(i), true) => (i + 1) % stops.len(),
            (Some(i), false) => (i + stops.len() - 1) % stops.len(),
        };
        let id = stops[next];
        self.activate_control(root, id);
        Some(id)
    }

    /// Deepest shown control under (x, y), or `root` when no child is hit.
    pub fn control_at(&self, root: WidgetId, x: i32, y: i32) -> WidgetId {
        let mut current = root;
        'descend: loop {
            for child in self.children(current).iter().rev() {
                let widget = self.get(*child);
                if widget.base().visible() && widget.hit_test(x, y) != HitResult::Outside {
                    current = *child;
                    continue 'descend;
                }
            }
            return current;
        }
    }
}
