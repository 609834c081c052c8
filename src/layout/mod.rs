//! Layout engine.
//!
//! Three passes over the widget tree:
//!
//! - [`WidgetTree::minimal_size`] bottom-up: a leaf reports its constraint,
//!   a container the sum (pack axis) / max (cross axis) of its visible,
//!   non-clipped children plus padding and gaps, floored at its own
//!   constraint.
//! - [`WidgetTree::resize_children`] top-down: every visible child gets its
//!   minimal size plus a share of the slack proportional to its scale weight,
//!   and the full cross-axis extent.
//! - [`WidgetTree::place_children`] top-down: children are laid out in
//!   order from the padded origin, advancing by size plus gap.

pub mod floating;

use crate::geometry::Size;
use crate::widget::{Pack, WidgetId, WidgetTree};

impl WidgetTree {
    fn visible_children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.get(*c).base().visible())
            .collect()
    }

    /// Sum of the scale weights of visible children, or the node's own
    /// weight when it has none.
    pub fn children_scale(&self, id: WidgetId) -> i32 {
        let visible = self.visible_children(id);
        if visible.is_empty() {
            return self.get(id).base().scale();
        }
        visible
            .iter()
            .map(|c| self.get(*c).base().scale())
            .sum()
    }

    pub fn minimal_size(&self, id: WidgetId) -> Size {
        let base = self.get(id).base();
        let visible = self.visible_children(id);
        if visible.is_empty() {
            return base.constraints();
        }

        let pad = base.paddings();
        let gaps = base.gaps();
        let mut total = Size::new(2 * pad.width, 2 * pad.height);
        let between = visible.len() as i32 - 1;
        match base.pack() {
            Pack::Vertical => total.height += between * gaps.height,
            Pack::Horizontal => total.width += between * gaps.width,
        }

        for child in visible {
            if self.get(child).base().clipped() {
                continue;
            }
            let min = self.minimal_size(child);
            match base.pack() {
                Pack::Vertical => {
                    total.height += min.height;
                    total.width = total.width.max(min.width + 2 * pad.width);
                }
                Pack::Horizontal => {
                    total.width += min.width;
                    total.height = total.height.max(min.height + 2 * pad.height);
                }
            }
        }

        total.max(base.constraints())
    }

    /// Distribute the node's interior among its visible children and recurse.
    ///
    /// The slack step is computed once; each weighted child takes
    /// `scale * step`, except a child whose weight equals the remaining total,
    /// which takes all remaining slack. Slack and weight shrink after every
    /// child so rounding error lands on later siblings.
    pub fn resize_children(&mut self, id: WidgetId) {
        let visible = self.visible_children(id);
        if visible.is_empty() {
            return;
        }

        let base = self.get(id).base();
        let pack = base.pack();
        let pad = base.paddings();
        let gaps = base.gaps();
        let mut full = Size::new(
            base.size().width - 2 * pad.width,
            base.size().height - 2 * pad.height,
        );
        let between = visible.len() as i32 - 1;
        match pack {
            Pack::Horizontal => full.width -= between * gaps.width,
            Pack::Vertical => full.height -= between * gaps.height,
        }

        let mut total_scale = self.children_scale(id);
        let minimal: Vec<Size> = visible.iter().map(|c| self.minimal_size(*c)).collect();
        let min_sum: i32 = minimal
            .iter()
            .map(|m| match pack {
                Pack::Horizontal => m.width,
                Pack::Vertical => m.height,
            })
            .sum();

        let mut diff = match pack {
            Pack::Horizontal => full.width - min_sum,
            Pack::Vertical => full.height - min_sum,
        };
        let step = if total_scale > 0 { diff / total_scale } else { 0 };

        for (child, min) in visible.into_iter().zip(minimal) {
            let scale = self.get(child).base().scale();
            let mut target = min;
            let mut taken = scale * step;
            let axis = match pack {
                Pack::Horizontal => &mut target.width,
                Pack::Vertical => &mut target.height,
            };
            if scale != 0 {
                if scale == total_scale {
                    *axis += diff;
                    taken = diff;
                } else {
                    *axis += taken;
                }
            }
            match pack {
                Pack::Horizontal => target.height = full.height,
                Pack::Vertical => target.width = full.width,
            }
            diff -= taken;
            total_scale -= scale;

            self.get_mut(child)
                .base_mut()
                .set_size(target.width, target.height);
            self.resize_children(child);
        }
    }

    pub fn place_children(&mut self, id: WidgetId) {
        let base = self.get(id).base();
        let pack = base.pack();
        let gaps = base.gaps();
        let pad = base.paddings();
        let mut x = base.pos().x + pad.width;
        let mut y = base.pos().y + pad.height;

        for child in self.visible_children(id) {
            let child_base = self.get_mut(child).base_mut();
            child_base.set_pos(x, y);
            let size = child_base.size();
            match pack {
                Pack::Vertical => y += gaps.height + size.height,
                Pack::Horizontal => x += gaps.width + size.width,
            }
            self.place_children(child);
        }
    }

    /// Resize and place the whole subtree under `root`.
    pub fn relayout(&mut self, root: WidgetId) {
        self.resize_children(root);
        self.place_children(root);
    }

    /// Walk from `from` up to the root growing the constraint of every node
    /// smaller than its minimal size. Returns the root.
    pub(crate) fn fit_ancestors(&mut self, from: WidgetId) -> WidgetId {
        let mut current = from;
        loop {
            let min = self.minimal_size(current);
            let size = self.get(current).base().size();
            if min.width > size.width || min.height > size.height {
                let grown = size.max(min);
                self.get_mut(current)
                    .base_mut()
                    .set_constraints(grown.width, grown.height);
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return current,
            }
        }
    }
}
