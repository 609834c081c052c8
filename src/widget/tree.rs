//! Arena that owns every widget.
//!
//! Nodes are boxed trait objects addressed by [`WidgetId`]. Structural
//! mutation (insert, attach, destroy, visibility) lives here and keeps the
//! parent/child links consistent; the layout passes are implemented in
//! [`crate::layout`] and focus/dispatch helpers in [`crate::dispatch`].

use crate::canvas::Canvas;
use crate::geometry::ClipRect;
use crate::widget::{Widget, WidgetId};

#[derive(Default)]
pub struct WidgetTree {
    nodes: Vec<Option<Box<dyn Widget>>>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a widget without attaching it anywhere. Used for windows and
    /// other roots.
    pub fn insert<W: Widget + 'static>(&mut self, widget: W) -> WidgetId {
        let id = WidgetId(self.nodes.len());
        let mut boxed: Box<dyn Widget> = Box::new(widget);
        boxed.base_mut().set_id(id);
        self.nodes.push(Some(boxed));
        id
    }

    /// Store `widget` and attach it as the last child of `parent`, running a
    /// layout pass.
    pub fn add<W: Widget + 'static>(&mut self, parent: WidgetId, widget: W) -> WidgetId {
        let id = self.insert(widget);
        self.add_child(parent, id);
        id
    }

    /// Attach an existing node to `parent` and relayout the root.
    ///
    /// # Panics
    ///
    /// If `child` already is a child of `parent`, or belongs to another
    /// parent.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) {
        if self.get(parent).base().children().contains(&child) {
            panic!("widget {child:?} added to {parent:?} twice");
        }
        if let Some(owner) = self.get(child).base().parent()
            && owner != parent
        {
            panic!("widget {child:?} already belongs to {owner:?}");
        }
        self.get_mut(parent).base_mut().children_mut().push(child);
        self.get_mut(child).base_mut().set_parent(parent);

        let root = self.fit_ancestors(parent);
        self.relayout(root);
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.try_get(id).is_some()
    }

    pub fn try_get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.nodes.get(id.index()).and_then(|n| n.as_deref())
    }

    pub fn try_get_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        match self.nodes.get_mut(id.index()) {
            Some(Some(node)) => Some(node.as_mut()),
            _ => None,
        }
    }

    /// # Panics
    ///
    /// If `id` was never inserted or has been destroyed.
    pub fn get(&self, id: WidgetId) -> &dyn Widget {
        match self.try_get(id) {
            Some(w) => w,
            None => panic!("unknown widget {id:?}"),
        }
    }

    /// # Panics
    ///
    /// If `id` was never inserted or has been destroyed.
    pub fn get_mut(&mut self, id: WidgetId) -> &mut dyn Widget {
        match self.try_get_mut(id) {
            Some(w) => w,
            None => panic!("unknown widget {id:?}"),
        }
    }

    /// Typed access to a concrete control.
    pub fn get_as<T: Widget + 'static>(&self, id: WidgetId) -> Option<&T> {
        self.try_get(id)?.as_any().downcast_ref::<T>()
    }

    pub fn get_as_mut<T: Widget + 'static>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.try_get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).base().parent()
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.get(id).base().children()
    }

    /// Topmost ancestor of `id` (itself for roots).
    pub fn root_of(&self, id: WidgetId) -> WidgetId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            out.push(p);
            current = self.parent(p);
        }
        out
    }

    /// `id` and all its descendants in depth-first pre-order.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// Detach `id` from its parent, reset the parent's constraints, drop the
    /// whole subtree from the arena and relayout what remains.
    ///
    /// The handle (and those of its descendants) must not be used
    /// afterwards.
    pub fn destroy(&mut self, id: WidgetId) {
        let parent = self.parent(id);
        for node in self.subtree(id) {
            self.nodes[node.index()] = None;
        }
        let Some(parent) = parent else {
            return;
        };
        let base = self.get_mut(parent).base_mut();
        base.children_mut().retain(|c| *c != id);
        base.set_constraints(0, 0);

        let root = self.fit_ancestors(parent);
        self.relayout(root);
    }

    /// Show or hide `id`. Hiding the subtree holding the focused control
    /// moves focus to the next tab stop. The root is relaid out right away.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if self.get(id).base().visible() == visible {
            return;
        }
        self.get_mut(id).base_mut().set_visible_flag(visible);
        if self.parent(id).is_none() {
            return;
        }
        let root = self.root_of(id);
        if !visible
            && let Some(active) = self.active_control(root)
            && (active == id || self.is_ancestor(id, active))
        {
            self.get_mut(active).base_mut().set_active(false);
            self.focus_next(root, true);
        }
        self.relayout(root);
    }

    /// Nearest ancestor with clipping enabled.
    pub fn clipped_parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.ancestors(id)
            .into_iter()
            .find(|p| self.get(*p).base().clipped())
    }

    /// Screen region `id`'s content may occupy: its padded interior
    /// intersected with the region of its clipped ancestor. Cached on
    /// clipped nodes until they move or resize.
    pub fn clipper(&self, id: WidgetId) -> ClipRect {
        let base = self.get(id).base();
        if let Some(rect) = base.cached_clipper() {
            return rect;
        }
        let pad = base.paddings();
        let own = base.rect().inset(pad.width, pad.height);
        let rect = match self.clipped_parent(id) {
            Some(parent) => own.intersection(self.clipper(parent)),
            None => own,
        };
        if base.clipped() {
            base.cache_clipper(rect);
        }
        rect
    }

    /// Region children of `id` are drawn in: the clipper of `id` itself when
    /// it is clipped, otherwise of its nearest clipped ancestor, otherwise
    /// its own.
    pub fn child_clip(&self, id: WidgetId) -> ClipRect {
        let target = if self.get(id).base().clipped() {
            id
        } else {
            self.clipped_parent(id).unwrap_or(id)
        };
        self.clipper(target)
    }

    /// Draw `id`, then its visible children in order inside its clip
    /// region.
    ///
    /// # Panics
    ///
    /// If `id` is not in the tree.
    pub fn draw(&self, id: WidgetId, canvas: &mut Canvas) {
        let widget = self.get(id);
        let base = widget.base();
        if !base.visible() {
            return;
        }
        widget.draw(canvas);
        if base.children().is_empty() {
            return;
        }
        let clip = self.child_clip(id);
        canvas.with_clip(clip, |canvas| {
            for child in base.children() {
                self.draw(*child, canvas);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Frame, Label};
    use crate::geometry::Size;

    fn container(w: i32, h: i32) -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let mut frame = Frame::new();
        frame.base_mut().set_size(w, h);
        let root = tree.insert(frame);
        (tree, root)
    }

    #[test]
    #[should_panic(expected = "twice")]
    fn double_add_panics() {
        let (mut tree, root) = container(10, 3);
        let child = tree.add(root, Label::new("a"));
        tree.add_child(root, child);
    }

    #[test]
    #[should_panic(expected = "already belongs")]
    fn second_parent_panics() {
        let (mut tree, root) = container(10, 3);
        let other = tree.add(root, Frame::new());
        let child = tree.add(root, Label::new("a"));
        tree.add_child(other, child);
    }

    #[test]
    fn add_links_both_directions() {
        let (mut tree, root) = container(10, 3);
        let child = tree.add(root, Label::new("a"));
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.children(root), &[child]);
        assert_eq!(tree.root_of(child), root);
        assert_eq!(tree.get(child).base().id(), child);
    }

    #[test]
    fn destroy_removes_subtree_and_resets_parent_constraints() {
        let (mut tree, root) = container(4, 1);
        let inner = tree.add(root, Frame::new().with_constraints(20, 2));
        let leaf = tree.add(inner, Label::new("x"));
        assert_eq!(tree.get(root).base().constraints(), Size::new(20, 2));

        tree.destroy(inner);
        assert!(!tree.contains(inner));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.get(root).base().constraints(), Size::new(0, 0));
    }

    #[test]
    fn typed_access() {
        let (mut tree, root) = container(10, 3);
        let label = tree.add(root, Label::new("hello"));
        assert_eq!(tree.get_as::<Label>(label).map(|l| l.text()), Some("hello"));
        assert!(tree.get_as::<Frame>(label).is_none());
        if let Some(l) = tree.get_as_mut::<Label>(label) {
            l.set_text("bye");
        }
        assert_eq!(tree.get_as::<Label>(label).map(|l| l.text()), Some("bye"));
    }

    #[test]
    fn clipper_intersects_clipped_ancestor() {
        let mut tree = WidgetTree::new();
        let mut outer = Frame::new().with_clipped(true).with_paddings(1, 1);
        outer.base_mut().set_pos(0, 0);
        outer.base_mut().set_size(10, 5);
        let outer = tree.insert(outer);
        let inner = tree.add(outer, Frame::new().with_constraints(20, 2));
        // the root grew to fit the child, so shrink it back by hand
        tree.get_mut(outer).base_mut().set_constraints(0, 0);
        tree.get_mut(outer).base_mut().set_size(10, 5);

        assert_eq!(tree.clipper(outer), ClipRect::new(1, 1, 8, 3));
        assert_eq!(tree.clipper(inner), ClipRect::new(1, 1, 8, 3));
        assert_eq!(tree.child_clip(inner), ClipRect::new(1, 1, 8, 3));
    }
}
