//! Geometry for floating windows: mouse drags and keyboard nudges.
//!
//! Everything here is pure arithmetic on a window rectangle. The composer
//! decides what to drag and applies the result.

use crossterm::event::KeyCode;

use crate::geometry::{ClipRect, Size};
use crate::widget::HitResult;

/// Active mouse drag, chosen from the border region under the press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragKind {
    #[default]
    None,
    Move,
    ResizeLeft,
    ResizeRight,
    ResizeTop,
    ResizeBottom,
    ResizeTopLeft,
    ResizeTopRight,
    ResizeBottomLeft,
    ResizeBottomRight,
}

impl DragKind {
    /// Drag started by a left press on `hit`. The title row moves the
    /// window; the other edges and the corners resize it.
    pub fn from_hit(hit: HitResult) -> DragKind {
        match hit {
            HitResult::Top => DragKind::Move,
            HitResult::Left => DragKind::ResizeLeft,
            HitResult::Right => DragKind::ResizeRight,
            HitResult::Bottom => DragKind::ResizeBottom,
            HitResult::TopLeft => DragKind::ResizeTopLeft,
            HitResult::TopRight => DragKind::ResizeTopRight,
            HitResult::BottomLeft => DragKind::ResizeBottomLeft,
            HitResult::BottomRight => DragKind::ResizeBottomRight,
            _ => DragKind::None,
        }
    }

    pub fn is_resize(self) -> bool {
        !matches!(self, DragKind::None | DragKind::Move)
    }

    fn moves_left_edge(self) -> bool {
        matches!(
            self,
            DragKind::ResizeLeft | DragKind::ResizeTopLeft | DragKind::ResizeBottomLeft
        )
    }

    fn moves_right_edge(self) -> bool {
        matches!(
            self,
            DragKind::ResizeRight | DragKind::ResizeTopRight | DragKind::ResizeBottomRight
        )
    }

    fn moves_top_edge(self) -> bool {
        matches!(
            self,
            DragKind::ResizeTop | DragKind::ResizeTopLeft | DragKind::ResizeTopRight
        )
    }

    fn moves_bottom_edge(self) -> bool {
        matches!(
            self,
            DragKind::ResizeBottom | DragKind::ResizeBottomLeft | DragKind::ResizeBottomRight
        )
    }
}

/// Window geometry after dragging by (`dx`, `dy`) from `rect`.
///
/// Returns `None` when the result would leave the screen (any edge at or
/// past the screen border on the right/bottom, negative on the left/top) or
/// shrink below `min`. A rejected step leaves the window where it is.
pub fn apply_drag(
    kind: DragKind,
    rect: ClipRect,
    dx: i32,
    dy: i32,
    screen: Size,
    min: Size,
) -> Option<ClipRect> {
    if kind == DragKind::None || (dx == 0 && dy == 0) {
        return None;
    }
    let mut next = rect;
    if kind == DragKind::Move {
        next.x += dx;
        next.y += dy;
    }
    if kind.moves_left_edge() {
        next.x += dx;
        next.width -= dx;
    }
    if kind.moves_right_edge() {
        next.width += dx;
    }
    if kind.moves_top_edge() {
        next.y += dy;
        next.height -= dy;
    }
    if kind.moves_bottom_edge() {
        next.height += dy;
    }

    let on_screen = next.x >= 0
        && next.y >= 0
        && next.right() < screen.width
        && next.bottom() < screen.height;
    if !on_screen || next.width < min.width || next.height < min.height {
        return None;
    }
    Some(next)
}

/// One-cell keyboard move. The window keeps the bounds [`apply_drag`]
/// enforces: it may touch the top and left screen edges but its right and
/// bottom edges stay short of the screen border.
pub fn nudge_move(rect: ClipRect, key: KeyCode, screen: Size) -> Option<ClipRect> {
    let mut next = rect;
    match key {
        KeyCode::Up if rect.y > 0 => next.y -= 1,
        KeyCode::Down if rect.bottom() + 1 < screen.height => next.y += 1,
        KeyCode::Left if rect.x > 0 => next.x -= 1,
        KeyCode::Right if rect.right() + 1 < screen.width => next.x += 1,
        _ => return None,
    }
    Some(next)
}

/// One-cell keyboard resize of the bottom-right corner. Shrinking stops at
/// `min`; growing stops at the same screen bound as a mouse resize.
pub fn nudge_resize(rect: ClipRect, key: KeyCode, min: Size, screen: Size) -> Option<Size> {
    let mut next = Size::new(rect.width, rect.height);
    match key {
        KeyCode::Up if rect.height > min.height => next.height -= 1,
        KeyCode::Left if rect.width > min.width => next.width -= 1,
        KeyCode::Down if rect.bottom() + 1 < screen.height => next.height += 1,
        KeyCode::Right if rect.right() + 1 < screen.width => next.width += 1,
        _ => return None,
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Size = Size::new(80, 25);
    const MIN: Size = Size::new(8, 3);

    #[test]
    fn move_within_screen() {
        let r = ClipRect::new(10, 5, 20, 10);
        assert_eq!(
            apply_drag(DragKind::Move, r, 3, -2, SCREEN, MIN),
            Some(ClipRect::new(13, 3, 20, 10))
        );
    }

    #[test]
    fn move_off_screen_is_rejected() {
        let r = ClipRect::new(1, 1, 20, 10);
        assert_eq!(apply_drag(DragKind::Move, r, -2, 0, SCREEN, MIN), None);
        let r = ClipRect::new(59, 1, 20, 10);
        // right edge would land on the screen border
        assert_eq!(apply_drag(DragKind::Move, r, 1, 0, SCREEN, MIN), None);
        assert!(apply_drag(DragKind::Move, r, 0, 1, SCREEN, MIN).is_some());
    }

    #[test]
    fn left_edge_keeps_right_edge_fixed() {
        let r = ClipRect::new(10, 5, 20, 10);
        let next = apply_drag(DragKind::ResizeLeft, r, -4, 7, SCREEN, MIN).unwrap();
        assert_eq!(next, ClipRect::new(6, 5, 24, 10));
        assert_eq!(next.right(), r.right());
    }

    #[test]
    fn top_left_corner_shrinks_both_axes() {
        let r = ClipRect::new(10, 5, 20, 10);
        let next = apply_drag(DragKind::ResizeTopLeft, r, 2, 3, SCREEN, MIN).unwrap();
        assert_eq!(next, ClipRect::new(12, 8, 18, 7));
        assert_eq!((next.right(), next.bottom()), (r.right(), r.bottom()));
    }

    #[test]
    fn top_edge_and_top_right_corner() {
        let r = ClipRect::new(10, 5, 20, 10);
        assert_eq!(
            apply_drag(DragKind::ResizeTop, r, 5, -1, SCREEN, MIN),
            Some(ClipRect::new(10, 4, 20, 11))
        );
        assert_eq!(
            apply_drag(DragKind::ResizeTopRight, r, 5, -1, SCREEN, MIN),
            Some(ClipRect::new(10, 4, 25, 11))
        );
    }

    #[test]
    fn bottom_corners() {
        let r = ClipRect::new(10, 5, 20, 10);
        assert_eq!(
            apply_drag(DragKind::ResizeBottomLeft, r, -1, 2, SCREEN, MIN),
            Some(ClipRect::new(9, 5, 21, 12))
        );
        assert_eq!(
            apply_drag(DragKind::ResizeBottomRight, r, 3, 2, SCREEN, MIN),
            Some(ClipRect::new(10, 5, 23, 12))
        );
    }

    #[test]
    fn resize_below_minimum_is_rejected() {
        let r = ClipRect::new(10, 5, 9, 4);
        assert_eq!(apply_drag(DragKind::ResizeRight, r, -2, 0, SCREEN, MIN), None);
        assert_eq!(apply_drag(DragKind::ResizeBottom, r, 0, -2, SCREEN, MIN), None);
        assert!(apply_drag(DragKind::ResizeRight, r, -1, 0, SCREEN, MIN).is_some());
    }

    #[test]
    fn hit_regions_map_to_drags() {
        assert_eq!(DragKind::from_hit(HitResult::Top), DragKind::Move);
        assert_eq!(DragKind::from_hit(HitResult::BottomRight), DragKind::ResizeBottomRight);
        assert_eq!(DragKind::from_hit(HitResult::Inside), DragKind::None);
        assert_eq!(DragKind::from_hit(HitResult::ButtonClose), DragKind::None);
        assert!(DragKind::ResizeTop.is_resize());
        assert!(!DragKind::Move.is_resize());
    }

    #[test]
    fn keyboard_nudges() {
        let r = ClipRect::new(0, 3, 10, 5);
        assert_eq!(nudge_move(r, KeyCode::Left, SCREEN), None);
        assert_eq!(nudge_move(r, KeyCode::Up, SCREEN), Some(ClipRect::new(0, 2, 10, 5)));

        let small = ClipRect::new(4, 4, MIN.width, MIN.height);
        assert_eq!(nudge_resize(small, KeyCode::Up, MIN, SCREEN), None);
        assert_eq!(nudge_resize(small, KeyCode::Left, MIN, SCREEN), None);
        assert_eq!(
            nudge_resize(small, KeyCode::Right, MIN, SCREEN),
            Some(Size::new(9, 3))
        );
        assert_eq!(nudge_resize(small, KeyCode::Char('x'), MIN, SCREEN), None);
    }

    #[test]
    fn keyboard_and_mouse_share_the_screen_bound() {
        // one cell short of the right and bottom borders
        let edge = ClipRect::new(69, 19, 10, 5);
        assert_eq!(nudge_move(edge, KeyCode::Right, SCREEN), None);
        assert_eq!(nudge_move(edge, KeyCode::Down, SCREEN), None);
        assert_eq!(apply_drag(DragKind::Move, edge, 1, 0, SCREEN, MIN), None);
        assert_eq!(apply_drag(DragKind::Move, edge, 0, 1, SCREEN, MIN), None);
        assert_eq!(nudge_resize(edge, KeyCode::Right, MIN, SCREEN), None);
        assert_eq!(nudge_resize(edge, KeyCode::Down, MIN, SCREEN), None);
        assert_eq!(
            apply_drag(DragKind::ResizeBottomRight, edge, 1, 1, SCREEN, MIN),
            None
        );

        let inner = ClipRect::new(68, 18, 10, 5);
        assert_eq!(
            nudge_move(inner, KeyCode::Right, SCREEN),
            apply_drag(DragKind::Move, inner, 1, 0, SCREEN, MIN)
        );
        assert_eq!(
            nudge_resize(inner, KeyCode::Down, MIN, SCREEN),
            Some(Size::new(10, 6))
        );

        // a window already touching the border can still shrink
        let full = ClipRect::new(0, 0, 80, 25);
        assert_eq!(
            nudge_resize(full, KeyCode::Left, MIN, SCREEN),
            Some(Size::new(79, 25))
        );
    }
}
