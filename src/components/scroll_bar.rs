//! Scroll bar geometry and drawing shared by scrollable controls.
//!
//! A bar of `length` cells has an arrow at each end and a track between
//! them. Positions are cell offsets from the start of the bar.

use crate::canvas::Canvas;
use crate::colors::Attr;

const TRACK: char = '░';
const THUMB: char = '▓';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    Vertical,
    Horizontal,
}

/// Cell of the thumb for scroll position `item` out of `count`.
pub(crate) fn thumb_position(item: usize, count: usize, length: i32) -> Option<i32> {
    let track = length - 2;
    if track <= 0 {
        return None;
    }
    if count <= 1 {
        return Some(1);
    }
    let item = item.min(count - 1) as i64;
    let offset = item * i64::from(track - 1) / (count as i64 - 1);
    Some(1 + offset as i32)
}

/// Scroll position a click on track cell `cell` asks for. Arrow cells and
/// cells past the bar give `None`.
pub(crate) fn item_by_thumb(cell: i32, count: usize, length: i32) -> Option<usize> {
    let track = length - 2;
    if track <= 0 || cell < 1 || cell > track || count == 0 {
        return None;
    }
    if track == 1 {
        return Some(0);
    }
    let item = i64::from(cell - 1) * (count as i64 - 1) / i64::from(track - 1);
    Some(item as usize)
}

pub(crate) fn draw(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    length: i32,
    orientation: Orientation,
    thumb: Option<i32>,
    attr: Attr,
) {
    if length <= 0 {
        return;
    }
    let (first, last) = match orientation {
        Orientation::Vertical => ('▲', '▼'),
        Orientation::Horizontal => ('◄', '►'),
    };
    for i in 0..length {
        let ch = if i == 0 {
            first
        } else if i == length - 1 {
            last
        } else if thumb == Some(i) {
            THUMB
        } else {
            TRACK
        };
        match orientation {
            Orientation::Vertical => canvas.put(x, y + i, ch, attr),
            Orientation::Horizontal => canvas.put(x + i, y, ch, attr),
        }
    }
}
