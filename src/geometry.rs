use emath::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest width/height a region may be resized to, in image pixels.
pub const MIN_REGION_SIZE: f32 = 10.0;

/// Axis-aligned bounding box in image-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Dimensions of the underlying image, the clamp region for every region bbox.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: f32,
    pub height: f32,
}

impl ImageBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The affordance grabbed at the start of a drag. Determines which edges of
/// the bbox the gesture may move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    Move,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

// Lower bound wins on inverted intervals, so a start bbox that already
// violates a bound degrades to the nearest legal value instead of panicking.
fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

/// Apply a cumulative drag delta to the bbox captured at gesture start.
///
/// Pure function of its inputs: every clamp is expressed against `start`,
/// never against a previous frame's output, so repeated application of the
/// same delta yields the same bbox and rounding cannot accumulate across
/// move events. The result always lies inside `bounds` and respects
/// [`MIN_REGION_SIZE`] on both axes.
pub fn apply_drag(start: BBox, handle: DragHandle, delta: Vec2, bounds: ImageBounds) -> BBox {
    let mut bbox = start;
    match handle {
        DragHandle::Move => {
            bbox.x = clamp(start.x + delta.x, 0.0, bounds.width - start.width);
            bbox.y = clamp(start.y + delta.y, 0.0, bounds.height - start.height);
        }
        DragHandle::Top => drag_top(&mut bbox, &start, delta.y),
        DragHandle::Bottom => drag_bottom(&mut bbox, &start, delta.y, bounds),
        DragHandle::Left => drag_left(&mut bbox, &start, delta.x),
        DragHandle::Right => drag_right(&mut bbox, &start, delta.x, bounds),
        DragHandle::TopLeft => {
            drag_top(&mut bbox, &start, delta.y);
            drag_left(&mut bbox, &start, delta.x);
        }
        DragHandle::TopRight => {
            drag_top(&mut bbox, &start, delta.y);
            drag_right(&mut bbox, &start, delta.x, bounds);
        }
        DragHandle::BottomLeft => {
            drag_bottom(&mut bbox, &start, delta.y, bounds);
            drag_left(&mut bbox, &start, delta.x);
        }
        DragHandle::BottomRight => {
            drag_bottom(&mut bbox, &start, delta.y, bounds);
            drag_right(&mut bbox, &start, delta.x, bounds);
        }
    }
    bbox
}

// The top edge moves, the bottom edge stays where the gesture started.
fn drag_top(bbox: &mut BBox, start: &BBox, dy: f32) {
    bbox.y = clamp(start.y + dy, 0.0, start.y + start.height - MIN_REGION_SIZE);
    bbox.height = start.height - (bbox.y - start.y);
}

fn drag_bottom(bbox: &mut BBox, start: &BBox, dy: f32, bounds: ImageBounds) {
    bbox.height = clamp(
        start.height + dy,
        MIN_REGION_SIZE,
        bounds.height - start.y,
    );
}

fn drag_left(bbox: &mut BBox, start: &BBox, dx: f32) {
    bbox.x = clamp(start.x + dx, 0.0, start.x + start.width - MIN_REGION_SIZE);
    bbox.width = start.width - (bbox.x - start.x);
}

fn drag_right(bbox: &mut BBox, start: &BBox, dx: f32, bounds: ImageBounds) {
    bbox.width = clamp(start.width + dx, MIN_REGION_SIZE, bounds.width - start.x);
}
