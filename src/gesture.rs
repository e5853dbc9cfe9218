use emath::Pos2;

use crate::{apply_drag, BBox, DragHandle, ImageBounds, RegionId, Viewport};

/// Per-interaction drag state. Created on pointer-down over a handle,
/// destroyed on pointer-up; never persisted.
///
/// While `Dragging`, every pointer move is interpreted as a cumulative delta
/// from `start_pointer` against the `start_bbox` snapshot, so the committed
/// bbox for the final pointer position is independent of how many move events
/// were delivered in between.
#[derive(Debug, Default)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging {
        region: RegionId,
        handle: DragHandle,
        /// Pointer position at gesture start, in screen space.
        start_pointer: Pos2,
        /// Committed bbox at gesture start, in image space.
        start_bbox: BBox,
    },
}

impl DragGesture {
    pub fn begin(&mut self, region: RegionId, handle: DragHandle, pointer: Pos2, bbox: BBox) {
        *self = DragGesture::Dragging {
            region,
            handle,
            start_pointer: pointer,
            start_bbox: bbox,
        };
    }

    /// Compute the bbox for the current pointer position.
    ///
    /// Returns `None` while idle. O(1) and synchronous, safe to call once per
    /// pointer-move event.
    pub fn update(
        &self,
        pointer: Pos2,
        viewport: &Viewport,
        bounds: ImageBounds,
    ) -> Option<(RegionId, BBox)> {
        let DragGesture::Dragging {
            region,
            handle,
            start_pointer,
            start_bbox,
        } = self
        else {
            return None;
        };
        let delta = viewport.screen_delta_to_image(pointer - *start_pointer);
        Some((*region, apply_drag(*start_bbox, *handle, delta, bounds)))
    }

    pub fn end(&mut self) {
        *self = DragGesture::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragGesture::Dragging { .. })
    }

    pub fn active_region(&self) -> Option<RegionId> {
        match self {
            DragGesture::Dragging { region, .. } => Some(*region),
            DragGesture::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use emath::{Rect, Vec2};

    use super::*;

    fn viewport_2x() -> Viewport {
        // 200x200 image inside a 400x400 viewport: scale 2.0
        Viewport::fit(bounds(), Rect::from_min_size(Pos2::ZERO, Vec2::splat(400.0)))
    }

    fn bounds() -> ImageBounds {
        ImageBounds::new(200.0, 200.0)
    }

    #[test]
    fn idle_update_returns_none() {
        let gesture = DragGesture::default();
        assert!(gesture
            .update(Pos2::new(10.0, 10.0), &viewport_2x(), bounds())
            .is_none());
    }

    #[test]
    fn update_divides_screen_delta_by_scale() {
        let mut gesture = DragGesture::default();
        let start = BBox::new(50.0, 50.0, 40.0, 40.0);
        gesture.begin(RegionId::new(1), DragHandle::Move, Pos2::new(100.0, 100.0), start);

        let (id, bbox) = gesture
            .update(Pos2::new(120.0, 90.0), &viewport_2x(), bounds())
            .unwrap();
        assert_eq!(id, RegionId::new(1));
        // 20 screen px right, 10 up => 10 image px right, 5 up.
        assert_eq!(bbox, BBox::new(60.0, 45.0, 40.0, 40.0));
    }

    #[test]
    fn later_updates_ignore_intermediate_positions() {
        let mut gesture = DragGesture::default();
        let start = BBox::new(50.0, 50.0, 40.0, 40.0);
        gesture.begin(RegionId::new(7), DragHandle::Right, Pos2::ZERO, start);

        // Wander far out of bounds, then settle on a modest delta.
        gesture.update(Pos2::new(10_000.0, 0.0), &viewport_2x(), bounds());
        let (_, settled) = gesture
            .update(Pos2::new(20.0, 0.0), &viewport_2x(), bounds())
            .unwrap();

        // Same result as a fresh gesture going straight to the final position.
        let mut direct = DragGesture::default();
        direct.begin(RegionId::new(7), DragHandle::Right, Pos2::ZERO, start);
        let (_, one_shot) = direct
            .update(Pos2::new(20.0, 0.0), &viewport_2x(), bounds())
            .unwrap();
        assert_eq!(settled, one_shot);
    }

    #[test]
    fn end_resets_to_idle() {
        let mut gesture = DragGesture::default();
        gesture.begin(
            RegionId::new(3),
            DragHandle::Top,
            Pos2::ZERO,
            BBox::new(20.0, 20.0, 30.0, 30.0),
        );
        assert!(gesture.is_active());
        assert_eq!(gesture.active_region(), Some(RegionId::new(3)));

        gesture.end();
        assert!(!gesture.is_active());
        assert_eq!(gesture.active_region(), None);
    }
}
