use emath::{Pos2, Rect, Vec2};

use crate::{BBox, ImageBounds};

/// Uniform scale-to-fit mapping between image-pixel space and screen space.
///
/// `scale` is `min(viewport_w / image_w, viewport_h / image_h)`, so the whole
/// image fits the viewport with its aspect ratio preserved; `origin` centers
/// the scaled image (letterbox/pillarbox). Recomputed every frame from the
/// current sizes, never stored across resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub origin: Pos2,
}

impl Viewport {
    pub fn fit(bounds: ImageBounds, viewport: Rect) -> Self {
        let scale =
            (viewport.width() / bounds.width).min(viewport.height() / bounds.height);
        let scaled = Vec2::new(bounds.width, bounds.height) * scale;
        let origin = viewport.min + (viewport.size() - scaled) * 0.5;
        Self { scale, origin }
    }

    /// Convert a screen-space pointer delta into image pixels.
    pub fn screen_delta_to_image(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    pub fn image_to_screen(&self, p: Pos2) -> Pos2 {
        self.origin + p.to_vec2() * self.scale
    }

    pub fn bbox_to_screen(&self, bbox: BBox) -> Rect {
        Rect::from_min_size(
            self.image_to_screen(Pos2::new(bbox.x, bbox.y)),
            Vec2::new(bbox.width, bbox.height) * self.scale,
        )
    }

    /// The on-screen rectangle covered by the whole image.
    pub fn image_rect(&self, bounds: ImageBounds) -> Rect {
        Rect::from_min_size(
            self.origin,
            Vec2::new(bounds.width, bounds.height) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_picks_the_smaller_ratio() {
        let viewport = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 300.0));
        let v = Viewport::fit(ImageBounds::new(400.0, 300.0), viewport);
        assert_eq!(v.scale, 1.0);
        // Pillarboxed: centered horizontally, flush vertically.
        assert_eq!(v.origin, Pos2::new(200.0, 0.0));
    }

    #[test]
    fn fit_downscales_large_images() {
        let viewport = Rect::from_min_size(Pos2::ZERO, Vec2::new(500.0, 500.0));
        let v = Viewport::fit(ImageBounds::new(1000.0, 2000.0), viewport);
        assert_eq!(v.scale, 0.25);
        assert_eq!(v.image_rect(ImageBounds::new(1000.0, 2000.0)).size(), Vec2::new(250.0, 500.0));
    }

    #[test]
    fn screen_delta_maps_back_to_image_pixels() {
        let viewport = Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 200.0));
        let v = Viewport::fit(ImageBounds::new(400.0, 400.0), viewport);
        assert_eq!(v.screen_delta_to_image(Vec2::new(10.0, -5.0)), Vec2::new(20.0, -10.0));
    }

    #[test]
    fn bbox_round_trips_through_screen_space() {
        let viewport = Rect::from_min_size(Pos2::new(50.0, 20.0), Vec2::new(200.0, 100.0));
        let bounds = ImageBounds::new(400.0, 200.0);
        let v = Viewport::fit(bounds, viewport);
        let rect = v.bbox_to_screen(BBox::new(100.0, 50.0, 40.0, 20.0));
        assert_eq!(rect.min, Pos2::new(100.0, 45.0));
        assert_eq!(rect.size(), Vec2::new(20.0, 10.0));
    }
}
