use std::io;

use futures::{future::BoxFuture, FutureExt};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::{BBox, TextRegion};

/// Backend that erases the given regions from the image.
pub trait Inpainter {
    fn remove_regions(
        &self,
        image: &DynamicImage,
        regions: &[TextRegion],
    ) -> BoxFuture<'static, io::Result<DynamicImage>>;
}

/// Stand-in inpainter: fills each region with the mean color sampled on a
/// one-pixel ring just outside it. Good enough to see the editor flow end to
/// end without a real model.
pub struct FillInpainter;

impl Inpainter for FillInpainter {
    fn remove_regions(
        &self,
        image: &DynamicImage,
        regions: &[TextRegion],
    ) -> BoxFuture<'static, io::Result<DynamicImage>> {
        let mut out = image.to_rgba8();
        for region in regions {
            fill_region(&mut out, region.bbox);
        }
        std::future::ready(Ok(DynamicImage::ImageRgba8(out))).boxed()
    }
}

fn fill_region(img: &mut RgbaImage, bbox: BBox) {
    let (width, height) = img.dimensions();
    let x0 = (bbox.x.floor().max(0.0) as u32).min(width);
    let y0 = (bbox.y.floor().max(0.0) as u32).min(height);
    let x1 = (bbox.right().ceil().max(0.0) as u32).min(width);
    let y1 = (bbox.bottom().ceil().max(0.0) as u32).min(height);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    let mut sample = |x: u32, y: u32, img: &RgbaImage| {
        let Rgba([r, g, b, _]) = *img.get_pixel(x, y);
        sum[0] += r as u64;
        sum[1] += g as u64;
        sum[2] += b as u64;
        count += 1;
    };
    for x in x0.saturating_sub(1)..(x1 + 1).min(width) {
        if y0 > 0 {
            sample(x, y0 - 1, img);
        }
        if y1 < height {
            sample(x, y1, img);
        }
    }
    for y in y0..y1 {
        if x0 > 0 {
            sample(x0 - 1, y, img);
        }
        if x1 < width {
            sample(x1, y, img);
        }
    }

    let fill = if count == 0 {
        Rgba([255, 255, 255, 255])
    } else {
        Rgba([
            (sum[0] / count) as u8,
            (sum[1] / count) as u8,
            (sum[2] / count) as u8,
            255,
        ])
    };
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_interior_from_surrounding_color() {
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([40, 80, 120, 255]));
        // Make the interior stand out before filling.
        for y in 4..8 {
            for x in 4..12 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        fill_region(&mut img, BBox::new(4.0, 4.0, 8.0, 4.0));
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(*img.get_pixel(x, y), Rgba([40, 80, 120, 255]), "at {x},{y}");
            }
        }
    }

    #[test]
    fn out_of_bounds_region_is_ignored() {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255]));
        let before = img.clone();
        fill_region(&mut img, BBox::new(50.0, 50.0, 20.0, 20.0));
        assert_eq!(img, before);
    }
}
