use std::io;

use futures::{future::BoxFuture, FutureExt};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::BBox;

/// One text span reported by a detection backend, before the store assigns
/// it a [`crate::RegionId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bbox: BBox,
    pub text: String,
    pub confidence: f32,
}

/// Backend producing initial text regions from an image.
pub trait TextDetector {
    fn detect(&self, image: &DynamicImage) -> BoxFuture<'static, io::Result<Vec<Detection>>>;
}

/// Detector answering with a fixed list, for demos and tests.
pub struct FixedDetector {
    detections: Vec<Detection>,
}

impl FixedDetector {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    /// A few plausible regions matching the demo chessboard image.
    pub fn demo() -> Self {
        Self::new(vec![
            Detection {
                bbox: BBox::new(32.0, 24.0, 140.0, 28.0),
                text: "SAMPLE".into(),
                confidence: 0.97,
            },
            Detection {
                bbox: BBox::new(48.0, 120.0, 96.0, 22.0),
                text: "text".into(),
                confidence: 0.74,
            },
            Detection {
                bbox: BBox::new(160.0, 200.0, 64.0, 20.0),
                text: String::new(),
                confidence: 0.41,
            },
        ])
    }
}

impl TextDetector for FixedDetector {
    fn detect(&self, _image: &DynamicImage) -> BoxFuture<'static, io::Result<Vec<Detection>>> {
        std::future::ready(Ok(self.detections.clone())).boxed()
    }
}
