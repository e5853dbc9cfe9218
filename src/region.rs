use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BBox;

/// Stable identifier for a text region. Assigned by the store, never reused
/// within one image session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(u32);

impl RegionId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region-{}", self.0)
    }
}

/// A detected or user-added rectangular text area on the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    pub id: RegionId,
    pub bbox: BBox,
    /// Recognized text, empty for user-added regions.
    pub text: String,
    /// Detector confidence in `[0, 1]`; 1.0 for user-added regions.
    pub confidence: f32,
}
