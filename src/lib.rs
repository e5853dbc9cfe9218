mod app;
mod async_task;
mod config;
mod detect;
mod geometry;
mod gesture;
mod image_state;
mod inpaint;
mod region;
mod store;
mod viewport;

pub use app::run_native;
pub use async_task::AsyncTask;
pub use detect::{Detection, FixedDetector, TextDetector};
pub use geometry::{apply_drag, BBox, DragHandle, ImageBounds, MIN_REGION_SIZE};
pub use gesture::DragGesture;
pub use image_state::{ImageState, LoadedImage, TextureExceedsLimit};
pub use inpaint::{FillInpainter, Inpainter};
pub use region::{RegionId, TextRegion};
pub use store::{RegionStore, StoreEvent, Topic};
pub use viewport::Viewport;
