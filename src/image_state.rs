use std::io;

use egui::{self, ColorImage, TextureHandle, TextureOptions, load::SizedTexture};
use futures::future::BoxFuture;
use image::DynamicImage;

use crate::{AsyncTask, ImageBounds};

#[allow(clippy::large_enum_variant)]
pub enum ImageState {
    NotLoaded,
    Loading(AsyncTask<io::Result<DynamicImage>>),
    Loaded(LoadedImage),
    Error(String),
}

impl ImageState {
    pub fn update(
        &mut self,
        ctx: &egui::Context,
        image_loader: &dyn Fn() -> BoxFuture<'static, io::Result<DynamicImage>>,
    ) {
        match self {
            ImageState::NotLoaded => *self = ImageState::Loading(AsyncTask::new(image_loader())),
            ImageState::Loading(task) => {
                if let Some(result) = task.data() {
                    *self = match result
                        .map_err(|e| format!("IO error: {e}"))
                        .and_then(|i| LoadedImage::new(i, ctx).map_err(|e| e.to_string()))
                    {
                        Ok(loaded) => ImageState::Loaded(loaded),
                        Err(e) => ImageState::Error(e),
                    }
                }
            }
            ImageState::Loaded(_) | ImageState::Error(_) => {}
        }
    }

    pub fn loaded(&mut self) -> Option<&mut LoadedImage> {
        match self {
            ImageState::Loaded(x) => Some(x),
            _ => None,
        }
    }
}

pub struct LoadedImage {
    pub image: DynamicImage,
    pub bounds: ImageBounds,
    #[allow(
        dead_code,
        reason = "Keeps the texture alive; egui drops it when the handle is dropped"
    )]
    handle: TextureHandle,
    texture: SizedTexture,
}

impl LoadedImage {
    pub fn new(image: DynamicImage, ctx: &egui::Context) -> Result<Self, TextureExceedsLimit> {
        let (width, height) = (image.width(), image.height());
        let max_texture_side = ctx.input(|i| i.max_texture_side);
        if width as usize > max_texture_side || height as usize > max_texture_side {
            return Err(TextureExceedsLimit {
                width,
                height,
                max_texture_side,
            });
        }

        let rgba = image.to_rgba8();
        let handle = ctx.load_texture(
            "edited-image",
            ColorImage::from_rgba_unmultiplied([width as usize, height as usize], rgba.as_raw()),
            TextureOptions {
                magnification: egui::TextureFilter::Nearest,
                ..Default::default()
            },
        );
        let texture = SizedTexture::from_handle(&handle);

        Ok(Self {
            bounds: ImageBounds::new(width as f32, height as f32),
            image,
            handle,
            texture,
        })
    }

    /// Swap in an edited image, e.g. the inpainting result.
    pub fn replace(&mut self, image: DynamicImage, ctx: &egui::Context) -> Result<(), TextureExceedsLimit> {
        *self = Self::new(image, ctx)?;
        Ok(())
    }

    pub fn texture(&self) -> SizedTexture {
        self.texture
    }
}


#[derive(Debug, thiserror::Error)]
#[error(
    "Image too large: {}x{}, max texture side is {}",
    width,
    height,
    max_texture_side
)]
pub struct TextureExceedsLimit {
    width: u32,
    height: u32,
    max_texture_side: usize,
}
