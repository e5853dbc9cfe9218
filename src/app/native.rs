use std::{io, path::PathBuf};

use eframe::egui;
use futures::FutureExt;
use image::DynamicImage;
use log::info;

use crate::{Inpainter, TextDetector};

use super::{ImageLoader, RegionEditorApp};

pub fn run_native(
    detector: Box<dyn TextDetector>,
    inpainter: Box<dyn Inpainter>,
) -> eframe::Result {
    env_logger::init();

    let config = match std::fs::File::open("config.json") {
        Ok(f) => serde_json::from_reader(f).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => crate::config::Config::default(),
        Err(e) => Err(eframe::Error::AppCreation(Box::new(e)))?,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.viewport),
        ..Default::default()
    };

    let image_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.image.clone());
    let loader: ImageLoader = match image_path {
        Some(path) => {
            info!("Editing {}", path.display());
            Box::new(move || {
                let path = path.clone();
                async move { image::open(&path).map_err(io::Error::other) }.boxed()
            })
        }
        None => {
            info!("No image given, using the demo image");
            Box::new(|| std::future::ready(Ok(demo_image())).boxed())
        }
    };

    info!("Run with config: {config:?}");
    eframe::run_native(
        "Text Eraser",
        options,
        Box::new(|cc| {
            Ok(Box::new(RegionEditorApp::new(
                cc, loader, detector, inpainter,
            )))
        }),
    )
}

fn demo_image() -> DynamicImage {
    let tile = 32;
    DynamicImage::ImageRgba8(image::RgbaImage::from_fn(512, 384, |x, y| {
        if ((x / tile) + (y / tile)) % 2 == 0 {
            image::Rgba([220, 220, 220, 255])
        } else {
            image::Rgba([90, 90, 90, 255])
        }
    }))
}
