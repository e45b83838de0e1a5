/// Chart image loading — decodes a raster file into an RGBA buffer the
/// canvas can upload as a texture. The core engine only ever needs the
/// dimensions.

use std::path::Path;

use thiserror::Error;

use crate::digitize::controller::ImageSize;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("could not read selected image: {0}")]
    Decode(#[from] image::ImageError),
}

/// A decoded chart image ready for display.
pub struct ChartImage {
    pub size: ImageSize,
    pub color_image: egui::ColorImage,
}

impl ChartImage {
    /// Decode any raster format the `image` crate supports.
    pub fn load(path: &Path) -> Result<ChartImage, ImageLoadError> {
        let decoded = image::open(path)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            decoded.as_raw(),
        );
        log::info!("Loaded image {} ({}×{})", path.display(), width, height);
        Ok(ChartImage {
            size: ImageSize { width, height },
            color_image,
        })
    }
}
