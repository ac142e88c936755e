use std::path::Path;

use image::ImageEncoder as _;

use crate::foundation::error::{HydroError, HydroResult};
use crate::render::frame::FrameRgba;

/// Encode a raster as PNG bytes.
pub fn encode_png(frame: &FrameRgba) -> HydroResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            &frame.data,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| HydroError::encode(format!("png encode: {e}")))?;
    Ok(buf)
}

/// Write a raster to a PNG file, creating parent directories as needed.
pub fn write_png(frame: &FrameRgba, path: impl AsRef<Path>) -> HydroResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| HydroError::encode(format!("create dir '{}': {e}", parent.display())))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| HydroError::encode(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
