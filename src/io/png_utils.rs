// Copyright @yucwang 2026

use crate::io::OutputError;
use crate::math::bitmap::Bitmap;

use image::RgbImage;

// Write 8-bit PNG, channels quantized from the display range
pub fn write_png_to_file(bitmap: &Bitmap, file_path: &str) -> Result<(), OutputError> {
    log::info!("Starting writing png image: {}.", file_path);

    let image = RgbImage::from_raw(bitmap.width() as u32, bitmap.height() as u32, bitmap.to_rgb8())
        .ok_or(OutputError::BufferSize)?;
    image.save(file_path)?;

    log::info!("PNG written to: {}.", file_path);
    Ok(())
}
