/* Copyright 2020 @TwoCookingMice */

use crate::io::OutputError;
use crate::math::bitmap::Bitmap;

use exr::prelude::write_rgb_file;

// Write linear float EXR, unclamped beyond what the tracer already did
pub fn write_exr_to_file(bitmap: &Bitmap, file_path: &str) -> Result<(), OutputError> {
    log::info!("Starting writing openexr images: {}.", file_path);

    let width = bitmap.width();
    let image = bitmap.raw_copy();
    write_rgb_file(file_path, width, bitmap.height(), |x, y| {
        (
            image[y*width+x].0,
            image[y*width+x].1,
            image[y*width+x].2
        )
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
