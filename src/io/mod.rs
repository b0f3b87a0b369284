// Copyright @yucwang 2021

pub mod exr_utils;
pub mod png_utils;

use crate::math::bitmap::Bitmap;

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum OutputError {
    Exr(exr::error::Error),
    Image(image::ImageError),
    BufferSize,
    UnsupportedFormat(String),
}

impl From<exr::error::Error> for OutputError {
    fn from(err: exr::error::Error) -> Self {
        OutputError::Exr(err)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(err: image::ImageError) -> Self {
        OutputError::Image(err)
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Exr(err) => write!(f, "exr error: {}", err),
            OutputError::Image(err) => write!(f, "image error: {}", err),
            OutputError::BufferSize => write!(f, "pixel buffer does not match image size"),
            OutputError::UnsupportedFormat(path) => {
                write!(f, "unsupported output format: {} (expected .png or .exr)", path)
            }
        }
    }
}

impl std::error::Error for OutputError {}

/// Write a frame, picking the encoder from the file extension.
pub fn write_image(bitmap: &Bitmap, file_path: &str) -> Result<(), OutputError> {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => png_utils::write_png_to_file(bitmap, file_path),
        Some("exr") => exr_utils::write_exr_to_file(bitmap, file_path),
        _ => Err(OutputError::UnsupportedFormat(file_path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::spectrum::RGBSpectrum;

    fn gradient(width: usize, height: usize) -> Bitmap {
        let mut bitmap = Bitmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap[(x, y)] = RGBSpectrum::new(x as f32 / width as f32, y as f32 / height as f32, 0.5);
            }
        }
        bitmap
    }

    fn temp_path(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("mirrorball-io-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name).to_string_lossy().to_string()
    }

    #[test]
    fn test_write_png_round_trip() {
        let bitmap = gradient(8, 4);
        let path = temp_path("gradient.png");
        write_image(&bitmap, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (8, 4));
        assert_eq!(decoded.get_pixel(4, 2).0, bitmap[(4, 2)].to_rgb8());
    }

    #[test]
    fn test_write_exr_creates_file() {
        let path = temp_path("gradient.exr");
        write_image(&gradient(5, 3), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_write_image_rejects_unknown_extension() {
        let err = write_image(&gradient(2, 2), "frame.bmp2").unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(_)));
    }
}
