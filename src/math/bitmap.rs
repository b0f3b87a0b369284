// Copyright 2020 @TwoCookingMice

use super::constants::Float;
use super::spectrum::RGBSpectrum;

use std::ops;
use std::vec::Vec;

/// Row-major pixel buffer, `(0, 0)` is the top-left corner.
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<RGBSpectrum>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = RGBSpectrum;

    fn index(&self, index: (usize, usize)) -> &RGBSpectrum {
        assert!(index.0 < self.width && index.1 < self.height,
                "pixel ({}, {}) outside {}x{} bitmap", index.0, index.1, self.width, self.height);
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut RGBSpectrum {
        assert!(index.0 < self.width && index.1 < self.height,
                "pixel ({}, {}) outside {}x{} bitmap", index.0, index.1, self.width, self.height);
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(RGBSpectrum::default(); pixel_number),
               width: width,
               height: height }
    }

    pub fn from_pixels(width: usize, height: usize, data: Vec<RGBSpectrum>) -> Self {
        assert_eq!(data.len(), width * height);
        Self { data, width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[RGBSpectrum] {
        &self.data
    }

    pub fn raw_copy(&self) -> Vec<(Float, Float, Float)> {
        self.data.iter().map(|c| (c[0], c[1], c[2])).collect()
    }

    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|c| c.to_rgb8()).collect()
    }
}

/* Test for Bitmap */
#[cfg(test)]
mod tests {
    use super::Bitmap;
    use super::RGBSpectrum;

    #[test]
    fn test_bitmap_basic_functions() {
        let mut bitmap = Bitmap::new(256usize, 128usize);
        assert_eq!(bitmap.width(), 256);
        assert_eq!(bitmap.height(), 128);

        bitmap[(5, 6)] = RGBSpectrum::new(1.0, 0.5, 0.6);
        assert_eq!(bitmap[(5, 6)], RGBSpectrum::new(1.0, 0.5, 0.6));
        assert!(bitmap[(2, 6)].is_black());
        assert_eq!(bitmap.pixels()[5 + 256 * 6], RGBSpectrum::new(1.0, 0.5, 0.6));
    }

    #[test]
    fn test_bitmap_to_rgb8() {
        let mut bitmap = Bitmap::new(2, 1);
        bitmap[(1, 0)] = RGBSpectrum::new(1.0, 2.0, -1.0);
        assert_eq!(bitmap.to_rgb8(), vec![0, 0, 0, 255, 255, 0]);
    }

    #[test]
    #[should_panic]
    fn test_bitmap_out_of_bounds() {
        let bitmap = Bitmap::new(4, 4);
        let _ = bitmap[(4, 0)];
    }
}
