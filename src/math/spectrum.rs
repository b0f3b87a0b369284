// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f, DISPLAY_MAX, DISPLAY_MIN};

use std::ops;

/// Linear RGB colour. Channels are normalized, `1.0` is full intensity;
/// nothing clamps them until a trace finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBSpectrum {
    rgb: Vector3f
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self { rgb: Vector3f::new(0.0f32, 0.0f32, 0.0f32) }
    }
}

impl RGBSpectrum {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(r, g, b) }
    }

    pub fn from_vector(rgb: Vector3f) -> Self {
        Self { rgb }
    }

    pub fn black() -> Self {
        Self::default()
    }

    pub fn to_vector(&self) -> Vector3f {
        self.rgb
    }

    pub fn is_black(&self) -> bool {
        self.rgb.iter().all(|c| *c == 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.rgb.iter().all(|c| c.is_finite())
    }

    pub fn clamp(&self, min: Float, max: Float) -> Self {
        Self { rgb: self.rgb.map(|c| c.max(min).min(max)) }
    }

    pub fn clamp_display(&self) -> Self {
        self.clamp(DISPLAY_MIN, DISPLAY_MAX)
    }

    /// Quantize to bytes, `DISPLAY_MAX` maps to 255.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp_display();
        let scale = 255.0 / (DISPLAY_MAX - DISPLAY_MIN);
        let quantize = |v: Float| ((v - DISPLAY_MIN) * scale).round() as u8;
        [quantize(c.rgb.x), quantize(c.rgb.y), quantize(c.rgb.z)]
    }

    /// `self * (1 - t) + other * t`
    pub fn lerp(&self, other: &Self, t: Float) -> Self {
        Self { rgb: self.rgb * (1.0 - t) + other.rgb * t }
    }
}

impl ops::Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, index: usize) -> &Float {
        &self.rgb[index]
    }
}

impl ops::Add for RGBSpectrum {
    type Output = RGBSpectrum;

    fn add(self, rhs: RGBSpectrum) -> RGBSpectrum {
        RGBSpectrum { rgb: self.rgb + rhs.rgb }
    }
}

impl ops::Mul<Float> for RGBSpectrum {
    type Output = RGBSpectrum;

    fn mul(self, rhs: Float) -> RGBSpectrum {
        RGBSpectrum { rgb: self.rgb * rhs }
    }
}
