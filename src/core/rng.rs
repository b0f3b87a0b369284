// Copyright @yucwang 2026

use crate::math::constants::Float;

/// 64-bit LCG, enough for the display self-test fill.
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed derived from a frame seed and a buffer position, so tiles can be
    /// rendered in any order.
    pub fn for_pixel(seed: u64, x: usize, y: usize) -> Self {
        Self::new(((seed & 0xFFF) << 32) | (((y as u64) & 0xFFFF) << 16) | ((x as u64) & 0xFFFF))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    pub fn next_f32(&mut self) -> Float {
        (self.next_u32() as Float) / (u32::MAX as Float)
    }
}
