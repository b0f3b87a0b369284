// Copyright @yucwang 2026

use crate::core::error::ConfigError;
use crate::math::constants::{Float, Vector3f, INFINITY, PRIMARY_T_MIN};
use crate::math::ray::Ray3f;

use std::ops::Range;

/// Rectangle in camera space, `distance` in front of the pinhole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: Float,
    pub height: Float,
    pub distance: Float,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1.0, height: 1.0, distance: 1.0 }
    }
}

/// Pinhole camera looking down +z through a [`Viewport`], one primary ray
/// per canvas pixel.
///
/// Canvas coordinates are centred: `x` runs over `[-(w/2), w - w/2)` and
/// `y` likewise, with `y` growing upwards. Buffer coordinates start at the
/// top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    origin: Vector3f,
    viewport: Viewport,
    canvas_width: usize,
    canvas_height: usize,
}

impl ViewportCamera {
    pub fn new(origin: Vector3f,
               viewport: Viewport,
               canvas_width: usize,
               canvas_height: usize) -> Result<Self, ConfigError> {
        if canvas_width == 0 || canvas_height == 0 {
            return Err(ConfigError::ZeroCanvas { width: canvas_width, height: canvas_height });
        }
        if canvas_width > i32::MAX as usize || canvas_height > i32::MAX as usize {
            return Err(ConfigError::InvalidViewport("canvas exceeds addressable size"));
        }
        if !origin.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::InvalidViewport("camera origin must be finite"));
        }
        let positive = |v: Float| v.is_finite() && v > 0.0;
        if !positive(viewport.width) || !positive(viewport.height) {
            return Err(ConfigError::InvalidViewport("viewport width and height must be positive"));
        }
        if !positive(viewport.distance) {
            return Err(ConfigError::InvalidViewport("projection distance must be positive"));
        }

        Ok(Self { origin, viewport, canvas_width, canvas_height })
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn width(&self) -> usize {
        self.canvas_width
    }

    pub fn height(&self) -> usize {
        self.canvas_height
    }

    pub fn x_range(&self) -> Range<i32> {
        let half = self.half_width();
        -half..(self.canvas_width as i32 - half)
    }

    pub fn y_range(&self) -> Range<i32> {
        let half = self.half_height();
        -half..(self.canvas_height as i32 - half)
    }

    /// Camera-space direction through canvas pixel `(x, y)`.
    pub fn canvas_to_viewport(&self, x: i32, y: i32) -> Vector3f {
        Vector3f::new(x as Float * self.viewport.width / self.canvas_width as Float,
                      y as Float * self.viewport.height / self.canvas_height as Float,
                      self.viewport.distance)
    }

    /// Primary ray through canvas pixel `(x, y)`. Only hits past the
    /// viewport plane count.
    pub fn sample_ray(&self, x: i32, y: i32) -> Ray3f {
        Ray3f::new(self.origin, self.canvas_to_viewport(x, y), Some(PRIMARY_T_MIN), Some(INFINITY))
    }

    /// Buffer cell of canvas pixel `(x, y)`, flipping `y` so row 0 is the top.
    pub fn canvas_to_buffer(&self, x: i32, y: i32) -> (usize, usize) {
        debug_assert!(self.x_range().contains(&x) && self.y_range().contains(&y));
        ((x + self.half_width()) as usize, (self.top() - y) as usize)
    }

    pub fn buffer_to_canvas(&self, bx: usize, by: usize) -> (i32, i32) {
        (bx as i32 - self.half_width(), self.top() - by as i32)
    }

    fn half_width(&self) -> i32 {
        (self.canvas_width / 2) as i32
    }

    fn half_height(&self) -> i32 {
        (self.canvas_height / 2) as i32
    }

    fn top(&self) -> i32 {
        self.y_range().end - 1
    }
}
