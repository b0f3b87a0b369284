// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f, INFINITY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { intensity: Float },
    Point { intensity: Float, position: Vector3f },
    /// `direction` points from the surface towards the light.
    Directional { intensity: Float, direction: Vector3f },
}

impl Light {
    pub fn ambient(intensity: Float) -> Self {
        Light::Ambient { intensity }
    }

    pub fn point(intensity: Float, position: Vector3f) -> Self {
        Light::Point { intensity, position }
    }

    pub fn directional(intensity: Float, direction: Vector3f) -> Self {
        Light::Directional { intensity, direction }
    }

    pub fn intensity(&self) -> Float {
        match self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. } => *intensity,
        }
    }

    /// Unnormalized vector from `p` towards the light and the far end of
    /// the matching shadow window. `None` for ambient light.
    pub fn incident(&self, p: &Vector3f) -> Option<(Vector3f, Float)> {
        match self {
            Light::Ambient { .. } => None,
            Light::Point { position, .. } => Some((position - p, 1.0)),
            Light::Directional { direction, .. } => Some((*direction, INFINITY)),
        }
    }
}
