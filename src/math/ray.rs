// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f, INFINITY};
use crate::core::error::ConfigError;

/// A ray with an open parametric window `(min_t, max_t)`.
///
/// The direction is kept exactly as given. Point-light shadow rays rely on
/// this: with `dir = light - p`, `t = 1` lands on the light itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    /// Callers guarantee `d` is non-zero. Use [`Ray3f::checked`] for
    /// directions that come from outside the engine.
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        debug_assert!(d.norm_squared() > 0.0, "degenerate ray direction");
        Self { origin: o, dir: d,
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(INFINITY)}
    }

    pub fn checked(o: Vector3f, d: Vector3f,
                   min_t: Option<Float>, max_t: Option<Float>) -> Result<Self, ConfigError> {
        let finite = o.iter().chain(d.iter()).all(|v| v.is_finite());
        if !finite || d.norm_squared() <= 0.0 {
            return Err(ConfigError::DegenerateRay);
        }
        Ok(Self::new(o, d, min_t, max_t))
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    /// Strict containment in the open window.
    pub fn test_segment(&self, t: Float) -> bool {
        t > self.min_t && t < self.max_t
    }
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::Vector3f;
    use super::{Ray3f, INFINITY};
    use crate::core::error::ConfigError;
    use crate::math::constants::Float;

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(1.0, 0.0, 1.0);
        let ray = Ray3f::new(o, d, None, None);
        assert_eq!(o, ray.origin());
        assert_eq!(d, ray.dir());
        assert_eq!(ray.max_t, INFINITY);

        let v1 = ray.at(2.0);
        assert!((v1[0] - 2.0).abs() < 1e-6);
        assert!((v1[1] - 0.0).abs() < 1e-6);
        assert!((v1[2] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray3f_window_is_open() {
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), Some(1.0), Some(5.0));
        assert!(!ray.test_segment(1.0));
        assert!(ray.test_segment(1.5));
        assert!(!ray.test_segment(5.0));
        assert!(!ray.test_segment(INFINITY));
    }

    #[test]
    fn test_ray3f_checked_rejects_degenerate_direction() {
        let zero = Ray3f::checked(Vector3f::zeros(), Vector3f::zeros(), None, None);
        assert_eq!(zero, Err(ConfigError::DegenerateRay));

        let nan = Ray3f::checked(Vector3f::zeros(), Vector3f::new(Float::NAN, 0.0, 1.0), None, None);
        assert_eq!(nan, Err(ConfigError::DegenerateRay));

        assert!(Ray3f::checked(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 2.0), None, None).is_ok());
    }
}
