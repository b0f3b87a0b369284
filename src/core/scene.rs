// Copyright @yucwang 2026

use crate::core::emitter::Light;
use crate::core::error::ConfigError;
use crate::core::interaction::SurfaceIntersection;
use crate::math::constants::{Float, Vector3f, INFINITY};
use crate::math::ray::Ray3f;
use crate::shapes::sphere::Sphere;

/// Immutable snapshot of everything a frame can see. Animation produces a
/// new snapshot instead of editing this one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, lights: Vec<Light>) -> Result<Self, ConfigError> {
        for (index, sphere) in spheres.iter().enumerate() {
            validate_sphere(index, sphere)?;
        }
        for (index, light) in lights.iter().enumerate() {
            validate_light(index, light)?;
        }
        Ok(Self { spheres, lights })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Next snapshot with one sphere moved by `offset`.
    pub fn with_sphere_translated(&self, index: usize, offset: Vector3f) -> Result<Self, ConfigError> {
        let mut spheres = self.spheres.clone();
        let sphere = spheres.get_mut(index).ok_or(ConfigError::SphereIndexOutOfRange(index))?;
        sphere.center += offset;
        validate_sphere(index, sphere)?;
        Ok(Self { spheres, lights: self.lights.clone() })
    }

    /// Nearest hit strictly inside the ray's window. Equal `t` values keep
    /// the sphere that comes first in the scene.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        let mut closest_t = INFINITY;
        let mut closest = None;

        for (index, sphere) in self.spheres.iter().enumerate() {
            let (t1, t2) = sphere.ray_intersection(ray);
            for t in [t1, t2] {
                if ray.test_segment(t) && t < closest_t {
                    closest_t = t;
                    closest = Some((index, sphere));
                }
            }
        }

        closest.map(|(index, sphere)| SurfaceIntersection::new(sphere, index, closest_t))
    }

    /// Whether anything lies inside the ray's window.
    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.spheres.iter().any(|sphere| {
            let (t1, t2) = sphere.ray_intersection(ray);
            (ray.test_segment(t1) && t1 < INFINITY) || (ray.test_segment(t2) && t2 < INFINITY)
        })
    }
}

fn is_finite_vec(v: &Vector3f) -> bool {
    v.iter().all(|c| c.is_finite())
}

fn validate_sphere(index: usize, sphere: &Sphere) -> Result<(), ConfigError> {
    let invalid = |reason| Err(ConfigError::InvalidSphere { index, reason });
    if !is_finite_vec(&sphere.center) {
        return invalid("center must be finite");
    }
    if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
        return invalid("radius must be positive and finite");
    }
    if !sphere.color.is_finite() {
        return invalid("color must be finite");
    }
    if !(0.0..=1.0).contains(&sphere.reflective) {
        return invalid("reflective must lie in [0, 1]");
    }
    Ok(())
}

fn validate_light(index: usize, light: &Light) -> Result<(), ConfigError> {
    let invalid = |reason| Err(ConfigError::InvalidLight { index, reason });
    let intensity: Float = light.intensity();
    if !(intensity.is_finite() && intensity >= 0.0) {
        return invalid("intensity must be non-negative and finite");
    }
    match light {
        Light::Ambient { .. } => {}
        Light::Point { position, .. } => {
            if !is_finite_vec(position) {
                return invalid("position must be finite");
            }
        }
        Light::Directional { direction, .. } => {
            if !is_finite_vec(direction) || direction.norm_squared() <= 0.0 {
                return invalid("direction must be finite and non-zero");
            }
        }
    }
    Ok(())
}
