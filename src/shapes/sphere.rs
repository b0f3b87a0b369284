// Copyright @yucwang 2023

use crate::math::constants::{Float, Vector3f, INFINITY};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vector3f,
    pub radius: Float,
    pub color: RGBSpectrum,
    /// Phong exponent; `None` turns the specular term off.
    pub specular: Option<u32>,
    /// Share of the final colour taken from the mirror bounce, in `[0, 1]`.
    pub reflective: Float,
}

impl Sphere {
    /// Matte, non-reflective sphere.
    pub fn new(center: Vector3f, radius: Float, color: RGBSpectrum) -> Self {
        Self { center, radius, color, specular: None, reflective: 0.0 }
    }

    pub fn with_specular(mut self, specular: u32) -> Self {
        self.specular = Some(specular);
        self
    }

    pub fn with_reflective(mut self, reflective: Float) -> Self {
        self.reflective = reflective;
        self
    }

    /// Both roots of `|O + tD - C|^2 = r^2`, in no particular order.
    /// A miss reports `(INFINITY, INFINITY)`.
    pub fn ray_intersection(&self, ray: &Ray3f) -> (Float, Float) {
        let d = ray.dir();
        let co = ray.origin() - self.center;

        let a = d.dot(&d);
        let b = 2.0 * co.dot(&d);
        let c = co.dot(&co) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return (INFINITY, INFINITY);
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b + sqrt_disc) / (2.0 * a);
        let t2 = (-b - sqrt_disc) / (2.0 * a);
        (t1, t2)
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, p: &Vector3f) -> Vector3f {
        (p - self.center).normalize()
    }
}
