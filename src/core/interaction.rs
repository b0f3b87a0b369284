// Copyright @yucwang 2023

use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::shapes::sphere::Sphere;

/// Closest hit along a ray. Borrowed from the scene for one trace step.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceIntersection<'a> {
    sphere: &'a Sphere,
    index: usize,
    t: Float,
}

impl<'a> SurfaceIntersection<'a> {
    pub fn new(sphere: &'a Sphere, index: usize, t: Float) -> Self {
        Self { sphere, index, t }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn sphere(&self) -> &'a Sphere {
        self.sphere
    }

    /// Position of the sphere in the scene.
    pub fn object_index(&self) -> usize {
        self.index
    }

    pub fn p(&self, ray: &Ray3f) -> Vector3f {
        ray.at(self.t)
    }
}
