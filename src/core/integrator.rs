// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Turns one primary ray into a display-ready colour.
pub trait Integrator: Sync {
    fn trace_ray_forward(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng) -> RGBSpectrum;
    fn describe(&self) -> String {
        String::from("Integrator")
    }
}
