// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Ignores the scene and paints random colours. Handy for checking that a
/// host presents every pixel of the buffer.
pub struct NoiseIntegrator;

impl Integrator for NoiseIntegrator {
    fn trace_ray_forward(&self, _scene: &Scene, _ray: &Ray3f, rng: &mut LcgRng) -> RGBSpectrum {
        RGBSpectrum::new(rng.next_f32(), rng.next_f32(), rng.next_f32())
    }

    fn describe(&self) -> String {
        String::from("NoiseIntegrator")
    }
}
