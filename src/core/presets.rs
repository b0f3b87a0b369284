// Copyright @yucwang 2026

use crate::core::emitter::Light;
use crate::core::error::ConfigError;
use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::shapes::sphere::Sphere;

pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Per-frame displacement used by [`drift`].
pub const DRIFT_STEP: Float = 0.001;

pub fn default_background() -> RGBSpectrum {
    RGBSpectrum::black()
}

/// Red, blue and green spheres resting on a huge yellow one, lit by an
/// ambient, a point and a directional light.
pub fn three_spheres_on_floor() -> Result<Scene, ConfigError> {
    let spheres = vec![
        Sphere::new(Vector3f::new(0.0, -1.0, 3.0), 1.0, RGBSpectrum::new(1.0, 0.0, 0.0))
            .with_specular(500)
            .with_reflective(0.2),
        Sphere::new(Vector3f::new(2.0, 0.0, 4.0), 1.0, RGBSpectrum::new(0.0, 0.0, 1.0))
            .with_specular(500)
            .with_reflective(0.3),
        Sphere::new(Vector3f::new(-2.0, 0.0, 4.0), 1.0, RGBSpectrum::new(0.0, 1.0, 0.0))
            .with_specular(10)
            .with_reflective(0.4),
        Sphere::new(Vector3f::new(0.0, -5001.0, 0.0), 5000.0, RGBSpectrum::new(1.0, 1.0, 0.0))
            .with_specular(1000)
            .with_reflective(0.5),
    ];
    let lights = vec![
        Light::ambient(0.2),
        Light::point(0.6, Vector3f::new(2.0, 1.0, 0.0)),
        Light::directional(0.4, Vector3f::new(1.0, 4.0, 4.0)),
    ];
    Scene::new(spheres, lights)
}

/// Next animation snapshot: the green sphere slides right and the red one
/// recedes.
pub fn drift(scene: &Scene) -> Result<Scene, ConfigError> {
    scene
        .with_sphere_translated(2, Vector3f::new(DRIFT_STEP, 0.0, 0.0))?
        .with_sphere_translated(0, Vector3f::new(0.0, 0.0, DRIFT_STEP))
}
