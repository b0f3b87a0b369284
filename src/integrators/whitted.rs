// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::integrators::lighting::compute_lighting;
use crate::math::constants::{Float, Vector3f, INFINITY, REFLECTION_EPSILON};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Local Phong shading plus a counted chain of perfect mirror bounces.
pub struct WhittedIntegrator {
    pub max_depth: u32,
    pub background: RGBSpectrum,
}

/// Where the chain continues from after a shaded hit.
struct Bounce {
    p: Vector3f,
    n: Vector3f,
    d: Vector3f,
    reflective: Float,
}

impl WhittedIntegrator {
    pub fn new(max_depth: u32, background: RGBSpectrum) -> Self {
        Self { max_depth, background }
    }

    /// Final colour for `ray`, clamped to the display range.
    pub fn trace(&self, scene: &Scene, ray: &Ray3f) -> RGBSpectrum {
        let (mut color, mut bounce) = self.shade(scene, ray);

        for _ in 0..self.max_depth {
            let current = match bounce {
                Some(ref b) if b.reflective > 0.0 => b,
                _ => break,
            };
            let r = current.reflective;
            let reflected = Ray3f::new(current.p,
                                       reflect(&(-current.d), &current.n),
                                       Some(REFLECTION_EPSILON),
                                       Some(INFINITY));
            let (reflected_color, next) = self.shade(scene, &reflected);
            color = color.lerp(&reflected_color, r);
            bounce = next;
        }

        color.clamp_display()
    }

    /// One closest-hit plus local lighting step.
    fn shade(&self, scene: &Scene, ray: &Ray3f) -> (RGBSpectrum, Option<Bounce>) {
        let hit = match scene.ray_intersection(ray) {
            Some(hit) => hit,
            None => return (self.background, None),
        };

        let sphere = hit.sphere();
        let p = hit.p(ray);
        let n = sphere.normal_at(&p);
        let d = ray.dir();
        let intensity = compute_lighting(scene, &p, &n, &(-d), sphere.specular);

        (sphere.color * intensity, Some(Bounce { p, n, d, reflective: sphere.reflective }))
    }
}

impl Integrator for WhittedIntegrator {
    fn trace_ray_forward(&self, scene: &Scene, ray: &Ray3f, _rng: &mut LcgRng) -> RGBSpectrum {
        self.trace(scene, ray)
    }

    fn describe(&self) -> String {
        format!("WhittedIntegrator\n  max_depth: {}\n  background: {:?}", self.max_depth, self.background)
    }
}

/// Mirror `r` about `n`: `2n(n.r) - r`.
pub fn reflect(r: &Vector3f, n: &Vector3f) -> Vector3f {
    n * (2.0 * n.dot(r)) - r
}
