// Copyright @yucwang 2026

use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector3f, SHADOW_EPSILON};
use crate::math::ray::Ray3f;

/// Scalar light intensity arriving at `p`, Phong style with hard shadows.
///
/// `n` is the outward unit normal, `v` points back along the incoming ray
/// and `specular` is the surface's Phong exponent. The result is not
/// clamped.
pub fn compute_lighting(scene: &Scene,
                        p: &Vector3f,
                        n: &Vector3f,
                        v: &Vector3f,
                        specular: Option<u32>) -> Float {
    let mut i: Float = 0.0;

    for light in scene.lights() {
        let (l, t_max) = match light.incident(p) {
            Some(incident) => incident,
            None => {
                i += light.intensity();
                continue;
            }
        };
        // A point light sitting on the surface gives no usable direction.
        if l.norm_squared() <= 0.0 {
            continue;
        }

        // l stays unnormalized so t = 1 is the point light itself.
        let shadow_ray = Ray3f::new(*p, l, Some(SHADOW_EPSILON), Some(t_max));
        if scene.ray_intersection_t(&shadow_ray) {
            continue;
        }

        let n_dot_l = n.dot(&l);
        if n_dot_l > 0.0 {
            i += light.intensity() * n_dot_l / (n.norm() * l.norm());
        }

        if let Some(s) = specular {
            let r = n * (2.0 * n_dot_l) - l;
            let r_dot_v = r.dot(v);
            if r_dot_v > 0.0 {
                i += light.intensity() * (r_dot_v / (r.norm() * v.norm())).powf(s as Float);
            }
        }
    }

    i
}
