// Copyright @yucwang 2021

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::integrators::whitted::WhittedIntegrator;
use crate::math::bitmap::Bitmap;
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::viewport::ViewportCamera;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

pub use super::renderer::Renderer;

const BLOCK_SIZE: usize = 64;

/// Tiled multi-threaded frame renderer. Every pixel is independent, so
/// tiles are handed out to workers in any order and stitched afterwards.
pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    camera: ViewportCamera,
    seed: u64,
    show_progress: bool,
    thread_count: Option<usize>,
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene) -> Bitmap {
        let width = self.camera.width();
        let height = self.camera.height();

        let blocks_x = (width + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let blocks_y = (height + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let total_blocks = blocks_x * blocks_y;
        let integrator_ref: &dyn Integrator = self.integrator.as_ref();
        let camera_ref = &self.camera;
        let seed = self.seed;

        let thread_count = self.thread_count.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }).clamp(1, total_blocks.max(1));

        log::info!("Rendering {}x{} with {} ({} blocks, {} threads).",
                   width, height, integrator_ref.describe().lines().next().unwrap_or("integrator"),
                   total_blocks, thread_count);
        let start = Instant::now();

        let progress = if self.show_progress {
            let bar = ProgressBar::new(total_blocks as u64);
            bar.set_style(
                ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let next_block = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<(usize, usize, usize, usize, Vec<RGBSpectrum>)>();
        let mut output = vec![RGBSpectrum::default(); width * height];

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_block = Arc::clone(&next_block);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let bx = block_index % blocks_x;
                        let by = block_index / blocks_x;
                        let x0 = bx * BLOCK_SIZE;
                        let y0 = by * BLOCK_SIZE;
                        let x1 = (x0 + BLOCK_SIZE).min(width);
                        let y1 = (y0 + BLOCK_SIZE).min(height);

                        let mut block = vec![RGBSpectrum::default(); (x1 - x0) * (y1 - y0)];
                        for y in y0..y1 {
                            for x in x0..x1 {
                                let (cx, cy) = camera_ref.buffer_to_canvas(x, y);
                                let ray = camera_ref.sample_ray(cx, cy);
                                let mut rng = LcgRng::for_pixel(seed, x, y);
                                let color = integrator_ref.trace_ray_forward(scene, &ray, &mut rng);
                                block[(x - x0) + (x1 - x0) * (y - y0)] = color;
                            }
                        }
                        if tx.send((x0, y0, x1, y1, block)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in 0..total_blocks {
                if let Ok((x0, y0, x1, y1, block)) = rx.recv() {
                    for y in y0..y1 {
                        for x in x0..x1 {
                            output[x + width * y] = block[(x - x0) + (x1 - x0) * (y - y0)];
                        }
                    }
                    progress.inc(1);
                }
            }
        });
        progress.finish_and_clear();

        log::info!("Frame finished in {:.3}s.", start.elapsed().as_secs_f64());
        Bitmap::from_pixels(width, height, output)
    }
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, camera: ViewportCamera, seed: u64) -> Self {
        Self {
            integrator,
            camera,
            seed,
            show_progress: true,
            thread_count: None,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_threads(mut self, thread_count: usize) -> Self {
        self.thread_count = Some(thread_count);
        self
    }
}

/// Render one frame of `scene` with Whitted-style mirror tracing.
pub fn render(scene: &Scene,
              camera: &ViewportCamera,
              background: RGBSpectrum,
              max_reflection_depth: u32) -> Bitmap {
    let integrator = Box::new(WhittedIntegrator::new(max_reflection_depth, background));
    SimpleRenderer::new(integrator, camera.clone(), 0)
        .with_progress(false)
        .render(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emitter::Light;
    use crate::integrators::noise::NoiseIntegrator;
    use crate::math::constants::Vector3f;
    use crate::sensors::viewport::Viewport;
    use crate::shapes::sphere::Sphere;

    fn red_sphere_scene() -> Scene {
        let sphere = Sphere::new(Vector3f::new(0.0, -1.0, 3.0), 1.0, RGBSpectrum::new(1.0, 0.0, 0.0));
        let lights = vec![Light::ambient(0.2), Light::point(0.6, Vector3f::new(2.0, 1.0, 0.0))];
        Scene::new(vec![sphere], lights).unwrap()
    }

    #[test]
    fn test_render_matches_single_ray_trace() {
        let scene = red_sphere_scene();
        let camera = ViewportCamera::new(Vector3f::zeros(), Viewport::default(), 70, 50).unwrap();
        let background = RGBSpectrum::new(0.0, 0.0, 0.25);
        let image = render(&scene, &camera, background, 3);

        assert_eq!(image.width(), 70);
        assert_eq!(image.height(), 50);

        let integrator = WhittedIntegrator::new(3, background);
        for (x, y) in [(0, 0), (-35, 24), (34, -25), (5, -10), (-3, -20)] {
            let (bx, by) = camera.canvas_to_buffer(x, y);
            let expected = integrator.trace(&scene, &camera.sample_ray(x, y));
            assert_eq!(image[(bx, by)], expected);
        }

        // Top row looks over the sphere, the bottom centre looks into it.
        assert_eq!(image[(35, 0)], background);
        assert!(image[(35, 49)][0] > 0.0);
    }

    #[test]
    fn test_render_empty_scene_is_background() {
        let camera = ViewportCamera::new(Vector3f::zeros(), Viewport::default(), 17, 9).unwrap();
        let background = RGBSpectrum::new(0.1, 0.2, 0.3);
        let image = render(&Scene::empty(), &camera, background, 2);
        assert!(image.pixels().iter().all(|c| *c == background));
    }

    #[test]
    fn test_render_is_independent_of_thread_count() {
        let scene = red_sphere_scene();
        let camera = ViewportCamera::new(Vector3f::zeros(), Viewport::default(), 130, 70).unwrap();
        let single = SimpleRenderer::new(Box::new(WhittedIntegrator::new(3, RGBSpectrum::black())), camera.clone(), 0)
            .with_progress(false)
            .with_threads(1)
            .render(&scene);
        let many = SimpleRenderer::new(Box::new(WhittedIntegrator::new(3, RGBSpectrum::black())), camera, 0)
            .with_progress(false)
            .with_threads(4)
            .render(&scene);
        assert_eq!(single.pixels(), many.pixels());
    }

    #[test]
    fn test_render_noise_is_seeded() {
        let camera = ViewportCamera::new(Vector3f::zeros(), Viewport::default(), 8, 8).unwrap();
        let a = SimpleRenderer::new(Box::new(NoiseIntegrator), camera.clone(), 11).with_progress(false).render(&Scene::empty());
        let b = SimpleRenderer::new(Box::new(NoiseIntegrator), camera.clone(), 11).with_progress(false).render(&Scene::empty());
        let c = SimpleRenderer::new(Box::new(NoiseIntegrator), camera, 12).with_progress(false).render(&Scene::empty());
        assert_eq!(a.pixels(), b.pixels());
        assert_ne!(a.pixels(), c.pixels());
    }
}
