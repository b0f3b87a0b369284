use mirrorball::core::presets;
use mirrorball::core::scene_loader::load_scene_with_settings;
use mirrorball::integrators::whitted::WhittedIntegrator;
use mirrorball::math::constants::{Vector3f, INFINITY, PRIMARY_T_MIN};
use mirrorball::math::ray::Ray3f;
use mirrorball::sensors::viewport::{Viewport, ViewportCamera};
use std::env;
use std::error::Error;

fn run(scene_path: &str, x: i32, y: i32, max_depth_override: Option<u32>) -> Result<(), Box<dyn Error>> {
    let (scene, camera, max_depth, background) = if scene_path == "-" {
        (presets::three_spheres_on_floor()?, None, None, None)
    } else {
        let loaded = load_scene_with_settings(scene_path)?;
        (loaded.scene, loaded.camera, loaded.max_depth, loaded.background)
    };
    let camera = match camera {
        Some(camera) => camera,
        None => ViewportCamera::new(Vector3f::zeros(), Viewport::default(), 500, 500)?,
    };
    if !camera.x_range().contains(&x) || !camera.y_range().contains(&y) {
        return Err(format!("pixel ({}, {}) out of bounds, x in {:?}, y in {:?}",
                           x, y, camera.x_range(), camera.y_range()).into());
    }

    let max_depth = max_depth_override.or(max_depth).unwrap_or(presets::DEFAULT_MAX_DEPTH);
    let integrator = WhittedIntegrator::new(max_depth, background.unwrap_or_else(presets::default_background));

    // Pixel comes from the command line, so the direction is checked.
    let ray = Ray3f::checked(camera.origin(), camera.canvas_to_viewport(x, y),
                             Some(PRIMARY_T_MIN), Some(INFINITY))?;
    match scene.ray_intersection(&ray) {
        Some(hit) => println!("primary hit: sphere #{} at t = {:.6}", hit.object_index(), hit.t()),
        None => println!("primary hit: none"),
    }

    let color = integrator.trace(&scene, &ray);
    let rgb8 = color.to_rgb8();
    let (bx, by) = camera.canvas_to_buffer(x, y);
    println!(
        "pixel ({}, {}) -> buffer ({}, {}) depth={} -> R {:.6}, G {:.6}, B {:.6} ({}, {}, {})",
        x, y, bx, by, max_depth, color[0], color[1], color[2], rgb8[0], rgb8[1], rgb8[2]
    );
    Ok(())
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let parsed = if args.len() >= 4 {
        args[2].parse::<i32>().ok().zip(args[3].parse::<i32>().ok())
    } else {
        None
    };
    let (x, y) = match parsed {
        Some(pixel) => pixel,
        None => {
            eprintln!("Usage: {} <scene.xml|-> <x> <y> [--max-depth N]",
                      args.first().map(String::as_str).unwrap_or("render_pixel"));
            eprintln!("  x and y are centred canvas coordinates, y grows upwards; '-' traces the built-in preset.");
            std::process::exit(1);
        }
    };

    let mut max_depth: Option<u32> = None;
    let mut i = 4;
    while i < args.len() {
        if args[i] == "--max-depth" {
            i += 1;
            max_depth = args.get(i).and_then(|v| v.parse::<u32>().ok());
        }
        i += 1;
    }

    if let Err(e) = run(&args[1], x, y, max_depth) {
        log::error!("{}", e);
        std::process::exit(2);
    }
}
