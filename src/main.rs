// Copyright 2020 TwoCookingMice

use mirrorball::core::integrator::Integrator;
use mirrorball::core::presets;
use mirrorball::core::scene_loader::load_scene_with_settings;
use mirrorball::integrators::noise::NoiseIntegrator;
use mirrorball::integrators::whitted::WhittedIntegrator;
use mirrorball::io;
use mirrorball::math::constants::Vector3f;
use mirrorball::renderers::simple::{Renderer, SimpleRenderer};
use mirrorball::sensors::viewport::{Viewport, ViewportCamera};

use std::env;
use std::error::Error;
use std::path::Path;

const DEFAULT_CANVAS: usize = 500;

struct Options {
    scene_path: Option<String>,
    output_path: String,
    max_depth: Option<u32>,
    width: Option<usize>,
    height: Option<usize>,
    frames: u32,
    seed: u64,
    noise: bool,
}

fn usage(program: &str) -> String {
    format!("Usage: {} [scene.xml] <output.png|output.exr> [--max-depth N] [--width N] [--height N] [--frames N] [--seed N] [--noise]",
            program)
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut positional: Vec<String> = Vec::new();
    let mut max_depth: Option<u32> = None;
    let mut width: Option<usize> = None;
    let mut height: Option<usize> = None;
    let mut frames: u32 = 1;
    let mut seed: u64 = 0;
    let mut noise = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--max-depth" => {
                i += 1;
                max_depth = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--width" => {
                i += 1;
                width = args.get(i).and_then(|v| v.parse::<usize>().ok());
            }
            "--height" => {
                i += 1;
                height = args.get(i).and_then(|v| v.parse::<usize>().ok());
            }
            "--frames" => {
                i += 1;
                frames = args.get(i).and_then(|v| v.parse::<u32>().ok()).unwrap_or(1).max(1);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            }
            "--noise" => noise = true,
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    let (scene_path, output_path) = match positional.len() {
        1 => (None, positional.remove(0)),
        2 => {
            let output = positional.remove(1);
            (Some(positional.remove(0)), output)
        }
        _ => return None,
    };

    Some(Options { scene_path, output_path, max_depth, width, height, frames, seed, noise })
}

/// `out.png` -> `out_0003.png` when rendering an animation.
fn frame_path(output_path: &str, frame: u32, frames: u32) -> String {
    if frames <= 1 {
        return output_path.to_string();
    }
    let path = Path::new(output_path);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("frame");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{:04}.{}", stem, frame, ext),
        None => format!("{}_{:04}", stem, frame),
    };
    path.with_file_name(file_name).to_string_lossy().to_string()
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let (mut scene, camera, max_depth, background) = match options.scene_path.as_deref() {
        Some(path) => {
            let loaded = load_scene_with_settings(path)?;
            (loaded.scene, loaded.camera, loaded.max_depth, loaded.background)
        }
        None => {
            log::info!("No scene file given, rendering the built-in preset.");
            (presets::three_spheres_on_floor()?, None, None, None)
        }
    };

    let (origin, viewport, width, height) = match camera {
        Some(camera) => (camera.origin(), *camera.viewport(), camera.width(), camera.height()),
        None => (Vector3f::zeros(), Viewport::default(), DEFAULT_CANVAS, DEFAULT_CANVAS),
    };
    let camera = ViewportCamera::new(origin,
                                     viewport,
                                     options.width.unwrap_or(width),
                                     options.height.unwrap_or(height))?;

    let max_depth = options.max_depth.or(max_depth).unwrap_or(presets::DEFAULT_MAX_DEPTH);
    let background = background.unwrap_or_else(presets::default_background);
    let integrator: Box<dyn Integrator> = if options.noise {
        Box::new(NoiseIntegrator)
    } else {
        Box::new(WhittedIntegrator::new(max_depth, background))
    };
    log::debug!("{}", integrator.describe());

    let renderer = SimpleRenderer::new(integrator, camera, options.seed)
        .with_progress(options.frames == 1);

    for frame in 0..options.frames {
        let image = renderer.render(&scene);
        io::write_image(&image, &frame_path(&options.output_path, frame, options.frames))?;

        // The next snapshot is only built once this frame is on disk.
        if frame + 1 < options.frames {
            scene = presets::drift(&scene)?;
        }
    }

    Ok(())
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mirrorball");
    let options = match parse_args(&args) {
        Some(options) => options,
        None => {
            eprintln!("{}", usage(program));
            std::process::exit(1);
        }
    };

    if let Err(e) = run(options) {
        log::error!("{}", e);
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_output_only() {
        let options = parse_args(&args(&["mirrorball", "out.png", "--max-depth", "5"])).unwrap();
        assert!(options.scene_path.is_none());
        assert_eq!(options.output_path, "out.png");
        assert_eq!(options.max_depth, Some(5));
        assert_eq!(options.frames, 1);
        assert!(!options.noise);
    }

    #[test]
    fn test_parse_args_scene_and_flags() {
        let options = parse_args(&args(&[
            "mirrorball", "scene.xml", "out.exr", "--width", "64", "--height", "32", "--frames", "3", "--noise",
        ])).unwrap();
        assert_eq!(options.scene_path.as_deref(), Some("scene.xml"));
        assert_eq!(options.output_path, "out.exr");
        assert_eq!(options.width, Some(64));
        assert_eq!(options.height, Some(32));
        assert_eq!(options.frames, 3);
        assert!(options.noise);
    }

    #[test]
    fn test_parse_args_rejects_missing_output() {
        assert!(parse_args(&args(&["mirrorball"])).is_none());
        assert!(parse_args(&args(&["mirrorball", "a", "b", "c"])).is_none());
    }

    #[test]
    fn test_frame_path() {
        assert_eq!(frame_path("out.png", 0, 1), "out.png");
        assert_eq!(frame_path("renders/out.png", 3, 10), "renders/out_0003.png");
        assert_eq!(frame_path("out", 12, 20), "out_0012");
    }
}
