// Copyright @yucwang 2021

pub mod emitter;
pub mod error;
pub mod integrator;
pub mod interaction;
pub mod presets;
pub mod rng;
pub mod scene;
pub mod scene_loader;
