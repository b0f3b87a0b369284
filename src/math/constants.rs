/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;

pub type Vector3f = na::Vector3<Float>;

/// Stand-in for "infinitely far". Finite so that window comparisons stay
/// well defined.
pub const INFINITY: Float = 100000000.0;

/// Near bound of shadow rays, keeps a surface from shadowing itself.
pub const SHADOW_EPSILON: Float = 0.001;
/// Near bound of mirror-reflected rays.
pub const REFLECTION_EPSILON: Float = 0.0001;
/// Primary rays only see geometry beyond the viewport plane.
pub const PRIMARY_T_MIN: Float = 1.0;

pub const DISPLAY_MIN: Float = 0.0;
pub const DISPLAY_MAX: Float = 1.0;
