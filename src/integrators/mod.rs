// Copyright @yucwang 2021

pub mod lighting;
pub mod noise;
pub mod whitted;
