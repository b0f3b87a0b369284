// Copyright @yucwang 2021

use crate::core::scene::Scene;
use crate::math::bitmap::Bitmap;

pub trait Renderer {
    /// Render one frame of an immutable scene snapshot.
    fn render(&self, scene: &Scene) -> Bitmap;
}
