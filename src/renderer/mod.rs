use anyhow::Result;

use crate::{entity::Scene, viewport::Metrics};

mod copy;
mod particle;
mod render_target;
mod renderer;

pub use renderer::Renderer;

/// What the particle field needs from a graphics backend.
pub trait SceneRenderer {
    /// The surface follows `metrics.surface_size`; the scene is drawn at
    /// `metrics.render_size()`.
    fn resize(&mut self, metrics: &Metrics);

    /// Replaces the GPU copy of the flat `[x, y, z, ...]` position array.
    fn upload_positions(&mut self, positions: &[f32]);

    fn render(&mut self, scene: &Scene) -> Result<()>;
}
