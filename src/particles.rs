use rand::prelude::*;

use crate::component::Color;

/// Per-particle state for a point cloud, laid out as two flat `[x, y, z, ...]`
/// and `[r, g, b, ...]` arrays so each can be uploaded to the GPU in one copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBuffer {
    positions: Box<[f32]>,
    colors: Box<[f32]>,
    needs_update: bool,
}

impl ParticleBuffer {
    pub const STRIDE: usize = 3;

    /// Scatters `count` particles uniformly inside an axis aligned cube of side
    /// `extent` centered at the origin, each tinted with a palette entry.
    pub fn generate<R: Rng>(
        count: usize,
        extent: f32,
        palette: &[Color],
        rng: &mut R,
    ) -> Self {
        let mut positions = vec![0.0; count * Self::STRIDE].into_boxed_slice();
        let mut colors = vec![0.0; count * Self::STRIDE].into_boxed_slice();

        for (position, color) in positions
            .chunks_exact_mut(Self::STRIDE)
            .zip(colors.chunks_exact_mut(Self::STRIDE))
        {
            for p in position.iter_mut() {
                *p = (rng.gen::<f32>() - 0.5) * extent;
            }
            let tint = palette.choose(rng).copied().unwrap_or_default();
            color.copy_from_slice(&tint.to_array());
        }

        Self {
            positions,
            colors,
            needs_update: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / Self::STRIDE
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub fn mark_uploaded(&mut self) {
        self.needs_update = false;
    }

    /// Bobs every particle along Y. The phase is the flat buffer offset of the
    /// particle's X component, so neighbours drift out of step.
    pub fn shimmer(&mut self, time_millis: f64, amplitude: f32) {
        for (particle, position) in self.positions.chunks_exact_mut(Self::STRIDE).enumerate() {
            position[1] += y_offset(time_millis, particle * Self::STRIDE, amplitude);
        }
        self.needs_update = true;
    }
}

pub fn y_offset(time_millis: f64, offset: usize, amplitude: f32) -> f32 {
    (time_millis * 0.001 + offset as f64).sin() as f32 * amplitude
}
