use glam::Vec3;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` integer.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for Vec3 {
    fn from(color: Color) -> Self {
        Vec3::new(color.r, color.g, color.b)
    }
}

/// Linear distance fog. Fragments closer than `near` are untouched, fragments
/// past `far` take the fog color.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointsMaterial {
    pub size: f32,
    pub size_attenuation: bool,
    pub vertex_colors: bool,
    pub opacity: f32,
    pub blending: Blending,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            size: 1.0,
            size_attenuation: true,
            vertex_colors: false,
            opacity: 1.0,
            blending: Blending::Normal,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    // distance at which the light's contribution reaches zero
    pub range: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels() {
        let c = Color::from_hex(0x00f0ff);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, 240.0 / 255.0);
        assert_eq!(c.b, 1.0);
    }
}
