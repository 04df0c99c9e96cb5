use std::path::PathBuf;

use clap::Parser;
use glam::{vec3, Vec3};

use crate::component::{AmbientLight, Color, Fog, PointLight};

#[derive(Debug, Parser)]
#[clap(name = "portfolio", about = "Personal portfolio with an animated particle backdrop")]
pub struct Cli {
    /// Seed for the particle layout. Defaults to the current time.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Write the assembled page as an HTML document to this path.
    #[clap(long, value_name = "PATH")]
    pub page: Option<PathBuf>,

    /// Open the detail view of this project (e.g. 001) instead of the main view.
    #[clap(long, value_name = "NUMBER")]
    pub project: Option<String>,

    /// Initial window width in logical pixels.
    #[clap(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[clap(long, default_value_t = 720)]
    pub height: u32,

    /// Run without the particle backdrop.
    #[clap(long)]
    pub no_backdrop: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    pub seed: Option<u64>,
    pub particle_count: usize,
    pub extent: f32,
    pub palette: Vec<Color>,
    pub point_size: f32,
    pub opacity: f32,
    pub fog: Fog,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    // camera.x = pointer.x * gain, camera.y = pointer.y * gain + camera_position.y
    pub parallax_gain: f32,
    /// Radians added to the cloud's (pitch, yaw) every frame.
    pub spin: (f32, f32),
    pub shimmer_amplitude: f32,
    pub ambient_light: AmbientLight,
    pub point_lights: Vec<PointLight>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            particle_count: 2000,
            extent: 100.0,
            palette: vec![
                Color::from_hex(0x00f0ff),
                Color::from_hex(0xff006e),
                Color::from_hex(0x39ff14),
            ],
            point_size: 0.15,
            opacity: 0.8,
            fog: Fog {
                color: Color::from_hex(0x0a0e27),
                near: 10.0,
                far: 50.0,
            },
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_position: vec3(0.0, 5.0, 30.0),
            parallax_gain: 2.0,
            spin: (0.0002, 0.0005),
            shimmer_amplitude: 0.002,
            ambient_light: AmbientLight {
                color: Color::from_hex(0x00f0ff),
                intensity: 0.5,
            },
            point_lights: vec![
                PointLight {
                    color: Color::from_hex(0x00f0ff),
                    intensity: 1.0,
                    position: vec3(10.0, 10.0, 10.0),
                    range: 50.0,
                },
                PointLight {
                    color: Color::from_hex(0xff006e),
                    intensity: 0.8,
                    position: vec3(-10.0, -10.0, -10.0),
                    range: 50.0,
                },
            ],
        }
    }
}

impl From<&Cli> for FieldConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            seed: cli.seed,
            ..Default::default()
        }
    }
}
