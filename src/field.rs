use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::SystemTime,
};

use anyhow::{Context, Result};
use glam::{DVec2, Vec3};
use log::{debug, info, trace};
use rand::prelude::*;
use rand_pcg::Pcg64Mcg;

use crate::{
    component::{Blending, PointsMaterial},
    config::FieldConfig,
    entity::{Camera, Light, ParticleCloud, Scene, Transform},
    particles::ParticleBuffer,
    renderer::SceneRenderer,
    viewport::{EventKind, ListenerId, Metrics, Viewport, ViewportEvent},
    window::{Position, Size},
};

/// Animated point cloud drawn behind the page.
///
/// The field subscribes to viewport resize and pointer events when it is
/// created. It keeps rendering for as long as [`ParticleField::frame`] is called
/// and reports `true`; after [`ParticleField::dispose`] it renders nothing and
/// holds no subscriptions.
pub struct ParticleField<R> {
    state: Rc<RefCell<FieldState<R>>>,
    listeners: Vec<ListenerId>,
}

struct FieldState<R> {
    scene: Scene,
    particles: ParticleBuffer,
    renderer: Option<R>,
    spin: (f32, f32),
    shimmer_amplitude: f32,
    parallax_gain: f32,
    camera_height: f32,
}

impl<R: SceneRenderer + 'static> ParticleField<R> {
    pub fn new<F>(viewport: &mut Viewport, config: &FieldConfig, make_renderer: F) -> Result<Self>
    where
        F: FnOnce(&Scene, &ParticleBuffer, &Metrics) -> Result<R>,
    {
        let metrics = viewport.metrics();
        let scene = build_scene(config, metrics.size);

        let seed = config.seed.unwrap_or_else(clock_seed);
        info!("Seeded RNG with {}", seed);
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let particles =
            ParticleBuffer::generate(config.particle_count, config.extent, &config.palette, &mut rng);

        let renderer = make_renderer(&scene, &particles, &metrics)
            .context("Failed to create particle renderer")?;

        let state = Rc::new(RefCell::new(FieldState {
            scene,
            particles,
            renderer: Some(renderer),
            spin: config.spin,
            shimmer_amplitude: config.shimmer_amplitude,
            parallax_gain: config.parallax_gain,
            camera_height: config.camera_position.y,
        }));

        let on_resize = {
            let state = Rc::downgrade(&state);
            viewport.subscribe(EventKind::Resize, move |event, metrics| {
                if let ViewportEvent::Resized(size) = event {
                    with_state(&state, |state| state.resize(*size, metrics));
                }
            })
        };
        let on_pointer_move = {
            let state = Rc::downgrade(&state);
            viewport.subscribe(EventKind::PointerMove, move |event, metrics| {
                if let ViewportEvent::PointerMoved(position) = event {
                    with_state(&state, |state| state.pointer_moved(*position, metrics.size));
                }
            })
        };

        Ok(Self {
            state,
            listeners: vec![on_resize, on_pointer_move],
        })
    }

    /// Advances the animation by one frame and draws it. Returns whether the
    /// next frame should be scheduled.
    pub fn frame(&self, time_millis: f64) -> Result<bool> {
        let mut state = self.state.borrow_mut();
        let FieldState {
            scene,
            particles,
            renderer,
            spin,
            shimmer_amplitude,
            ..
        } = &mut *state;

        let renderer = match renderer {
            Some(renderer) => renderer,
            None => return Ok(false),
        };

        let rotation = &mut scene.particles.transform.rotation;
        rotation.x += spin.0;
        rotation.y += spin.1;

        particles.shimmer(time_millis, *shimmer_amplitude);
        if particles.needs_update() {
            renderer.upload_positions(particles.positions());
            particles.mark_uploaded();
        }

        renderer.render(scene)?;
        Ok(true)
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().renderer.is_some()
    }

    #[cfg(test)]
    fn scene(&self) -> std::cell::Ref<'_, Scene> {
        std::cell::Ref::map(self.state.borrow(), |state| &state.scene)
    }

    #[cfg(test)]
    fn particles(&self) -> std::cell::Ref<'_, ParticleBuffer> {
        std::cell::Ref::map(self.state.borrow(), |state| &state.particles)
    }

    /// Drops the renderer and its GPU resources and removes this field's
    /// viewport listeners. Safe to call more than once.
    pub fn dispose(&mut self, viewport: &mut Viewport) {
        for id in self.listeners.drain(..) {
            if !viewport.unsubscribe(id) {
                debug!("Listener {:?} was already removed", id);
            }
        }
        if self.state.borrow_mut().renderer.take().is_some() {
            info!("Particle field disposed");
        }
    }
}

impl<R: SceneRenderer> FieldState<R> {
    fn resize(&mut self, size: Size, metrics: &Metrics) {
        if size.is_empty() || metrics.surface_size.is_empty() {
            debug!("Ignoring resize to {:?}", metrics.surface_size);
            return;
        }
        self.scene.camera.set_aspect_ratio(size.aspect_ratio());
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(metrics);
        }
    }

    fn pointer_moved(&mut self, position: Position, size: Size) {
        if size.is_empty() {
            return;
        }
        let pointer = normalized_pointer(position, size);
        let camera = &mut self.scene.camera;
        camera.position.x = pointer.x as f32 * self.parallax_gain;
        camera.position.y = pointer.y as f32 * self.parallax_gain + self.camera_height;
        camera.look_at(Vec3::ZERO);
        trace!("Camera moved to {:?}", camera.position);
    }
}

fn with_state<R, F>(state: &Weak<RefCell<FieldState<R>>>, f: F)
where
    F: FnOnce(&mut FieldState<R>),
{
    if let Some(state) = state.upgrade() {
        f(&mut state.borrow_mut());
    }
}

/// Maps a viewport position to [-1, 1] on both axes with +Y pointing up.
pub fn normalized_pointer(position: Position, size: Size) -> DVec2 {
    DVec2::new(
        position.x / size.width as f64 * 2.0 - 1.0,
        -(position.y / size.height as f64) * 2.0 + 1.0,
    )
}

fn build_scene(config: &FieldConfig, size: Size) -> Scene {
    let mut camera = Camera::new(config.fov, size.aspect_ratio(), config.near, config.far);
    camera.position = config.camera_position;
    camera.look_at(Vec3::ZERO);

    let particles = ParticleCloud {
        transform: Transform::default(),
        material: PointsMaterial {
            size: config.point_size,
            size_attenuation: true,
            vertex_colors: true,
            opacity: config.opacity,
            blending: Blending::Additive,
        },
        count: config.particle_count,
    };

    let lights = std::iter::once(Light::Ambient(config.ambient_light))
        .chain(config.point_lights.iter().copied().map(Light::Point))
        .collect();

    Scene {
        fog: config.fog,
        camera,
        particles,
        lights,
    }
}

fn clock_seed() -> u64 {
    unix_millis() as u64
}

pub fn unix_millis() -> f64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
        * 1000.0
}

#[cfg(test)]
mod tests {
    use anyhow::bail;

    use super::*;

    #[derive(Debug, Default)]
    struct Calls {
        renders: usize,
        uploads: usize,
        metrics: Option<Metrics>,
        dropped: bool,
    }

    struct MockRenderer(Rc<RefCell<Calls>>);

    impl SceneRenderer for MockRenderer {
        fn resize(&mut self, metrics: &Metrics) {
            self.0.borrow_mut().metrics = Some(*metrics);
        }

        fn upload_positions(&mut self, positions: &[f32]) {
            assert_eq!(positions.len(), 6000);
            self.0.borrow_mut().uploads += 1;
        }

        fn render(&mut self, _scene: &Scene) -> Result<()> {
            self.0.borrow_mut().renders += 1;
            Ok(())
        }
    }

    impl Drop for MockRenderer {
        fn drop(&mut self) {
            self.0.borrow_mut().dropped = true;
        }
    }

    fn config() -> FieldConfig {
        FieldConfig {
            seed: Some(1234),
            ..Default::default()
        }
    }

    fn field(viewport: &mut Viewport) -> (ParticleField<MockRenderer>, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let renderer = MockRenderer(calls.clone());
        let field = ParticleField::new(viewport, &config(), |_, _, _| Ok(renderer)).unwrap();
        (field, calls)
    }

    #[test]
    fn fresh_field_scene_layout() {
        let mut viewport = Viewport::new(Size::new(1600, 900), 1.0);
        let (field, _) = field(&mut viewport);
        let scene = field.scene();

        assert_eq!(scene.particles.count, 2000);
        let ambient = scene
            .lights
            .iter()
            .filter(|light| matches!(light, Light::Ambient(_)))
            .count();
        let point = scene
            .lights
            .iter()
            .filter(|light| matches!(light, Light::Point(_)))
            .count();
        assert_eq!((ambient, point), (1, 2));
        assert_eq!(scene.lights.len(), 3);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 5.0, 30.0));
        assert_eq!(scene.camera.target, Vec3::ZERO);
        assert_eq!(scene.camera.fov, 75.0);
        assert_eq!(scene.camera.aspect_ratio, 1600.0 / 900.0);
        assert_eq!(scene.fog.near, 10.0);
        assert_eq!(scene.fog.far, 50.0);
        assert_eq!(field.particles().len(), 2000);

        assert_eq!(viewport.listener_count(EventKind::Resize), 1);
        assert_eq!(viewport.listener_count(EventKind::PointerMove), 1);
        assert!(field.is_active());
    }

    #[test]
    fn failed_renderer_leaves_no_listeners() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let result = ParticleField::<MockRenderer>::new(&mut viewport, &config(), |_, _, _| {
            bail!("no adapter")
        });

        assert!(result.is_err());
        assert_eq!(viewport.listener_count(EventKind::Resize), 0);
        assert_eq!(viewport.listener_count(EventKind::PointerMove), 0);
    }

    #[test]
    fn rotation_accumulates_linearly() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let (field, calls) = field(&mut viewport);

        let frames = 1000;
        for _ in 0..frames {
            assert!(field.frame(0.0).unwrap());
        }

        let rotation = field.scene().particles.transform.rotation;
        assert!((rotation.y - 0.0005 * frames as f32).abs() < 1e-4);
        assert!((rotation.x - 0.0002 * frames as f32).abs() < 1e-4);
        assert_eq!(rotation.z, 0.0);
        assert_eq!(calls.borrow().renders, frames);
        assert_eq!(calls.borrow().uploads, frames);
    }

    #[test]
    fn frame_shimmers_y_only() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let (field, _) = field(&mut viewport);
        let initial = field.particles().positions().to_vec();

        let t = 5_000.0;
        field.frame(t).unwrap();

        let positions = field.particles().positions().to_vec();
        for i in (0..positions.len()).step_by(3) {
            assert_eq!(positions[i], initial[i]);
            assert_eq!(positions[i + 2], initial[i + 2]);
            let delta = ((t * 0.001 + i as f64).sin() as f32) * 0.002;
            assert_eq!(positions[i + 1], initial[i + 1] + delta);
        }
    }

    #[test]
    fn pointer_drives_camera_parallax() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let (field, _) = field(&mut viewport);

        // top right corner
        viewport.pointer_moved(Position::new(800.0, 0.0));
        let camera = field.scene().camera;
        assert_eq!((camera.position.x, camera.position.y), (2.0, 7.0));
        assert_eq!(camera.position.z, 30.0);
        assert_eq!(camera.target, Vec3::ZERO);

        // bottom left corner
        viewport.pointer_moved(Position::new(0.0, 600.0));
        let camera = field.scene().camera;
        assert_eq!((camera.position.x, camera.position.y), (-2.0, 3.0));

        viewport.pointer_moved(Position::new(400.0, 300.0));
        let camera = field.scene().camera;
        assert_eq!((camera.position.x, camera.position.y), (0.0, 5.0));
    }

    #[test]
    fn normalized_pointer_flips_y() {
        let size = Size::new(200, 100);
        assert_eq!(
            normalized_pointer(Position::new(200.0, 0.0), size),
            DVec2::new(1.0, 1.0)
        );
        assert_eq!(
            normalized_pointer(Position::new(0.0, 100.0), size),
            DVec2::new(-1.0, -1.0)
        );
        assert_eq!(
            normalized_pointer(Position::new(50.0, 75.0), size),
            DVec2::new(-0.5, -0.5)
        );
    }

    #[test]
    fn resize_updates_camera_and_renderer() {
        let mut viewport = Viewport::new(Size::new(2400, 1800), 3.0);
        let (field, calls) = field(&mut viewport);

        viewport.resize(Size::new(5760, 3240));

        assert_eq!(field.scene().camera.aspect_ratio, 1920.0 / 1080.0);
        let metrics = calls.borrow().metrics.unwrap();
        assert_eq!(metrics.size, Size::new(1920, 1080));
        assert_eq!(metrics.surface_size, Size::new(5760, 3240));
        assert_eq!(metrics.pixel_ratio, 2.0);
        assert_eq!(metrics.render_size(), Size::new(3840, 2160));
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let (field, calls) = field(&mut viewport);

        viewport.resize(Size::new(0, 0));

        assert_eq!(field.scene().camera.aspect_ratio, 800.0 / 600.0);
        assert_eq!(calls.borrow().metrics, None);
    }

    #[test]
    fn dispose_stops_frames_and_unsubscribes() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let (mut field, calls) = field(&mut viewport);

        assert!(field.frame(0.0).unwrap());
        field.dispose(&mut viewport);

        assert!(calls.borrow().dropped);
        assert!(!field.is_active());
        assert!(!field.frame(16.0).unwrap());
        assert!(!field.frame(32.0).unwrap());
        assert_eq!(calls.borrow().renders, 1);
        assert_eq!(viewport.listener_count(EventKind::Resize), 0);
        assert_eq!(viewport.listener_count(EventKind::PointerMove), 0);

        let before = field.scene().camera;
        viewport.resize(Size::new(100, 100));
        viewport.pointer_moved(Position::new(0.0, 0.0));
        assert_eq!(field.scene().camera, before);

        field.dispose(&mut viewport);
        assert!(!field.is_active());
    }

    #[test]
    fn disposing_one_field_keeps_the_other() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let (mut first, _) = field(&mut viewport);
        let (second, second_calls) = field(&mut viewport);
        assert_eq!(viewport.listener_count(EventKind::Resize), 2);

        first.dispose(&mut viewport);
        assert_eq!(viewport.listener_count(EventKind::Resize), 1);
        assert_eq!(viewport.listener_count(EventKind::PointerMove), 1);

        viewport.resize(Size::new(640, 480));
        let metrics = second_calls.borrow().metrics.unwrap();
        assert_eq!(metrics.surface_size, Size::new(640, 480));
        assert_eq!(metrics.pixel_ratio, 1.0);
        assert_eq!(second.scene().camera.aspect_ratio, 640.0 / 480.0);
        assert!(second.frame(0.0).unwrap());
    }

    #[test]
    fn seeded_fields_match() {
        let mut viewport = Viewport::new(Size::new(800, 600), 1.0);
        let (a, _) = field(&mut viewport);
        let (b, _) = field(&mut viewport);
        assert_eq!(*a.particles(), *b.particles());
    }
}
