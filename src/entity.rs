use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::component::{AmbientLight, Fog, PointLight, PointsMaterial};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order. Never wrapped.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            fov,
            aspect_ratio,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleCloud {
    pub transform: Transform,
    pub material: PointsMaterial,
    pub count: usize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Point(PointLight),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub fog: Fog,
    pub camera: Camera,
    pub particles: ParticleCloud,
    pub lights: Vec<Light>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_change_refreshes_projection() {
        let mut camera = Camera::new(75.0, 1.0, 0.1, 1000.0);
        let before = camera.projection_matrix();
        camera.set_aspect_ratio(2.0);
        assert_ne!(before, camera.projection_matrix());
        assert_eq!(
            camera.projection_matrix(),
            Mat4::perspective_rh(75f32.to_radians(), 2.0, 0.1, 1000.0)
        );
    }

    #[test]
    fn view_matrix_maps_target_onto_forward_axis() {
        let mut camera = Camera::new(75.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 5.0, 30.0);
        camera.look_at(Vec3::ZERO);
        let target = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(target.x.abs() < 1e-4);
        assert!(target.y.abs() < 1e-4);
        assert!(target.z < 0.0);
    }
}
