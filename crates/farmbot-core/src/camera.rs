//! Perspective camera plus the optional orbit controller of the garden scene.

use crate::constants::{
    ORBIT_MAX_RADIUS, ORBIT_MIN_RADIUS, ORBIT_PITCH_LIMIT, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use crate::picking::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(fovy_degrees: f32, eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: fovy_degrees.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space picking ray through a point given in normalized device
    /// coordinates. Recomputed per pointer event, never cached.
    pub fn picking_ray(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        Ray::new(self.eye, far - self.eye)
    }

    /// Project a world point to NDC. `None` when the point is behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}

/// Orbit controller around a fixed target with +Y up.
///
/// Pointer drags and wheel steps are accumulated as they arrive and only
/// applied to the camera by [`OrbitControls::apply`], once per frame.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    target: Vec3,
    radius: f32,
    yaw: f32,
    pitch: f32,
    pending_rotate: Vec2,
    pending_zoom: f32,
}

impl OrbitControls {
    pub fn from_camera(camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let radius = offset.length().max(ORBIT_MIN_RADIUS);
        Self {
            target: camera.target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            pending_rotate: Vec2::ZERO,
            pending_zoom: 0.0,
        }
    }

    /// Queue a drag of `dx`, `dy` css pixels.
    pub fn rotate_by(&mut self, dx: f32, dy: f32) {
        self.pending_rotate += Vec2::new(dx, dy);
    }

    /// Queue a wheel step; positive zooms out.
    pub fn zoom_by(&mut self, delta: f32) {
        self.pending_zoom += delta;
    }

    pub fn has_pending(&self) -> bool {
        self.pending_rotate != Vec2::ZERO || self.pending_zoom != 0.0
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Consume queued input and move the camera eye. Returns whether anything moved.
    pub fn apply(&mut self, camera: &mut Camera) -> bool {
        if !self.has_pending() {
            return false;
        }
        self.yaw -= self.pending_rotate.x * ORBIT_ROTATE_SPEED;
        self.pitch = (self.pitch + self.pending_rotate.y * ORBIT_ROTATE_SPEED)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self.radius = (self.radius * (1.0 + self.pending_zoom * ORBIT_ZOOM_SPEED))
            .clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);
        self.pending_rotate = Vec2::ZERO;
        self.pending_zoom = 0.0;

        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        camera.eye = self.target + dir * self.radius;
        camera.target = self.target;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_ray_points_at_target() {
        let cam = Camera::new(50.0, Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let ray = cam.picking_ray(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert_eq!(ray.origin, cam.eye);
    }

    #[test]
    fn project_round_trips_the_target() {
        let cam = Camera::new(50.0, Vec3::new(0.0, -3.0, 5.0), Vec3::ZERO);
        let ndc = cam.project(Vec3::ZERO).unwrap();
        assert!(ndc.length() < 1e-4);
        assert!(cam.project(Vec3::new(0.0, -6.0, 10.0)).is_none());
    }

    #[test]
    fn orbit_without_input_leaves_camera_alone() {
        let mut cam = Camera::new(50.0, Vec3::new(0.0, 0.0, 2.75), Vec3::ZERO);
        let mut orbit = OrbitControls::from_camera(&cam);
        assert!(!orbit.apply(&mut cam));
        assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 2.75));
    }

    #[test]
    fn orbit_keeps_distance_while_rotating() {
        let mut cam = Camera::new(50.0, Vec3::new(0.0, 0.0, 2.75), Vec3::ZERO);
        let mut orbit = OrbitControls::from_camera(&cam);
        orbit.rotate_by(120.0, -40.0);
        assert!(orbit.apply(&mut cam));
        assert!((cam.eye.length() - 2.75).abs() < 1e-4);
        assert!(cam.eye.x < 0.0);
    }
}
