use crate::camera::Camera;
use crate::constants::NDC_LIMIT;
use crate::scene::{NodeId, Scene};
use crate::viewport::ViewportRect;
use glam::{Vec2, Vec3};

/// A text caption pinned to a world position.
#[derive(Clone, Debug)]
pub struct Label {
    pub text: String,
    pub anchor: Vec3,
    pub owner: Option<NodeId>,
    pub small: bool,
}

impl Label {
    /// Canvas-relative css pixel position, or `None` when the label should be
    /// hidden (owner hidden, behind the camera, or off the canvas).
    pub fn layout(&self, camera: &Camera, viewport: &ViewportRect, scene: &Scene) -> Option<Vec2> {
        if let Some(owner) = self.owner {
            if !scene.is_visible(owner) {
                return None;
            }
        }
        let ndc = camera.project(self.anchor)?;
        if !ndc.is_finite() || ndc.x.abs() > NDC_LIMIT || ndc.y.abs() > NDC_LIMIT {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        ))
    }
}
