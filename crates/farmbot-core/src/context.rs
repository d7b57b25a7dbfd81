//! The per-scene application context.
//!
//! Owns the scene and everything that reads or writes it. Pointer events,
//! timer fires, asset completions and frame ticks all go through `&mut self`,
//! so each handler runs to completion before the next one starts.

use crate::assembly::Assemblies;
use crate::assets::AssetSlots;
use crate::camera::{Camera, OrbitControls};
use crate::config::{FogConfig, PointLight};
use crate::error::SceneError;
use crate::indicator::PeriodicIndicator;
use crate::interaction::{Interaction, InteractionOutcome, InteractionState};
use crate::label::Label;
use crate::layers::{LayerRegistry, ObjectId};
use crate::scene::{NodeId, Scene};
use crate::viewport::ViewportRect;
use fnv::FnvHashMap;
use glam::{Vec2, Vec4};

pub struct SceneContext {
    pub name: String,
    pub scene: Scene,
    pub camera: Camera,
    pub orbit: Option<OrbitControls>,
    pub viewport: ViewportRect,
    pub layers: LayerRegistry,
    pub pick_layers: Vec<String>,
    pub interaction: Interaction,
    pub assemblies: Assemblies,
    pub indicators: Vec<PeriodicIndicator>,
    pub assets: AssetSlots,
    pub groups: FnvHashMap<String, NodeId>,
    pub labels: Vec<Label>,
    pub light: PointLight,
    pub background: Vec4,
    pub fog: Option<FogConfig>,
    pub drag_from: Option<Vec2>,
}

impl SceneContext {
    /// Replace the viewport rect (startup and every resize).
    pub fn set_viewport(&mut self, rect: ViewportRect) {
        self.viewport = rect;
        if rect.width > 0.0 && rect.height > 0.0 {
            self.camera.aspect = rect.aspect();
        }
    }

    /// Resolve the object under a pointer position. Each pickable layer is
    /// tested on its own; the nearest resolved hit wins.
    pub fn pick(&self, screen_x: f32, screen_y: f32) -> Option<ObjectId> {
        let ndc = self.viewport.ndc_checked(screen_x, screen_y)?;
        let ray = self.camera.picking_ray(ndc);
        self.pick_layers
            .iter()
            .filter_map(|layer| self.layers.pick(&self.scene, &ray, layer))
            .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
            .map(|(id, _)| id)
    }

    pub fn state_of(&self, name: &str) -> Option<InteractionState> {
        self.layers.find(name).map(|id| self.interaction.state(id))
    }

    pub fn pointer_move(&mut self, screen_x: f32, screen_y: f32) -> InteractionOutcome {
        if let (Some(from), Some(orbit)) = (self.drag_from, self.orbit.as_mut()) {
            orbit.rotate_by(screen_x - from.x, screen_y - from.y);
            self.drag_from = Some(Vec2::new(screen_x, screen_y));
            return InteractionOutcome {
                cursor: self.interaction.cursor(),
                ..Default::default()
            };
        }
        let hit = self.pick(screen_x, screen_y);
        self.interaction
            .pointer_move(hit, &mut self.scene, &self.layers)
    }

    /// Pointer went down on this scene's canvas. A miss starts an orbit drag
    /// when the scene has orbit controls.
    pub fn pointer_down(&mut self, screen_x: f32, screen_y: f32) -> InteractionOutcome {
        let hit = self.pick(screen_x, screen_y);
        if hit.is_none() && self.orbit.is_some() {
            self.drag_from = Some(Vec2::new(screen_x, screen_y));
        }
        self.interaction
            .pointer_down(hit, &mut self.scene, &self.layers)
    }

    pub fn pointer_up(&mut self, screen_x: f32, screen_y: f32) -> InteractionOutcome {
        self.drag_from = None;
        let hit = self.pick(screen_x, screen_y);
        self.interaction.pointer_up(
            hit,
            &mut self.scene,
            &self.layers,
            &mut self.assemblies,
        )
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if let Some(orbit) = self.orbit.as_mut() {
            orbit.zoom_by(delta_y);
        }
    }

    /// Focus loss: release and unhover without completing any click.
    pub fn cancel(&mut self) -> InteractionOutcome {
        self.drag_from = None;
        self.interaction.cancel(&mut self.scene, &self.layers)
    }

    /// Advance continuous animation by `dt_sec`. Returns whether the camera moved.
    pub fn tick(&mut self, dt_sec: f32) -> bool {
        self.light.position += self.light.drift_per_sec * dt_sec.max(0.0);
        match self.orbit.as_mut() {
            Some(orbit) => orbit.apply(&mut self.camera),
            None => false,
        }
    }

    /// One timer fire of indicator `index`.
    pub fn step_indicator(&mut self, index: usize) -> bool {
        match self.indicators.get_mut(index) {
            Some(ind) => {
                ind.step(&mut self.scene);
                true
            }
            None => false,
        }
    }

    /// Asset resolver completion. Idempotent; any order.
    pub fn attach_asset(&mut self, name: &str) -> Result<bool, SceneError> {
        self.assets.attach(name, &mut self.scene, &self.groups)
    }

    /// Canvas-relative positions for every label, `None` meaning hidden.
    pub fn label_layout(&self) -> Vec<Option<Vec2>> {
        self.labels
            .iter()
            .map(|l| l.layout(&self.camera, &self.viewport, &self.scene))
            .collect()
    }
}
