//! Hover / press / click state for a single pointer.
//!
//! At most one object is ever non-idle. Entering Hovered or Pressed on a new
//! object restores the previous one first. Pointer-up always releases,
//! wherever the pointer is, and is a no-op when nothing was pressed.

use crate::assembly::Assemblies;
use crate::layers::{LayerRegistry, ObjectId, ObjectKind};
use crate::scene::Scene;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

/// What one pointer event did, for the front-end to reflect (cursor, logs).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionOutcome {
    pub cursor: Cursor,
    pub changed: bool,
    pub pressed: Option<String>,
    pub released: Option<String>,
    /// Assembly name and its new visibility.
    pub toggled: Option<(String, bool)>,
}

#[derive(Clone, Copy, Debug)]
struct Press {
    object: ObjectId,
    rest_offset: Vec3,
}

#[derive(Debug)]
pub struct Interaction {
    hovered: Option<ObjectId>,
    pressed: Option<Press>,
    armed: Option<ObjectId>,
    press_offset: Vec3,
}

impl Interaction {
    /// `press_offset` is added to a button's rest offset while it is held.
    pub fn new(press_offset: Vec3) -> Self {
        Self {
            hovered: None,
            pressed: None,
            armed: None,
            press_offset,
        }
    }

    pub fn state(&self, id: ObjectId) -> InteractionState {
        if self.pressed.is_some_and(|p| p.object == id) {
            InteractionState::Pressed
        } else if self.hovered == Some(id) {
            InteractionState::Hovered
        } else {
            InteractionState::Idle
        }
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.hovered
    }

    pub fn pressed(&self) -> Option<ObjectId> {
        self.pressed.map(|p| p.object)
    }

    pub fn cursor(&self) -> Cursor {
        if self.hovered.is_some() || self.pressed.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    /// Pointer moved; `hit` is the resolved object under it, if any.
    /// Hover is frozen while something is held down.
    pub fn pointer_move(
        &mut self,
        hit: Option<ObjectId>,
        scene: &mut Scene,
        layers: &LayerRegistry,
    ) -> InteractionOutcome {
        let changed = self.pressed.is_none() && self.set_hover(hit, scene, layers);
        self.outcome(changed)
    }

    pub fn pointer_down(
        &mut self,
        hit: Option<ObjectId>,
        scene: &mut Scene,
        layers: &LayerRegistry,
    ) -> InteractionOutcome {
        let mut out = InteractionOutcome::default();
        if let Some(name) = self.release(scene, layers) {
            out.released = Some(name);
            out.changed = true;
        }
        self.armed = None;
        let Some(id) = hit else {
            out.changed |= self.set_hover(None, scene, layers);
            out.cursor = self.cursor();
            return out;
        };
        let Some(object) = layers.object(id) else {
            out.cursor = self.cursor();
            return out;
        };
        out.changed |= self.set_hover(Some(id), scene, layers);
        match object.kind {
            ObjectKind::Button => {
                if let Some(rest) = scene.offset(object.root) {
                    scene.set_offset(object.root, rest + self.press_offset);
                    self.pressed = Some(Press {
                        object: id,
                        rest_offset: rest,
                    });
                    log::info!("[press] {} pressed", object.name);
                    out.pressed = Some(object.name.clone());
                    out.changed = true;
                }
            }
            ObjectKind::Trigger { .. } => {
                self.armed = Some(id);
            }
        }
        out.cursor = self.cursor();
        out
    }

    /// Release whatever is held and complete a click when the pointer is
    /// still over the trigger it went down on.
    pub fn pointer_up(
        &mut self,
        hit: Option<ObjectId>,
        scene: &mut Scene,
        layers: &LayerRegistry,
        assemblies: &mut Assemblies,
    ) -> InteractionOutcome {
        if self.pressed.is_none() && self.armed.is_none() {
            return self.outcome(false);
        }
        let mut out = InteractionOutcome {
            changed: true,
            ..Default::default()
        };
        out.released = self.release(scene, layers);
        if let Some(armed) = self.armed.take() {
            if hit == Some(armed) {
                if let Some(ObjectKind::Trigger { assembly }) =
                    layers.object(armed).map(|o| &o.kind)
                {
                    out.toggled = assemblies
                        .toggle(assembly, scene)
                        .map(|visible| (assembly.clone(), visible));
                }
            }
        }
        self.set_hover(hit, scene, layers);
        out.cursor = self.cursor();
        out
    }

    /// Drop all transient state, e.g. when the window loses focus.
    pub fn cancel(&mut self, scene: &mut Scene, layers: &LayerRegistry) -> InteractionOutcome {
        let released = self.release(scene, layers);
        self.armed = None;
        let unhovered = self.set_hover(None, scene, layers);
        InteractionOutcome {
            changed: released.is_some() || unhovered,
            released,
            ..Default::default()
        }
    }

    fn outcome(&self, changed: bool) -> InteractionOutcome {
        InteractionOutcome {
            cursor: self.cursor(),
            changed,
            ..Default::default()
        }
    }

    // Restores the exact rest offset, no easing.
    fn release(&mut self, scene: &mut Scene, layers: &LayerRegistry) -> Option<String> {
        let press = self.pressed.take()?;
        let object = layers.object(press.object)?;
        scene.set_offset(object.root, press.rest_offset);
        log::debug!("[press] {} released", object.name);
        Some(object.name.clone())
    }

    fn set_hover(
        &mut self,
        next: Option<ObjectId>,
        scene: &mut Scene,
        layers: &LayerRegistry,
    ) -> bool {
        if next == self.hovered {
            return false;
        }
        if let Some(prev) = self.hovered.take() {
            if let Some(h) = layers.object(prev).and_then(|o| o.highlight) {
                scene.set_color(h.part, h.base);
            }
        }
        if let Some(id) = next {
            if let Some(h) = layers.object(id).and_then(|o| o.highlight) {
                scene.set_color(h.part, h.hover);
            }
        }
        self.hovered = next;
        true
    }
}
