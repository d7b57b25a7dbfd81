use crate::scene::{NodeId, Scene};
use glam::Vec4;

/// Two-color blinker on a fixed wall-clock period.
///
/// The front-end owns the timer and calls [`PeriodicIndicator::step`] once
/// per period; nothing here depends on pointer state.
#[derive(Clone, Debug)]
pub struct PeriodicIndicator {
    pub name: String,
    pub part: NodeId,
    pub period_ms: u32,
    off: Vec4,
    on: Vec4,
    is_on: bool,
}

impl PeriodicIndicator {
    /// Starts in the off color.
    pub fn new(name: impl Into<String>, part: NodeId, off: Vec4, on: Vec4, period_ms: u32) -> Self {
        Self {
            name: name.into(),
            part,
            period_ms,
            off,
            on,
            is_on: false,
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn color(&self) -> Vec4 {
        if self.is_on {
            self.on
        } else {
            self.off
        }
    }

    /// Paint the current color without flipping.
    pub fn apply(&self, scene: &mut Scene) {
        scene.set_color(self.part, self.color());
    }

    /// One timer fire: flip and repaint.
    pub fn step(&mut self, scene: &mut Scene) -> Vec4 {
        self.is_on = !self.is_on;
        self.apply(scene);
        self.color()
    }

    /// Phase after `elapsed_ms` of uninterrupted ticking from the initial state.
    pub fn is_on_at(&self, elapsed_ms: u64) -> bool {
        let period = u64::from(self.period_ms.max(1));
        (elapsed_ms / period) % 2 == 1
    }
}
