use crate::constants::NDC_LIMIT;
use glam::Vec2;

/// Bounding rectangle of a canvas in the same space as pointer client
/// coordinates. Replaced wholesale on every resize; never patched in place.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Map a pointer position to normalized device coordinates.
    ///
    /// No guarding happens here: a zero-sized rect yields infinities or NaN.
    #[inline]
    pub fn map(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        let x = ((screen_x - self.left) / self.width) * 2.0 - 1.0;
        let y = -((screen_y - self.top) / self.height) * 2.0 + 1.0;
        Vec2::new(x, y)
    }

    /// [`map`](Self::map) with the caller-side guard applied: `None` when
    /// the result is not finite or falls outside the canvas.
    #[inline]
    pub fn ndc_checked(&self, screen_x: f32, screen_y: f32) -> Option<Vec2> {
        let ndc = self.map(screen_x, screen_y);
        let inside = ndc.x.abs() <= NDC_LIMIT && ndc.y.abs() <= NDC_LIMIT;
        (ndc.is_finite() && inside).then_some(ndc)
    }

    /// Inverse of [`map`](Self::map): NDC back to client coordinates.
    #[inline]
    pub fn to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.left + (ndc.x + 1.0) * 0.5 * self.width,
            self.top + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}
