// Picking and interaction tuning shared by every scene preset.

// Interaction
pub const PRESS_DEPTH: f32 = 3.0; // how far a pressed button sinks along -Z (scene units)
pub const BLINK_PERIOD_MS: u32 = 1000; // periodic indicator flip interval
pub const HOVER_COLOR: u32 = 0xefefef; // highlight applied to a hovered button cap

// Picking
pub const RAY_EPSILON: f32 = 1e-6; // below this a direction component counts as parallel
pub const NDC_LIMIT: f32 = 1.0; // pointer outside [-1, 1] lies outside the canvas

// Orbit camera
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per css pixel of drag
pub const ORBIT_ZOOM_SPEED: f32 = 0.001; // fraction of radius per wheel delta unit
pub const ORBIT_MIN_RADIUS: f32 = 0.5;
pub const ORBIT_MAX_RADIUS: f32 = 50.0;
pub const ORBIT_PITCH_LIMIT: f32 = 1.55; // just under pi/2, keeps the up vector stable

/// Convert a `0xRRGGBB` sRGB literal into RGBA floats with the given alpha.
#[inline]
pub fn rgba(hex: u32, alpha: f32) -> glam::Vec4 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    glam::Vec4::new(r, g, b, alpha)
}

/// Opaque shorthand for [`rgba`].
#[inline]
pub fn rgb(hex: u32) -> glam::Vec4 {
    rgba(hex, 1.0)
}
