// DOM contract and frame tuning for the browser front-end.
//
// Kept free of web types so host-side tests can include it directly.

// Canvas element ids; a scene is mounted for each one present in the page
pub const CONTROLS_CANVAS_ID: &str = "controls-canvas";
pub const GARDEN_CANVAS_ID: &str = "garden-canvas";

// Static fallback target when WebGPU is unavailable
pub const CONTAINER_ID: &str = "container";
pub const WEBGPU_MISSING_MESSAGE: &str =
    "This demo needs WebGPU. Try a recent Chrome, Edge or Safari Technology Preview.";
pub const FALLBACK_CLASS: &str = "webgpu-missing";

// Label overlay classes
pub const LABEL_CLASS: &str = "scene-label";
pub const LABEL_SMALL_CLASS: &str = "scene-label-small";

// Frame delta clamp (seconds) so a backgrounded tab does not jump the light
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Wheel deltas arrive in pixels; line-mode deltas are scaled to match
pub const WHEEL_LINE_HEIGHT_PX: f32 = 16.0;

// Initial per-frame instance buffer capacity (grows by doubling)
pub const INITIAL_INSTANCE_CAPACITY: usize = 512;
