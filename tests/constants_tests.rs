// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use farmbot_core::constants as core_constants;

#[test]
fn canvas_ids_are_distinct_and_non_empty() {
    assert!(!CONTROLS_CANVAS_ID.is_empty());
    assert!(!GARDEN_CANVAS_ID.is_empty());
    assert_ne!(CONTROLS_CANVAS_ID, GARDEN_CANVAS_ID);
    assert_ne!(CONTAINER_ID, CONTROLS_CANVAS_ID);
    assert_ne!(CONTAINER_ID, GARDEN_CANVAS_ID);
}

#[test]
fn label_classes_differ() {
    assert_ne!(LABEL_CLASS, LABEL_SMALL_CLASS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_constants_are_within_reasonable_bounds() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 1.0);
    assert!(WHEEL_LINE_HEIGHT_PX > 0.0);
    assert!(INITIAL_INSTANCE_CAPACITY > 0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn interaction_constants_are_consistent() {
    assert!(core_constants::PRESS_DEPTH > 0.0);
    assert!(core_constants::BLINK_PERIOD_MS > 0);
    assert!(core_constants::RAY_EPSILON > 0.0 && core_constants::RAY_EPSILON < 1e-3);
    assert_eq!(core_constants::NDC_LIMIT, 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbit_limits_are_ordered() {
    assert!(core_constants::ORBIT_MIN_RADIUS > 0.0);
    assert!(core_constants::ORBIT_MIN_RADIUS < core_constants::ORBIT_MAX_RADIUS);
    assert!(core_constants::ORBIT_PITCH_LIMIT < std::f32::consts::FRAC_PI_2);
    assert!(core_constants::ORBIT_ROTATE_SPEED > 0.0);
    assert!(core_constants::ORBIT_ZOOM_SPEED > 0.0);
}

#[test]
fn hex_colors_unpack_to_unit_range() {
    let c = core_constants::rgb(0xff8000);
    assert_eq!(c.x, 1.0);
    assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
    assert_eq!(c.z, 0.0);
    assert_eq!(c.w, 1.0);
    assert_eq!(core_constants::rgba(0x000000, 0.5).w, 0.5);
}
