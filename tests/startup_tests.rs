// Host-side tests for start-up gating.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

mod startup {
    include!("../src/startup.rs");
}

use startup::*;

#[test]
fn gpu_failure_before_any_scene_shows_fallback() {
    assert_eq!(on_gpu_failure(0), GpuFailure::ShowFallback);
}

#[test]
fn gpu_failure_after_a_scene_runs_keeps_it_running() {
    assert_eq!(on_gpu_failure(1), GpuFailure::SkipScene);
    assert_eq!(on_gpu_failure(2), GpuFailure::SkipScene);
}
