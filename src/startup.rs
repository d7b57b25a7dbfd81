// Start-up gating for the mounted scenes.
// Kept free of web types so host-side tests can include it directly.

/// What `init` does when one scene's GPU setup fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpuFailure {
    /// Nothing is running yet: show the static message and stop.
    ShowFallback,
    /// Another scene already runs: leave it alone and skip this canvas.
    SkipScene,
}

/// The fallback replaces the demo, so it is only shown while no scene has
/// been mounted. The adapter probe before the first mount makes a later
/// failure rare.
pub fn on_gpu_failure(mounted: usize) -> GpuFailure {
    if mounted == 0 {
        GpuFailure::ShowFallback
    } else {
        GpuFailure::SkipScene
    }
}
