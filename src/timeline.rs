//! Mapping elapsed playback time onto the scene timeline.

use crate::SceneDescriptor;

/// Length of the fade-in and fade-out ramps, in seconds.
pub const DEFAULT_TRANSITION_SECS: f64 = 1.0;

/// Where the timeline is at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineState {
    /// Index of the active scene
    pub scene_index: usize,
    /// Seconds since the active scene started
    pub scene_elapsed: f64,
    /// Cross-fade opacity (0.0 - 1.0)
    pub opacity: f64,
}

/// Result of resolving a playback time against the catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// A scene is on screen
    Active(TimelineState),
    /// Elapsed time is at or past the end of the last scene
    Finished,
}

impl Resolution {
    /// Get the timeline state, if a scene is active.
    #[inline]
    pub fn active(&self) -> Option<&TimelineState> {
        match self {
            Resolution::Active(state) => Some(state),
            Resolution::Finished => None,
        }
    }

    /// Check if the timeline has been exhausted.
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self, Resolution::Finished)
    }
}

/// Resolve `elapsed` seconds into the active scene, its local time and opacity.
///
/// The active scene is the first whose cumulative end time is strictly
/// greater than `elapsed`, so an instant that lands exactly on a boundary
/// belongs to the later scene. Negative input is treated as zero.
///
/// ## Example
///
/// ```rust
/// use scene_reel_core::timeline::{resolve, Resolution, DEFAULT_TRANSITION_SECS};
/// use scene_reel_core::SceneCatalog;
///
/// let catalog = SceneCatalog::demo(); // 3s + 5s
///
/// let state = *resolve(3.5, catalog.scenes(), DEFAULT_TRANSITION_SECS).active().unwrap();
/// assert_eq!(state.scene_index, 1);
/// assert_eq!(state.scene_elapsed, 0.5);
/// assert_eq!(state.opacity, 0.5);
///
/// assert_eq!(resolve(8.0, catalog.scenes(), DEFAULT_TRANSITION_SECS), Resolution::Finished);
/// ```
pub fn resolve(elapsed: f64, scenes: &[SceneDescriptor], transition: f64) -> Resolution {
    let elapsed = elapsed.max(0.0);
    let mut scene_start = 0.0;

    for (scene_index, scene) in scenes.iter().enumerate() {
        let scene_end = scene_start + scene.duration;
        if elapsed < scene_end {
            let scene_elapsed = elapsed - scene_start;
            return Resolution::Active(TimelineState {
                scene_index,
                scene_elapsed,
                opacity: crossfade_opacity(scene_elapsed, scene.duration, transition),
            });
        }
        scene_start = scene_end;
    }

    Resolution::Finished
}

/// Opacity of a scene `scene_elapsed` seconds into a `duration`-long run.
///
/// Ramps 0 -> 1 over the first `transition` seconds and 1 -> 0 over the last
/// `transition` seconds. When the two windows overlap the lower value wins,
/// giving a triangular fade that peaks at the scene midpoint.
pub fn crossfade_opacity(scene_elapsed: f64, duration: f64, transition: f64) -> f64 {
    if transition <= 0.0 {
        return 1.0;
    }

    let fade_in = scene_elapsed / transition;
    let fade_out = (duration - scene_elapsed) / transition;
    fade_in.min(fade_out).clamp(0.0, 1.0)
}
