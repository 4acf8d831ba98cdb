//! Media and audio handles supplied by the host.
//!
//! The engine never inspects what a handle is at draw time. The provider
//! tags each asset once as [`SceneMedia::StillImage`] or
//! [`SceneMedia::TimedMedia`], and timed media exposes its playback controls
//! through [`TimedMedia`].

/// Errors reported by a host when it refuses to start playback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// The host rejected the request (e.g. an autoplay policy)
    #[error("Playback rejected by host: {0}")]
    Rejected(String),
}

/// A ready-to-draw media asset.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneMedia<I, V> {
    /// A still image
    StillImage(I),
    /// A clip with its own playback position
    TimedMedia(V),
}

impl<I, V> SceneMedia<I, V> {
    /// Get the timed media handle mutably, if any.
    pub fn as_timed_mut(&mut self) -> Option<&mut V> {
        match self {
            SceneMedia::TimedMedia(video) => Some(video),
            SceneMedia::StillImage(_) => None,
        }
    }
}

/// Playback controls for a clip.
pub trait TimedMedia {
    /// Whether the current frame can be decoded and drawn.
    fn is_ready(&self) -> bool;

    /// Whether the clip is paused.
    fn is_paused(&self) -> bool;

    /// Move the playback position to `seconds` into the clip.
    fn seek(&mut self, seconds: f64);

    /// Start or resume playback.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback.
    fn pause(&mut self);
}

/// Background audio controls.
pub trait AudioTrack {
    /// Start or resume playback.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback.
    fn pause(&mut self);

    /// Set the output volume (0.0 - 1.0).
    fn set_volume(&mut self, volume: f64);

    /// Loop back to the start when the track ends.
    fn set_looping(&mut self, looping: bool);
}

/// In-memory clip for headless hosts.
///
/// Tracks the state a real clip would have without decoding anything.
/// Readiness can be flipped at any time to simulate buffering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadlessClip {
    /// Label used when the clip is recorded as drawn
    pub label: String,
    ready: bool,
    playing: bool,
    position: f64,
    reject_play: bool,
}

impl HeadlessClip {
    /// Create a paused clip that is ready to draw.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ready: true,
            ..Self::default()
        }
    }

    /// Mark the clip as buffering or ready.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Make every future `play()` call fail.
    pub fn reject_playback(mut self) -> Self {
        self.reject_play = true;
        self
    }

    /// Get the last position passed to `seek()`.
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }
}

impl TimedMedia for HeadlessClip {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn is_paused(&self) -> bool {
        !self.playing
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds.max(0.0);
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.reject_play {
            return Err(PlaybackError::Rejected(format!("{} refused to play", self.label)));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}

/// Audio track that only records what it was told.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadlessAudio {
    playing: bool,
    volume: f64,
    looping: bool,
    reject_play: bool,
}

impl HeadlessAudio {
    /// Create a paused track at full volume.
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            ..Self::default()
        }
    }

    /// Make every future `play()` call fail.
    pub fn reject_playback(mut self) -> Self {
        self.reject_play = true;
        self
    }

    /// Check if the track is playing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Get the current volume.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Check if the track loops.
    #[inline]
    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

impl AudioTrack for HeadlessAudio {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.reject_play {
            return Err(PlaybackError::Rejected("audio output unavailable".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}

/// `<audio>` playback and promise handling shared with the video surface.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlAudioElement, HtmlMediaElement};

    /// Log a `play()` promise that rejects after the call returned.
    ///
    /// Browsers report autoplay refusals through the promise, not the call.
    pub(crate) fn report_rejection(promise: js_sys::Promise, what: &'static str) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("{} playback rejected: {:?}", what, err);
            }
        });
    }

    impl AudioTrack for HtmlAudioElement {
        fn play(&mut self) -> Result<(), PlaybackError> {
            let element: &HtmlMediaElement = self.as_ref();
            let promise = element
                .play()
                .map_err(|err| PlaybackError::Rejected(format!("{:?}", err)))?;
            report_rejection(promise, "audio");
            Ok(())
        }

        fn pause(&mut self) {
            let element: &HtmlMediaElement = self.as_ref();
            if let Err(err) = element.pause() {
                log::warn!("audio pause failed: {:?}", err);
            }
        }

        fn set_volume(&mut self, volume: f64) {
            let element: &HtmlMediaElement = self.as_ref();
            element.set_volume(volume.clamp(0.0, 1.0));
        }

        fn set_looping(&mut self, looping: bool) {
            let element: &HtmlMediaElement = self.as_ref();
            element.set_loop(looping);
        }
    }
}
