//! Per-scene narration animation.

use unicode_segmentation::UnicodeSegmentation;

use crate::{SceneDescriptor, TextAnimationKind};

/// Default interval between typing reveals, in milliseconds.
pub const DEFAULT_TYPING_INTERVAL_MS: u32 = 100;
/// Default interval between blink toggles, in milliseconds.
pub const DEFAULT_BLINK_INTERVAL_MS: u32 = 500;

/// Typewriter reveal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingState {
    /// Scene assigned but reveal not started
    Idle,
    /// This many graphemes are visible
    Revealing(usize),
    /// The whole narration is visible; no more ticks are needed
    Complete,
}

/// Blink toggle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlinkState {
    #[default]
    Visible,
    Hidden,
}

/// Current animation state for the active scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    /// No scene has been activated yet
    Inactive,
    Typing(TypingState),
    Blink(BlinkState),
    /// Scene has no text animation and draws no text
    Silent,
}

/// Narration animator for one scene at a time.
///
/// Like a frame controller, the animator does not own a clock. The host
/// arms a timer at `interval_ms()` and calls `tick()` from it; frames only
/// read `text()`. Calling `activate()` with a scene always restarts from the
/// initial state, so a scene change can never inherit a previous reveal.
///
/// ## Example
///
/// ```rust
/// use scene_reel_core::{SceneCatalog, TextAnimator};
///
/// let catalog = SceneCatalog::demo();
/// let mut animator = TextAnimator::default();
/// animator.activate(&catalog[0]); // typing
///
/// for _ in 0..4 {
///     animator.tick();
/// }
/// assert_eq!(animator.text(), "This");
/// ```
#[derive(Clone, Debug)]
pub struct TextAnimator {
    /// Scene the current state belongs to
    scene_index: Option<usize>,
    /// Full narration of that scene
    narration: String,
    /// Byte offset just past each grapheme cluster
    grapheme_ends: Vec<usize>,
    state: AnimationState,
    typing_interval_ms: u32,
    blink_interval_ms: u32,
}

impl Default for TextAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_INTERVAL_MS, DEFAULT_BLINK_INTERVAL_MS)
    }
}

impl TextAnimator {
    /// Create an inactive animator with the given tick intervals.
    pub fn new(typing_interval_ms: u32, blink_interval_ms: u32) -> Self {
        Self {
            scene_index: None,
            narration: String::new(),
            grapheme_ends: Vec::new(),
            state: AnimationState::Inactive,
            typing_interval_ms: typing_interval_ms.max(1),
            blink_interval_ms: blink_interval_ms.max(1),
        }
    }

    /// Reset the animator for `scene` and start its animation.
    pub fn activate(&mut self, scene: &SceneDescriptor) {
        self.scene_index = Some(scene.index);
        self.narration.clone_from(&scene.narration);
        self.grapheme_ends = scene
            .narration
            .grapheme_indices(true)
            .map(|(offset, g)| offset + g.len())
            .collect();

        self.state = match scene.text_animation {
            TextAnimationKind::Typing => AnimationState::Typing(TypingState::Idle),
            TextAnimationKind::Blink => AnimationState::Blink(BlinkState::Visible),
            TextAnimationKind::None => AnimationState::Silent,
        };

        if self.state == AnimationState::Typing(TypingState::Idle) {
            self.state = if self.grapheme_ends.is_empty() {
                AnimationState::Typing(TypingState::Complete)
            } else {
                AnimationState::Typing(TypingState::Revealing(0))
            };
        }
    }

    /// Stop animating without leaving the scene.
    ///
    /// Blink returns to visible. A typing reveal keeps its progress so a
    /// resumed scene carries on where it left off.
    pub fn stop(&mut self) {
        if let AnimationState::Blink(_) = self.state {
            self.state = AnimationState::Blink(BlinkState::Visible);
        }
    }

    /// Advance one timer period.
    ///
    /// Returns true if the rendered text changed.
    pub fn tick(&mut self) -> bool {
        match self.state {
            AnimationState::Typing(TypingState::Revealing(count)) => {
                let next = count + 1;
                self.state = if next >= self.grapheme_ends.len() {
                    AnimationState::Typing(TypingState::Complete)
                } else {
                    AnimationState::Typing(TypingState::Revealing(next))
                };
                true
            }
            AnimationState::Blink(BlinkState::Visible) => {
                self.state = AnimationState::Blink(BlinkState::Hidden);
                true
            }
            AnimationState::Blink(BlinkState::Hidden) => {
                self.state = AnimationState::Blink(BlinkState::Visible);
                true
            }
            _ => false,
        }
    }

    /// Check if further ticks can change the output.
    #[inline]
    pub fn needs_timer(&self) -> bool {
        matches!(
            self.state,
            AnimationState::Typing(TypingState::Idle)
                | AnimationState::Typing(TypingState::Revealing(_))
                | AnimationState::Blink(_)
        )
    }

    /// Get the timer period for the current state, if it needs one.
    pub fn interval_ms(&self) -> Option<u32> {
        if !self.needs_timer() {
            return None;
        }
        match self.state {
            AnimationState::Typing(_) => Some(self.typing_interval_ms),
            AnimationState::Blink(_) => Some(self.blink_interval_ms),
            _ => None,
        }
    }

    /// Get the text to draw this frame.
    pub fn text(&self) -> &str {
        match self.state {
            AnimationState::Typing(TypingState::Idle) => "",
            AnimationState::Typing(TypingState::Revealing(count)) => {
                let end = match count {
                    0 => 0,
                    n => self.grapheme_ends[n - 1],
                };
                &self.narration[..end]
            }
            AnimationState::Typing(TypingState::Complete) => &self.narration,
            AnimationState::Blink(BlinkState::Visible) => &self.narration,
            AnimationState::Blink(BlinkState::Hidden) => "",
            AnimationState::Inactive | AnimationState::Silent => "",
        }
    }

    /// Get the number of graphemes currently revealed.
    pub fn revealed(&self) -> usize {
        match self.state {
            AnimationState::Typing(TypingState::Revealing(count)) => count,
            AnimationState::Typing(TypingState::Complete) => self.grapheme_ends.len(),
            AnimationState::Blink(BlinkState::Visible) => self.grapheme_ends.len(),
            _ => 0,
        }
    }

    /// Check if the narration is currently shown at all.
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.text().is_empty()
    }

    /// Get the current animation state.
    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Get the index of the scene this state belongs to.
    #[inline]
    pub fn scene_index(&self) -> Option<usize> {
        self.scene_index
    }
}
