//! Playback clock and the per-run state shared by the driver and controller.

use crate::scheduler::{FrameRequest, Scheduler, TimerId};
use crate::TextAnimator;

/// How the clock treats time spent paused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ResumeMode {
    /// Keep the original epoch; paused wall time still counts, so a long
    /// pause skips ahead on resume
    #[default]
    KeepEpoch,
    /// Shift the epoch forward by the paused span; resume where playback
    /// stopped
    ExcludePaused,
}

/// Wall-clock anchor for a playback run.
///
/// Times are host timestamps in milliseconds (for example the value passed
/// to a `requestAnimationFrame` callback). Elapsed time is reported in
/// seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackClock {
    epoch: Option<f64>,
    running: bool,
    paused_at: Option<f64>,
}

impl PlaybackClock {
    /// Create a clock with no epoch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or resume the clock at host time `now_ms`.
    ///
    /// The first start sets the epoch. Later starts keep it, or shift it by
    /// the paused span under [`ResumeMode::ExcludePaused`].
    pub fn start(&mut self, now_ms: f64, mode: ResumeMode) {
        if self.running {
            return;
        }
        match (self.epoch, self.paused_at, mode) {
            (None, _, _) => self.epoch = Some(now_ms),
            (Some(epoch), Some(paused_at), ResumeMode::ExcludePaused) => {
                self.epoch = Some(epoch + (now_ms - paused_at).max(0.0));
            }
            _ => {}
        }
        self.paused_at = None;
        self.running = true;
    }

    /// Stop the clock at host time `now_ms`.
    pub fn stop(&mut self, now_ms: f64) {
        if self.running {
            self.running = false;
            self.paused_at = Some(now_ms);
        }
    }

    /// Seconds of playback at host time `now_ms`, if running.
    pub fn elapsed(&self, now_ms: f64) -> Option<f64> {
        match (self.running, self.epoch) {
            (true, Some(epoch)) => Some((now_ms - epoch) / 1000.0),
            _ => None,
        }
    }

    /// Check if the clock is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the epoch, if playback has ever started.
    #[inline]
    pub fn epoch(&self) -> Option<f64> {
        self.epoch
    }
}

/// Play/pause state of the reel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// State owned by one playback run.
///
/// Passed by `&mut` to the render loop driver and the playback controller.
/// Recreated whenever playback restarts from the first scene.
#[derive(Clone, Debug)]
pub struct PlaybackSession {
    pub(crate) state: PlaybackState,
    pub(crate) clock: PlaybackClock,
    /// Scene drawn by the most recent frame
    pub(crate) rendered_scene: Option<usize>,
    pub(crate) animator: TextAnimator,
    pub(crate) frame: Option<FrameRequest>,
    pub(crate) timer: Option<TimerId>,
    /// Scene whose clip refused to play; not retried until the scene changes
    pub(crate) rejected_media: Option<usize>,
    pub(crate) finished: bool,
}

impl PlaybackSession {
    /// Create a fresh, paused session.
    pub fn new(animator: TextAnimator) -> Self {
        Self {
            state: PlaybackState::Paused,
            clock: PlaybackClock::new(),
            rendered_scene: None,
            animator,
            frame: None,
            timer: None,
            rejected_media: None,
            finished: false,
        }
    }

    /// Get the play/pause state.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get the playback clock.
    #[inline]
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Get the scene drawn by the most recent frame.
    #[inline]
    pub fn rendered_scene(&self) -> Option<usize> {
        self.rendered_scene
    }

    /// Scene whose media play/pause follows the controller.
    #[inline]
    pub fn active_scene(&self) -> usize {
        self.rendered_scene.unwrap_or(0)
    }

    /// Get the narration animator.
    #[inline]
    pub fn animator(&self) -> &TextAnimator {
        &self.animator
    }

    /// Get the outstanding frame request.
    #[inline]
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.frame
    }

    /// Get the running animation timer.
    #[inline]
    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Check if this run reached the end of the timeline.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Start the animator's timer if it needs one and none is running.
    pub(crate) fn arm_timer<H: Scheduler>(&mut self, scheduler: &mut H) {
        if self.timer.is_some() {
            return;
        }
        if let Some(interval) = self.animator.interval_ms() {
            self.timer = Some(scheduler.start_timer(interval));
        }
    }

    /// Cancel the animator's timer, if running.
    pub(crate) fn disarm_timer<H: Scheduler>(&mut self, scheduler: &mut H) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel_timer(timer);
        }
    }

    /// Cancel the outstanding frame request, if any.
    pub(crate) fn cancel_frame<H: Scheduler>(&mut self, scheduler: &mut H) {
        if let Some(request) = self.frame.take() {
            scheduler.cancel_frame(request);
        }
    }

    /// Deliver a timer tick.
    ///
    /// Ticks from any timer other than the one currently armed are stale and
    /// ignored. The timer is cancelled once the animation needs no more
    /// ticks. Returns true if the narration changed.
    pub fn on_timer<H: Scheduler>(&mut self, timer: TimerId, scheduler: &mut H) -> bool {
        if self.timer != Some(timer) || self.state != PlaybackState::Playing {
            log::debug!("ignoring stale timer {:?}", timer);
            return false;
        }

        let changed = self.animator.tick();
        if !self.animator.needs_timer() {
            self.disarm_timer(scheduler);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::{MediaRef, SceneDescriptor, TextAnimationKind, TextPosition};

    #[test]
    fn test_clock_first_start_sets_epoch() {
        let mut clock = PlaybackClock::new();
        assert_eq!(clock.elapsed(500.0), None);

        clock.start(1000.0, ResumeMode::KeepEpoch);
        assert_eq!(clock.epoch(), Some(1000.0));
        assert_eq!(clock.elapsed(3500.0), Some(2.5));
    }

    #[test]
    fn test_clock_keep_epoch_counts_pause() {
        let mut clock = PlaybackClock::new();
        clock.start(0.0, ResumeMode::KeepEpoch);
        clock.stop(1000.0);
        assert_eq!(clock.elapsed(2000.0), None);

        clock.start(5000.0, ResumeMode::KeepEpoch);
        assert_eq!(clock.elapsed(5000.0), Some(5.0));
    }

    #[test]
    fn test_clock_exclude_paused_resumes() {
        let mut clock = PlaybackClock::new();
        clock.start(0.0, ResumeMode::ExcludePaused);
        clock.stop(1000.0);
        clock.start(5000.0, ResumeMode::ExcludePaused);
        assert_eq!(clock.epoch(), Some(4000.0));
        assert_eq!(clock.elapsed(5000.0), Some(1.0));
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut scheduler = ManualScheduler::new();
        let mut session = PlaybackSession::new(TextAnimator::default());
        session.state = PlaybackState::Playing;
        session.animator.activate(&SceneDescriptor::new(
            0,
            "ab",
            TextPosition::MiddleCenter,
            TextAnimationKind::Typing,
            MediaRef::new("a.png"),
            2.0,
        ));
        session.arm_timer(&mut scheduler);
        let live = session.active_timer().unwrap();

        assert!(!session.on_timer(TimerId(live.0 + 100), &mut scheduler));
        assert_eq!(session.animator().revealed(), 0);

        assert!(session.on_timer(live, &mut scheduler));
        assert!(session.on_timer(live, &mut scheduler));
        assert_eq!(session.animator().text(), "ab");
        // Typing complete: timer torn down
        assert_eq!(session.active_timer(), None);
        assert!(scheduler.timers().is_empty());
    }
}
