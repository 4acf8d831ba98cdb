//! Render loop driver: one call per display refresh.
//!
//! Each frame runs strictly in order: sample the clock, resolve the
//! timeline, apply scene-change side effects, draw. Media readiness is
//! polled here rather than awaited; a clip that is still buffering is just
//! not drawn this frame.

use crate::controller;
use crate::render::{self, SceneFrame, Surface};
use crate::scheduler::Scheduler;
use crate::session::{PlaybackSession, PlaybackState};
use crate::timeline::{resolve, Resolution, TimelineState};
use crate::{AudioTrack, Stage, TimedMedia};

/// What a frame callback did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// A scene was drawn and the next frame requested
    Rendered(TimelineState),
    /// The timeline ran out; playback is now paused
    Finished,
    /// Playback is not running; nothing was drawn
    Idle,
}

/// Handle one display refresh at host time `now_ms`.
pub fn on_frame<S, A, H>(session: &mut PlaybackSession, stage: &mut Stage<S, A, H>, now_ms: f64) -> FrameOutcome
where
    S: Surface,
    A: AudioTrack,
    H: Scheduler,
{
    // The request that delivered this callback is spent.
    session.frame = None;

    if session.state != PlaybackState::Playing {
        return FrameOutcome::Idle;
    }
    let Some(elapsed) = session.clock.elapsed(now_ms) else {
        return FrameOutcome::Idle;
    };

    let timeline = match resolve(elapsed, stage.catalog.scenes(), stage.details.transition_secs) {
        Resolution::Active(timeline) => timeline,
        Resolution::Finished => {
            controller::finish(session, stage, now_ms);
            return FrameOutcome::Finished;
        }
    };

    let index = timeline.scene_index;
    if session.rendered_scene != Some(index) {
        enter_scene(session, stage, index);
    }
    wake_media(session, stage, index);

    let scene = &stage.catalog[index];
    let frame = SceneFrame {
        opacity: timeline.opacity,
        media: stage.media.get(index),
        text: session.animator.text(),
        position: &scene.text_position,
    };
    let drawn = render::draw_scene(&mut stage.surface, &frame, &stage.render);
    log::trace!(
        "frame t={:.3}s scene={} local={:.3}s opacity={:.2} media={}",
        elapsed,
        index,
        timeline.scene_elapsed,
        timeline.opacity,
        drawn.media_drawn
    );

    session.frame = Some(stage.scheduler.request_frame());
    FrameOutcome::Rendered(timeline)
}

/// Scene-change side effects, applied before the new scene's first draw.
fn enter_scene<S, A, H>(session: &mut PlaybackSession, stage: &mut Stage<S, A, H>, index: usize)
where
    S: Surface,
    A: AudioTrack,
    H: Scheduler,
{
    session.disarm_timer(&mut stage.scheduler);

    // Before the first frame the controller has already started scene 0.
    let outgoing = session.active_scene();
    if outgoing != index {
        if let Some(clip) = stage.media.timed_mut(outgoing) {
            clip.pause();
        }
    }
    log::debug!("scene change {:?} -> {}", session.rendered_scene, index);

    session.animator.activate(&stage.catalog[index]);
    session.arm_timer(&mut stage.scheduler);
    session.rejected_media = None;

    if let Some(clip) = stage.media.timed_mut(index) {
        clip.seek(stage.details.media_start_offset_secs);
    }
    session.rendered_scene = Some(index);
}

/// Start a clip that has finished buffering but is not playing yet.
fn wake_media<S, A, H>(session: &mut PlaybackSession, stage: &mut Stage<S, A, H>, index: usize)
where
    S: Surface,
    A: AudioTrack,
    H: Scheduler,
{
    if session.rejected_media == Some(index) {
        return;
    }
    let Some(clip) = stage.media.timed_mut(index) else {
        return;
    };
    if clip.is_ready() && clip.is_paused() {
        if let Err(err) = clip.play() {
            log::warn!("scene {}: clip will stay paused: {}", index, err);
            session.rejected_media = Some(index);
        }
    }
}
