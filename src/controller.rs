//! Playback controller: the play/pause toggle.

use crate::render::Surface;
use crate::scheduler::Scheduler;
use crate::session::{PlaybackSession, PlaybackState};
use crate::{AudioTrack, Stage, TimedMedia};

/// Flip between Paused and Playing at host time `now_ms`.
///
/// Returns the new state. Pausing cancels the pending frame and the
/// animation timer before returning, so no stale callback can act on the
/// paused session.
pub fn toggle_play<S, A, H>(session: &mut PlaybackSession, stage: &mut Stage<S, A, H>, now_ms: f64) -> PlaybackState
where
    S: Surface,
    A: AudioTrack,
    H: Scheduler,
{
    match session.state {
        PlaybackState::Playing => pause(session, stage, now_ms),
        PlaybackState::Paused => play(session, stage, now_ms),
    }
    session.state
}

fn play<S, A, H>(session: &mut PlaybackSession, stage: &mut Stage<S, A, H>, now_ms: f64)
where
    S: Surface,
    A: AudioTrack,
    H: Scheduler,
{
    if session.finished {
        log::info!("restarting from the first scene");
        *session = PlaybackSession::new(stage.details.animator());
    }

    session.clock.start(now_ms, stage.details.resume);
    session.state = PlaybackState::Playing;
    session.rejected_media = None;

    if let Err(err) = stage.audio.play() {
        log::warn!("background audio will stay paused: {}", err);
    }

    let active = session.active_scene();
    if let Some(clip) = stage.media.timed_mut(active) {
        clip.seek(stage.details.media_start_offset_secs);
        if let Err(err) = clip.play() {
            log::warn!("scene {}: clip will stay paused: {}", active, err);
            session.rejected_media = Some(active);
        }
    }

    // On a fresh start the first frame activates the scene and its timer.
    if session.rendered_scene.is_some() {
        session.arm_timer(&mut stage.scheduler);
    }
    if session.frame.is_none() {
        session.frame = Some(stage.scheduler.request_frame());
    }
    log::info!("playing (epoch {:?})", session.clock.epoch());
}

fn pause<S, A, H>(session: &mut PlaybackSession, stage: &mut Stage<S, A, H>, now_ms: f64)
where
    S: Surface,
    A: AudioTrack,
    H: Scheduler,
{
    session.state = PlaybackState::Paused;
    session.clock.stop(now_ms);

    stage.audio.pause();
    if let Some(clip) = stage.media.timed_mut(session.active_scene()) {
        clip.pause();
    }

    session.cancel_frame(&mut stage.scheduler);
    session.disarm_timer(&mut stage.scheduler);
    session.animator.stop();
    log::info!("paused");
}

/// End of timeline: pause and mark the run finished.
pub(crate) fn finish<S, A, H>(session: &mut PlaybackSession, stage: &mut Stage<S, A, H>, now_ms: f64)
where
    S: Surface,
    A: AudioTrack,
    H: Scheduler,
{
    pause(session, stage, now_ms);
    session.finished = true;
    log::info!("timeline finished after {:.2}s", stage.catalog.total_duration());
}
