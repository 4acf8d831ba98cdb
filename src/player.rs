//! The player: a scene reel bound to a host surface, audio track and scheduler.

use crate::driver::{self, FrameOutcome};
use crate::loader::{MediaStatus, MediaTable};
use crate::media::TimedMedia;
use crate::render::{RenderConfig, Surface};
use crate::scheduler::{Scheduler, TimerId};
use crate::session::{PlaybackSession, PlaybackState};
use crate::{AudioTrack, PlayerDetails, ReelManifest, SceneCatalog};

/// Everything a playback run acts on but does not own the lifecycle of.
pub struct Stage<S: Surface, A, H> {
    pub catalog: SceneCatalog,
    pub details: PlayerDetails,
    pub render: RenderConfig,
    pub surface: S,
    pub media: MediaTable<S::Image, S::Video>,
    pub audio: A,
    pub scheduler: H,
}

/// A scene reel ready to play.
///
/// The host forwards three events: display refreshes to
/// [`on_frame`](Self::on_frame), timer ticks to [`on_timer`](Self::on_timer)
/// and user clicks to [`toggle_play`](Self::toggle_play). Timestamps are host
/// milliseconds from a monotonic clock.
///
/// ## Example
///
/// ```rust
/// use scene_reel_core::render::RecordingSurface;
/// use scene_reel_core::scheduler::ManualScheduler;
/// use scene_reel_core::{FrameOutcome, HeadlessAudio, MediaTable, PlaybackState, Player, ReelManifest};
///
/// let reel = ReelManifest::demo();
/// let media = MediaTable::with_scene_count(reel.catalog.len());
/// let mut player = Player::new(reel, RecordingSurface::default(), media, HeadlessAudio::new(), ManualScheduler::new());
///
/// assert_eq!(player.toggle_play(0.0), PlaybackState::Playing);
/// assert!(matches!(player.on_frame(3500.0), FrameOutcome::Rendered(t) if t.scene_index == 1));
/// assert_eq!(player.on_frame(8000.0), FrameOutcome::Finished);
/// assert_eq!(player.status_label(), "Paused/Stopped");
/// ```
pub struct Player<S: Surface, A, H> {
    stage: Stage<S, A, H>,
    session: PlaybackSession,
}

impl<S, A, H> Player<S, A, H>
where
    S: Surface,
    A: AudioTrack,
    H: Scheduler,
{
    /// Create a paused player.
    ///
    /// The media table is padded or truncated to the catalog length; the
    /// audio track gets the configured volume and looping.
    pub fn new(reel: ReelManifest, surface: S, mut media: MediaTable<S::Image, S::Video>, mut audio: A, scheduler: H) -> Self {
        let ReelManifest { player: details, catalog } = reel;

        media.resize(catalog.len());
        audio.set_volume(details.audio_volume);
        audio.set_looping(details.audio_loop);

        log::debug!(
            "player ready: {} scenes, {:.2}s total",
            catalog.len(),
            catalog.total_duration()
        );

        let session = PlaybackSession::new(details.animator());
        Self {
            stage: Stage {
                render: details.render_config(),
                catalog,
                details,
                surface,
                media,
                audio,
                scheduler,
            },
            session,
        }
    }

    /// Flip between playing and paused. Returns the new state.
    pub fn toggle_play(&mut self, now_ms: f64) -> PlaybackState {
        crate::controller::toggle_play(&mut self.session, &mut self.stage, now_ms)
    }

    /// Handle one display refresh.
    pub fn on_frame(&mut self, now_ms: f64) -> FrameOutcome {
        driver::on_frame(&mut self.session, &mut self.stage, now_ms)
    }

    /// Handle one animation timer tick. Returns true if the narration changed.
    pub fn on_timer(&mut self, timer: TimerId) -> bool {
        self.session.on_timer(timer, &mut self.stage.scheduler)
    }

    /// Replace one scene's media, e.g. when a late asset arrives.
    ///
    /// A clip arriving for the scene on screen is cued to the start offset;
    /// the next frame starts it once it is ready.
    pub fn set_media(&mut self, index: usize, status: MediaStatus<S::Image, S::Video>) {
        self.stage.media.set(index, status);
        if self.session.rendered_scene() == Some(index) {
            if let Some(clip) = self.stage.media.timed_mut(index) {
                clip.seek(self.stage.details.media_start_offset_secs);
            }
        }
        if self.stage.media.is_complete() {
            log::debug!("all scene media resolved");
        }
    }

    /// Get the play/pause state.
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.session.state()
    }

    /// Check if the reel is playing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.session.state() == PlaybackState::Playing
    }

    /// Label for the host's play button.
    pub fn status_label(&self) -> &'static str {
        match self.session.state() {
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused/Stopped",
        }
    }

    #[inline]
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    #[inline]
    pub fn catalog(&self) -> &SceneCatalog {
        &self.stage.catalog
    }

    #[inline]
    pub fn details(&self) -> &PlayerDetails {
        &self.stage.details
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.stage.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.stage.surface
    }

    #[inline]
    pub fn media(&self) -> &MediaTable<S::Image, S::Video> {
        &self.stage.media
    }

    #[inline]
    pub fn media_mut(&mut self) -> &mut MediaTable<S::Image, S::Video> {
        &mut self.stage.media
    }

    #[inline]
    pub fn audio(&self) -> &A {
        &self.stage.audio
    }

    #[inline]
    pub fn scheduler(&self) -> &H {
        &self.stage.scheduler
    }

    #[inline]
    pub fn scheduler_mut(&mut self) -> &mut H {
        &mut self.stage.scheduler
    }
}

/// Browser wiring: canvas, `<audio>`, `requestAnimationFrame` and clicks.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use crate::loader::{load_scene_media, web::ElementProvider};
    use crate::render::web::CanvasSurface;
    use crate::render::DEFAULT_SURFACE_SIZE;
    use crate::scheduler::web::WindowScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{HtmlAudioElement, HtmlCanvasElement, MouseEvent};

    /// A player drawing to a `<canvas>`.
    pub type WebPlayer = Player<CanvasSurface, HtmlAudioElement, WindowScheduler>;

    /// Load every asset, then attach a player to `canvas`.
    ///
    /// Progress is drawn on the canvas while assets load. Clicking the canvas
    /// toggles playback. The returned handle keeps the player alive; the
    /// callbacks only hold weak references to it.
    pub async fn mount(canvas: HtmlCanvasElement, reel: ReelManifest) -> Result<Rc<RefCell<WebPlayer>>, JsValue> {
        let mut surface = CanvasSurface::new(&canvas, DEFAULT_SURFACE_SIZE).map_err(|e| JsValue::from_str(&e))?;
        let render = reel.player.render_config();

        let provider = ElementProvider::new()?;
        let media = load_scene_media(&provider, &reel.catalog, |progress| {
            log::info!("{}", progress.message());
            surface.show_message(&progress.message(), &render.style);
        })
        .await;

        let audio = match reel.player.audio_source.as_deref() {
            Some(src) => HtmlAudioElement::new_with_src(src)?,
            None => HtmlAudioElement::new()?,
        };

        let player = Rc::new(RefCell::new(Player::new(
            reel,
            surface,
            media,
            audio,
            WindowScheduler::new(),
        )));

        let weak = Rc::downgrade(&player);
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            if let Some(player) = weak.upgrade() {
                player.borrow_mut().on_frame(now);
            }
        });

        let weak = Rc::downgrade(&player);
        let on_timer = Closure::<dyn FnMut(JsValue)>::new(move |id: JsValue| {
            if let (Some(player), Some(id)) = (weak.upgrade(), id.as_f64()) {
                player.borrow_mut().on_timer(TimerId(id as u32));
            }
        });
        player.borrow_mut().scheduler_mut().bind(on_frame, on_timer);

        let weak = Rc::downgrade(&player);
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
            let Some(player) = weak.upgrade() else {
                return;
            };
            let now = web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0);
            let state = player.borrow_mut().toggle_play(now);
            log::debug!("toggle -> {:?}", state);
        });
        canvas.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        log::info!("player mounted, click the canvas to play");
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::scheduler::ManualScheduler;
    use crate::{HeadlessAudio, HeadlessClip, ResumeMode, SceneMedia, TimedMedia};

    type TestPlayer = Player<RecordingSurface, HeadlessAudio, ManualScheduler>;

    fn demo_media() -> MediaTable<String, HeadlessClip> {
        let mut media = MediaTable::with_scene_count(2);
        media.set(0, MediaStatus::Ready(SceneMedia::StillImage("photo".into())));
        media.set(1, MediaStatus::Ready(SceneMedia::TimedMedia(HeadlessClip::new("clip"))));
        media
    }

    fn player_with(reel: ReelManifest, media: MediaTable<String, HeadlessClip>, audio: HeadlessAudio) -> TestPlayer {
        Player::new(reel, RecordingSurface::default(), media, audio, ManualScheduler::new())
    }

    /// Fire the pending frame the way a host loop would.
    fn deliver(player: &mut TestPlayer, now_ms: f64) -> FrameOutcome {
        player.scheduler_mut().take_frame();
        player.on_frame(now_ms)
    }

    fn demo_player() -> TestPlayer {
        player_with(ReelManifest::demo(), demo_media(), HeadlessAudio::new())
    }

    fn clip(player: &mut TestPlayer) -> &mut HeadlessClip {
        player.media_mut().timed_mut(1).unwrap()
    }

    fn timer(player: &TestPlayer) -> TimerId {
        player.session().active_timer().unwrap()
    }

    #[test]
    fn test_new_configures_audio() {
        let player = demo_player();
        assert_eq!(player.audio().volume(), 0.5);
        assert!(player.audio().is_looping());
        assert!(!player.audio().is_playing());
        assert_eq!(player.state(), PlaybackState::Paused);
        assert_eq!(player.status_label(), "Paused/Stopped");
    }

    #[test]
    fn test_new_resizes_media_table() {
        let player = player_with(ReelManifest::demo(), MediaTable::with_scene_count(5), HeadlessAudio::new());
        assert_eq!(player.media().len(), 2);
    }

    #[test]
    fn test_first_play_starts_clock_audio_and_frames() {
        let mut player = demo_player();
        assert_eq!(player.toggle_play(1000.0), PlaybackState::Playing);

        assert!(player.is_playing());
        assert_eq!(player.status_label(), "Playing");
        assert_eq!(player.session().clock().epoch(), Some(1000.0));
        assert!(player.audio().is_playing());
        assert!(player.scheduler().pending_frame().is_some());
        // The animator starts with the first frame, not the click.
        assert!(player.scheduler().timers().is_empty());
    }

    #[test]
    fn test_first_frame_fades_in_first_scene() {
        let mut player = demo_player();
        player.toggle_play(1000.0);

        let outcome = deliver(&mut player, 1500.0);
        let FrameOutcome::Rendered(timeline) = outcome else {
            panic!("expected a rendered frame, got {:?}", outcome);
        };
        assert_eq!(timeline.scene_index, 0);
        assert!((timeline.opacity - 0.5).abs() < 1e-9);

        assert_eq!(player.session().rendered_scene(), Some(0));
        assert_eq!(player.scheduler().timers(), &[(timer(&player), 100)]);
        assert!(player.scheduler().pending_frame().is_some());

        let commands = player.surface().commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        assert_eq!(commands[1], DrawCommand::GlobalAlpha(0.5));
        assert!(matches!(&commands[2], DrawCommand::Image { label, .. } if label == "photo"));
        // Nothing typed yet
        assert!(player.surface().texts().is_empty());
    }

    #[test]
    fn test_typing_ticks_reveal_narration() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 16.0);

        let typing = timer(&player);
        for _ in 0..4 {
            assert!(player.on_timer(typing));
        }
        assert_eq!(player.session().animator().text(), "This");

        player.surface_mut().take_commands();
        deliver(&mut player, 1200.0);
        assert_eq!(player.surface().texts(), vec!["This"]);
    }

    #[test]
    fn test_typing_resumes_where_pause_left_it() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 16.0);
        let typing = timer(&player);
        for _ in 0..4 {
            player.on_timer(typing);
        }

        player.toggle_play(500.0);
        player.toggle_play(600.0);
        assert_eq!(player.session().animator().text(), "This");

        assert!(player.on_timer(timer(&player)));
        assert_eq!(player.session().animator().text(), "This ");
    }

    #[test]
    fn test_scene_change_switches_animation_and_media() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 100.0);
        let typing = timer(&player);

        player.surface_mut().take_commands();
        let outcome = deliver(&mut player, 3500.0);
        assert!(matches!(outcome, FrameOutcome::Rendered(t) if t.scene_index == 1));

        // Typing timer replaced by the blink timer
        let blink = timer(&player);
        assert_ne!(blink, typing);
        assert_eq!(player.scheduler().timers(), &[(blink, 500)]);
        assert!(!player.on_timer(typing));

        // Clip cued to the start offset and playing
        assert_eq!(clip(&mut player).position(), 3.0);
        assert!(!clip(&mut player).is_paused());

        let commands = player.surface().commands();
        assert!(commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Video { label, .. } if label == "clip")));
        // 21 chars * 18 px; anchored top-right with a 20 px margin
        assert!(commands.contains(&DrawCommand::Text {
            text: "Here comes the video!".into(),
            x: 882.0,
            y: 20.0,
        }));
    }

    #[test]
    fn test_blink_hides_text_between_frames() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 4000.0);

        assert!(player.on_timer(timer(&player)));
        player.surface_mut().take_commands();
        deliver(&mut player, 4500.0);
        assert!(player.surface().texts().is_empty());

        assert!(player.on_timer(timer(&player)));
        deliver(&mut player, 4600.0);
        assert_eq!(player.surface().texts(), vec!["Here comes the video!"]);
    }

    #[test]
    fn test_timeline_end_finishes_and_pauses() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 4000.0);

        assert_eq!(deliver(&mut player, 8000.0), FrameOutcome::Finished);
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(player.session().is_finished());
        assert!(!player.audio().is_playing());
        assert!(clip(&mut player).is_paused());
        assert!(player.scheduler().pending_frame().is_none());
        assert!(player.scheduler().timers().is_empty());
    }

    #[test]
    fn test_play_after_finish_restarts() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 9000.0);
        assert!(player.session().is_finished());

        player.toggle_play(20_000.0);
        assert!(!player.session().is_finished());
        assert_eq!(player.session().clock().epoch(), Some(20_000.0));
        assert_eq!(player.session().rendered_scene(), None);

        let outcome = deliver(&mut player, 20_100.0);
        assert!(matches!(outcome, FrameOutcome::Rendered(t) if t.scene_index == 0));
    }

    #[test]
    fn test_pause_cancels_frame_and_timer() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 4000.0);
        let blink = timer(&player);
        player.on_timer(blink);
        assert!(!player.session().animator().is_visible());

        assert_eq!(player.toggle_play(4100.0), PlaybackState::Paused);
        assert!(player.scheduler().pending_frame().is_none());
        assert!(player.scheduler().timers().is_empty());
        assert!(!player.audio().is_playing());
        assert!(clip(&mut player).is_paused());
        // Blink resets to visible on pause
        assert!(player.session().animator().is_visible());

        // Late callbacks from before the pause do nothing
        assert!(!player.on_timer(blink));
        assert_eq!(deliver(&mut player, 4116.0), FrameOutcome::Idle);
        assert!(player.scheduler().pending_frame().is_none());
    }

    /// Clip first, then a still image.
    fn clip_first_player() -> TestPlayer {
        let mut reel = ReelManifest::demo();
        reel.catalog = SceneCatalog::new(vec![
            crate::SceneDescriptor::new(
                0,
                "Clip",
                crate::TextPosition::MiddleCenter,
                crate::TextAnimationKind::None,
                crate::MediaRef::new("a.mp4"),
                3.0,
            ),
            crate::SceneDescriptor::new(
                1,
                "Still",
                crate::TextPosition::TopRight,
                crate::TextAnimationKind::None,
                crate::MediaRef::new("b.png"),
                5.0,
            ),
        ])
        .unwrap();
        let mut media = MediaTable::with_scene_count(2);
        media.set(0, MediaStatus::Ready(SceneMedia::TimedMedia(HeadlessClip::new("a"))));
        media.set(1, MediaStatus::Ready(SceneMedia::StillImage("b".into())));
        player_with(reel, media, HeadlessAudio::new())
    }

    fn first_clip(player: &mut TestPlayer) -> &mut HeadlessClip {
        player.media_mut().timed_mut(0).unwrap()
    }

    #[test]
    fn test_toggle_twice_returns_to_paused() {
        let mut player = clip_first_player();

        player.toggle_play(0.0);
        assert!(!first_clip(&mut player).is_paused());
        assert_eq!(first_clip(&mut player).position(), 3.0);

        player.toggle_play(10.0);
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(!player.audio().is_playing());
        assert!(first_clip(&mut player).is_paused());
        assert_eq!(first_clip(&mut player).position(), 3.0);
        assert!(player.scheduler().pending_frame().is_none());
        assert!(player.scheduler().timers().is_empty());
    }

    #[test]
    fn test_late_first_frame_pauses_skipped_clip() {
        let mut player = clip_first_player();
        player.toggle_play(0.0);
        assert!(!first_clip(&mut player).is_paused());

        // First frame arrives after scene 0 has already ended
        let outcome = deliver(&mut player, 3500.0);
        assert!(matches!(outcome, FrameOutcome::Rendered(t) if t.scene_index == 1));
        assert!(first_clip(&mut player).is_paused());
    }

    #[test]
    fn test_late_media_is_drawn_once_set() {
        let mut media = demo_media();
        media.set(0, MediaStatus::Pending);
        media.set(1, MediaStatus::Pending);
        let mut player = player_with(ReelManifest::demo(), media, HeadlessAudio::new());

        player.toggle_play(0.0);
        deliver(&mut player, 500.0);
        assert!(!player
            .surface()
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { .. })));

        player.set_media(0, MediaStatus::Ready(SceneMedia::StillImage("photo".into())));
        player.surface_mut().take_commands();
        deliver(&mut player, 600.0);
        assert!(matches!(&player.surface().commands()[2], DrawCommand::Image { label, .. } if label == "photo"));
    }

    #[test]
    fn test_late_clip_for_current_scene_is_cued_and_started() {
        let mut media = demo_media();
        media.set(1, MediaStatus::Pending);
        let mut player = player_with(ReelManifest::demo(), media, HeadlessAudio::new());

        player.toggle_play(0.0);
        deliver(&mut player, 3500.0);
        assert!(player.media().get(1).is_none());

        player.set_media(1, MediaStatus::Ready(SceneMedia::TimedMedia(HeadlessClip::new("clip"))));
        assert!(player.media().is_complete());
        assert_eq!(clip(&mut player).position(), 3.0);
        assert!(clip(&mut player).is_paused());

        deliver(&mut player, 3516.0);
        assert!(!clip(&mut player).is_paused());
    }

    #[test]
    fn test_resume_rearms_timer_and_replays_clip() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 4000.0);
        player.toggle_play(4100.0);

        clip(&mut player).seek(4.1);
        player.toggle_play(4200.0);
        assert_eq!(player.scheduler().timers().len(), 1);
        assert_eq!(player.scheduler().timers()[0].1, 500);
        assert!(player.scheduler().pending_frame().is_some());
        assert_eq!(clip(&mut player).position(), 3.0);
        assert!(!clip(&mut player).is_paused());
    }

    #[test]
    fn test_keep_epoch_counts_paused_time() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 1000.0);
        player.toggle_play(1000.0);

        player.toggle_play(10_000.0);
        assert_eq!(deliver(&mut player, 10_016.0), FrameOutcome::Finished);
    }

    #[test]
    fn test_exclude_paused_resumes_in_place() {
        let mut reel = ReelManifest::demo();
        reel.player.resume = ResumeMode::ExcludePaused;
        let mut player = player_with(reel, demo_media(), HeadlessAudio::new());

        player.toggle_play(0.0);
        deliver(&mut player, 1000.0);
        player.toggle_play(1000.0);

        player.toggle_play(10_000.0);
        let outcome = deliver(&mut player, 10_500.0);
        let FrameOutcome::Rendered(timeline) = outcome else {
            panic!("expected a rendered frame, got {:?}", outcome);
        };
        assert_eq!(timeline.scene_index, 0);
        assert!((timeline.scene_elapsed - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_failed_media_draws_text_only() {
        let mut media = demo_media();
        media.set(0, MediaStatus::Failed("404".into()));
        let mut reel = ReelManifest::demo();
        reel.catalog = SceneCatalog::new(vec![crate::SceneDescriptor::new(
            0,
            "Offline",
            crate::TextPosition::MiddleCenter,
            crate::TextAnimationKind::Blink,
            crate::MediaRef::new("missing.png"),
            2.0,
        )])
        .unwrap();
        let mut player = player_with(reel, media, HeadlessAudio::new());

        player.toggle_play(0.0);
        assert!(matches!(deliver(&mut player, 1000.0), FrameOutcome::Rendered(_)));
        let commands = player.surface().commands();
        assert!(!commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { .. } | DrawCommand::Video { .. })));
        assert_eq!(player.surface().texts(), vec!["Offline"]);
    }

    #[test]
    fn test_rejected_audio_does_not_stop_visuals() {
        let mut player = player_with(ReelManifest::demo(), demo_media(), HeadlessAudio::new().reject_playback());

        assert_eq!(player.toggle_play(0.0), PlaybackState::Playing);
        assert!(!player.audio().is_playing());
        assert!(matches!(deliver(&mut player, 500.0), FrameOutcome::Rendered(_)));
    }

    #[test]
    fn test_rejected_clip_is_not_retried_every_frame() {
        let mut media = demo_media();
        media.set(
            1,
            MediaStatus::Ready(SceneMedia::TimedMedia(HeadlessClip::new("clip").reject_playback())),
        );
        let mut player = player_with(ReelManifest::demo(), media, HeadlessAudio::new());

        player.toggle_play(0.0);
        deliver(&mut player, 3500.0);
        assert_eq!(player.session().rejected_media, Some(1));
        assert!(matches!(deliver(&mut player, 3516.0), FrameOutcome::Rendered(_)));
        // Ready clip still draws its current frame
        assert!(player
            .surface()
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Video { .. })));
    }

    #[test]
    fn test_buffering_clip_starts_once_ready() {
        let mut player = demo_player();
        clip(&mut player).set_ready(false);

        player.toggle_play(0.0);
        deliver(&mut player, 3500.0);
        assert!(clip(&mut player).is_paused());
        assert!(!player
            .surface()
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Video { .. })));

        clip(&mut player).set_ready(true);
        deliver(&mut player, 3516.0);
        assert!(!clip(&mut player).is_paused());
    }

    #[test]
    fn test_timers_run_without_frames() {
        let mut player = demo_player();
        player.toggle_play(0.0);
        deliver(&mut player, 16.0);

        let typing = timer(&player);
        let narration_len = "This is a simple Javascript test".len();
        for _ in 0..narration_len {
            player.on_timer(typing);
        }
        assert_eq!(player.session().animator().text(), "This is a simple Javascript test");
        assert_eq!(player.session().active_timer(), None);
    }
}
