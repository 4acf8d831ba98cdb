//! # scene-reel-core
//!
//! Scene timeline and rendering engine for narrated image/video reels.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Describing a reel as an ordered catalog of timed scenes
//! - Resolving wall-clock time to the active scene and its cross-fade opacity
//! - Animating narration (typing reveal, blinking)
//! - Driving a render loop and a play/pause toggle from host callbacks
//! - Rendering scenes to a 2D surface (with optional web support)
//!
//! The engine never blocks or spawns threads. A host delivers frame
//! callbacks, timer ticks and clicks to a [`Player`], which draws through a
//! [`render::Surface`] and schedules through a [`scheduler::Scheduler`].
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Read reels and player settings from TOML
//! - `web` - Enable web/WASM canvas, media element and window scheduling support
//!
//! ## Example
//!
//! ```rust
//! use scene_reel_core::render::RecordingSurface;
//! use scene_reel_core::scheduler::ManualScheduler;
//! use scene_reel_core::{HeadlessAudio, MediaStatus, MediaTable, Player, ReelManifest, SceneMedia};
//!
//! let reel = ReelManifest::demo();
//! let mut media = MediaTable::with_scene_count(reel.catalog.len());
//! media.set(0, MediaStatus::Ready(SceneMedia::StillImage("photo".to_string())));
//!
//! let mut player = Player::new(reel, RecordingSurface::default(), media, HeadlessAudio::new(), ManualScheduler::new());
//! player.toggle_play(0.0);
//! player.on_frame(500.0);
//! assert_eq!(player.status_label(), "Playing");
//! ```

mod animation;
mod controller;
mod data;
mod details;
mod driver;
mod loader;
mod media;
mod placement;
mod player;
pub mod render;
pub mod scheduler;
mod session;
pub mod timeline;

pub use animation::{AnimationState, BlinkState, TextAnimator, TypingState};
pub use data::{CatalogError, MediaKind, MediaRef, SceneCatalog, SceneDescriptor, TextAnimationKind, TextPosition};
pub use details::{DetailsError, PlayerDetails, ReelManifest};
pub use driver::FrameOutcome;
pub use loader::{load_scene_media, LoadingProgress, MediaProvider, MediaStatus, MediaTable};
pub use media::{AudioTrack, HeadlessAudio, HeadlessClip, PlaybackError, SceneMedia, TimedMedia};
pub use placement::TextPlacement;
pub use player::{Player, Stage};
pub use render::{RenderConfig, RenderResult};
pub use session::{PlaybackClock, PlaybackSession, PlaybackState, ResumeMode};
pub use timeline::{Resolution, TimelineState};

#[cfg(feature = "web")]
pub use loader::web::ElementProvider;
#[cfg(feature = "web")]
pub use player::web::{mount, WebPlayer};
#[cfg(feature = "web")]
pub use render::web::CanvasSurface;
