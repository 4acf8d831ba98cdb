use crate::animation::{DEFAULT_BLINK_INTERVAL_MS, DEFAULT_TYPING_INTERVAL_MS};
use crate::placement::DEFAULT_TEXT_MARGIN;
use crate::render::{RenderConfig, TextStyle};
use crate::timeline::DEFAULT_TRANSITION_SECS;
use crate::{CatalogError, ResumeMode, SceneCatalog, TextAnimator, TextPlacement};

/// Seconds into a clip where timed media starts playing.
pub const DEFAULT_MEDIA_START_OFFSET_SECS: f64 = 3.0;

/// Background track used by the demo reel.
pub const DEMO_AUDIO_SOURCE: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";

/// Player settings, usually read from the `[player]` table of a reel file.
///
/// Every field has a default, so a file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerDetails {
    pub transition_secs: f64,
    pub typing_interval_ms: u32,
    pub blink_interval_ms: u32,
    /// Where timed media starts when its scene begins
    pub media_start_offset_secs: f64,
    pub resume: ResumeMode,
    pub font_size: f64,
    pub font_family: String,
    pub text_color: String,
    pub text_margin: f64,
    pub audio_source: Option<String>,
    pub audio_volume: f64,
    pub audio_loop: bool,
}

impl Default for PlayerDetails {
    fn default() -> Self {
        let style = TextStyle::default();
        Self {
            transition_secs: DEFAULT_TRANSITION_SECS,
            typing_interval_ms: DEFAULT_TYPING_INTERVAL_MS,
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
            media_start_offset_secs: DEFAULT_MEDIA_START_OFFSET_SECS,
            resume: ResumeMode::default(),
            font_size: style.font_size,
            font_family: style.font_family,
            text_color: style.color,
            text_margin: DEFAULT_TEXT_MARGIN,
            audio_source: Some(DEMO_AUDIO_SOURCE.to_string()),
            audio_volume: 0.5,
            audio_loop: true,
        }
    }
}

/// Errors raised while reading player settings or a reel file.
#[derive(Debug, thiserror::Error)]
pub enum DetailsError {
    #[error("Transition length must be finite and non-negative, got {0}")]
    InvalidTransition(f64),
    #[error("{name} interval must be at least 1 ms")]
    InvalidInterval { name: &'static str },
    #[error("Media start offset must be finite and non-negative, got {0}")]
    InvalidStartOffset(f64),
    #[error("Font size must be positive, got {0}")]
    InvalidFontSize(f64),
    #[error("Audio volume must be within 0.0..=1.0, got {0}")]
    InvalidVolume(f64),
    #[error("Invalid scene catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[cfg(feature = "toml")]
    #[error("Failed to parse reel file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PlayerDetails {
    /// Check every setting is usable.
    pub fn validate(&self) -> Result<(), DetailsError> {
        if !self.transition_secs.is_finite() || self.transition_secs < 0.0 {
            return Err(DetailsError::InvalidTransition(self.transition_secs));
        }
        if self.typing_interval_ms == 0 {
            return Err(DetailsError::InvalidInterval { name: "Typing" });
        }
        if self.blink_interval_ms == 0 {
            return Err(DetailsError::InvalidInterval { name: "Blink" });
        }
        if !self.media_start_offset_secs.is_finite() || self.media_start_offset_secs < 0.0 {
            return Err(DetailsError::InvalidStartOffset(self.media_start_offset_secs));
        }
        if self.font_size.is_nan() || self.font_size <= 0.0 {
            return Err(DetailsError::InvalidFontSize(self.font_size));
        }
        if !(0.0..=1.0).contains(&self.audio_volume) {
            return Err(DetailsError::InvalidVolume(self.audio_volume));
        }
        Ok(())
    }

    /// Parse and validate a settings table.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, DetailsError> {
        let details: Self = toml::from_str(s)?;
        details.validate()?;
        Ok(details)
    }

    /// Build the narration render configuration.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            style: TextStyle {
                font_size: self.font_size,
                font_family: self.font_family.clone(),
                color: self.text_color.clone(),
            },
            placement: TextPlacement::new(self.text_margin),
        }
    }

    /// Build an inactive animator with the configured tick intervals.
    pub fn animator(&self) -> TextAnimator {
        TextAnimator::new(self.typing_interval_ms, self.blink_interval_ms)
    }
}

/// A complete reel: player settings plus its scene catalog.
///
/// ```toml
/// [player]
/// resume = "exclude-paused"
///
/// [[scenes]]
/// index = 0
/// narration = "Hello"
/// text_position = "middle-center"
/// text_animation = "typing"
/// media = "intro.jpg"
/// duration = 3.0
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ReelManifest {
    pub player: PlayerDetails,
    pub catalog: SceneCatalog,
}

#[cfg(feature = "toml")]
#[derive(serde::Deserialize)]
struct ReelFile {
    #[serde(default)]
    player: PlayerDetails,
    scenes: Vec<crate::SceneDescriptor>,
}

impl ReelManifest {
    /// Parse and validate a reel file.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, DetailsError> {
        let file: ReelFile = toml::from_str(s)?;
        file.player.validate()?;
        let catalog = SceneCatalog::new(file.scenes)?;
        Ok(Self {
            player: file.player,
            catalog,
        })
    }

    /// The two-scene demo reel with its background track.
    pub fn demo() -> Self {
        Self {
            player: PlayerDetails::default(),
            catalog: SceneCatalog::demo(),
        }
    }
}
