//! Scene descriptors and the ordered scene catalog.

use std::ops::Index;

/// Where a scene's narration is anchored on the surface.
///
/// Strings map onto variants through `From<&str>`, so configuration files can
/// use the same names the player has always used (`"middle-center"`,
/// `"top-right"`). Anything else is kept verbatim as [`TextPosition::Unknown`]
/// and lands at the surface origin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum TextPosition {
    /// Centered horizontally and vertically
    #[default]
    MiddleCenter,
    /// Right-aligned, hugging the top edge
    TopRight,
    /// Unrecognized position name
    Unknown(String),
}

impl TextPosition {
    /// Get the configuration name of this position.
    pub fn as_str(&self) -> &str {
        match self {
            TextPosition::MiddleCenter => "middle-center",
            TextPosition::TopRight => "top-right",
            TextPosition::Unknown(name) => name,
        }
    }
}

impl From<&str> for TextPosition {
    fn from(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "middle-center" | "middle_center" => TextPosition::MiddleCenter,
            "top-right" | "top_right" => TextPosition::TopRight,
            _ => TextPosition::Unknown(name.to_string()),
        }
    }
}

impl From<String> for TextPosition {
    fn from(name: String) -> Self {
        TextPosition::from(name.as_str())
    }
}

impl From<TextPosition> for String {
    fn from(position: TextPosition) -> Self {
        position.as_str().to_string()
    }
}

/// Text animation applied to a scene's narration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextAnimationKind {
    /// Reveal one grapheme per tick
    Typing,
    /// Toggle the whole narration on and off
    Blink,
    /// Render nothing
    #[default]
    None,
}

/// The broad class of a media asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Drawn as-is every frame
    StillImage,
    /// Has its own playback position and readiness state
    TimedMedia,
}

/// Opaque reference to a scene's media asset (usually a URL).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MediaRef(pub String);

impl MediaRef {
    /// Create a new media reference.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Get the underlying URI.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Guess the media kind from the file extension.
    ///
    /// Query strings and fragments are ignored. Returns None for extensions
    /// that are neither a known image nor a known video container.
    ///
    /// ```rust
    /// use scene_reel_core::{MediaKind, MediaRef};
    ///
    /// assert_eq!(MediaRef::new("a/b.JPG").kind_hint(), Some(MediaKind::StillImage));
    /// assert_eq!(MediaRef::new("clip.webm?x=1").kind_hint(), Some(MediaKind::TimedMedia));
    /// assert_eq!(MediaRef::new("notes.txt").kind_hint(), None);
    /// ```
    pub fn kind_hint(&self) -> Option<MediaKind> {
        let path = self.0.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let (_, ext) = path.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "png" => Some(MediaKind::StillImage),
            "mp4" | "webm" | "ogg" => Some(MediaKind::TimedMedia),
            _ => None,
        }
    }
}

/// One timed unit of the reel: a media asset plus a narration overlay.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneDescriptor {
    /// Ordinal position in the catalog
    pub index: usize,
    /// Text drawn over the media
    pub narration: String,
    /// Anchor for the narration
    #[cfg_attr(feature = "serde", serde(default))]
    pub text_position: TextPosition,
    /// Animation applied to the narration
    #[cfg_attr(feature = "serde", serde(default))]
    pub text_animation: TextAnimationKind,
    /// Media asset shown behind the text
    pub media: MediaRef,
    /// Length of the scene in seconds
    pub duration: f64,
}

impl SceneDescriptor {
    /// Create a new scene descriptor.
    pub fn new(
        index: usize,
        narration: impl Into<String>,
        text_position: TextPosition,
        text_animation: TextAnimationKind,
        media: MediaRef,
        duration: f64,
    ) -> Self {
        Self {
            index,
            narration: narration.into(),
            text_position,
            text_animation,
            media,
            duration,
        }
    }
}

/// Errors raised while assembling a scene catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Scene catalog must contain at least one scene")]
    Empty,
    #[error("Scene {index} has invalid duration {duration}; durations must be finite and positive")]
    InvalidDuration { index: usize, duration: f64 },
    #[error("Scene at position {position} declares index {index}")]
    IndexMismatch { position: usize, index: usize },
}

/// Ordered, immutable list of scenes.
///
/// Construction enforces that every scene's `index` equals its position and
/// that every duration is finite and positive, so the timeline built on top
/// of it always partitions `[0, total_duration)` cleanly.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneCatalog {
    scenes: Vec<SceneDescriptor>,
    total_duration: f64,
}

impl SceneCatalog {
    /// Validate and wrap an ordered list of scenes.
    pub fn new(scenes: Vec<SceneDescriptor>) -> Result<Self, CatalogError> {
        if scenes.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (position, scene) in scenes.iter().enumerate() {
            if scene.index != position {
                return Err(CatalogError::IndexMismatch {
                    position,
                    index: scene.index,
                });
            }
            if !scene.duration.is_finite() || scene.duration <= 0.0 {
                return Err(CatalogError::InvalidDuration {
                    index: scene.index,
                    duration: scene.duration,
                });
            }
        }

        let total_duration = scenes.iter().map(|s| s.duration).sum();
        Ok(Self {
            scenes,
            total_duration,
        })
    }

    /// The two-scene reel: a photo with typed narration, then a video clip
    /// with blinking narration.
    pub fn demo() -> Self {
        let scenes = vec![
            SceneDescriptor::new(
                0,
                "This is a simple Javascript test",
                TextPosition::MiddleCenter,
                TextAnimationKind::Typing,
                MediaRef::new("https://miro.medium.com/max/1024/1*OK8xc3Ic6EGYg2k6BeGabg.jpeg"),
                3.0,
            ),
            SceneDescriptor::new(
                1,
                "Here comes the video!",
                TextPosition::TopRight,
                TextAnimationKind::Blink,
                MediaRef::new(
                    "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
                ),
                5.0,
            ),
        ];
        let total_duration = scenes.iter().map(|s| s.duration).sum();
        Self {
            scenes,
            total_duration,
        }
    }

    /// Get the scenes in timeline order.
    #[inline]
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    /// Get the scene at the given index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    /// Get the number of scenes.
    #[inline]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always false for a validated catalog.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Sum of all scene durations in seconds.
    #[inline]
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Iterate over the scenes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SceneDescriptor> {
        self.scenes.iter()
    }
}

impl Index<usize> for SceneCatalog {
    type Output = SceneDescriptor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.scenes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(index: usize, duration: f64) -> SceneDescriptor {
        SceneDescriptor::new(
            index,
            "hi",
            TextPosition::MiddleCenter,
            TextAnimationKind::None,
            MediaRef::new("a.png"),
            duration,
        )
    }

    #[test]
    fn test_catalog_total_duration() {
        let catalog = SceneCatalog::new(vec![scene(0, 3.0), scene(1, 5.0)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.total_duration(), 8.0);
        assert_eq!(catalog[1].duration, 5.0);
    }

    #[test]
    fn test_catalog_rejects_empty() {
        assert_eq!(SceneCatalog::new(vec![]), Err(CatalogError::Empty));
    }

    #[test]
    fn test_catalog_rejects_bad_duration() {
        let err = SceneCatalog::new(vec![scene(0, 0.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDuration { index: 0, .. }));

        let err = SceneCatalog::new(vec![scene(0, f64::NAN)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDuration { .. }));
    }

    #[test]
    fn test_catalog_rejects_index_mismatch() {
        let err = SceneCatalog::new(vec![scene(0, 1.0), scene(2, 1.0)]).unwrap_err();
        assert_eq!(err, CatalogError::IndexMismatch { position: 1, index: 2 });
    }

    #[test]
    fn test_demo_catalog() {
        let catalog = SceneCatalog::demo();
        assert_eq!(catalog.total_duration(), 8.0);
        assert_eq!(catalog[0].text_animation, TextAnimationKind::Typing);
        assert_eq!(catalog[1].text_position, TextPosition::TopRight);
        assert_eq!(catalog[0].media.kind_hint(), Some(MediaKind::StillImage));
        assert_eq!(catalog[1].media.kind_hint(), Some(MediaKind::TimedMedia));
    }

    #[test]
    fn test_text_position_names() {
        assert_eq!(TextPosition::from("middle-center"), TextPosition::MiddleCenter);
        assert_eq!(TextPosition::from("Top-Right"), TextPosition::TopRight);
        assert_eq!(
            TextPosition::from("bottom-left"),
            TextPosition::Unknown("bottom-left".into())
        );
        assert_eq!(String::from(TextPosition::TopRight), "top-right");
    }
}
