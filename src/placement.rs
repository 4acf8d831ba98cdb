//! Narration placement on the drawing surface.

use crate::TextPosition;

/// Default gap between edge-anchored text and the surface edges, in pixels.
pub const DEFAULT_TEXT_MARGIN: f64 = 20.0;

/// Text placement calculations.
///
/// Positions are computed for a top text baseline: the returned `y` is the
/// top of the text box. New anchors are added as [`TextPosition`] variants
/// and handled here, never at the call site.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPlacement {
    /// Gap kept between edge-anchored text and the surface edges
    pub margin: f64,
}

impl Default for TextPlacement {
    fn default() -> Self {
        Self {
            margin: DEFAULT_TEXT_MARGIN,
        }
    }
}

impl TextPlacement {
    /// Create a placement with the given edge margin.
    pub fn new(margin: f64) -> Self {
        Self { margin }
    }

    /// Calculate the top-left corner of a text box.
    ///
    /// ## Arguments
    ///
    /// * `position` - Anchor requested by the scene
    /// * `text_width` - Measured width of the text in pixels
    /// * `line_height` - Height of the text box (the font size)
    /// * `surface` - Surface (width, height) in pixels
    ///
    /// ## Example
    ///
    /// ```rust
    /// use scene_reel_core::{TextPlacement, TextPosition};
    ///
    /// let placement = TextPlacement::default();
    /// let (x, y) = placement.place(&TextPosition::TopRight, 200.0, 30.0, (1280.0, 720.0));
    /// assert_eq!((x, y), (1060.0, 20.0));
    /// ```
    pub fn place(
        &self,
        position: &TextPosition,
        text_width: f64,
        line_height: f64,
        surface: (f64, f64),
    ) -> (f64, f64) {
        let (width, height) = surface;
        match position {
            TextPosition::MiddleCenter => ((width - text_width) / 2.0, (height - line_height) / 2.0),
            TextPosition::TopRight => (width - text_width - self.margin, self.margin),
            TextPosition::Unknown(_) => (0.0, 0.0),
        }
    }
}
