//! Drawing a resolved scene onto a 2D surface.

use crate::{HeadlessClip, SceneMedia, TextPlacement, TextPosition, TimedMedia};

/// Default surface size, 16:9.
pub const DEFAULT_SURFACE_SIZE: (f64, f64) = (1280.0, 720.0);

/// Width of one character as a ratio of font size, used by [`RecordingSurface`].
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// An axis-aligned destination rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle covering a whole surface of the given size.
    #[inline]
    pub fn covering(size: (f64, f64)) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.0,
            height: size.1,
        }
    }
}

/// Font and fill used for narration.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels; also the height of the text box
    pub font_size: f64,
    /// Font family name
    pub font_family: String,
    /// CSS-style fill color
    pub color: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 30.0,
            font_family: "Arial".to_string(),
            color: "white".to_string(),
        }
    }
}

impl TextStyle {
    /// Get the CSS font shorthand, e.g. "30px Arial".
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }
}

/// Immediate-mode 2D drawing surface.
///
/// Text is drawn with a top baseline: `fill_text(x, y)` puts the top of the
/// glyph box at `y`.
pub trait Surface {
    /// Still image handle this surface can blit
    type Image;
    /// Timed media handle this surface can blit
    type Video: TimedMedia;

    /// Surface (width, height) in pixels.
    fn size(&self) -> (f64, f64);

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Set the opacity applied to subsequent draws (0.0 - 1.0).
    fn set_global_alpha(&mut self, alpha: f64);

    /// Set the font and fill used by subsequent text calls.
    fn set_text_style(&mut self, style: &TextStyle);

    /// Width of `text` in pixels with the current text style.
    fn measure_text(&self, text: &str) -> f64;

    /// Draw `text` with its top-left corner at (x, y).
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Draw an image scaled into `dest`.
    fn draw_image(&mut self, image: &Self::Image, dest: Rect);

    /// Draw the current frame of a clip scaled into `dest`.
    fn draw_video(&mut self, video: &Self::Video, dest: Rect);
}

/// Configuration for drawing narration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderConfig {
    /// Font and fill
    pub style: TextStyle,
    /// Anchor calculations
    pub placement: TextPlacement,
}

/// Everything needed to draw one frame of a scene.
#[derive(Debug)]
pub struct SceneFrame<'a, I, V> {
    /// Cross-fade opacity
    pub opacity: f64,
    /// Ready media for the scene, if any
    pub media: Option<&'a SceneMedia<I, V>>,
    /// Narration text to draw this frame
    pub text: &'a str,
    /// Narration anchor
    pub position: &'a TextPosition,
}

/// What a call to [`draw_scene`] actually drew.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderResult {
    /// Whether media was blitted
    pub media_drawn: bool,
    /// Top-left corner of the narration, if any text was drawn
    pub text_origin: Option<(f64, f64)>,
}

/// Draw one scene frame.
///
/// Clears the surface, applies `frame.opacity`, blits the media over the
/// whole surface, draws the narration, then restores full opacity. Missing
/// media and timed media that is still buffering are skipped; the text is
/// drawn regardless.
///
/// ## Example
///
/// ```rust
/// use scene_reel_core::render::{draw_scene, DrawCommand, RecordingSurface, RenderConfig, SceneFrame};
/// use scene_reel_core::{HeadlessClip, SceneMedia, TextPosition};
///
/// let mut surface = RecordingSurface::new((1280.0, 720.0));
/// let media: SceneMedia<String, HeadlessClip> = SceneMedia::StillImage("photo".into());
/// let frame = SceneFrame {
///     opacity: 0.5,
///     media: Some(&media),
///     text: "Hi",
///     position: &TextPosition::MiddleCenter,
/// };
///
/// let result = draw_scene(&mut surface, &frame, &RenderConfig::default());
/// assert!(result.media_drawn);
/// assert_eq!(surface.commands()[0], DrawCommand::Clear);
/// assert_eq!(surface.commands()[1], DrawCommand::GlobalAlpha(0.5));
/// ```
pub fn draw_scene<S: Surface>(surface: &mut S, frame: &SceneFrame<'_, S::Image, S::Video>, config: &RenderConfig) -> RenderResult {
    let size = surface.size();
    let mut result = RenderResult::default();

    surface.clear();
    surface.set_global_alpha(frame.opacity.clamp(0.0, 1.0));

    match frame.media {
        Some(SceneMedia::StillImage(image)) => {
            surface.draw_image(image, Rect::covering(size));
            result.media_drawn = true;
        }
        Some(SceneMedia::TimedMedia(video)) if video.is_ready() => {
            surface.draw_video(video, Rect::covering(size));
            result.media_drawn = true;
        }
        _ => {}
    }

    if !frame.text.is_empty() {
        surface.set_text_style(&config.style);
        let width = surface.measure_text(frame.text);
        let (x, y) = config
            .placement
            .place(frame.position, width, config.style.font_size, size);
        surface.fill_text(frame.text, x, y);
        result.text_origin = Some((x, y));
    }

    surface.set_global_alpha(1.0);
    result
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    GlobalAlpha(f64),
    /// Font shorthand and fill color
    TextStyle { font: String, color: String },
    Image { label: String, dest: Rect },
    Video { label: String, dest: Rect },
    Text { text: String, x: f64, y: f64 },
}

/// Platform-agnostic surface that records draw calls.
///
/// Useful for headless hosts and for checking what a frame would draw.
/// Text is measured as a fixed-pitch font at 0.6 × font size per character.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: (f64, f64),
    font_size: f64,
    commands: Vec<DrawCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(DEFAULT_SURFACE_SIZE)
    }
}

impl RecordingSurface {
    /// Create an empty recording surface of the given size.
    pub fn new(size: (f64, f64)) -> Self {
        Self {
            size,
            font_size: TextStyle::default().font_size,
            commands: Vec::new(),
        }
    }

    /// Get the commands recorded so far.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the text strings drawn so far.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    type Image = String;
    type Video = HeadlessClip;

    fn size(&self) -> (f64, f64) {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_text_style(&mut self, style: &TextStyle) {
        self.font_size = style.font_size;
        self.commands.push(DrawCommand::TextStyle {
            font: style.font(),
            color: style.color.clone(),
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size * CHAR_WIDTH_RATIO
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn draw_image(&mut self, image: &String, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            label: image.clone(),
            dest,
        });
    }

    fn draw_video(&mut self, video: &HeadlessClip, dest: Rect) {
        self.commands.push(DrawCommand::Video {
            label: video.label.clone(),
            dest,
        });
    }
}

/// Web-specific rendering implementation.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use crate::PlaybackError;
    use wasm_bindgen::JsCast;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, HtmlMediaElement, HtmlVideoElement,
    };

    /// `HTMLMediaElement.HAVE_CURRENT_DATA`
    const HAVE_CURRENT_DATA: u16 = 2;

    /// A `<canvas>` 2D context as a drawing surface.
    #[derive(Clone, Debug)]
    pub struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl CanvasSurface {
        /// Wrap a canvas, sizing it to `size`.
        pub fn new(canvas: &HtmlCanvasElement, size: (f64, f64)) -> Result<Self, String> {
            canvas.set_width(size.0 as u32);
            canvas.set_height(size.1 as u32);

            let ctx = canvas
                .get_context("2d")
                .map_err(|_| "Failed to get 2d context")?
                .ok_or("No 2d context available")?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;
            ctx.set_text_baseline("top");

            Ok(Self {
                ctx,
                width: size.0,
                height: size.1,
            })
        }

        /// Clear the canvas and centre a single status line on it.
        pub fn show_message(&mut self, message: &str, style: &TextStyle) {
            self.clear();
            self.set_global_alpha(1.0);
            self.set_text_style(style);
            let width = self.measure_text(message);
            let (x, y) = TextPlacement::default().place(&TextPosition::MiddleCenter, width, style.font_size, self.size());
            self.fill_text(message, x, y);
        }
    }

    impl Surface for CanvasSurface {
        type Image = HtmlImageElement;
        type Video = HtmlVideoElement;

        fn size(&self) -> (f64, f64) {
            (self.width, self.height)
        }

        fn clear(&mut self) {
            self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        }

        fn set_global_alpha(&mut self, alpha: f64) {
            self.ctx.set_global_alpha(alpha);
        }

        fn set_text_style(&mut self, style: &TextStyle) {
            self.ctx.set_font(&style.font());
            self.ctx.set_fill_style_str(&style.color);
            self.ctx.set_text_baseline("top");
        }

        fn measure_text(&self, text: &str) -> f64 {
            self.ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
        }

        fn fill_text(&mut self, text: &str, x: f64, y: f64) {
            if self.ctx.fill_text(text, x, y).is_err() {
                log::warn!("fillText failed for {:?}", text);
            }
        }

        fn draw_image(&mut self, image: &HtmlImageElement, dest: Rect) {
            if let Err(err) = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, dest.x, dest.y, dest.width, dest.height)
            {
                log::warn!("drawImage failed: {:?}", err);
            }
        }

        fn draw_video(&mut self, video: &HtmlVideoElement, dest: Rect) {
            if let Err(err) = self
                .ctx
                .draw_image_with_html_video_element_and_dw_and_dh(video, dest.x, dest.y, dest.width, dest.height)
            {
                log::warn!("drawImage failed for video: {:?}", err);
            }
        }
    }

    impl TimedMedia for HtmlVideoElement {
        fn is_ready(&self) -> bool {
            self.ready_state() >= HAVE_CURRENT_DATA
        }

        fn is_paused(&self) -> bool {
            self.paused()
        }

        fn seek(&mut self, seconds: f64) {
            self.set_current_time(seconds);
        }

        fn play(&mut self) -> Result<(), PlaybackError> {
            let element: &HtmlMediaElement = self.as_ref();
            let promise = element
                .play()
                .map_err(|err| PlaybackError::Rejected(format!("{:?}", err)))?;
            crate::media::web::report_rejection(promise, "video");
            Ok(())
        }

        fn pause(&mut self) {
            let element: &HtmlMediaElement = self.as_ref();
            if let Err(err) = element.pause() {
                log::warn!("video pause failed: {:?}", err);
            }
        }
    }
}
