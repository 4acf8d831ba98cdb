//! Media acquisition and per-scene readiness tracking.
//!
//! Assets are resolved once, before the first drawable frame, into a
//! [`MediaTable`] indexed by scene. A failed asset is not an error for the
//! player: that scene is simply drawn with text only.

use crate::{MediaRef, SceneCatalog, SceneMedia};

/// Acquisition status of one scene's media.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaStatus<I, V> {
    /// Not resolved yet
    Pending,
    /// Ready to draw
    Ready(SceneMedia<I, V>),
    /// Could not be loaded or decoded
    Failed(String),
}

impl<I, V> MediaStatus<I, V> {
    /// Check if the asset resolved, successfully or not.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, MediaStatus::Pending)
    }

    /// Check if the asset failed to load.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, MediaStatus::Failed(_))
    }
}

/// Media handles for every scene, indexed by scene position.
#[derive(Clone, Debug)]
pub struct MediaTable<I, V> {
    slots: Vec<MediaStatus<I, V>>,
}

impl<I, V> MediaTable<I, V> {
    /// Create a table with every slot pending.
    pub fn with_scene_count(scene_count: usize) -> Self {
        let mut slots = Vec::with_capacity(scene_count);
        slots.resize_with(scene_count, || MediaStatus::Pending);
        Self { slots }
    }

    /// Resize to match the number of scenes, padding with pending slots.
    pub fn resize(&mut self, scene_count: usize) {
        if self.slots.len() != scene_count {
            self.slots.resize_with(scene_count, || MediaStatus::Pending);
        }
    }

    /// Store the status of a scene's media.
    ///
    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, status: MediaStatus<I, V>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = status;
        }
    }

    /// Get the status of a scene's media.
    pub fn status(&self, index: usize) -> Option<&MediaStatus<I, V>> {
        self.slots.get(index)
    }

    /// Get a scene's media if it is ready.
    pub fn get(&self, index: usize) -> Option<&SceneMedia<I, V>> {
        match self.slots.get(index) {
            Some(MediaStatus::Ready(media)) => Some(media),
            _ => None,
        }
    }

    /// Get a scene's media mutably if it is ready.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut SceneMedia<I, V>> {
        match self.slots.get_mut(index) {
            Some(MediaStatus::Ready(media)) => Some(media),
            _ => None,
        }
    }

    /// Get a scene's timed media handle, if it has one ready.
    pub fn timed_mut(&mut self, index: usize) -> Option<&mut V> {
        self.get_mut(index).and_then(SceneMedia::as_timed_mut)
    }

    /// Get the number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the table has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if every slot has resolved.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(MediaStatus::is_resolved)
    }
}

/// Progress information for media acquisition
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadingProgress {
    /// Number of assets that are ready
    pub loaded: usize,
    /// Number of assets that failed
    pub failed: usize,
    /// Total number of assets to resolve
    pub total: usize,
}

impl LoadingProgress {
    /// Create a tracker for `total` assets
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Number of assets that have resolved either way
    #[inline]
    pub fn resolved(&self) -> usize {
        self.loaded + self.failed
    }

    /// Get resolution percentage (0-100)
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            0
        } else {
            ((self.resolved() as f32 / self.total as f32) * 100.0) as u8
        }
    }

    /// Check if every asset has resolved
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.resolved() >= self.total
    }

    /// Format a status message for the host shell
    pub fn message(&self) -> String {
        if self.total == 0 {
            return "Loading media...".to_string();
        }
        let mut message = format!(
            "Loading media... {} / {} ({}%)",
            self.resolved(),
            self.total,
            self.percent()
        );
        if self.failed > 0 {
            message.push_str(&format!(", {} unavailable", self.failed));
        }
        message
    }
}

/// Trait for async media providers.
///
/// Implement this trait over your platform's image and video loaders. The
/// provider decides once whether an asset is a still image or timed media.
///
/// No `Send` bounds, so it works in single-threaded WASM contexts.
pub trait MediaProvider {
    /// Still image handle
    type Image;
    /// Timed media handle
    type Video;

    /// Resolve one asset to `Ready` or `Failed`.
    fn load(&self, media: &MediaRef) -> impl std::future::Future<Output = MediaStatus<Self::Image, Self::Video>>;
}

/// Resolve every scene's media in catalog order.
///
/// Calls `on_progress` after each asset so the host can show a loading
/// message. Failed assets are logged and left as `Failed` in the table.
pub async fn load_scene_media<P, F>(provider: &P, catalog: &SceneCatalog, mut on_progress: F) -> MediaTable<P::Image, P::Video>
where
    P: MediaProvider,
    F: FnMut(&LoadingProgress),
{
    let mut table = MediaTable::with_scene_count(catalog.len());
    let mut progress = LoadingProgress::new(catalog.len());

    for scene in catalog.iter() {
        let status = match provider.load(&scene.media).await {
            MediaStatus::Pending => MediaStatus::Failed("provider did not resolve the asset".to_string()),
            status => status,
        };
        match &status {
            MediaStatus::Ready(_) => {
                log::debug!("scene {}: media ready ({})", scene.index, scene.media.as_str());
                progress.loaded += 1;
            }
            MediaStatus::Failed(reason) => {
                log::warn!(
                    "scene {}: media unavailable ({}): {}",
                    scene.index,
                    scene.media.as_str(),
                    reason
                );
                progress.failed += 1;
            }
            MediaStatus::Pending => {}
        }
        table.set(scene.index, status);
        on_progress(&progress);
    }

    table
}

/// Image and video elements as media handles.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use crate::MediaKind;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlElement, HtmlImageElement, HtmlVideoElement};

    /// Loads assets into `<img>` and `<video>` elements.
    ///
    /// The asset kind comes from the file extension. Images resolve on
    /// `load`, clips on `loadeddata`; `error` fails the asset.
    #[derive(Clone, Debug)]
    pub struct ElementProvider {
        document: Document,
    }

    /// A promise settled by the element's ready event or its `error` event.
    fn settled(element: &HtmlElement, on_ready: fn(&HtmlElement, Option<&js_sys::Function>)) -> js_sys::Promise {
        js_sys::Promise::new(&mut |resolve, reject| {
            on_ready(element, Some(&resolve));
            element.set_onerror(Some(&reject));
        })
    }

    impl ElementProvider {
        /// Create a provider for the current window's document.
        pub fn new() -> Result<Self, JsValue> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| JsValue::from_str("No document available"))?;
            Ok(Self { document })
        }

        async fn load_image(&self, src: &str) -> Result<HtmlImageElement, JsValue> {
            let image = HtmlImageElement::new()?;
            image.set_cross_origin(Some("anonymous"));

            let ready = settled(&image, HtmlElement::set_onload);
            image.set_src(src);
            JsFuture::from(ready).await?;

            image.set_onload(None);
            image.set_onerror(None);
            Ok(image)
        }

        async fn load_video(&self, src: &str) -> Result<HtmlVideoElement, JsValue> {
            let video: HtmlVideoElement = self
                .document
                .create_element("video")?
                .dyn_into()
                .map_err(|_| JsValue::from_str("Failed to cast to HtmlVideoElement"))?;
            video.set_cross_origin(Some("anonymous"));
            video.set_muted(true);
            video.set_loop(false);
            video.set_preload("auto");
            video.set_attribute("playsinline", "")?;

            let ready = settled(&video, HtmlElement::set_onloadeddata);
            video.set_src(src);
            JsFuture::from(ready).await?;

            video.set_onloadeddata(None);
            video.set_onerror(None);
            Ok(video)
        }
    }

    impl MediaProvider for ElementProvider {
        type Image = HtmlImageElement;
        type Video = HtmlVideoElement;

        async fn load(&self, media: &MediaRef) -> MediaStatus<HtmlImageElement, HtmlVideoElement> {
            let loaded = match media.kind_hint() {
                Some(MediaKind::StillImage) => self.load_image(media.as_str()).await.map(SceneMedia::StillImage),
                Some(MediaKind::TimedMedia) => self.load_video(media.as_str()).await.map(SceneMedia::TimedMedia),
                None => return MediaStatus::Failed("unsupported media type".to_string()),
            };
            match loaded {
                Ok(media) => MediaStatus::Ready(media),
                Err(err) => MediaStatus::Failed(format!("{:?}", err)),
            }
        }
    }
}
