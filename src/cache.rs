use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;

#[allow(unused_imports)]
use log::{debug, info, warn, error};

use crate::loader::{ImageLoader, LoadError, SlideImage};

/// The shared load operation for one slide. Cloning it hands out the same
/// in-flight or settled outcome, never a second load.
pub type SlideFuture = Shared<BoxFuture<'static, Result<SlideImage, LoadError>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideStatus {
    Loading,
    Loaded,
    Failed,
}

/// One lazily-created cache entry. `image` is populated only once the load
/// settles successfully.
pub struct Slide {
    pub future: SlideFuture,
    pub status: SlideStatus,
    pub image: Option<SlideImage>,
}

/// Per-index image cache over the configured source list. Entries are
/// created on first fetch and never evicted; a failed entry stays failed.
pub struct SlideCache {
    sources: Vec<PathBuf>,
    slides: Vec<Option<Slide>>,
    loader: Arc<dyn ImageLoader>,
}

impl SlideCache {
    pub fn new(sources: Vec<PathBuf>, loader: Arc<dyn ImageLoader>) -> Self {
        let slides = sources.iter().map(|_| None).collect();
        Self {
            sources,
            slides,
            loader,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn source(&self, index: usize) -> Option<&Path> {
        self.sources.get(index).map(PathBuf::as_path)
    }

    /// Returns the shared load future for `index`, starting the load the
    /// first time the index is requested. Out-of-range indices return `None`
    /// without touching the cache.
    pub fn fetch(&mut self, index: usize) -> Option<SlideFuture> {
        let src = self.sources.get(index)?.clone();

        if let Some(slide) = &self.slides[index] {
            return Some(slide.future.clone());
        }

        debug!("loading slide {} from {:?}", index, src);
        let future = self.loader.load(&src).shared();
        self.slides[index] = Some(Slide {
            future: future.clone(),
            status: SlideStatus::Loading,
            image: None,
        });

        Some(future)
    }

    /// Records a settled load outcome for `index`. Entries settle exactly
    /// once: repeated completions and completions for unknown indices are
    /// ignored.
    pub fn complete(&mut self, index: usize, result: Result<SlideImage, LoadError>) {
        if let Some(Some(slide)) = self.slides.get_mut(index) {
            if slide.status != SlideStatus::Loading {
                return;
            }
            match result {
                Ok(image) => {
                    debug!("slide {} loaded ({}x{})", index, image.width, image.height);
                    slide.status = SlideStatus::Loaded;
                    slide.image = Some(image);
                }
                Err(err) => {
                    error!("slide {} failed to load: {}", index, err);
                    slide.status = SlideStatus::Failed;
                }
            }
        }
    }

    pub fn status(&self, index: usize) -> Option<SlideStatus> {
        self.slides.get(index)?.as_ref().map(|slide| slide.status)
    }

    #[allow(dead_code)]
    pub fn image(&self, index: usize) -> Option<&SlideImage> {
        self.slides.get(index)?.as_ref()?.image.as_ref()
    }

    /// Every slide currently holding a decoded image, for the paint pass.
    /// Slides still loading, failed, or never requested are skipped.
    pub fn loaded_images(&self) -> impl Iterator<Item = (usize, &SlideImage)> {
        self.slides.iter().enumerate().filter_map(|(index, slot)| {
            let image = slot.as_ref()?.image.as_ref()?;
            Some((index, image))
        })
    }
}
