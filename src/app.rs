use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::canvas;
use iced::widget::{container, Canvas};
use iced::{Element, Length, Task, Theme};

#[allow(unused_imports)]
use log::{debug, info, warn, error};

use crate::cache::SlideCache;
use crate::carousel::Carousel;
use crate::config;
use crate::file_io;
use crate::invariant::InvariantViolation;
use crate::loader::{ImageLoader, LoadError, SlideImage};
use crate::settings::UserSettings;
use crate::surface::SurfaceRegistry;
use crate::widget::Strip;

#[derive(Debug, Clone)]
pub enum Message {
    DragBegan(f32),
    DragMoved(f32),
    DragEnded,
    SlideResolved(usize, Result<SlideImage, LoadError>),
}

/// Application state: the carousel engine, the slide cache feeding it, and
/// the canvas geometry cache that gets cleared whenever a repaint is due.
pub struct Filmstrip {
    carousel: Carousel,
    slides: SlideCache,
    strip_cache: canvas::Cache,
}

impl Filmstrip {
    /// Builds the app against a registered drawing surface. Fails fast when
    /// the surface cannot be resolved: no state is created and no input
    /// handling is wired. The returned task starts loading the first slides.
    pub fn new(
        surface_name: &str,
        sources: Vec<PathBuf>,
        registry: &SurfaceRegistry,
        loader: Arc<dyn ImageLoader>,
        settings: &UserSettings,
    ) -> Result<(Self, Task<Message>), InvariantViolation> {
        let area = registry.resolve(surface_name)?;
        info!(
            "carousel on '{}' ({}x{}), {} slide(s)",
            surface_name,
            area.width,
            area.height,
            sources.len()
        );

        let mut app = Self {
            carousel: Carousel::new(sources.len(), area, settings.snap_on_release),
            slides: SlideCache::new(sources, loader),
            strip_cache: canvas::Cache::new(),
        };
        let boot = app.render();

        Ok((app, boot))
    }

    /// Requests the active slide and its right neighbor from the cache and
    /// schedules their shared futures; completions come back as
    /// `SlideResolved`. Safe to call any number of times. Also marks the
    /// canvas dirty so the next frame reflects current state.
    fn render(&mut self) -> Task<Message> {
        let active = self.carousel.active_index();

        let mut loads = Vec::new();
        for index in [active, active + 1] {
            if let Some(future) = self.slides.fetch(index) {
                loads.push(Task::perform(future, move |result| {
                    Message::SlideResolved(index, result)
                }));
            }
        }

        self.strip_cache.clear();
        Task::batch(loads)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DragBegan(x) => {
                self.carousel.begin_drag(x);
                Task::none()
            }
            Message::DragMoved(x) => {
                if self.carousel.drag_to(x) {
                    self.strip_cache.clear();
                }
                Task::none()
            }
            Message::DragEnded => {
                if self.carousel.end_drag() {
                    self.render()
                } else {
                    Task::none()
                }
            }
            Message::SlideResolved(index, result) => {
                self.slides.complete(index, result);
                self.strip_cache.clear();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let strip = Canvas::new(Strip {
            carousel: &self.carousel,
            slides: &self.slides,
            cache: &self.strip_cache,
        })
        .width(Length::Fixed(self.carousel.slot_width()))
        .height(Length::Fixed(self.carousel.surface_height()));

        container(strip).center(Length::Fill).into()
    }

    pub fn title(&self) -> String {
        let active = self.slides.source(self.carousel.active_index());
        match active.and_then(file_io::get_filename) {
            Some(name) => format!("{} - {}", config::APP_DISPLAY_NAME, name),
            None => config::APP_DISPLAY_NAME.to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceSpec;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use iced::widget::image::Handle;
    use std::path::Path;

    struct StubLoader;

    impl ImageLoader for StubLoader {
        fn load(&self, src: &Path) -> BoxFuture<'static, Result<SlideImage, LoadError>> {
            let fails = src.to_string_lossy().contains("bad");
            async move {
                if fails {
                    Err(LoadError::Io(std::io::ErrorKind::NotFound))
                } else {
                    Ok(stub_image(400, 200))
                }
            }
            .boxed()
        }
    }

    fn stub_image(width: u32, height: u32) -> SlideImage {
        SlideImage {
            handle: Handle::from_rgba(width, height, vec![0u8; (width * height * 4) as usize]),
            width,
            height,
        }
    }

    fn registry() -> SurfaceRegistry {
        let mut registry = SurfaceRegistry::new();
        registry.register(SurfaceSpec {
            name: "strip".to_string(),
            width: 300.0,
            height: 150.0,
        });
        registry
    }

    fn app(sources: &[&str]) -> Filmstrip {
        let sources = sources.iter().map(PathBuf::from).collect();
        let (app, _boot) = Filmstrip::new(
            "strip",
            sources,
            &registry(),
            Arc::new(StubLoader),
            &UserSettings::default(),
        )
        .unwrap();
        app
    }

    #[test]
    fn construction_fails_against_an_unknown_surface() {
        let result = Filmstrip::new(
            "missing",
            vec![PathBuf::from("a.png")],
            &registry(),
            Arc::new(StubLoader),
            &UserSettings::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn construction_requests_the_first_slides() {
        let app = app(&["a.png", "b.png", "c.png"]);

        assert!(app.slides.status(0).is_some());
        assert!(app.slides.status(1).is_some());
        assert_eq!(app.slides.status(2), None);
    }

    #[test]
    fn drag_messages_drive_the_engine() {
        let mut app = app(&["a.png", "b.png", "c.png", "d.png"]);

        let _ = app.update(Message::DragBegan(260.0));
        let _ = app.update(Message::DragMoved(10.0));
        assert_eq!(app.carousel.current_offset(), -250.0);

        let _ = app.update(Message::DragEnded);
        assert_eq!(app.carousel.active_index(), 1);
        assert_eq!(app.carousel.current_offset(), -250.0);
    }

    #[test]
    fn settling_on_a_new_slide_fetches_its_neighbor() {
        let mut app = app(&["a.png", "b.png", "c.png", "d.png"]);

        let _ = app.update(Message::DragBegan(300.0));
        let _ = app.update(Message::DragMoved(0.0));
        let _ = app.update(Message::DragEnded);
        assert_eq!(app.carousel.active_index(), 1);

        assert!(app.slides.status(2).is_some());
        assert_eq!(app.slides.status(3), None);
    }

    #[test]
    fn resolutions_populate_the_cache() {
        let mut app = app(&["a.png", "b.png"]);

        let _ = app.update(Message::SlideResolved(0, Ok(stub_image(400, 200))));
        let _ = app.update(Message::SlideResolved(
            1,
            Err(LoadError::Decode("truncated".to_string())),
        ));

        assert_eq!(app.slides.image(0).map(|img| img.width), Some(400));
        assert!(app.slides.image(1).is_none());
    }

    #[test]
    fn failed_neighbor_does_not_block_the_active_slide() {
        let mut app = app(&["good.png", "bad.png"]);

        let _ = app.update(Message::SlideResolved(0, Ok(stub_image(4, 2))));
        let _ = app.update(Message::SlideResolved(
            1,
            Err(LoadError::Io(std::io::ErrorKind::NotFound)),
        ));

        let painted: Vec<usize> = app.slides.loaded_images().map(|(i, _)| i).collect();
        assert_eq!(painted, vec![0]);
    }

    #[test]
    fn title_names_the_active_slide() {
        let app = app(&["shots/first.png", "shots/second.png"]);
        assert_eq!(
            app.title(),
            format!("{} - first.png", config::APP_DISPLAY_NAME)
        );
    }

    #[test]
    fn title_without_sources_is_the_app_name() {
        let app = app(&[]);
        assert_eq!(app.title(), config::APP_DISPLAY_NAME.to_string());
    }

    #[test]
    fn moves_without_a_grab_leave_state_untouched() {
        let mut app = app(&["a.png", "b.png"]);

        let _ = app.update(Message::DragMoved(-400.0));
        let _ = app.update(Message::DragEnded);

        assert_eq!(app.carousel.current_offset(), 0.0);
        assert_eq!(app.carousel.active_index(), 0);
    }
}
