use iced::advanced::graphics::core::Image;
use iced::event;
use iced::mouse;
use iced::touch;
use iced::widget::canvas;
use iced::widget::canvas::Geometry;
use iced::{Rectangle, Renderer, Theme, Vector};

#[allow(unused_imports)]
use log::{debug, info, warn, error};

use crate::app::Message;
use crate::cache::SlideCache;
use crate::carousel::Carousel;

/// Canvas program for the strip. Maps pointer and touch input onto the
/// carousel's three drag transitions and paints every loaded slide at the
/// current offset. Touch is tracked per finger: the first finger down owns
/// the drag, later fingers are swallowed so the surface never scrolls.
pub struct Strip<'a> {
    pub carousel: &'a Carousel,
    pub slides: &'a SlideCache,
    pub cache: &'a canvas::Cache,
}

#[derive(Debug, Default)]
pub struct PointerState {
    active_finger: Option<touch::Finger>,
}

impl<'a> Strip<'a> {
    fn mouse_dragging(&self, state: &PointerState) -> bool {
        self.carousel.is_dragging() && state.active_finger.is_none()
    }
}

impl<'a> canvas::Program<Message> for Strip<'a> {
    type State = PointerState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if state.active_finger.is_none() {
                    if let Some(position) = cursor.position_in(bounds) {
                        return (event::Status::Captured, Some(Message::DragBegan(position.x)));
                    }
                }
                (event::Status::Ignored, None)
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if self.mouse_dragging(state) {
                    return match cursor.position_in(bounds) {
                        Some(position) => {
                            (event::Status::Captured, Some(Message::DragMoved(position.x)))
                        }
                        // cursor slid off the surface mid-drag: settle, like
                        // a release
                        None => (event::Status::Ignored, Some(Message::DragEnded)),
                    };
                }
                (event::Status::Ignored, None)
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if self.mouse_dragging(state) {
                    return (event::Status::Captured, Some(Message::DragEnded));
                }
                (event::Status::Ignored, None)
            }
            canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                if self.mouse_dragging(state) {
                    return (event::Status::Ignored, Some(Message::DragEnded));
                }
                (event::Status::Ignored, None)
            }
            canvas::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if state.active_finger.is_none() && bounds.contains(position) {
                    state.active_finger = Some(id);
                    let x = position.x - bounds.x;
                    return (event::Status::Captured, Some(Message::DragBegan(x)));
                }
                if bounds.contains(position) {
                    return (event::Status::Captured, None);
                }
                (event::Status::Ignored, None)
            }
            canvas::Event::Touch(touch::Event::FingerMoved { id, position }) => {
                // the owning finger keeps the drag even outside the surface
                if state.active_finger == Some(id) {
                    let x = position.x - bounds.x;
                    return (event::Status::Captured, Some(Message::DragMoved(x)));
                }
                if bounds.contains(position) {
                    return (event::Status::Captured, None);
                }
                (event::Status::Ignored, None)
            }
            canvas::Event::Touch(touch::Event::FingerLifted { id, position })
            | canvas::Event::Touch(touch::Event::FingerLost { id, position }) => {
                if state.active_finger == Some(id) {
                    state.active_finger = None;
                    return (event::Status::Captured, Some(Message::DragEnded));
                }
                if bounds.contains(position) {
                    return (event::Status::Captured, None);
                }
                (event::Status::Ignored, None)
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let strip = self.cache.draw(renderer, bounds.size(), |frame| {
            frame.with_save(|frame| {
                frame.translate(Vector::new(self.carousel.current_offset(), 0.0));

                for (index, image) in self.slides.loaded_images() {
                    let slot = self.carousel.fit_rect(index, image.width, image.height);
                    frame.draw_image(slot, Image::new(image.handle.clone()));
                }
            });
        });

        vec![strip]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.carousel.is_dragging() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}
