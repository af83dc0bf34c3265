use iced::{Point, Rectangle, Size};

#[allow(unused_imports)]
use log::{debug, info, warn, error};

use crate::surface::PaintArea;

/// Drag phase of the strip: resting, or tracking one pointer since it went
/// down. `start_x` is the pointer x at the grab, `base_offset` the strip
/// offset at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging { start_x: f32, base_offset: f32 },
}

/// The interaction/state engine of the strip. Converts pointer positions
/// into a clamped horizontal offset and resolves the nearest slide when a
/// drag is released. Pure state; painting reads it, never the other way.
#[derive(Debug, Clone)]
pub struct Carousel {
    slide_count: usize,
    slot_width: f32,
    surface_height: f32,
    active_index: usize,
    current_offset: f32,
    phase: DragPhase,
    snap_on_release: bool,
}

impl Carousel {
    pub fn new(slide_count: usize, area: PaintArea, snap_on_release: bool) -> Self {
        Self {
            slide_count,
            slot_width: area.width,
            surface_height: area.height,
            active_index: 0,
            current_offset: 0.0,
            phase: DragPhase::Idle,
            snap_on_release,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    pub fn surface_height(&self) -> f32 {
        self.surface_height
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    fn max_index(&self) -> usize {
        self.slide_count.saturating_sub(1)
    }

    /// Leftmost slide sits fully right-aligned at offset 0; the rightmost
    /// fully left-aligned at the negative extreme.
    fn min_offset(&self) -> f32 {
        -(self.max_index() as f32) * self.slot_width
    }

    fn clamp_offset(&self, proposed: f32) -> f32 {
        proposed.clamp(self.min_offset(), 0.0)
    }

    /// Idle -> Dragging. Records the grab point and the offset it started
    /// from.
    pub fn begin_drag(&mut self, x: f32) {
        self.phase = DragPhase::Dragging {
            start_x: x,
            base_offset: self.current_offset,
        };
    }

    /// Dragging -> Dragging. Moves the strip by the pointer delta, clamped
    /// to the valid offset range. Returns true when a repaint is due; a move
    /// without a preceding grab changes nothing.
    pub fn drag_to(&mut self, x: f32) -> bool {
        match self.phase {
            DragPhase::Idle => false,
            DragPhase::Dragging {
                start_x,
                base_offset,
            } => {
                let delta = x - start_x;
                self.current_offset = self.clamp_offset(base_offset + delta);
                true
            }
        }
    }

    /// Dragging -> Idle. Resolves the nearest slide from the released offset
    /// and makes it active. The offset itself keeps its released value
    /// unless snap-on-release is enabled. Returns true when a repaint is
    /// due; a release without a preceding grab changes nothing.
    pub fn end_drag(&mut self) -> bool {
        match self.phase {
            DragPhase::Idle => false,
            DragPhase::Dragging { .. } => {
                self.phase = DragPhase::Idle;

                let nearest = (-self.current_offset / self.slot_width).round().max(0.0) as usize;
                self.active_index = nearest.min(self.max_index());
                if self.snap_on_release {
                    self.current_offset = -(self.active_index as f32) * self.slot_width;
                }

                debug!(
                    "drag settled on slide {} at offset {}",
                    self.active_index, self.current_offset
                );
                true
            }
        }
    }

    /// Horizontal origin of slot `index`, before the drag translation is
    /// applied.
    pub fn slot_x(&self, index: usize) -> f32 {
        index as f32 * self.slot_width
    }

    /// Where to draw an image of the given pixel size inside its slot:
    /// uniformly scaled to fit the slot width and surface height, then
    /// centered both ways. Coordinates are pre-translation, like `slot_x`.
    pub fn fit_rect(&self, index: usize, image_width: u32, image_height: u32) -> Rectangle {
        let image_width = image_width as f32;
        let image_height = image_height as f32;

        let scale = (self.slot_width / image_width).min(self.surface_height / image_height);
        let scaled_width = image_width * scale;
        let scaled_height = image_height * scale;

        let x = self.slot_x(index) + (self.slot_width - scaled_width) / 2.0;
        let y = (self.surface_height - scaled_height) / 2.0;

        Rectangle::new(Point::new(x, y), Size::new(scaled_width, scaled_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(slide_count: usize) -> Carousel {
        Carousel::new(
            slide_count,
            PaintArea {
                width: 300.0,
                height: 150.0,
            },
            false,
        )
    }

    #[test]
    fn drag_offsets_stay_clamped() {
        let mut carousel = strip(4);

        carousel.begin_drag(0.0);
        carousel.drag_to(500.0);
        assert_eq!(carousel.current_offset(), 0.0);

        carousel.drag_to(-5000.0);
        assert_eq!(carousel.current_offset(), -900.0);
    }

    #[test]
    fn release_resolves_nearest_slide() {
        let mut carousel = strip(4);

        carousel.begin_drag(0.0);
        carousel.drag_to(-250.0);
        carousel.end_drag();

        assert_eq!(carousel.active_index(), 1);
        assert_eq!(carousel.current_offset(), -250.0);
        assert!(!carousel.is_dragging());
    }

    #[test]
    fn release_far_left_clamps_to_last_slide() {
        let mut carousel = strip(4);

        carousel.begin_drag(0.0);
        carousel.drag_to(-900.0);
        carousel.end_drag();

        assert_eq!(carousel.active_index(), 3);
    }

    #[test]
    fn snap_on_release_lands_on_slot_boundary() {
        let mut carousel = Carousel::new(
            4,
            PaintArea {
                width: 300.0,
                height: 150.0,
            },
            true,
        );

        carousel.begin_drag(0.0);
        carousel.drag_to(-250.0);
        carousel.end_drag();

        assert_eq!(carousel.active_index(), 1);
        assert_eq!(carousel.current_offset(), -300.0);
    }

    #[test]
    fn moves_and_releases_without_a_grab_change_nothing() {
        let mut carousel = strip(4);

        assert!(!carousel.drag_to(-250.0));
        assert!(!carousel.end_drag());
        assert_eq!(carousel.current_offset(), 0.0);
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn drag_continues_from_settled_offset() {
        let mut carousel = strip(4);

        carousel.begin_drag(100.0);
        carousel.drag_to(-150.0);
        carousel.end_drag();
        assert_eq!(carousel.current_offset(), -250.0);

        carousel.begin_drag(50.0);
        carousel.drag_to(40.0);
        assert_eq!(carousel.current_offset(), -260.0);
    }

    #[test]
    fn single_slide_strip_never_moves() {
        let mut carousel = strip(1);

        carousel.begin_drag(0.0);
        carousel.drag_to(-400.0);
        assert_eq!(carousel.current_offset(), 0.0);

        carousel.end_drag();
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn empty_strip_is_inert() {
        let mut carousel = strip(0);

        carousel.begin_drag(10.0);
        carousel.drag_to(-10.0);
        carousel.end_drag();

        assert_eq!(carousel.current_offset(), 0.0);
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn wide_image_scales_down_to_fill_slot() {
        let carousel = strip(4);
        let rect = carousel.fit_rect(0, 400, 200);

        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 300.0);
        assert_eq!(rect.height, 150.0);
    }

    #[test]
    fn small_image_is_centered_in_its_slot() {
        let carousel = strip(4);
        let rect = carousel.fit_rect(1, 100, 100);

        assert_eq!(rect.width, 150.0);
        assert_eq!(rect.height, 150.0);
        assert_eq!(rect.x, 300.0 + 75.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn tall_image_gets_horizontal_margins() {
        let carousel = strip(4);
        let rect = carousel.fit_rect(0, 100, 300);

        assert_eq!(rect.height, 150.0);
        assert_eq!(rect.width, 50.0);
        assert_eq!(rect.x, 125.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn wide_image_on_a_tall_surface_centers_vertically() {
        let carousel = Carousel::new(
            4,
            PaintArea {
                width: 300.0,
                height: 600.0,
            },
            false,
        );
        let rect = carousel.fit_rect(0, 400, 200);

        assert_eq!(rect.width, 300.0);
        assert_eq!(rect.height, 150.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 225.0);
    }
}
