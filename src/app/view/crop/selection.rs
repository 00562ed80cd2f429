// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/selection.rs
//
// Crop selector: pointer drag state machine and coordinate mapping.

use crate::domain::{DisplayBounds, Point, SelectionRect};

/// Pointer input in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
}

/// Drag state, both points in original-pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { anchor: Point, cursor: Point },
}

/// What the owner has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropOutcome {
    /// Nothing changed.
    Ignored,
    /// A drag started.
    Started,
    /// The in-progress rectangle moved; redraw the overlay.
    Redraw,
    /// A drag finished; redraw and regenerate the preview.
    Committed(SelectionRect),
}

/// Rectangle selection over a displayed image.
///
/// The selection is kept in original-pixel space; only the overlay converts
/// back to display space.
#[derive(Debug, Clone)]
pub struct CropSelector {
    natural_width: u32,
    natural_height: u32,
    display: DisplayBounds,
    selection: SelectionRect,
    drag: DragState,
}

impl CropSelector {
    pub fn new(natural_width: u32, natural_height: u32, display: DisplayBounds) -> Self {
        Self {
            natural_width,
            natural_height,
            display,
            selection: SelectionRect::centered(natural_width, natural_height),
            drag: DragState::Idle,
        }
    }

    pub fn natural_size(&self) -> (u32, u32) {
        (self.natural_width, self.natural_height)
    }

    pub fn display(&self) -> DisplayBounds {
        self.display
    }

    pub fn selection(&self) -> SelectionRect {
        self.selection
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Current `(scaleX, scaleY)`, derived from the current display geometry.
    pub fn scale(&self) -> (f64, f64) {
        self.display
            .scale_for(self.natural_width, self.natural_height)
    }

    /// Viewport point to original-pixel point.
    pub fn to_original(&self, viewport: Point) -> Point {
        let local = self.display.to_local(viewport);
        let (sx, sy) = self.scale();
        Point::new(local.x * sx, local.y * sy)
    }

    /// Original-pixel point to display-local point.
    pub fn to_display(&self, original: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(original.x / sx, original.y / sy)
    }

    /// Corners of the rectangle the overlay should show: the live drag while
    /// dragging, the committed selection otherwise. Unordered while dragging.
    pub fn visible_corners(&self) -> (Point, Point) {
        match self.drag {
            DragState::Dragging { anchor, cursor } => (anchor, cursor),
            DragState::Idle => {
                let r = self.selection;
                (
                    Point::new(f64::from(r.x1), f64::from(r.y1)),
                    Point::new(f64::from(r.x2), f64::from(r.y2)),
                )
            }
        }
    }

    /// Single entry point for pointer input.
    pub fn handle(&mut self, event: PointerEvent) -> CropOutcome {
        match (event, self.drag) {
            (PointerEvent::Down(at), _) => {
                let anchor = self.to_original(at);
                self.drag = DragState::Dragging {
                    anchor,
                    cursor: anchor,
                };
                CropOutcome::Started
            }
            (PointerEvent::Move(at), DragState::Dragging { anchor, .. }) => {
                self.drag = DragState::Dragging {
                    anchor,
                    cursor: self.to_original(at),
                };
                CropOutcome::Redraw
            }
            (PointerEvent::Up, DragState::Dragging { anchor, cursor }) => {
                self.drag = DragState::Idle;
                self.selection = SelectionRect::from_corners(anchor, cursor);
                CropOutcome::Committed(self.selection)
            }
            (PointerEvent::Move(_) | PointerEvent::Up, DragState::Idle) => CropOutcome::Ignored,
        }
    }

    /// The image was re-laid out; scales follow on next use.
    pub fn resize(&mut self, display: DisplayBounds) {
        self.display = display;
    }

    /// Replace the selection wholesale, abandoning any drag.
    pub fn set_selection(&mut self, rect: SelectionRect) {
        self.drag = DragState::Idle;
        self.selection = rect;
    }

    /// Back to the centered 50% box.
    pub fn reset(&mut self) {
        self.set_selection(SelectionRect::centered(
            self.natural_width,
            self.natural_height,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(selector: &mut CropSelector, from: Point, to: Point) -> CropOutcome {
        selector.handle(PointerEvent::Down(from));
        selector.handle(PointerEvent::Move(to));
        selector.handle(PointerEvent::Up)
    }

    #[test]
    fn click_maps_display_local_to_original() {
        for &(dw, dh, nw, nh, px, py) in &[
            (500.0, 250.0, 2000, 1000, 120.0, 40.0),
            (800.0, 600.0, 800, 600, 33.0, 599.0),
            (300.0, 400.0, 1200, 800, 150.0, 200.0),
        ] {
            let selector = CropSelector::new(nw, nh, DisplayBounds::sized(dw, dh));
            let p = selector.to_original(Point::new(px, py));
            assert!((p.x - px * f64::from(nw) / dw).abs() < 1e-9);
            assert!((p.y - py * f64::from(nh) / dh).abs() < 1e-9);
        }
    }

    #[test]
    fn viewport_offset_is_removed_before_scaling() {
        let selector = CropSelector::new(1000, 1000, DisplayBounds::new(40.0, 60.0, 500.0, 500.0));
        assert_eq!(
            selector.to_original(Point::new(140.0, 160.0)),
            Point::new(200.0, 200.0)
        );
    }

    #[test]
    fn initial_rect_is_centered_half() {
        let selector = CropSelector::new(1000, 800, DisplayBounds::sized(500.0, 400.0));
        assert_eq!(selector.selection(), SelectionRect::new(250, 200, 750, 600));
        assert_eq!(selector.drag(), DragState::Idle);
    }

    #[test]
    fn drag_commits_normalized_rect() {
        let mut selector = CropSelector::new(2000, 1000, DisplayBounds::sized(2000.0, 1000.0));
        let outcome = drag(
            &mut selector,
            Point::new(100.0, 100.0),
            Point::new(50.0, 50.0),
        );
        let expected = SelectionRect::new(50, 50, 100, 100);
        assert_eq!(outcome, CropOutcome::Committed(expected));
        assert_eq!(selector.selection(), expected);
        assert_eq!(selector.drag(), DragState::Idle);
    }

    #[test]
    fn drag_in_scaled_display_commits_original_pixels() {
        // Shown at quarter size: every display pixel is 4 original pixels.
        let mut selector = CropSelector::new(2000, 1000, DisplayBounds::sized(500.0, 250.0));
        drag(
            &mut selector,
            Point::new(100.0, 10.0),
            Point::new(25.0, 60.0),
        );
        assert_eq!(selector.selection(), SelectionRect::new(100, 40, 400, 240));
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut selector = CropSelector::new(100, 100, DisplayBounds::sized(100.0, 100.0));
        let before = selector.selection();
        assert_eq!(
            selector.handle(PointerEvent::Move(Point::new(5.0, 5.0))),
            CropOutcome::Ignored
        );
        assert_eq!(selector.handle(PointerEvent::Up), CropOutcome::Ignored);
        assert_eq!(selector.selection(), before);
    }

    #[test]
    fn every_move_while_dragging_requests_redraw() {
        let mut selector = CropSelector::new(100, 100, DisplayBounds::sized(100.0, 100.0));
        assert_eq!(
            selector.handle(PointerEvent::Down(Point::new(10.0, 10.0))),
            CropOutcome::Started
        );
        for i in 0..5 {
            let at = Point::new(20.0 + f64::from(i), 30.0);
            assert_eq!(selector.handle(PointerEvent::Move(at)), CropOutcome::Redraw);
            assert_eq!(selector.visible_corners(), (Point::new(10.0, 10.0), at));
        }
        // The committed selection is untouched until release.
        assert_eq!(selector.selection(), SelectionRect::new(25, 25, 75, 75));
    }

    #[test]
    fn click_without_move_commits_empty_rect() {
        let mut selector = CropSelector::new(100, 100, DisplayBounds::sized(100.0, 100.0));
        selector.handle(PointerEvent::Down(Point::new(42.0, 17.0)));
        assert_eq!(
            selector.handle(PointerEvent::Up),
            CropOutcome::Committed(SelectionRect::new(42, 17, 42, 17))
        );
    }

    #[test]
    fn resize_changes_mapping_without_touching_selection() {
        let mut selector = CropSelector::new(1000, 1000, DisplayBounds::sized(500.0, 500.0));
        assert_eq!(selector.scale(), (2.0, 2.0));
        let before = selector.selection();

        selector.resize(DisplayBounds::sized(250.0, 1000.0));
        assert_eq!(selector.scale(), (4.0, 1.0));
        assert_eq!(selector.selection(), before);
        assert_eq!(
            selector.to_original(Point::new(10.0, 10.0)),
            Point::new(40.0, 10.0)
        );
    }

    #[test]
    fn set_selection_cancels_drag() {
        let mut selector = CropSelector::new(100, 100, DisplayBounds::sized(100.0, 100.0));
        selector.handle(PointerEvent::Down(Point::new(1.0, 1.0)));
        selector.set_selection(SelectionRect::new(5, 5, 10, 10));
        assert_eq!(selector.drag(), DragState::Idle);
        assert_eq!(selector.handle(PointerEvent::Up), CropOutcome::Ignored);

        selector.reset();
        assert_eq!(selector.selection(), SelectionRect::new(25, 25, 75, 75));
    }
}
