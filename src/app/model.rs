// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Session state: the view-model every message updates.

use tiny_skia::Pixmap;

use crate::app::document::{PixelCopy, RasterDocument, RegionRenderer};
use crate::app::view::crop::{
    CropOutcome, CropPreview, CropSelector, PointerEvent, draw_overlay, render_overlay,
    render_preview,
};
use crate::backend::{DetectedFace, MatchResponse, Thumbnail};
use crate::config::AppConfig;
use crate::domain::{DisplayBounds, SelectionRect};

// =============================================================================
// Enums
// =============================================================================

/// Workflow steps; exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStep {
    #[default]
    SelectSource,
    Gallery,
    Crop,
    Match,
    Results,
    Exported,
}

impl WorkflowStep {
    /// 1-based step number as shown to the user.
    pub fn number(self) -> u8 {
        match self {
            WorkflowStep::SelectSource => 1,
            WorkflowStep::Gallery => 2,
            WorkflowStep::Crop => 3,
            WorkflowStep::Match => 4,
            WorkflowStep::Results => 5,
            WorkflowStep::Exported => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Local,
    Drive,
}

/// Where an image list request came from; decides how failures surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    Local,
    Drive,
    AutoLoad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A blocking, user-facing message (the "alert").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Inline status text (auth and export panels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub ok: bool,
    pub text: String,
}

impl StatusLine {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchingProgress {
    #[default]
    Hidden,
    Running,
    Complete,
}

// =============================================================================
// Gallery
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    pub page: u32,
    pub total_pages: u32,
    pub thumbnails: Vec<Thumbnail>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            thumbnails: Vec::new(),
        }
    }
}

impl GalleryState {
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.total_pages).then_some(self.page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then_some(self.page - 1)
    }
}

// =============================================================================
// Crop session
// =============================================================================

/// Crop tool for one opened image.
///
/// Starts out loading: previews asked for before the raster is decoded are
/// remembered and rendered once it arrives.
pub struct CropSession {
    pub path: String,
    pub selector: CropSelector,
    pub faces: Vec<DetectedFace>,
    /// Detected face the selection was taken from, until the user changes it.
    face_index: Option<usize>,
    document: Option<RasterDocument>,
    preview: Option<CropPreview>,
    preview_pending: bool,
    overlay: Option<Pixmap>,
    overlay_frames: u64,
}

impl CropSession {
    pub fn new(
        path: String,
        natural_width: u32,
        natural_height: u32,
        display: DisplayBounds,
        faces: Vec<DetectedFace>,
    ) -> Self {
        Self {
            path,
            selector: CropSelector::new(natural_width, natural_height, display),
            faces,
            face_index: None,
            document: None,
            preview: None,
            preview_pending: false,
            overlay: None,
            overlay_frames: 0,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn is_preview_pending(&self) -> bool {
        self.preview_pending
    }

    pub fn face_index(&self) -> Option<usize> {
        self.face_index
    }

    pub fn preview(&self) -> Option<&CropPreview> {
        self.preview.as_ref()
    }

    pub fn overlay(&self) -> Option<&Pixmap> {
        self.overlay.as_ref()
    }

    /// How many times the overlay has been drawn.
    pub fn overlay_frames(&self) -> u64 {
        self.overlay_frames
    }

    /// The decoded raster arrived.
    ///
    /// When its real size differs from what the backend announced, the
    /// selector starts over on the real size with the same display geometry.
    pub fn finish_loading(&mut self, document: RasterDocument, renderer: &dyn RegionRenderer) {
        let (width, height) = document.dimensions();
        if self.selector.natural_size() != (width, height) {
            log::warn!(
                "{}: announced {:?}, decoded {width}x{height}",
                self.path,
                self.selector.natural_size()
            );
            self.selector = CropSelector::new(width, height, self.selector.display());
        }
        self.document = Some(document);
        self.redraw_overlay();

        if self.preview_pending {
            self.preview_pending = false;
            self.regenerate_preview(renderer);
        }
    }

    /// Render the preview now, or as soon as the image has loaded.
    pub fn request_preview(&mut self, renderer: &dyn RegionRenderer) {
        if self.document.is_none() {
            self.preview_pending = true;
            return;
        }
        self.regenerate_preview(renderer);
    }

    fn regenerate_preview(&mut self, renderer: &dyn RegionRenderer) {
        let Some(document) = &self.document else {
            return;
        };
        match render_preview(document, self.selector.selection(), renderer) {
            Ok(Some(preview)) => self.preview = Some(preview),
            Ok(None) => {}
            Err(e) => log::error!("{}: preview failed: {e}", self.path),
        }
    }

    /// Redraw the overlay for the selector's current state.
    pub fn redraw_overlay(&mut self) {
        let fits = self.overlay.as_ref().is_some_and(|pixmap| {
            (pixmap.width(), pixmap.height()) == self.selector.display().pixel_size()
        });
        if fits {
            if let Some(pixmap) = self.overlay.as_mut() {
                draw_overlay(pixmap, &self.selector);
            }
        } else {
            self.overlay = render_overlay(&self.selector);
        }
        self.overlay_frames += 1;
    }

    /// Feed one pointer event through the selector.
    pub fn pointer(&mut self, event: PointerEvent, renderer: &dyn RegionRenderer) -> CropOutcome {
        let outcome = self.selector.handle(event);
        match outcome {
            CropOutcome::Ignored | CropOutcome::Started => {}
            CropOutcome::Redraw => self.redraw_overlay(),
            CropOutcome::Committed(_) => {
                self.face_index = None;
                self.redraw_overlay();
                self.request_preview(renderer);
            }
        }
        outcome
    }

    pub fn resize(&mut self, display: DisplayBounds) {
        self.selector.resize(display);
        self.redraw_overlay();
    }

    /// Replace the selection wholesale and refresh overlay and preview.
    pub fn set_selection(&mut self, rect: SelectionRect, renderer: &dyn RegionRenderer) {
        self.face_index = None;
        self.selector.set_selection(rect);
        self.refresh(renderer);
    }

    /// Select the detected face with backend index `index`; `false` if there is none.
    pub fn select_face(&mut self, index: usize, renderer: &dyn RegionRenderer) -> bool {
        let Some(face) = self.faces.iter().find(|face| face.index == index) else {
            return false;
        };
        self.selector.set_selection(SelectionRect::from_bbox(face.bbox));
        self.face_index = Some(index);
        self.refresh(renderer);
        true
    }

    /// Back to the centered default selection.
    pub fn reset(&mut self, renderer: &dyn RegionRenderer) {
        self.face_index = None;
        self.selector.reset();
        self.refresh(renderer);
    }

    fn refresh(&mut self, renderer: &dyn RegionRenderer) {
        self.redraw_overlay();
        self.request_preview(renderer);
    }
}

// =============================================================================
// Session
// =============================================================================

/// Everything the workflow remembers between messages.
pub struct Session {
    pub step: WorkflowStep,
    pub source: Option<ImageSource>,

    // Images.
    pub images: Vec<String>,
    pub gallery: GalleryState,

    // Crop.
    pub current_image: Option<String>,
    pub crop: Option<CropSession>,

    // Matching.
    pub matching: MatchingProgress,
    pub results: Option<MatchResponse>,

    // UI state.
    pub notices: Vec<Notice>,
    pub auth_status: Option<StatusLine>,
    pub export_status: Option<StatusLine>,
    /// Set when setup failed badly enough that only a restart helps.
    pub fatal: Option<String>,

    // Settings.
    pub max_display: (u32, u32),
    pub similarity_thresholds: (f64, f64),
    /// Pixel-copy backend used for crop previews.
    pub renderer: Box<dyn RegionRenderer>,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            step: WorkflowStep::SelectSource,
            source: None,
            images: Vec::new(),
            gallery: GalleryState::default(),
            current_image: None,
            crop: None,
            matching: MatchingProgress::Hidden,
            results: None,
            notices: Vec::new(),
            auth_status: None,
            export_status: None,
            fatal: None,
            max_display: (config.max_display_width, config.max_display_height),
            similarity_thresholds: (config.similarity_high, config.similarity_medium),
            renderer: Box::new(PixelCopy),
        }
    }

    pub fn info<S: Into<String>>(&mut self, msg: S) {
        self.notices.push(Notice {
            level: NoticeLevel::Info,
            text: msg.into(),
        });
    }

    pub fn alert<S: Into<String>>(&mut self, msg: S) {
        self.notices.push(Notice {
            level: NoticeLevel::Error,
            text: msg.into(),
        });
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn show_step(&mut self, step: WorkflowStep) {
        if self.step != step {
            log::info!("step {} -> {}", self.step.number(), step.number());
        }
        self.step = step;
    }

    /// Display geometry for a freshly opened image.
    pub fn fit_display(&self, natural_width: u32, natural_height: u32) -> DisplayBounds {
        let (max_w, max_h) = self.max_display;
        DisplayBounds::fit(natural_width, natural_height, max_w, max_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CropRegion, Point};
    use crate::error::Result;
    use image::{DynamicImage, RgbaImage};
    use std::cell::Cell;

    /// Counts calls and hands back a blank raster of the requested size.
    #[derive(Default)]
    struct CountingRenderer {
        calls: Cell<usize>,
    }

    impl RegionRenderer for CountingRenderer {
        fn render_region(&self, _source: &DynamicImage, region: CropRegion) -> Result<RgbaImage> {
            self.calls.set(self.calls.get() + 1);
            Ok(RgbaImage::new(region.width, region.height))
        }
    }

    fn blank_document(width: u32, height: u32) -> RasterDocument {
        RasterDocument::new(DynamicImage::ImageRgba8(RgbaImage::new(width, height)))
    }

    fn session(width: u32, height: u32) -> CropSession {
        CropSession::new(
            "/photos/a.jpg".into(),
            width,
            height,
            DisplayBounds::sized(f64::from(width), f64::from(height)),
            Vec::new(),
        )
    }

    #[test]
    fn preview_before_load_is_deferred_not_dropped() {
        let renderer = CountingRenderer::default();
        let mut crop = session(1000, 800);

        crop.request_preview(&renderer);
        assert!(crop.is_preview_pending());
        assert!(crop.preview().is_none());
        assert_eq!(renderer.calls.get(), 0);

        crop.finish_loading(blank_document(1000, 800), &renderer);
        assert!(!crop.is_preview_pending());
        assert_eq!(renderer.calls.get(), 1);
        assert_eq!(crop.preview().unwrap().dimensions(), (500, 400));
    }

    #[test]
    fn drag_end_to_end() {
        let renderer = CountingRenderer::default();
        let mut crop = session(2000, 1000);
        crop.finish_loading(blank_document(2000, 1000), &renderer);

        crop.pointer(PointerEvent::Down(Point::new(100.0, 100.0)), &renderer);
        crop.pointer(PointerEvent::Move(Point::new(50.0, 50.0)), &renderer);
        let outcome = crop.pointer(PointerEvent::Up, &renderer);

        let rect = SelectionRect::new(50, 50, 100, 100);
        assert_eq!(outcome, CropOutcome::Committed(rect));
        assert_eq!(crop.selector.selection(), rect);
        assert_eq!(crop.preview().unwrap().dimensions(), (50, 50));
    }

    #[test]
    fn degenerate_commit_keeps_previous_preview() {
        let renderer = CountingRenderer::default();
        let mut crop = session(400, 400);
        crop.finish_loading(blank_document(400, 400), &renderer);
        crop.request_preview(&renderer);
        let before = crop.preview().cloned();
        assert!(before.is_some());

        crop.pointer(PointerEvent::Down(Point::new(10.0, 10.0)), &renderer);
        crop.pointer(PointerEvent::Up, &renderer);

        assert_eq!(crop.preview().cloned(), before);
        assert_eq!(renderer.calls.get(), 1);
    }

    #[test]
    fn each_move_redraws_overlay() {
        let renderer = CountingRenderer::default();
        let mut crop = session(200, 200);
        crop.finish_loading(blank_document(200, 200), &renderer);
        let frames = crop.overlay_frames();

        crop.pointer(PointerEvent::Down(Point::new(10.0, 10.0)), &renderer);
        for x in 20..25 {
            crop.pointer(PointerEvent::Move(Point::new(f64::from(x), 40.0)), &renderer);
        }
        assert_eq!(crop.overlay_frames(), frames + 5);

        crop.pointer(PointerEvent::Up, &renderer);
        assert_eq!(crop.overlay_frames(), frames + 6);
        assert!(crop.overlay().is_some());
    }

    #[test]
    fn decoded_size_wins_over_announced_size() {
        let renderer = CountingRenderer::default();
        let mut crop = session(1000, 800);
        crop.finish_loading(blank_document(500, 400), &renderer);
        assert_eq!(crop.selector.natural_size(), (500, 400));
        assert_eq!(crop.selector.selection(), SelectionRect::new(125, 100, 375, 300));
    }

    #[test]
    fn resize_reallocates_overlay() {
        let renderer = CountingRenderer::default();
        let mut crop = session(200, 100);
        crop.finish_loading(blank_document(200, 100), &renderer);

        crop.resize(DisplayBounds::sized(100.0, 50.0));
        let overlay = crop.overlay().unwrap();
        assert_eq!((overlay.width(), overlay.height()), (100, 50));
        assert_eq!(crop.selector.scale(), (2.0, 2.0));
    }

    #[test]
    fn gallery_bounds() {
        let gallery = GalleryState {
            page: 1,
            total_pages: 3,
            thumbnails: Vec::new(),
        };
        assert_eq!(gallery.prev_page(), None);
        assert_eq!(gallery.next_page(), Some(2));

        let last = GalleryState {
            page: 3,
            ..gallery
        };
        assert_eq!(last.next_page(), None);
        assert_eq!(last.prev_page(), Some(2));
    }
}
