//! Freehand drawing surface.
//!
//! Turns pointer gestures into painted stroke segments on an owned raster
//! and exports the raster as PNG for upload.
//!
//! ## Stroke state
//!
//! | State | `begin_stroke` | `extend_stroke` | `end_stroke` |
//! |-------|----------------|-----------------|--------------|
//! | **Idle** | → Drawing | no-op | no-op |
//! | **Drawing** | restart at point | paint segment, stay | → Idle |
//!
//! `clear` wipes pixels only. A stroke in progress keeps its last point,
//! so the next `extend_stroke` after a mid-stroke clear continues from
//! where the pointer was before the clear.

use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use scrawl_core::config::PadConfig;
use scrawl_core::error::{ConfigError, ExportError};
use scrawl_core::model::{Brush, ExportedImage, Point};
use scrawl_render::{DirtyRegion, PixelRect, Raster};
use std::future::Future;

/// Pen state of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// Pen up; move events are ignored.
    #[default]
    Idle,
    /// Pen down; `last` is where the next segment starts.
    Drawing { last: Point },
}

/// An owned canvas that records freehand strokes.
///
/// One instance per view. All methods run on the UI thread and return
/// immediately; only export hands its result back through a future.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    raster: Raster,
    brush: Brush,
    stroke: StrokeState,
    dirty: DirtyRegion,
}

impl DrawingSurface {
    /// Create a transparent surface with the default brush.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_brush(width, height, Brush::default())
    }

    pub fn with_brush(width: u32, height: u32, brush: Brush) -> Self {
        log::debug!("new drawing surface {width}x{height}");
        Self {
            raster: Raster::new(width, height),
            brush,
            stroke: StrokeState::Idle,
            dirty: DirtyRegion::new(),
        }
    }

    pub fn from_config(config: &PadConfig) -> Self {
        Self::with_brush(config.width, config.height, config.brush)
    }

    // ─── Stroke operations ───────────────────────────────────────────────

    /// Put the pen down at `point`. Paints nothing by itself.
    pub fn begin_stroke(&mut self, point: Point) {
        if let StrokeState::Drawing { last } = self.stroke {
            log::debug!("stroke restarted without pointer up (was at {last:?})");
        }
        self.stroke = StrokeState::Drawing { last: point };
        log::debug!("stroke begin at ({}, {})", point.x, point.y);
    }

    /// Paint a segment from the last point to `point` if the pen is down.
    ///
    /// Returns `true` when pixels changed. Calls while idle are ignored:
    /// devices routinely report movement with no button held.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        let StrokeState::Drawing { last } = self.stroke else {
            return false;
        };
        if !point.is_finite() {
            return false;
        }

        let painted = match self.raster.stroke_segment(last, point, &self.brush) {
            Some(bounds) => {
                self.dirty.add_rect(bounds);
                true
            }
            None => false,
        };
        self.stroke = StrokeState::Drawing { last: point };
        painted
    }

    /// Lift the pen. The next stroke starts a new, disconnected path.
    pub fn end_stroke(&mut self) {
        if self.is_drawing() {
            log::debug!("stroke end");
        }
        self.stroke = StrokeState::Idle;
    }

    /// Wipe the whole buffer to transparent. Stroke state is untouched.
    pub fn clear(&mut self) {
        self.raster.clear();
        self.dirty.mark_all(self.width(), self.height());
        log::debug!("surface cleared");
    }

    /// Clear and lift the pen, e.g. when the view switches away and back.
    pub fn reset(&mut self) {
        self.clear();
        self.end_stroke();
    }

    /// Route a normalized input event to the stroke operations.
    ///
    /// Returns `true` when the buffer changed and needs repainting.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.begin_stroke(Point::new(*x, *y));
                false
            }
            InputEvent::PointerMove { x, y } => self.extend_stroke(Point::new(*x, *y)),
            InputEvent::PointerUp { .. } | InputEvent::PointerCancel => {
                self.end_stroke();
                false
            }
            InputEvent::Key { key, modifiers } => {
                self.apply_key(key, *modifiers) == Some(ShortcutAction::Clear)
            }
        }
    }

    /// Resolve a key press against the shortcut map and apply it.
    ///
    /// `Clear` wipes the surface here. `Upload` is only reported: the host
    /// owns the export-and-submit flow.
    pub fn apply_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(
            key,
            modifiers.ctrl,
            modifiers.shift,
            modifiers.alt,
            modifiers.meta,
        )?;
        if action == ShortcutAction::Clear {
            self.clear();
        }
        Some(action)
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Encode the current buffer as PNG.
    ///
    /// The buffer is copied before this returns, so edits made while the
    /// future is pending do not leak into the result. The buffer itself is
    /// left as is.
    ///
    /// # Errors
    /// The future resolves to `ExportError::EmptyCanvas` for a zero-area
    /// surface.
    pub fn export_as_image(
        &self,
    ) -> impl Future<Output = Result<ExportedImage, ExportError>> + Send + use<> {
        let snapshot = self.raster.snapshot();
        async move {
            match snapshot.encode_png() {
                Ok(bytes) => {
                    log::info!(
                        "exported {}x{} drawing ({} bytes)",
                        snapshot.width,
                        snapshot.height,
                        bytes.len()
                    );
                    Ok(ExportedImage::png(bytes))
                }
                Err(e) => {
                    log::warn!("drawing export failed: {e}");
                    Err(e)
                }
            }
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Replace the brush. Applies to segments painted from now on.
    ///
    /// # Errors
    /// `ConfigError::BrushWidth` for a non-finite or non-positive width; the
    /// current brush is kept.
    pub fn set_brush(&mut self, brush: Brush) -> Result<(), ConfigError> {
        if !brush.has_valid_width() {
            return Err(ConfigError::BrushWidth(brush.width));
        }
        self.brush = brush;
        Ok(())
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.stroke
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.stroke, StrokeState::Drawing { .. })
    }

    pub fn last_point(&self) -> Option<Point> {
        match self.stroke {
            StrokeState::Drawing { last } => Some(last),
            StrokeState::Idle => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raster.is_blank()
    }

    /// Straight-alpha RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.raster.pixel(x, y)
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Pixels changed since the previous call, clamped to the canvas.
    pub fn take_dirty(&mut self) -> Option<PixelRect> {
        let (w, h) = (self.width(), self.height());
        self.dirty.take(w, h)
    }
}
