//! CPU raster buffer.
//!
//! Wraps a tiny-skia `Pixmap` (premultiplied RGBA8). A raster with zero
//! width or height is valid and simply has no pixels: painting on it does
//! nothing and export reports `ExportError::EmptyCanvas`. A size above
//! `MAX_CANVAS_SIDE` is never allocated; the raster is 0×0 instead.

use crate::dirty::DirtyRegion;
use crate::export::encode_png;
use kurbo::Rect;
use scrawl_core::config::MAX_CANVAS_SIDE;
use scrawl_core::error::ExportError;
use scrawl_core::model::{Brush, Point, StrokeCap, StrokeJoin};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// The pixel buffer strokes are painted into.
#[derive(Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    pixmap: Option<Pixmap>,
}

impl Raster {
    /// Create a fully transparent raster.
    ///
    /// A nonzero size that cannot be allocated becomes 0×0, so a raster
    /// never reports pixels it does not hold.
    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self {
                width,
                height,
                pixmap: None,
            };
        }
        let pixmap = if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            None
        } else {
            Pixmap::new(width, height)
        };
        match pixmap {
            Some(pixmap) => Self {
                width,
                height,
                pixmap: Some(pixmap),
            },
            None => {
                log::warn!("raster {width}x{height} cannot be allocated; using 0x0");
                Self {
                    width: 0,
                    height: 0,
                    pixmap: None,
                }
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_pixels(&self) -> bool {
        self.pixmap.is_some()
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    /// `true` when no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.pixmap
            .as_ref()
            .is_none_or(|p| p.pixels().iter().all(|px| px.alpha() == 0))
    }

    /// Paint one stroke segment `from → to` with `brush`.
    ///
    /// A zero-length segment still paints its caps: a dot for round caps,
    /// a square for square caps, nothing for butt caps.
    ///
    /// Returns the bounds that may have changed, or `None` when nothing
    /// was painted.
    pub fn stroke_segment(&mut self, from: Point, to: Point, brush: &Brush) -> Option<Rect> {
        let pixmap = self.pixmap.as_mut()?;
        if !from.is_finite() || !to.is_finite() {
            log::debug!("skipping non-finite segment {from:?} -> {to:?}");
            return None;
        }
        if !brush.has_valid_width() {
            log::debug!("skipping segment with brush width {}", brush.width);
            return None;
        }

        let paint = brush_paint(brush);
        let radius = brush.radius();

        if from == to {
            let path = match brush.cap {
                StrokeCap::Round => PathBuilder::from_circle(to.x, to.y, radius),
                StrokeCap::Square => tiny_skia::Rect::from_xywh(
                    to.x - radius,
                    to.y - radius,
                    brush.width,
                    brush.width,
                )
                .map(PathBuilder::from_rect),
                StrokeCap::Butt => None,
            }?;
            pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                None,
            );
        } else {
            let mut pb = PathBuilder::new();
            pb.move_to(from.x, from.y);
            pb.line_to(to.x, to.y);
            let path = pb.finish()?;
            pixmap.stroke_path(&path, &paint, &brush_stroke(brush), Transform::identity(), None);
        }

        log::trace!("SEGMENT ({}, {}) -> ({}, {})", from.x, from.y, to.x, to.y);
        Some(DirtyRegion::segment_bounds(from, to, radius))
    }

    /// Straight-alpha RGBA of the pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    /// Row-major straight-alpha RGBA8 bytes, as PNG and `ImageData` expect.
    pub fn to_rgba(&self) -> Vec<u8> {
        let Some(pixmap) = self.pixmap.as_ref() else {
            return Vec::new();
        };
        let mut data = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        data
    }

    /// Straight-alpha RGBA8 bytes of a sub-rectangle, row-major.
    ///
    /// The rectangle is clipped to the canvas; pixels outside read as
    /// transparent.
    pub fn region_rgba(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        let Some(pixmap) = self.pixmap.as_ref() else {
            return data;
        };
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return data;
        }

        let pixels = pixmap.pixels();
        let stride = self.width as usize;
        let span = (x_end - x) as usize;
        for row in y..y_end {
            let src = row as usize * stride + x as usize;
            let dst = (row - y) as usize * width as usize * 4;
            for (i, px) in pixels[src..src + span].iter().enumerate() {
                let c = px.demultiply();
                let idx = dst + i * 4;
                data[idx..idx + 4].copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
            }
        }
        data
    }

    /// Copy the current contents for encoding elsewhere.
    pub fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot {
            width: self.width,
            height: self.height,
            rgba: self.to_rgba(),
        }
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_pixels", &self.has_pixels())
            .finish()
    }
}

/// Detached straight-alpha copy of a raster, independent of later edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RasterSnapshot {
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        encode_png(self.width, self.height, &self.rgba)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn brush_paint(brush: &Brush) -> Paint<'static> {
    let [r, g, b, a] = brush.color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn brush_stroke(brush: &Brush) -> Stroke {
    Stroke {
        width: brush.width,
        line_cap: match brush.cap {
            StrokeCap::Butt => LineCap::Butt,
            StrokeCap::Round => LineCap::Round,
            StrokeCap::Square => LineCap::Square,
        },
        line_join: match brush.join {
            StrokeJoin::Miter => LineJoin::Miter,
            StrokeJoin::Round => LineJoin::Round,
            StrokeJoin::Bevel => LineJoin::Bevel,
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scrawl_core::model::Color;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    #[test]
    fn new_raster_is_transparent() {
        let raster = Raster::new(16, 8);
        assert!(raster.has_pixels());
        assert!(raster.is_blank());
        assert_eq!(raster.to_rgba().len(), 16 * 8 * 4);
        assert_eq!(raster.pixel(0, 0), Some(CLEAR));
        assert_eq!(raster.pixel(16, 0), None);
    }

    #[test]
    fn zero_sized_raster_has_no_pixels() {
        let mut raster = Raster::new(0, 10);
        assert!(!raster.has_pixels());
        assert!(raster.is_blank());
        assert_eq!(
            raster.stroke_segment(Point::new(0.0, 0.0), Point::new(5.0, 5.0), &Brush::default()),
            None
        );
        raster.clear();
        assert!(raster.to_rgba().is_empty());
    }

    #[test]
    fn diagonal_segment_paints_centerline_only() {
        let mut raster = Raster::new(40, 40);
        let bounds = raster
            .stroke_segment(Point::new(10.0, 10.0), Point::new(20.0, 20.0), &Brush::default())
            .unwrap();
        assert!(bounds.contains(kurbo::Point::new(15.0, 15.0)));

        assert_eq!(raster.pixel(15, 15), Some(WHITE));
        // Far corner and a point 7 px off the line stay empty.
        assert_eq!(raster.pixel(2, 2), Some(CLEAR));
        assert_eq!(raster.pixel(30, 30), Some(CLEAR));
        assert_eq!(raster.pixel(20, 9), Some(CLEAR));
    }

    #[test]
    fn round_cap_extends_past_endpoints() {
        let mut raster = Raster::new(40, 20);
        raster.stroke_segment(Point::new(10.0, 10.0), Point::new(30.0, 10.0), &Brush::default());
        // 3 px behind the start point, inside the 5 px cap radius.
        assert_eq!(raster.pixel(7, 9), Some(WHITE));

        let butt = Brush {
            cap: StrokeCap::Butt,
            ..Brush::default()
        };
        let mut raster = Raster::new(40, 20);
        raster.stroke_segment(Point::new(10.0, 10.0), Point::new(30.0, 10.0), &butt);
        assert_eq!(raster.pixel(7, 9), Some(CLEAR));
    }

    #[test]
    fn zero_length_segment_is_a_dot() {
        let mut raster = Raster::new(20, 20);
        raster.stroke_segment(Point::new(10.0, 10.0), Point::new(10.0, 10.0), &Brush::default());
        assert_eq!(raster.pixel(10, 10), Some(WHITE));
        assert_eq!(raster.pixel(10, 18), Some(CLEAR));

        let butt = Brush {
            cap: StrokeCap::Butt,
            ..Brush::default()
        };
        let mut raster = Raster::new(20, 20);
        assert_eq!(
            raster.stroke_segment(Point::new(10.0, 10.0), Point::new(10.0, 10.0), &butt),
            None
        );
        assert!(raster.is_blank());
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let mut raster = Raster::new(20, 20);
        let hit = raster.stroke_segment(
            Point::new(f32::NAN, 1.0),
            Point::new(5.0, 5.0),
            &Brush::default(),
        );
        assert_eq!(hit, None);
        assert!(raster.is_blank());
    }

    #[test]
    fn brush_color_is_respected() {
        let brush = Brush {
            color: Color::from_rgba8(255, 0, 0, 255),
            ..Brush::default()
        };
        let mut raster = Raster::new(20, 20);
        raster.stroke_segment(Point::new(2.0, 10.0), Point::new(18.0, 10.0), &brush);
        assert_eq!(raster.pixel(10, 9), Some([255, 0, 0, 255]));
    }

    #[test]
    fn clear_restores_blank() {
        let mut raster = Raster::new(20, 20);
        raster.stroke_segment(Point::new(2.0, 2.0), Point::new(18.0, 18.0), &Brush::default());
        assert!(!raster.is_blank());
        raster.clear();
        assert!(raster.is_blank());
        assert_eq!(raster.to_rgba(), Raster::new(20, 20).to_rgba());
    }

    #[test]
    fn region_rgba_reads_subrect() {
        let mut raster = Raster::new(20, 20);
        raster.stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), &Brush::default());
        let region = raster.region_rgba(8, 9, 2, 1);
        assert_eq!(region, [WHITE, WHITE].concat());
        let outside = raster.region_rgba(19, 19, 2, 2);
        assert_eq!(&outside[4..8], &CLEAR);
    }

    #[test]
    fn region_rgba_clips_far_offsets() {
        let mut raster = Raster::new(20, 20);
        raster.stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), &Brush::default());
        let region = raster.region_rgba(u32::MAX - 1, 9, 4, 1);
        assert_eq!(region, vec![0; 16]);

        let straddling = raster.region_rgba(18, 9, 4, 1);
        assert_eq!(straddling, [WHITE, WHITE, CLEAR, CLEAR].concat());
    }

    #[test]
    fn region_rgba_matches_full_readback() {
        let mut raster = Raster::new(12, 12);
        raster.stroke_segment(Point::new(1.0, 1.0), Point::new(11.0, 7.0), &Brush::default());
        let full = raster.to_rgba();
        let region = raster.region_rgba(3, 2, 5, 4);
        for dy in 0..4usize {
            let src = ((2 + dy) * 12 + 3) * 4;
            assert_eq!(&region[dy * 20..dy * 20 + 20], &full[src..src + 20]);
        }
    }

    #[test]
    fn oversized_raster_reports_no_area() {
        let mut raster = Raster::new(70_000, 70_000);
        assert!(!raster.has_pixels());
        assert_eq!((raster.width(), raster.height()), (0, 0));
        assert_eq!(
            raster.stroke_segment(Point::new(0.0, 0.0), Point::new(5.0, 5.0), &Brush::default()),
            None
        );
        assert!(raster.region_rgba(0, 0, 2, 2).iter().all(|&b| b == 0));
        assert_eq!(
            raster.snapshot().encode_png(),
            Err(ExportError::EmptyCanvas {
                width: 0,
                height: 0
            })
        );
    }

    #[test]
    fn invalid_brush_width_paints_nothing() {
        for width in [-3.0, 0.0, f32::NAN, f32::INFINITY] {
            let brush = Brush {
                width,
                ..Brush::default()
            };
            let mut raster = Raster::new(30, 30);
            assert_eq!(
                raster.stroke_segment(Point::new(10.0, 10.0), Point::new(20.0, 20.0), &brush),
                None
            );
            assert!(raster.is_blank());
        }
    }

    #[test]
    fn snapshot_is_detached() {
        let mut raster = Raster::new(10, 10);
        let before = raster.snapshot();
        raster.stroke_segment(Point::new(0.0, 5.0), Point::new(10.0, 5.0), &Brush::default());
        assert!(before.rgba.iter().all(|&b| b == 0));
        assert_ne!(before, raster.snapshot());
    }
}
