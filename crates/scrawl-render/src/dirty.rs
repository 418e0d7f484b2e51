//! Dirty-region tracking.
//!
//! Accumulates the area touched by paint operations so the host only has
//! to re-blit what changed since its last repaint.

use kurbo::{Line, Point, Rect, Shape};
use scrawl_core::model::Point as CanvasPoint;

/// Anti-aliasing can bleed one pixel past the geometric stroke outline.
const AA_SLACK: f64 = 1.0;

/// An integer pixel rectangle, always inside the canvas it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Union of all regions painted since the last `take`.
#[derive(Debug, Clone, Default)]
pub struct DirtyRegion {
    bounds: Option<Rect>,
}

impl DirtyRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds of a stroked segment `from → to` painted with `radius`.
    pub fn segment_bounds(from: CanvasPoint, to: CanvasPoint, radius: f32) -> Rect {
        let line = Line::new(to_kurbo(from), to_kurbo(to));
        let pad = radius as f64 + AA_SLACK;
        line.bounding_box().inflate(pad, pad)
    }

    pub fn add_rect(&mut self, rect: Rect) {
        self.bounds = Some(match self.bounds {
            Some(existing) => existing.union(rect),
            None => rect,
        });
    }

    /// Mark an entire `width × height` canvas dirty.
    pub fn mark_all(&mut self, width: u32, height: u32) {
        self.add_rect(Rect::new(0.0, 0.0, width as f64, height as f64));
    }

    /// Return the accumulated region clamped to the canvas, and reset.
    ///
    /// Returns `None` when nothing was painted or the region lies entirely
    /// outside the canvas.
    pub fn take(&mut self, width: u32, height: u32) -> Option<PixelRect> {
        let bounds = self.bounds.take()?;
        clamp_to_pixels(bounds, width, height)
    }
}

fn to_kurbo(p: CanvasPoint) -> Point {
    Point::new(p.x as f64, p.y as f64)
}

fn clamp_to_pixels(rect: Rect, width: u32, height: u32) -> Option<PixelRect> {
    let canvas = Rect::new(0.0, 0.0, width as f64, height as f64);
    let clipped = rect.expand().intersect(canvas);
    if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
        return None;
    }
    Some(PixelRect {
        x: clipped.x0 as u32,
        y: clipped.y0 as u32,
        width: clipped.width() as u32,
        height: clipped.height() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn add_segment(dirty: &mut DirtyRegion, from: (f32, f32), to: (f32, f32), radius: f32) {
        dirty.add_rect(DirtyRegion::segment_bounds(from.into(), to.into(), radius));
    }

    #[test]
    fn clean_region_takes_nothing() {
        let mut dirty = DirtyRegion::new();
        assert_eq!(dirty.take(100, 100), None);
    }

    #[test]
    fn segment_is_padded_by_radius_and_slack() {
        let mut dirty = DirtyRegion::new();
        add_segment(&mut dirty, (10.0, 10.0), (20.0, 20.0), 5.0);
        assert_eq!(
            dirty.take(100, 100),
            Some(PixelRect {
                x: 4,
                y: 4,
                width: 22,
                height: 22
            })
        );
        assert_eq!(dirty.take(100, 100), None);
    }

    #[test]
    fn segments_union() {
        let mut dirty = DirtyRegion::new();
        add_segment(&mut dirty, (10.0, 10.0), (10.0, 10.0), 1.0);
        add_segment(&mut dirty, (50.0, 40.0), (50.0, 40.0), 1.0);
        let rect = dirty.take(100, 100).unwrap();
        assert_eq!((rect.x, rect.y), (8, 8));
        assert_eq!((rect.width, rect.height), (44, 34));
    }

    #[test]
    fn region_is_clamped_to_canvas() {
        let mut dirty = DirtyRegion::new();
        add_segment(&mut dirty, (-5.0, 2.0), (30.0, 2.0), 5.0);
        assert_eq!(
            dirty.take(20, 10),
            Some(PixelRect {
                x: 0,
                y: 0,
                width: 20,
                height: 8
            })
        );
    }

    #[test]
    fn offscreen_region_is_dropped() {
        let mut dirty = DirtyRegion::new();
        add_segment(&mut dirty, (500.0, 500.0), (600.0, 600.0), 5.0);
        assert_eq!(dirty.take(100, 100), None);
    }

    #[test]
    fn mark_all_covers_canvas() {
        let mut dirty = DirtyRegion::new();
        dirty.mark_all(64, 32);
        let rect = dirty.take(64, 32).unwrap();
        assert_eq!(rect, PixelRect::full(64, 32));
        assert!(rect.contains(63, 31));
        assert!(!rect.contains(64, 0));
    }
}
