//! Core drawing model.
//!
//! Points are canvas-local and already translated by the host input layer.
//! A `Brush` describes how stroke segments are painted; the raster that
//! receives them lives in `scrawl-render`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A position in canvas-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
///
/// Serialized as a hex string (`"#FFFFFF"`) so configuration files stay
/// readable.
#[derive(Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut channels = [15u8; 4];
                for (slot, &b) in channels.iter_mut().zip(bytes) {
                    *slot = hex_val(b)?;
                }
                let [r, g, b, a] = channels.map(|c| c * 17);
                Some(Self::from_rgba8(r, g, b, a))
            }
            6 | 8 => {
                let mut channels = [255u8; 4];
                for (slot, pair) in channels.iter_mut().zip(bytes.chunks(2)) {
                    *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                let [r, g, b, a] = channels;
                Some(Self::from_rgba8(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Quantize to 8-bit straight-alpha channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Emit as shortest valid hex string (alpha omitted when opaque).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{s}`")))
    }
}

// ─── Brush ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeJoin {
    Miter,
    Round,
    Bevel,
}

/// How stroke segments are painted onto the raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brush {
    pub color: Color,
    /// Line width in canvas units.
    pub width: f32,
    pub cap: StrokeCap,
    pub join: StrokeJoin,
}

impl Brush {
    /// Stroke width used by the digit pad.
    pub const DEFAULT_WIDTH: f32 = 10.0;

    /// Half the line width: how far paint reaches from the centerline.
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }

    /// A brush paints only with a finite, positive width.
    pub fn has_valid_width(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            width: Self::DEFAULT_WIDTH,
            cap: StrokeCap::Round,
            join: StrokeJoin::Round,
        }
    }
}

// ─── Exported image ──────────────────────────────────────────────────────

/// An encoded image produced by export. Owned by whoever receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

impl ExportedImage {
    pub const PNG_MIME: &'static str = "image/png";
    pub const DEFAULT_FILE_NAME: &'static str = "drawing.png";

    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: Self::DEFAULT_FILE_NAME.to_string(),
            mime_type: Self::PNG_MIME,
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
