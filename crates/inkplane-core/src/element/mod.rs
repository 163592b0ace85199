//! Drawing-element model: the tagged variants stored in a scene.

mod shape;
mod stroke;
mod text;

pub use shape::{Shape, ShapeKind};
pub use stroke::{BrushKind, Stroke};
pub use text::{FontWeight, Text, TextAlign};

use crate::geometry;
use kurbo::{Point, Rect};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// RGBA8 color, serialized as a CSS hex string (`#rrggbb` / `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) or the keyword
    /// `transparent`.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s == "transparent" {
            return Some(Self::transparent());
        }

        let hex = s.strip_prefix('#')?.trim();
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, 255))
            }
            6 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Format as a CSS hex string. Alpha is omitted when fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
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
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s:?}")))
    }
}

/// Style attributes shared by every element kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    pub color: Color,
    pub stroke_width: f64,
    /// Overall opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            color: Color::black(),
            stroke_width: 2.0,
            opacity: 1.0,
        }
    }
}

/// Current wall-clock time in milliseconds, guaranteed strictly increasing
/// across calls so `updated_at` advances on every mutation even within one
/// clock tick.
pub(crate) fn now_millis() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static LAST: AtomicU64 = AtomicU64::new(0);

    let wall = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let next = wall.max(prev + 1);
        match LAST.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// A drawing element: one of the closed set of variants the scene stores.
///
/// Serialized with an internal `"type"` tag so snapshots read as
/// `{"type": "stroke", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Stroke(Stroke),
    Shape(Shape),
    Text(Text),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Stroke(e) => e.id,
            Element::Shape(e) => e.id,
            Element::Text(e) => e.id,
        }
    }

    /// Points in path/anchor order. Strokes have 1+, shapes exactly 2
    /// (start, drag end), text exactly 1 (anchor).
    pub fn points(&self) -> &[Point] {
        match self {
            Element::Stroke(e) => &e.points,
            Element::Shape(e) => &e.points,
            Element::Text(e) => &e.points,
        }
    }

    pub fn style(&self) -> &ElementStyle {
        match self {
            Element::Stroke(e) => &e.style,
            Element::Shape(e) => &e.style,
            Element::Text(e) => &e.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        match self {
            Element::Stroke(e) => &mut e.style,
            Element::Shape(e) => &mut e.style,
            Element::Text(e) => &mut e.style,
        }
    }

    pub fn created_at(&self) -> u64 {
        match self {
            Element::Stroke(e) => e.created_at,
            Element::Shape(e) => e.created_at,
            Element::Text(e) => e.created_at,
        }
    }

    pub fn updated_at(&self) -> u64 {
        match self {
            Element::Stroke(e) => e.updated_at,
            Element::Shape(e) => e.updated_at,
            Element::Text(e) => e.updated_at,
        }
    }

    /// Axis-aligned bounds of the element's points.
    pub fn bounds(&self) -> Rect {
        geometry::bounding_box(self.points())
    }

    /// Whether any of the element's points lies within `tolerance` of
    /// `point`. Text is anchored, so only its single anchor is checked.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.points()
            .iter()
            .any(|p| geometry::distance(*p, point) < tolerance)
    }

    /// Translate every point by `(dx, dy)` and bump `updated_at`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let offset = kurbo::Vec2::new(dx, dy);
        match self {
            Element::Stroke(e) => {
                for p in &mut e.points {
                    *p += offset;
                }
                e.updated_at = now_millis();
            }
            Element::Shape(e) => {
                for p in &mut e.points {
                    *p += offset;
                }
                e.updated_at = now_millis();
            }
            Element::Text(e) => {
                for p in &mut e.points {
                    *p += offset;
                }
                e.updated_at = now_millis();
            }
        }
    }
}
