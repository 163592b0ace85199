//! Text element anchored at a single point.

use super::{now_millis, ElementId, ElementStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Horizontal alignment relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Default font size for newly committed text.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Default font family for newly committed text.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// A piece of text placed at a world-space anchor (`points[0]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub id: ElementId,
    pub points: Vec<Point>,
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub text_align: TextAlign,
    #[serde(flatten)]
    pub style: ElementStyle,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Text {
    /// Create a text element with the default font settings.
    pub fn new(anchor: Point, text: String, style: ElementStyle) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            points: vec![anchor],
            text,
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: FontWeight::Normal,
            text_align: TextAlign::Left,
            style,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn anchor(&self) -> Point {
        self.points[0]
    }

    /// Replace the content and bump `updated_at`.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.updated_at = now_millis();
    }
}
