//! Two-point shape element (rectangle, circle, line).

use super::{now_millis, Color, ElementId, ElementStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geometric kind of a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Line,
}

/// A shape defined by exactly two points: `points[0]` is the anchor where the
/// drag started, `points[1]` is the current drag end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ElementId,
    pub points: Vec<Point>,
    pub shape_type: ShapeKind,
    pub is_filled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(flatten)]
    pub style: ElementStyle,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Shape {
    /// Start a shape drag: both points coincide at the anchor until the
    /// pointer moves.
    pub fn begin(kind: ShapeKind, anchor: Point, style: ElementStyle) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            points: vec![anchor, anchor],
            shape_type: kind,
            is_filled: false,
            fill_color: None,
            style,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[1]
    }

    /// Replace the drag end. The end is always the latest pointer position,
    /// never accumulated.
    pub fn set_end(&mut self, point: Point) {
        self.points[1] = point;
        self.updated_at = now_millis();
    }
}
