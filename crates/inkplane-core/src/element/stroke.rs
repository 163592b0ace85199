//! Free-hand stroke element.

use super::{now_millis, ElementId, ElementStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Brush used to draw a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    #[default]
    Pen,
    Brush,
    Marker,
}

/// A free-hand path with per-point pressure and tilt.
///
/// Invariant: `pressure` and `tilt` are always the same length as `points`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub id: ElementId,
    pub points: Vec<Point>,
    pub pressure: Vec<f64>,
    pub tilt: Vec<f64>,
    pub brush_type: BrushKind,
    #[serde(flatten)]
    pub style: ElementStyle,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Stroke {
    /// Start a stroke at a single seed point.
    pub fn begin(point: Point, pressure: f64, tilt: f64, brush: BrushKind, style: ElementStyle) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4(),
            points: vec![point],
            pressure: vec![pressure],
            tilt: vec![tilt],
            brush_type: brush,
            style,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a point and its parallel pressure/tilt samples.
    pub fn add_point(&mut self, point: Point, pressure: f64, tilt: f64) {
        self.points.push(point);
        self.pressure.push(pressure);
        self.tilt.push(tilt);
        self.updated_at = now_millis();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the parallel-array invariant holds.
    pub fn arrays_consistent(&self) -> bool {
        self.pressure.len() == self.points.len() && self.tilt.len() == self.points.len()
    }
}
