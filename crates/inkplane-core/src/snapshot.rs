//! Versioned persisted snapshot format.
//!
//! A snapshot is the unit of persistence: `{version, elements, metadata}` as
//! JSON with camelCase keys. Snapshots are validated before they replace a
//! scene, so a malformed or future-versioned file degrades to "state
//! unchanged" rather than corrupting the store.

use crate::element::{now_millis, Element};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format version written by this build.
pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// Default document name stamped into new snapshots.
const DEFAULT_NAME: &str = "Untitled";

/// Errors from parsing or validating a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(String),
    #[error("invalid element {id}: {reason}")]
    InvalidElement { id: String, reason: String },
}

/// Snapshot metadata block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub created_at: u64,
    pub updated_at: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The persisted scene snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub version: String,
    pub elements: Vec<Element>,
    pub metadata: SnapshotMetadata,
}

impl SceneSnapshot {
    /// Wrap elements in a fresh snapshot with default metadata.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let now = now_millis();
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            elements,
            metadata: SnapshotMetadata {
                created_at: now,
                updated_at: now,
                name: DEFAULT_NAME.to_string(),
                description: None,
            },
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the version and per-element invariants.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version.clone()));
        }

        for el in &self.elements {
            let invalid = |reason: &str| SnapshotError::InvalidElement {
                id: el.id().to_string(),
                reason: reason.to_string(),
            };

            let opacity = el.style().opacity;
            if !(0.0..=1.0).contains(&opacity) {
                return Err(invalid("opacity outside [0, 1]"));
            }

            match el {
                Element::Stroke(stroke) => {
                    if stroke.points.is_empty() {
                        return Err(invalid("stroke has no points"));
                    }
                    if !stroke.arrays_consistent() {
                        return Err(invalid("pressure/tilt arrays not parallel to points"));
                    }
                }
                Element::Shape(shape) => {
                    if shape.points.len() != 2 {
                        return Err(invalid("shape must have exactly 2 points"));
                    }
                }
                Element::Text(text) => {
                    if text.points.len() != 1 {
                        return Err(invalid("text must have exactly 1 anchor point"));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BrushKind, ElementStyle, Shape, ShapeKind, Stroke, Text};
    use kurbo::Point;

    fn sample_elements() -> Vec<Element> {
        vec![
            Element::Stroke(Stroke::begin(
                Point::new(0.0, 0.0),
                1.0,
                0.0,
                BrushKind::Pen,
                ElementStyle::default(),
            )),
            Element::Shape(Shape::begin(
                ShapeKind::Circle,
                Point::new(10.0, 10.0),
                ElementStyle::default(),
            )),
            Element::Text(Text::new(
                Point::new(20.0, 20.0),
                "note".to_string(),
                ElementStyle::default(),
            )),
        ]
    }

    #[test]
    fn test_json_roundtrip() {
        let snapshot = SceneSnapshot::from_elements(sample_elements());
        let json = snapshot.to_json().unwrap();
        let parsed = SceneSnapshot::from_json(&json).unwrap();

        assert_eq!(parsed.version, SNAPSHOT_VERSION);
        assert_eq!(parsed.elements.len(), 3);
        for (a, b) in snapshot.elements.iter().zip(&parsed.elements) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.points(), b.points());
        }
    }

    #[test]
    fn test_wire_format_keys() {
        let snapshot = SceneSnapshot::from_elements(sample_elements());
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["version"], SNAPSHOT_VERSION);
        assert!(value["metadata"]["createdAt"].is_number());
        assert_eq!(value["metadata"]["name"], "Untitled");
        assert_eq!(value["elements"][0]["type"], "stroke");
        assert_eq!(value["elements"][0]["brushType"], "pen");
        assert_eq!(value["elements"][1]["shapeType"], "circle");
        assert_eq!(value["elements"][1]["isFilled"], false);
        assert_eq!(value["elements"][2]["fontFamily"], "Arial");
        assert_eq!(value["elements"][2]["textAlign"], "left");
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut snapshot = SceneSnapshot::from_elements(vec![]);
        snapshot.version = "2.0.0".to_string();
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_rejects_shape_with_wrong_point_count() {
        let mut shape = Shape::begin(ShapeKind::Line, Point::ZERO, ElementStyle::default());
        shape.points.push(Point::new(1.0, 1.0));
        let snapshot = SceneSnapshot::from_elements(vec![Element::Shape(shape)]);
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::InvalidElement { .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_stroke_arrays() {
        let mut stroke = Stroke::begin(
            Point::ZERO,
            1.0,
            0.0,
            BrushKind::Pen,
            ElementStyle::default(),
        );
        stroke.pressure.push(0.5);
        let snapshot = SceneSnapshot::from_elements(vec![Element::Stroke(stroke)]);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_opacity() {
        let mut text = Text::new(Point::ZERO, "x".to_string(), ElementStyle::default());
        text.style.opacity = 1.5;
        let snapshot = SceneSnapshot::from_elements(vec![Element::Text(text)]);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            SceneSnapshot::from_json("{not json"),
            Err(SnapshotError::Parse(_))
        ));
        assert!(SceneSnapshot::from_json(r#"{"version":"1.0.0"}"#).is_err());
    }
}
