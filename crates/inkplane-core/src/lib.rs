//! Inkplane core library.
//!
//! Coordinate/geometry engine and drawing-element model for an infinite 2D
//! canvas: world/screen transforms with anchor-preserving zoom, the tagged
//! element model (strokes, shapes, text), the authoritative scene store with
//! its drawing state machine, viewport culling and hit-testing, and snapshot
//! persistence.
//!
//! Rendering, UI widgets and input dispatch are external collaborators: they
//! query the scene for `(visible elements, selection)` and feed world-space
//! pointer events back in through the drawing operations.

pub mod element;
pub mod geometry;
pub mod scene;
pub mod snapshot;
pub mod storage;
pub mod transform;

pub use element::{
    BrushKind, Color, Element, ElementId, ElementStyle, FontWeight, Shape, ShapeKind, Stroke, Text,
    TextAlign,
};
pub use scene::{
    DrawingState, Scene, StyleSettings, ToolKind, ERASER_STROKE_RADIUS, ERASER_TEXT_RADIUS,
};
pub use snapshot::{SceneSnapshot, SnapshotError, SnapshotMetadata, SNAPSHOT_VERSION};
pub use storage::{
    AutosaveManager, FileStorage, MemoryStorage, Storage, StorageError, StorageResult,
    DEFAULT_AUTOSAVE_INTERVAL_SECS, LAST_SCENE_KEY,
};
pub use transform::{Transform, Viewport, MAX_SCALE, MIN_SCALE, ZOOM_FACTOR};
