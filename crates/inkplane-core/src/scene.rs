//! The authoritative scene store: element collection, selection, active
//! transform, tool/style configuration and the in-progress drawing state
//! machine.

use crate::element::{BrushKind, Color, Element, ElementId, ElementStyle, Shape, ShapeKind, Stroke, Text};
use crate::geometry;
use crate::snapshot::{SceneSnapshot, SnapshotError};
use crate::transform::{Transform, Viewport};
use kurbo::{Point, Rect};

/// Eraser hit radius for strokes and shapes, in world units.
pub const ERASER_STROKE_RADIUS: f64 = 10.0;

/// Eraser hit radius for text anchors, in world units.
pub const ERASER_TEXT_RADIUS: f64 = 20.0;

/// The active drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    Pan,
    #[default]
    Pen,
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Text,
}

/// Style applied to newly created elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSettings {
    pub color: Color,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            color: Color::black(),
            stroke_width: 2.0,
            opacity: 1.0,
        }
    }
}

impl StyleSettings {
    fn element_style(&self) -> ElementStyle {
        ElementStyle {
            color: self.color,
            stroke_width: self.stroke_width,
            opacity: self.opacity.clamp(0.0, 1.0),
        }
    }
}

/// State of the drawing session.
///
/// `AwaitingText` suspends the text tool between pointer-down and the
/// completion callback, so the core never blocks on a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawingState {
    #[default]
    Idle,
    Drawing,
    AwaitingText {
        anchor: Point,
    },
}

/// The scene. Explicitly owned by its embedder; all mutation goes through
/// methods, and every mutation bumps `revision` so observers (autosave, a
/// dirty indicator) can poll for change.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<Element>,
    selected: Vec<ElementId>,
    pub transform: Transform,
    tool: ToolKind,
    style: StyleSettings,
    state: DrawingState,
    revision: u64,
}

impl Scene {
    /// Empty scene with the identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    fn changed(&mut self) {
        self.revision += 1;
    }

    /// Monotonic change counter, bumped after every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- configuration ---

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn style(&self) -> &StyleSettings {
        &self.style
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.stroke_width = width;
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.style.opacity = opacity.clamp(0.0, 1.0);
    }

    // --- element access ---

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Insert a pre-built element at the top of the paint order.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        self.changed();
        id
    }

    /// Union of all element bounds, or None for an empty scene. Feeds
    /// `Transform::fit_to_bounds` for the minimap and fit-to-content.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for el in &self.elements {
            let bounds = el.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    // --- drawing state machine ---

    pub fn drawing_state(&self) -> DrawingState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == DrawingState::Drawing
    }

    /// Pointer-down with the active tool at a world point.
    ///
    /// Pen/brush seed a stroke, the shape tools seed a two-point shape, text
    /// suspends into `AwaitingText` until `commit_text`, the eraser removes
    /// the first hit element, and pan touches nothing (the caller drives
    /// panning through the transform).
    pub fn start_drawing(&mut self, point: Point, pressure: f64, tilt: f64) {
        match self.tool {
            ToolKind::Pen | ToolKind::Brush => {
                let brush = if self.tool == ToolKind::Pen {
                    BrushKind::Pen
                } else {
                    BrushKind::Brush
                };
                let stroke = Stroke::begin(point, pressure, tilt, brush, self.style.element_style());
                self.elements.push(Element::Stroke(stroke));
                self.state = DrawingState::Drawing;
                self.changed();
            }
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line => {
                let kind = match self.tool {
                    ToolKind::Rectangle => ShapeKind::Rectangle,
                    ToolKind::Circle => ShapeKind::Circle,
                    _ => ShapeKind::Line,
                };
                let shape = Shape::begin(kind, point, self.style.element_style());
                self.elements.push(Element::Shape(shape));
                self.state = DrawingState::Drawing;
                self.changed();
            }
            ToolKind::Text => {
                self.state = DrawingState::AwaitingText { anchor: point };
            }
            ToolKind::Eraser => {
                self.erase_at(point);
            }
            ToolKind::Pan => {}
        }
    }

    /// Pointer-move while drawing. Strokes accumulate points, shapes replace
    /// their drag end, and the eraser keeps erasing while dragged.
    pub fn continue_drawing(&mut self, point: Point, pressure: f64, tilt: f64) {
        if self.tool == ToolKind::Eraser {
            self.erase_at(point);
            return;
        }

        if self.state != DrawingState::Drawing {
            return;
        }

        match (self.tool, self.elements.last_mut()) {
            (ToolKind::Pen | ToolKind::Brush, Some(Element::Stroke(stroke))) => {
                stroke.add_point(point, pressure, tilt);
                self.changed();
            }
            (ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line, Some(Element::Shape(shape))) => {
                shape.set_end(point);
                self.changed();
            }
            _ => {}
        }
    }

    /// Pointer-up: ends an active drawing session. Elements are not touched.
    /// A pending `AwaitingText` stays pending; pointer-up must not drop an
    /// open text prompt.
    pub fn end_drawing(&mut self) {
        if self.state == DrawingState::Drawing {
            self.state = DrawingState::Idle;
        }
    }

    /// Completion callback for the text-input collaborator. Inserts a text
    /// element at the suspended anchor unless the trimmed input is empty.
    /// Returns the new element's id, if one was created.
    pub fn commit_text(&mut self, input: &str) -> Option<ElementId> {
        let DrawingState::AwaitingText { anchor } = self.state else {
            return None;
        };
        self.state = DrawingState::Idle;

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let text = Text::new(anchor, trimmed.to_string(), self.style.element_style());
        Some(self.add_element(Element::Text(text)))
    }

    /// Abandon a pending text insertion (prompt cancelled).
    pub fn cancel_text(&mut self) {
        if matches!(self.state, DrawingState::AwaitingText { .. }) {
            self.state = DrawingState::Idle;
        }
    }

    /// Remove the first element (in paint order) hit at `point`, using the
    /// fixed world-unit eraser radii. A miss is a no-op, not an error.
    fn erase_at(&mut self, point: Point) {
        let hit = self.elements.iter().position(|el| match el {
            Element::Stroke(_) | Element::Shape(_) => el.hit_test(point, ERASER_STROKE_RADIUS),
            Element::Text(_) => el.hit_test(point, ERASER_TEXT_RADIUS),
        });

        if let Some(index) = hit {
            let id = self.elements[index].id();
            self.elements.remove(index);
            self.selected.retain(|&sid| sid != id);
            self.changed();
        }
    }

    // --- selection ---

    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    /// Add an element to the selection. Ids without a live element are
    /// ignored, and duplicates are not retained.
    pub fn select_element(&mut self, id: ElementId) {
        if self.element(id).is_some() && !self.selected.contains(&id) {
            self.selected.push(id);
            self.changed();
        }
    }

    pub fn deselect_element(&mut self, id: ElementId) {
        let before = self.selected.len();
        self.selected.retain(|&sid| sid != id);
        if self.selected.len() != before {
            self.changed();
        }
    }

    pub fn clear_selection(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.changed();
        }
    }

    /// Replace the selection with every element whose bounding box intersects
    /// `rect` (world space; callers convert screen-space marquees first).
    pub fn select_elements_in_rect(&mut self, rect: Rect) {
        self.selected = self
            .elements
            .iter()
            .filter(|el| geometry::rects_intersect(rect, el.bounds()))
            .map(|el| el.id())
            .collect();
        self.changed();
    }

    /// Translate every selected element by `(dx, dy)`.
    pub fn move_selected(&mut self, dx: f64, dy: f64) {
        if self.selected.is_empty() {
            return;
        }
        for el in &mut self.elements {
            if self.selected.contains(&el.id()) {
                el.translate(dx, dy);
            }
        }
        self.changed();
    }

    // --- deletion ---

    /// Remove one element and prune it from the selection atomically.
    /// Idempotent: deleting an unknown id is a no-op.
    pub fn delete_element(&mut self, id: ElementId) {
        let before = self.elements.len();
        self.elements.retain(|el| el.id() != id);
        self.selected.retain(|&sid| sid != id);
        if self.elements.len() != before {
            self.changed();
        }
    }

    /// Remove every selected element and empty the selection.
    pub fn delete_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let selected = std::mem::take(&mut self.selected);
        self.elements.retain(|el| !selected.contains(&el.id()));
        self.changed();
    }

    /// Remove all elements and the selection. No undo in this core.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected.clear();
        self.changed();
    }

    // --- persistence ---

    /// Snapshot the current elements into the versioned persisted format.
    pub fn save_snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::from_elements(self.elements.clone())
    }

    /// Replace the element collection from a snapshot, clearing the
    /// selection. The snapshot is validated first; on failure the scene is
    /// left unchanged.
    pub fn load_snapshot(&mut self, snapshot: SceneSnapshot) -> Result<(), SnapshotError> {
        snapshot.validate()?;
        self.elements = snapshot.elements;
        self.selected.clear();
        self.state = DrawingState::Idle;
        self.changed();
        Ok(())
    }

    // --- culling & hit-testing ---

    /// Elements whose bounding box intersects the viewport, in paint order.
    /// Linear scan; rendering dominates at the element counts this targets.
    pub fn visible_elements(&self, viewport: &Viewport) -> Vec<&Element> {
        let view = viewport.rect();
        self.elements
            .iter()
            .filter(|el| geometry::rects_intersect(view, el.bounds()))
            .collect()
    }

    /// Ids of elements hit at a world point with the given tolerance, in
    /// reverse paint order (topmost first).
    pub fn elements_at_point(&self, point: Point, tolerance: f64) -> Vec<ElementId> {
        self.elements
            .iter()
            .rev()
            .filter(|el| el.hit_test(point, tolerance))
            .map(|el| el.id())
            .collect()
    }
}
