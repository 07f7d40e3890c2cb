//! Scene graph boundary and the in-memory scene.
//!
//! The editor only talks to shapes through [`SceneGraph`]. [`Scene`] is the
//! implementation used by the engine and its tests: it owns shape lifetime,
//! hit-testing, the active selection, hover preview, drag-to-move of the
//! selected shape, and JSON (de)serialization of the whole scene.

use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Scene errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to serialize scene: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to deserialize scene: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("Snapshot contains shape {0} more than once")]
    DuplicateShape(ShapeId),
}

/// Notifications raised by the scene graph while it handles input or
/// selection changes. Queued until the owner drains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// A shape became the active selection.
    Selected(ShapeId),
    /// The active selection was dropped.
    SelectionCleared,
    /// The scene's own drag handling changed a shape.
    Modified(ShapeId),
}

/// An immutable serialized capture of an entire scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSnapshot(String);

impl SceneSnapshot {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SceneSnapshot {
    fn from(json: String) -> Self {
        Self(json)
    }
}

/// The operations the engine needs from a scene graph.
pub trait SceneGraph {
    /// Add a shape on top of the others.
    fn insert(&mut self, shape: Shape) -> ShapeId;

    /// Remove a shape. Removing the active selection clears it.
    fn remove(&mut self, id: ShapeId) -> Option<Shape>;

    fn get(&self, id: ShapeId) -> Option<&Shape>;

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape>;

    /// Deep copy of a shape with a fresh identity, not inserted anywhere.
    fn clone_shape(&self, id: ShapeId) -> Option<Shape> {
        self.get(id).map(Shape::duplicate)
    }

    /// Shapes back to front.
    fn shapes(&self) -> impl Iterator<Item = &Shape>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Topmost selectable shape under `point`.
    fn shape_at(&self, point: Point) -> Option<ShapeId>;

    fn active_selection(&self) -> Option<ShapeId>;

    /// Make `id` the active selection.
    fn set_active_selection(&mut self, id: ShapeId);

    /// Drop the active selection, if any.
    fn discard_active_selection(&mut self);

    fn hovered(&self) -> Option<ShapeId>;

    /// Set or clear the hover preview. Purely visual.
    fn set_hover(&mut self, id: Option<ShapeId>);

    /// Press handling: select the shape under the pointer (and start
    /// dragging it) or clear the selection when pressing empty canvas.
    fn pointer_down(&mut self, point: Point);

    fn pointer_move(&mut self, point: Point);

    fn pointer_up(&mut self, point: Point);

    /// Take every queued notification, oldest first.
    fn drain_events(&mut self) -> Vec<SceneEvent>;

    fn serialize(&self) -> Result<SceneSnapshot, SceneError>;

    /// Replace every shape with the snapshot's. On error nothing changes.
    fn deserialize(&mut self, snapshot: &SceneSnapshot) -> Result<(), SceneError>;

    /// Request a redraw.
    fn render(&mut self);
}

/// Serialized form of a scene: shapes in z-order.
#[derive(Serialize)]
struct SceneDocumentRef<'a> {
    shapes: Vec<&'a Shape>,
}

#[derive(Deserialize)]
struct SceneDocument {
    shapes: Vec<Shape>,
}

/// Drag of the selected shape, handled by the scene itself.
#[derive(Debug, Clone, Copy)]
struct DragState {
    id: ShapeId,
    last: Point,
    moved: bool,
}

/// In-memory scene graph.
#[derive(Debug, Clone)]
pub struct Scene {
    /// All shapes, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    z_order: Vec<ShapeId>,
    active: Option<ShapeId>,
    hover: Option<ShapeId>,
    drag: Option<DragState>,
    events: Vec<SceneEvent>,
    hit_tolerance: f64,
    frames: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Default hit-test tolerance in canvas units.
    pub const DEFAULT_HIT_TOLERANCE: f64 = 4.0;

    /// Create an empty scene.
    pub fn new() -> Self {
        Self::with_hit_tolerance(Self::DEFAULT_HIT_TOLERANCE)
    }

    pub fn with_hit_tolerance(hit_tolerance: f64) -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            active: None,
            hover: None,
            drag: None,
            events: Vec::new(),
            hit_tolerance,
            frames: 0,
        }
    }

    /// Number of render requests so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Find all shapes at a point, front to back.
    pub fn shapes_at_point(&self, point: Point) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| {
                self.shapes
                    .get(&id)
                    .filter(|s| s.hit_test(point, self.hit_tolerance))
                    .map(|_| id)
            })
            .collect()
    }

    fn parse(snapshot: &SceneSnapshot) -> Result<SceneDocument, SceneError> {
        let document: SceneDocument =
            serde_json::from_str(snapshot.as_str()).map_err(SceneError::Deserialize)?;
        let mut seen = HashSet::new();
        for shape in &document.shapes {
            if !seen.insert(shape.id()) {
                return Err(SceneError::DuplicateShape(shape.id()));
            }
        }
        Ok(document)
    }
}

impl SceneGraph for Scene {
    fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
        id
    }

    fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id)?;
        self.z_order.retain(|&shape_id| shape_id != id);
        if self.hover == Some(id) {
            self.hover = None;
        }
        if self.drag.is_some_and(|drag| drag.id == id) {
            self.drag = None;
        }
        if self.active == Some(id) {
            self.discard_active_selection();
        }
        Some(removed)
    }

    fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    fn len(&self) -> usize {
        self.shapes.len()
    }

    fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes_at_point(point)
            .into_iter()
            .find(|id| self.shapes.get(id).is_some_and(Shape::is_selectable))
    }

    fn active_selection(&self) -> Option<ShapeId> {
        self.active
    }

    fn set_active_selection(&mut self, id: ShapeId) {
        if !self.shapes.contains_key(&id) || self.active == Some(id) {
            return;
        }
        self.active = Some(id);
        self.events.push(SceneEvent::Selected(id));
    }

    fn discard_active_selection(&mut self) {
        if self.active.take().is_some() {
            self.events.push(SceneEvent::SelectionCleared);
        }
    }

    fn hovered(&self) -> Option<ShapeId> {
        self.hover
    }

    fn set_hover(&mut self, id: Option<ShapeId>) {
        self.hover = id.filter(|id| self.shapes.contains_key(id));
    }

    fn pointer_down(&mut self, point: Point) {
        match self.shape_at(point) {
            Some(id) => {
                self.set_active_selection(id);
                self.drag = Some(DragState {
                    id,
                    last: point,
                    moved: false,
                });
            }
            None => {
                self.drag = None;
                self.discard_active_selection();
            }
        }
    }

    fn pointer_move(&mut self, point: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let delta = Vec2::new(point.x - drag.last.x, point.y - drag.last.y);
        if delta == Vec2::ZERO {
            return;
        }
        drag.last = point;
        drag.moved = true;
        let id = drag.id;
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.translate(delta);
        }
    }

    fn pointer_up(&mut self, point: Point) {
        self.pointer_move(point);
        if let Some(drag) = self.drag.take() {
            if drag.moved {
                self.events.push(SceneEvent::Modified(drag.id));
            }
        }
    }

    fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    fn serialize(&self) -> Result<SceneSnapshot, SceneError> {
        let document = SceneDocumentRef {
            shapes: self.shapes().collect(),
        };
        serde_json::to_string(&document)
            .map(SceneSnapshot)
            .map_err(SceneError::Serialize)
    }

    fn deserialize(&mut self, snapshot: &SceneSnapshot) -> Result<(), SceneError> {
        // Parse everything before touching the live shapes
        let document = Self::parse(snapshot)?;

        self.discard_active_selection();
        self.hover = None;
        self.drag = None;
        self.shapes.clear();
        self.z_order.clear();
        for shape in document.shapes {
            self.insert(shape);
        }
        Ok(())
    }

    fn render(&mut self) {
        self.frames += 1;
        log::trace!("render frame {} ({} shapes)", self.frames, self.shapes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use crate::shapes::{Rectangle, Segment, SerializableColor};

    fn filled_rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
        let mut rect = Rectangle::new(Point::new(x, y), w, h);
        rect.style.fill_color = Some(SerializableColor::new(255, 255, 255, 255));
        Shape::Rectangle(rect)
    }

    #[test]
    fn test_insert_and_remove() {
        let mut scene = Scene::new();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));
        assert_eq!(scene.len(), 1);
        assert!(scene.get(id).is_some());

        assert!(scene.remove(id).is_some());
        assert!(scene.is_empty());
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn test_shapes_at_point_front_first() {
        let mut scene = Scene::with_hit_tolerance(0.0);
        let back = scene.insert(filled_rect(0.0, 0.0, 100.0, 100.0));
        let front = scene.insert(filled_rect(50.0, 50.0, 100.0, 100.0));

        assert_eq!(scene.shapes_at_point(Point::new(75.0, 75.0)), vec![front, back]);
        assert_eq!(scene.shape_at(Point::new(25.0, 25.0)), Some(back));
        assert_eq!(scene.shape_at(Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_unselectable_shapes_are_skipped() {
        let mut scene = Scene::new();
        let mut shape = filled_rect(0.0, 0.0, 10.0, 10.0);
        shape.style_mut().selectable = false;
        scene.insert(shape);
        assert_eq!(scene.shape_at(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_selection_events() {
        let mut scene = Scene::new();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));

        scene.set_active_selection(id);
        scene.set_active_selection(id);
        scene.discard_active_selection();
        scene.discard_active_selection();

        assert_eq!(
            scene.drain_events(),
            vec![SceneEvent::Selected(id), SceneEvent::SelectionCleared]
        );
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn test_removing_selected_clears_selection() {
        let mut scene = Scene::new();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));
        scene.set_active_selection(id);
        scene.drain_events();

        scene.remove(id);
        assert_eq!(scene.active_selection(), None);
        assert_eq!(scene.drain_events(), vec![SceneEvent::SelectionCleared]);
    }

    #[test]
    fn test_drag_moves_selected_shape() {
        let mut scene = Scene::new();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));

        scene.pointer_down(Point::new(5.0, 5.0));
        scene.pointer_move(Point::new(15.0, 5.0));
        scene.pointer_up(Point::new(25.0, 15.0));

        assert_eq!(scene.get(id).map(Shape::bounds), Some(Rect::new(20.0, 10.0, 30.0, 20.0)));
        assert_eq!(
            scene.drain_events(),
            vec![SceneEvent::Selected(id), SceneEvent::Modified(id)]
        );
    }

    #[test]
    fn test_click_without_move_is_not_a_modification() {
        let mut scene = Scene::new();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));

        scene.pointer_down(Point::new(5.0, 5.0));
        scene.pointer_up(Point::new(5.0, 5.0));
        assert_eq!(scene.drain_events(), vec![SceneEvent::Selected(id)]);
    }

    #[test]
    fn test_press_on_empty_canvas_clears_selection() {
        let mut scene = Scene::new();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));
        scene.set_active_selection(id);
        scene.drain_events();

        scene.pointer_down(Point::new(500.0, 500.0));
        assert_eq!(scene.active_selection(), None);
        assert_eq!(scene.drain_events(), vec![SceneEvent::SelectionCleared]);
    }

    #[test]
    fn test_serialize_round_trip_keeps_order() {
        let mut scene = Scene::new();
        let a = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));
        let b = scene.insert(Shape::Segment(Segment::new(Point::ZERO, Point::new(5.0, 5.0))));
        let snapshot = scene.serialize().unwrap();

        let mut restored = Scene::new();
        restored.deserialize(&snapshot).unwrap();
        let ids: Vec<ShapeId> = restored.shapes().map(Shape::id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(restored.get(a), scene.get(a));
    }

    #[test]
    fn test_deserialize_failure_leaves_scene_intact() {
        let mut scene = Scene::new();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));
        scene.set_active_selection(id);
        scene.drain_events();

        let err = scene
            .deserialize(&SceneSnapshot::from("{\"shapes\": [{\"Nope\": 1}]}".to_string()))
            .unwrap_err();
        assert!(matches!(err, SceneError::Deserialize(_)));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.active_selection(), Some(id));
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_ids() {
        let mut scene = Scene::new();
        let shape = filled_rect(0.0, 0.0, 10.0, 10.0);
        let json = serde_json::to_string(&serde_json::json!({ "shapes": [shape, shape] })).unwrap();

        let err = scene.deserialize(&SceneSnapshot::from(json)).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateShape(id) if id == shape.id()));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_deserialize_clears_selection() {
        let mut scene = Scene::new();
        let empty = scene.serialize().unwrap();
        let id = scene.insert(filled_rect(0.0, 0.0, 10.0, 10.0));
        scene.set_active_selection(id);
        scene.set_hover(Some(id));
        scene.drain_events();

        scene.deserialize(&empty).unwrap();
        assert!(scene.is_empty());
        assert_eq!(scene.hovered(), None);
        assert_eq!(scene.drain_events(), vec![SceneEvent::SelectionCleared]);
    }

    #[test]
    fn test_render_counts_frames() {
        let mut scene = Scene::new();
        scene.render();
        scene.render();
        assert_eq!(scene.frames(), 2);
    }
}
