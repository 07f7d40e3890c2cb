//! Cursor-mode state machine: decides whether a press draws or selects, and
//! when a drawing gesture is complete.

use crate::scene::{SceneEvent, SceneGraph};
use crate::shapes::{ShapeId, ShapeKind};
use crate::strategy::{ConstructError, StrategyRegistry};
use crate::style::StyleContext;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What pointer input currently does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorMode {
    /// Presses on empty canvas construct a new shape.
    #[default]
    Draw,
    /// A shape is selected; pointer input moves it.
    Select,
}

/// A shape being dragged out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawGesture {
    /// Where the press landed.
    pub origin: Point,
    /// The shape under construction.
    pub shape_id: ShapeId,
    /// Strategy that built the shape; keeps resizing it even if the
    /// drawing mode changes mid-drag.
    pub kind: ShapeKind,
}

/// Result of handing a pointer event to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerOutcome {
    /// A mutation completed and should be recorded in history.
    pub commit: bool,
    /// A new shape was inserted by this event.
    pub constructed: Option<ShapeId>,
}

/// Tracks Draw/Select mode, the pointer button, and the open gesture.
#[derive(Debug, Clone)]
pub struct CursorStateMachine {
    mode: CursorMode,
    kind: ShapeKind,
    dragging: bool,
    object_selected: bool,
    active: Option<ShapeId>,
    gesture: Option<DrawGesture>,
}

impl Default for CursorStateMachine {
    fn default() -> Self {
        Self::new(ShapeKind::default())
    }
}

impl CursorStateMachine {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            mode: CursorMode::Draw,
            kind,
            dragging: false,
            object_selected: false,
            active: None,
            gesture: None,
        }
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// The kind of shape the next gesture builds.
    pub fn drawing_kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_object_selected(&self) -> bool {
        self.object_selected
    }

    /// The shape last reported as selected.
    pub fn active(&self) -> Option<ShapeId> {
        self.active
    }

    pub fn gesture(&self) -> Option<&DrawGesture> {
        self.gesture.as_ref()
    }

    /// Switch the strategy used by the next gesture. An open gesture keeps
    /// its own strategy.
    pub fn set_drawing_kind(&mut self, kind: ShapeKind) {
        log::debug!("drawing mode {:?} -> {:?}", self.kind, kind);
        self.kind = kind;
        self.set_mode(CursorMode::Draw);
    }

    /// Drop the open gesture without committing it.
    pub fn cancel_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            log::trace!("gesture on {} cancelled", gesture.shape_id);
        }
        self.dragging = false;
    }

    /// Apply one scene notification. Returns true if it asks for a commit.
    pub fn on_scene_event(&mut self, event: SceneEvent) -> bool {
        match event {
            SceneEvent::Selected(id) => {
                self.active = Some(id);
                self.object_selected = true;
                self.set_mode(CursorMode::Select);
                false
            }
            SceneEvent::SelectionCleared => {
                self.active = None;
                self.object_selected = false;
                self.set_mode(CursorMode::Draw);
                false
            }
            SceneEvent::Modified(id) => {
                log::trace!("shape {id} modified by the scene");
                true
            }
        }
    }

    /// Drain and apply every queued scene notification.
    /// Returns true if any of them asks for a commit.
    pub fn sync<S: SceneGraph>(&mut self, scene: &mut S) -> bool {
        scene
            .drain_events()
            .into_iter()
            .fold(false, |commit, event| self.on_scene_event(event) || commit)
    }

    /// Press. Lets the scene select under the pointer first; constructs a
    /// new shape only if the press neither started nor ended in Select.
    pub fn pointer_down<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        strategies: &StrategyRegistry,
        style: &StyleContext,
        point: Point,
    ) -> Result<PointerOutcome, ConstructError> {
        let was_drawing = self.mode == CursorMode::Draw;
        self.dragging = true;

        scene.pointer_down(point);
        let mut outcome = PointerOutcome {
            commit: self.sync(scene),
            constructed: None,
        };

        if was_drawing && self.mode == CursorMode::Draw {
            let shape = match strategies.get(self.kind).construct(point, &style.snapshot()) {
                Ok(shape) => shape,
                Err(err) => {
                    log::debug!("construct {:?} failed: {err}", self.kind);
                    self.dragging = false;
                    return Err(err);
                }
            };
            let shape_id = scene.insert(shape);
            scene.render();
            log::debug!("gesture started: {:?} {shape_id} at {point:?}", self.kind);
            self.gesture = Some(DrawGesture {
                origin: point,
                shape_id,
                kind: self.kind,
            });
            outcome.constructed = Some(shape_id);
        }

        self.object_selected = scene.active_selection().is_some();
        Ok(outcome)
    }

    /// Move. Resizes the shape under construction while dragging in Draw;
    /// otherwise the scene handles it. Never commits a gesture.
    pub fn pointer_move<S: SceneGraph>(
        &mut self,
        scene: &mut S,
        strategies: &StrategyRegistry,
        point: Point,
    ) -> Result<PointerOutcome, ConstructError> {
        scene.pointer_move(point);
        let outcome = PointerOutcome {
            commit: self.sync(scene),
            constructed: None,
        };

        if !self.dragging {
            self.hover(scene, point);
            return Ok(outcome);
        }
        if self.mode != CursorMode::Draw {
            scene.render();
            return Ok(outcome);
        }
        let Some(gesture) = self.gesture else {
            return Ok(outcome);
        };
        if let Some(shape) = scene.get_mut(gesture.shape_id) {
            strategies
                .get(gesture.kind)
                .resize(shape, gesture.origin, point)?;
            scene.render();
            log::trace!("resize {} to {point:?}", gesture.shape_id);
        }
        Ok(outcome)
    }

    /// Release. Closes the open gesture and asks for exactly one commit.
    pub fn pointer_up<S: SceneGraph>(&mut self, scene: &mut S, point: Point) -> PointerOutcome {
        scene.pointer_up(point);
        let mut outcome = PointerOutcome {
            commit: self.sync(scene),
            constructed: None,
        };

        self.dragging = false;
        if self.mode == CursorMode::Draw {
            self.object_selected = false;
        }
        if let Some(gesture) = self.gesture.take() {
            log::debug!("gesture finished: {:?} {}", gesture.kind, gesture.shape_id);
            outcome.commit = true;
        }
        outcome
    }

    /// The pointer left the surface. Clears the hover preview unless a
    /// shape is selected.
    pub fn pointer_leave<S: SceneGraph>(&mut self, scene: &mut S) {
        if self.object_selected || scene.hovered().is_none() {
            return;
        }
        scene.set_hover(None);
        scene.render();
    }

    /// Hover preview: only while the button is up and nothing is selected.
    fn hover<S: SceneGraph>(&mut self, scene: &mut S, point: Point) {
        if self.dragging || self.object_selected {
            return;
        }
        let target = scene.shape_at(point);
        if scene.hovered() != target {
            scene.set_hover(target);
            scene.render();
        }
    }

    fn set_mode(&mut self, mode: CursorMode) {
        if self.mode != mode {
            log::debug!("cursor mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}
