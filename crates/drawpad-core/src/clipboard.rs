//! Single-slot shape clipboard.

use crate::scene::SceneGraph;
use crate::shapes::{Shape, ShapeId};
use kurbo::Vec2;

/// Holds one detached copy of a shape.
///
/// The slot never aliases a live shape: copying clones with a fresh id and
/// every paste clones the slot again, so the same content can be pasted
/// repeatedly. Each paste lands `offset` further away than the previous one.
#[derive(Debug, Clone)]
pub struct Clipboard {
    slot: Option<Shape>,
    offset: Vec2,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl Clipboard {
    /// Empty clipboard whose pastes cascade by `offset` on both axes.
    pub fn new(offset: f64) -> Self {
        Self {
            slot: None,
            offset: Vec2::new(offset, offset),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// The shape that the next paste is cloned from.
    pub fn contents(&self) -> Option<&Shape> {
        self.slot.as_ref()
    }

    /// Copy the selected shape. Returns false when nothing is selected.
    pub fn copy<S: SceneGraph>(&mut self, scene: &S) -> bool {
        let Some(shape) = scene.active_selection().and_then(|id| scene.clone_shape(id)) else {
            log::trace!("copy: nothing selected");
            return false;
        };
        log::debug!("copied {:?} {}", shape.kind(), shape.id());
        self.slot = Some(shape);
        true
    }

    /// Copy the selected shape, then remove it from the scene.
    /// Returns false when nothing is selected.
    pub fn cut<S: SceneGraph>(&mut self, scene: &mut S) -> bool {
        let Some(id) = scene.active_selection() else {
            log::trace!("cut: nothing selected");
            return false;
        };
        if !self.copy(scene) {
            return false;
        }
        scene.remove(id);
        true
    }

    /// Insert a fresh clone of the slot, offset from the previous paste, and
    /// select it. Returns the new shape's id, or `None` when empty.
    pub fn paste<S: SceneGraph>(&mut self, scene: &mut S) -> Option<ShapeId> {
        let Some(slot) = self.slot.as_mut() else {
            log::trace!("paste: clipboard is empty");
            return None;
        };
        slot.translate(self.offset);
        let id = scene.insert(slot.duplicate());
        scene.set_active_selection(id);
        log::debug!("pasted {id}");
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::shapes::Segment;
    use kurbo::{Point, Rect};

    fn scene_with_segment() -> (Scene, ShapeId) {
        let mut scene = Scene::new();
        let id = scene.insert(Shape::Segment(Segment::new(
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
        )));
        (scene, id)
    }

    #[test]
    fn test_copy_without_selection_is_noop() {
        let (scene, _) = scene_with_segment();
        let mut clipboard = Clipboard::default();
        assert!(!clipboard.copy(&scene));
        assert!(clipboard.is_empty());
    }

    #[test]
    fn test_copy_is_detached() {
        let (mut scene, id) = scene_with_segment();
        scene.set_active_selection(id);
        let mut clipboard = Clipboard::default();
        assert!(clipboard.copy(&scene));

        let copied = clipboard.contents().cloned().unwrap();
        assert_ne!(copied.id(), id);

        scene.get_mut(id).unwrap().translate(Vec2::new(100.0, 100.0));
        scene.remove(id);
        assert_eq!(clipboard.contents(), Some(&copied));
    }

    #[test]
    fn test_cut_removes_selected() {
        let (mut scene, id) = scene_with_segment();
        scene.set_active_selection(id);
        let mut clipboard = Clipboard::default();
        assert!(clipboard.cut(&mut scene));
        assert!(scene.is_empty());
        assert!(!clipboard.is_empty());
        assert_eq!(scene.active_selection(), None);
    }

    #[test]
    fn test_paste_cascades() {
        let (mut scene, id) = scene_with_segment();
        scene.set_active_selection(id);
        let mut clipboard = Clipboard::new(10.0);
        clipboard.copy(&scene);

        let first = clipboard.paste(&mut scene).unwrap();
        let second = clipboard.paste(&mut scene).unwrap();
        assert_ne!(first, second);
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.active_selection(), Some(second));
        assert_eq!(scene.get(first).unwrap().bounds(), Rect::new(10.0, 10.0, 30.0, 10.0));
        assert_eq!(scene.get(second).unwrap().bounds(), Rect::new(20.0, 20.0, 40.0, 20.0));
    }

    #[test]
    fn test_paste_empty_is_noop() {
        let mut scene = Scene::new();
        let mut clipboard = Clipboard::default();
        assert!(clipboard.paste(&mut scene).is_none());
        assert!(scene.is_empty());
    }
}
