//! Editor configuration.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Tunables for an [`Editor`](crate::editor::Editor).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo entries; the oldest entry is evicted first.
    pub history_capacity: usize,
    /// Distance each paste moves away from the previous one, on both axes.
    pub paste_offset: f64,
    /// Extra reach, in canvas units, when hit-testing shapes.
    pub hit_tolerance: f64,
    /// Drawing mode active when the editor starts.
    pub initial_mode: ShapeKind,
    /// Content of newly placed text shapes.
    pub default_text: String,
    /// Font size of newly placed text shapes.
    pub font_size: f64,
    /// Surface width handed to the host.
    pub canvas_width: u32,
    /// Surface height handed to the host.
    pub canvas_height: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 100,
            paste_offset: 10.0,
            hit_tolerance: 4.0,
            initial_mode: ShapeKind::Segment,
            default_text: "Text".to_string(),
            font_size: 20.0,
            canvas_width: 800,
            canvas_height: 600,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
