//! The editor's current drawing style.

use crate::shapes::{LineDash, SerializableColor, ShapeStyle};
use thiserror::Error;

/// Style errors.
#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}

/// Mutable styling attributes applied to every newly constructed shape.
///
/// Strategies never read the context directly: a gesture takes a
/// [`ShapeStyle`] snapshot when it starts, so later changes only affect
/// shapes drawn afterwards.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    current: ShapeStyle,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current style.
    pub fn snapshot(&self) -> ShapeStyle {
        self.current.clone()
    }

    pub fn current(&self) -> &ShapeStyle {
        &self.current
    }

    pub fn set_stroke_color(&mut self, color: &str) -> Result<(), StyleError> {
        self.current.stroke_color = parse_color(color)?;
        Ok(())
    }

    /// Set the fill color. An empty string removes the fill.
    pub fn set_fill_color(&mut self, color: &str) -> Result<(), StyleError> {
        self.current.fill_color = if color.trim().is_empty() {
            None
        } else {
            Some(parse_color(color)?)
        };
        Ok(())
    }

    /// Set the stroke width. Not validated here; an unusable width makes the
    /// next construction fail instead.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.current.stroke_width = width;
    }

    pub fn set_line_dash(&mut self, dash: LineDash) {
        self.current.line_dash = dash;
    }
}

fn parse_color(color: &str) -> Result<SerializableColor, StyleError> {
    SerializableColor::parse(color).ok_or_else(|| StyleError::InvalidColor(color.to_string()))
}
