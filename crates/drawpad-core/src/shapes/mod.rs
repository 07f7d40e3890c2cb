//! Shape definitions for the drawing surface.

mod ellipse;
mod path;
mod rectangle;
mod segment;
mod text;
mod triangle;

pub use ellipse::Ellipse;
pub use path::FreeformPath;
pub use rectangle::Rectangle;
pub use segment::Segment;
pub use text::Text;
pub use triangle::Triangle;

use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse any CSS color string (`#rgb`, `rgb(...)`, `hsl(...)`, named
    /// colors, ...). Returns `None` for anything else.
    pub fn parse(color: &str) -> Option<Self> {
        color.parse::<Color>().ok().map(Self::from)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Line dash pattern for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineDash {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineDash {
    /// Dash array (on/off lengths) for the given stroke width.
    /// Empty for solid strokes.
    pub fn dash_array(&self, stroke_width: f64) -> Vec<f64> {
        let w = stroke_width.max(1.0);
        match self {
            LineDash::Solid => Vec::new(),
            LineDash::Dashed => vec![5.0 * w, 5.0 * w],
            LineDash::Dotted => vec![w, 2.0 * w],
        }
    }

    /// Cycle to the next dash pattern.
    pub fn next(self) -> Self {
        match self {
            LineDash::Solid => LineDash::Dashed,
            LineDash::Dashed => LineDash::Dotted,
            LineDash::Dotted => LineDash::Solid,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Style properties captured by a shape when it is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Stroke width.
    pub stroke_width: f64,
    /// Dash pattern of the stroke.
    #[serde(default)]
    pub line_dash: LineDash,
    /// Whether pointer presses can select the shape.
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Keep the stroke width constant when the shape is scaled.
    #[serde(default = "default_true")]
    pub uniform_stroke: bool,
}

impl ShapeStyle {
    /// Whether the style can be used to build a shape.
    pub fn is_valid(&self) -> bool {
        self.stroke_width.is_finite() && self.stroke_width >= 0.0
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            fill_color: None,
            stroke_width: 1.0,
            line_dash: LineDash::default(),
            selectable: true,
            uniform_stroke: true,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => point.distance(*single),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Apply a transform to this shape.
    fn transform(&mut self, affine: Affine);
}

/// Tag naming each kind of shape; also selects the drawing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Segment,
    Rectangle,
    Ellipse,
    Triangle,
    Text,
    Path,
}

impl ShapeKind {
    /// Every kind, in strategy-table order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Segment,
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Triangle,
        ShapeKind::Text,
        ShapeKind::Path,
    ];

    /// Position of this kind in [`ShapeKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ShapeKind::Segment => 0,
            ShapeKind::Rectangle => 1,
            ShapeKind::Ellipse => 2,
            ShapeKind::Triangle => 3,
            ShapeKind::Text => 4,
            ShapeKind::Path => 5,
        }
    }

    /// Stable lowercase name, as used by UI controls and the host page.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Segment => "segment",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Text => "text",
            ShapeKind::Path => "path",
        }
    }

    /// Look a kind up by name. Accepts the short toolbar names
    /// (`line`, `rect`, `oval`, `tria`, `polyline`) too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "segment" | "line" => Some(ShapeKind::Segment),
            "rectangle" | "rect" => Some(ShapeKind::Rectangle),
            "ellipse" | "oval" => Some(ShapeKind::Ellipse),
            "triangle" | "tria" => Some(ShapeKind::Triangle),
            "text" => Some(ShapeKind::Text),
            "path" | "polyline" | "freeform" => Some(ShapeKind::Path),
            _ => None,
        }
    }
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Segment(Segment),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Triangle(Triangle),
    Text(Text),
    Path(FreeformPath),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Segment(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Text(s) => s.id(),
            Shape::Path(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Segment(_) => ShapeKind::Segment,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Path(_) => ShapeKind::Path,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Segment(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Path(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Segment(s) => s.hit_test(point, tolerance),
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Ellipse(s) => s.hit_test(point, tolerance),
            Shape::Triangle(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => s.hit_test(point, tolerance),
            Shape::Path(s) => s.hit_test(point, tolerance),
        }
    }


    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Segment(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Triangle(s) => s.style(),
            Shape::Text(s) => s.style(),
            Shape::Path(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Segment(s) => s.style_mut(),
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Triangle(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
            Shape::Path(s) => s.style_mut(),
        }
    }

    pub fn transform(&mut self, affine: Affine) {
        match self {
            Shape::Segment(s) => s.transform(affine),
            Shape::Rectangle(s) => s.transform(affine),
            Shape::Ellipse(s) => s.transform(affine),
            Shape::Triangle(s) => s.transform(affine),
            Shape::Text(s) => s.transform(affine),
            Shape::Path(s) => s.transform(affine),
        }
    }

    /// Move the shape by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform(Affine::translate(delta));
    }

    /// Whether pointer presses may select this shape.
    pub fn is_selectable(&self) -> bool {
        self.style().selectable
    }

    /// Regenerate the shape's ID with a new unique identifier.
    /// Used when cloning so the copy never shares identity with its source.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Segment(s) => s.id = new_id,
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Ellipse(s) => s.id = new_id,
            Shape::Triangle(s) => s.id = new_id,
            Shape::Text(s) => s.id = new_id,
            Shape::Path(s) => s.id = new_id,
        }
    }

    /// Deep copy with a fresh identity.
    pub fn duplicate(&self) -> Shape {
        let mut copy = self.clone();
        copy.regenerate_id();
        copy
    }
}
