//! Construct/resize strategies, one per shape kind.

use crate::config::EditorConfig;
use crate::shapes::{
    Ellipse, FreeformPath, Rectangle, Segment, Shape, ShapeKind, ShapeStyle, Text, Triangle,
};
use kurbo::{Point, Rect};
use thiserror::Error;

/// Errors raised while building a new shape.
#[derive(Debug, Error, PartialEq)]
pub enum ConstructError {
    #[error("Invalid style: stroke width {stroke_width} is not usable")]
    InvalidStyle { stroke_width: f64 },
    #[error("Strategy for {expected:?} cannot resize a {found:?}")]
    KindMismatch { expected: ShapeKind, found: ShapeKind },
}

/// How one kind of shape is built from a press and then dragged out.
pub trait ShapeStrategy: std::fmt::Debug {
    /// The kind of shape this strategy builds.
    fn kind(&self) -> ShapeKind;

    /// Build a zero-extent shape anchored at `origin`.
    fn construct(&self, origin: Point, style: &ShapeStyle) -> Result<Shape, ConstructError>;

    /// Move the free endpoint(s) of `shape` to track `current`.
    /// Calling this again with the same point leaves the shape unchanged.
    fn resize(
        &self,
        shape: &mut Shape,
        origin: Point,
        current: Point,
    ) -> Result<(), ConstructError>;
}

fn check_style(style: &ShapeStyle) -> Result<(), ConstructError> {
    if style.is_valid() {
        Ok(())
    } else {
        Err(ConstructError::InvalidStyle {
            stroke_width: style.stroke_width,
        })
    }
}

fn mismatch(expected: ShapeKind, shape: &Shape) -> ConstructError {
    ConstructError::KindMismatch {
        expected,
        found: shape.kind(),
    }
}

#[derive(Debug, Default)]
pub struct SegmentStrategy;

impl ShapeStrategy for SegmentStrategy {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Segment
    }

    fn construct(&self, origin: Point, style: &ShapeStyle) -> Result<Shape, ConstructError> {
        check_style(style)?;
        let mut segment = Segment::new(origin, origin);
        segment.style = style.clone();
        Ok(Shape::Segment(segment))
    }

    fn resize(
        &self,
        shape: &mut Shape,
        _origin: Point,
        current: Point,
    ) -> Result<(), ConstructError> {
        match shape {
            Shape::Segment(segment) => {
                segment.end = current;
                Ok(())
            }
            other => Err(mismatch(self.kind(), other)),
        }
    }
}

#[derive(Debug, Default)]
pub struct RectangleStrategy;

impl ShapeStrategy for RectangleStrategy {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn construct(&self, origin: Point, style: &ShapeStyle) -> Result<Shape, ConstructError> {
        check_style(style)?;
        let mut rect = Rectangle::new(origin, 0.0, 0.0);
        rect.style = style.clone();
        Ok(Shape::Rectangle(rect))
    }

    fn resize(
        &self,
        shape: &mut Shape,
        origin: Point,
        current: Point,
    ) -> Result<(), ConstructError> {
        match shape {
            Shape::Rectangle(rect) => {
                rect.span(origin, current);
                Ok(())
            }
            other => Err(mismatch(self.kind(), other)),
        }
    }
}

#[derive(Debug, Default)]
pub struct EllipseStrategy;

impl ShapeStrategy for EllipseStrategy {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn construct(&self, origin: Point, style: &ShapeStyle) -> Result<Shape, ConstructError> {
        check_style(style)?;
        let mut ellipse = Ellipse::new(origin, 0.0, 0.0);
        ellipse.style = style.clone();
        Ok(Shape::Ellipse(ellipse))
    }

    fn resize(
        &self,
        shape: &mut Shape,
        origin: Point,
        current: Point,
    ) -> Result<(), ConstructError> {
        match shape {
            Shape::Ellipse(ellipse) => {
                ellipse.fit(Rect::from_points(origin, current));
                Ok(())
            }
            other => Err(mismatch(self.kind(), other)),
        }
    }
}

#[derive(Debug, Default)]
pub struct TriangleStrategy;

impl ShapeStrategy for TriangleStrategy {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn construct(&self, origin: Point, style: &ShapeStyle) -> Result<Shape, ConstructError> {
        check_style(style)?;
        let mut triangle = Triangle::new(origin, 0.0, 0.0);
        triangle.style = style.clone();
        Ok(Shape::Triangle(triangle))
    }

    fn resize(
        &self,
        shape: &mut Shape,
        origin: Point,
        current: Point,
    ) -> Result<(), ConstructError> {
        match shape {
            Shape::Triangle(triangle) => {
                triangle.span(origin, current);
                Ok(())
            }
            other => Err(mismatch(self.kind(), other)),
        }
    }
}

/// Text is placed where the pointer lands; dragging does not size it.
#[derive(Debug)]
pub struct TextStrategy {
    content: String,
    font_size: f64,
}

impl TextStrategy {
    pub fn new(content: impl Into<String>, font_size: f64) -> Self {
        Self {
            content: content.into(),
            font_size,
        }
    }
}

impl Default for TextStrategy {
    fn default() -> Self {
        Self::new("Text", Text::DEFAULT_FONT_SIZE)
    }
}

impl ShapeStrategy for TextStrategy {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn construct(&self, origin: Point, style: &ShapeStyle) -> Result<Shape, ConstructError> {
        check_style(style)?;
        let mut text = Text::new(origin, self.content.clone()).with_font_size(self.font_size);
        text.style = style.clone();
        Ok(Shape::Text(text))
    }

    fn resize(
        &self,
        shape: &mut Shape,
        _origin: Point,
        _current: Point,
    ) -> Result<(), ConstructError> {
        match shape {
            Shape::Text(_) => Ok(()),
            other => Err(mismatch(self.kind(), other)),
        }
    }
}

/// Freeform paths grow by one point per pointer move.
#[derive(Debug, Default)]
pub struct PathStrategy;

impl ShapeStrategy for PathStrategy {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Path
    }

    fn construct(&self, origin: Point, style: &ShapeStyle) -> Result<Shape, ConstructError> {
        check_style(style)?;
        let mut path = FreeformPath::new(origin);
        path.style = style.clone();
        Ok(Shape::Path(path))
    }

    fn resize(
        &self,
        shape: &mut Shape,
        _origin: Point,
        current: Point,
    ) -> Result<(), ConstructError> {
        match shape {
            Shape::Path(path) => {
                path.add_point(current);
                Ok(())
            }
            other => Err(mismatch(self.kind(), other)),
        }
    }
}

/// Strategy table indexed by [`ShapeKind`], built once per editor.
#[derive(Debug)]
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn ShapeStrategy>>,
}

impl StrategyRegistry {
    pub fn new(config: &EditorConfig) -> Self {
        let strategies: Vec<Box<dyn ShapeStrategy>> = ShapeKind::ALL
            .iter()
            .map(|kind| -> Box<dyn ShapeStrategy> {
                match kind {
                    ShapeKind::Segment => Box::new(SegmentStrategy),
                    ShapeKind::Rectangle => Box::new(RectangleStrategy),
                    ShapeKind::Ellipse => Box::new(EllipseStrategy),
                    ShapeKind::Triangle => Box::new(TriangleStrategy),
                    ShapeKind::Text => {
                        Box::new(TextStrategy::new(config.default_text.clone(), config.font_size))
                    }
                    ShapeKind::Path => Box::new(PathStrategy),
                }
            })
            .collect();
        Self { strategies }
    }

    /// The strategy for `kind`.
    pub fn get(&self, kind: ShapeKind) -> &dyn ShapeStrategy {
        self.strategies[kind.index()].as_ref()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ShapeStyle {
        ShapeStyle::default()
    }

    #[test]
    fn test_registry_covers_every_kind() {
        let registry = StrategyRegistry::default();
        for kind in ShapeKind::ALL {
            assert_eq!(registry.get(kind).kind(), kind);
            let shape = registry.get(kind).construct(Point::new(3.0, 4.0), &style()).unwrap();
            assert_eq!(shape.kind(), kind);
        }
    }

    #[test]
    fn test_rectangle_drag() {
        let strategy = RectangleStrategy;
        let origin = Point::new(10.0, 10.0);
        let mut shape = strategy.construct(origin, &style()).unwrap();
        assert!(shape.bounds().area().abs() < f64::EPSILON);

        strategy.resize(&mut shape, origin, Point::new(50.0, 40.0)).unwrap();
        assert_eq!(shape.bounds(), Rect::new(10.0, 10.0, 50.0, 40.0));

        // Dragging back past the origin flips the box
        strategy.resize(&mut shape, origin, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(shape.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let registry = StrategyRegistry::default();
        let origin = Point::new(0.0, 0.0);
        for kind in ShapeKind::ALL {
            let strategy = registry.get(kind);
            let mut once = strategy.construct(origin, &style()).unwrap();
            strategy.resize(&mut once, origin, Point::new(20.0, 30.0)).unwrap();
            let mut twice = once.clone();
            strategy.resize(&mut twice, origin, Point::new(20.0, 30.0)).unwrap();
            assert_eq!(once, twice, "{kind:?}");
        }
    }

    #[test]
    fn test_segment_tracks_endpoint() {
        let strategy = SegmentStrategy;
        let origin = Point::new(1.0, 1.0);
        let mut shape = strategy.construct(origin, &style()).unwrap();
        strategy.resize(&mut shape, origin, Point::new(9.0, 5.0)).unwrap();
        let Shape::Segment(segment) = shape else {
            panic!("expected a segment");
        };
        assert_eq!(segment.start, origin);
        assert_eq!(segment.end, Point::new(9.0, 5.0));
    }

    #[test]
    fn test_path_appends_points() {
        let strategy = PathStrategy;
        let origin = Point::new(0.0, 0.0);
        let mut shape = strategy.construct(origin, &style()).unwrap();
        strategy.resize(&mut shape, origin, Point::new(1.0, 1.0)).unwrap();
        strategy.resize(&mut shape, origin, Point::new(2.0, 3.0)).unwrap();
        let Shape::Path(path) = shape else {
            panic!("expected a path");
        };
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_text_resize_is_noop() {
        let strategy = TextStrategy::new("Label", 12.0);
        let origin = Point::new(5.0, 5.0);
        let mut shape = strategy.construct(origin, &style()).unwrap();
        let before = shape.clone();
        strategy.resize(&mut shape, origin, Point::new(100.0, 100.0)).unwrap();
        assert_eq!(shape, before);
        let Shape::Text(text) = shape else {
            panic!("expected text");
        };
        assert_eq!(text.content(), "Label");
    }

    #[test]
    fn test_construct_uses_style_snapshot() {
        let mut custom = style();
        custom.stroke_width = 6.0;
        custom.fill_color = Some(crate::shapes::SerializableColor::new(255, 255, 255, 255));
        let shape = EllipseStrategy.construct(Point::ZERO, &custom).unwrap();
        assert_eq!(shape.style(), &custom);
    }

    #[test]
    fn test_construct_rejects_bad_style() {
        let mut bad = style();
        bad.stroke_width = f64::NAN;
        let err = TriangleStrategy.construct(Point::ZERO, &bad).unwrap_err();
        assert!(matches!(err, ConstructError::InvalidStyle { .. }));
    }

    #[test]
    fn test_resize_wrong_kind() {
        let mut shape = SegmentStrategy.construct(Point::ZERO, &style()).unwrap();
        let err = RectangleStrategy
            .resize(&mut shape, Point::ZERO, Point::new(1.0, 1.0))
            .unwrap_err();
        assert_eq!(
            err,
            ConstructError::KindMismatch {
                expected: ShapeKind::Rectangle,
                found: ShapeKind::Segment,
            }
        );
    }
}
