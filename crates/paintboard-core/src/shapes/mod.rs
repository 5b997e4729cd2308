//! Shape definitions for the drawing document.

mod circle;
mod ellipse;
mod freehand;
mod line;
mod rectangle;
mod square;
mod triangle;

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use square::Square;
pub use triangle::Triangle;

use crate::error::PaintError;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Wire value for "no fill".
pub const TRANSPARENT: &str = "transparent";

/// Stroke color used when a gesture or record carries none.
pub const DEFAULT_STROKE: &str = "#000000";

/// Color attributes shared by every shape.
///
/// Colors are opaque strings owned by the client (`"#ff0000"`, `"red"`,
/// `"rgba(...)"`); the engine never interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: String,
    /// Fill color (None = transparent).
    pub fill_color: Option<String>,
}

impl ShapeStyle {
    /// Build a style, folding the transparent sentinel into `None`.
    pub fn new(stroke_color: impl Into<String>, fill_color: Option<&str>) -> Self {
        Self {
            stroke_color: stroke_color.into(),
            fill_color: normalize_fill(fill_color),
        }
    }

    /// Fill color as it appears on the wire.
    pub fn fill_or_transparent(&self) -> &str {
        self.fill_color.as_deref().unwrap_or(TRANSPARENT)
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE, None)
    }
}

/// Map an incoming fill value to the stored representation.
pub fn normalize_fill(fill: Option<&str>) -> Option<String> {
    match fill.map(str::trim) {
        None | Some("") => None,
        Some(value) if value.eq_ignore_ascii_case(TRANSPARENT) => None,
        Some(value) => Some(value.to_string()),
    }
}

/// The closed set of drawable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Ellipse,
    Rectangle,
    Square,
    Line,
    Triangle,
    Freehand,
}

impl ShapeKind {
    /// Every kind, in declaration order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Rectangle,
        ShapeKind::Square,
        ShapeKind::Line,
        ShapeKind::Triangle,
        ShapeKind::Freehand,
    ];

    /// The kind tag used in records and requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Square => "square",
            ShapeKind::Line => "line",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Freehand => "freehand",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = PaintError;

    /// Tags are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| PaintError::UnknownShapeKind(s.to_string()))
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// The kind tag of this shape.
    fn kind(&self) -> ShapeKind;

    /// The kind-specific anchor coordinate.
    fn anchor(&self) -> Point;

    /// Get the bounding box.
    fn bounds(&self) -> Rect;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Enum wrapper for all shape kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Ellipse(Ellipse),
    Rectangle(Rectangle),
    Square(Square),
    Line(Line),
    Triangle(Triangle),
    Freehand(Freehand),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Circle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Square(s) => s,
            Shape::Line(s) => s,
            Shape::Triangle(s) => s,
            Shape::Freehand(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Circle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Square(s) => s,
            Shape::Line(s) => s,
            Shape::Triangle(s) => s,
            Shape::Freehand(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn kind(&self) -> ShapeKind {
        self.as_trait().kind()
    }

    /// Center for circles and ellipses, top-left for rectangles and squares,
    /// first vertex for lines and triangles, origin for freehand.
    pub fn anchor(&self) -> Point {
        self.as_trait().anchor()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    pub fn stroke_color(&self) -> &str {
        &self.style().stroke_color
    }

    pub fn fill_color(&self) -> Option<&str> {
        self.style().fill_color.as_deref()
    }

    /// The point a paste target is aligned with.
    ///
    /// Same as the anchor, except for freehand strokes whose anchor is
    /// unused: there the first recorded point stands in.
    pub fn reference_point(&self) -> Point {
        match self {
            Shape::Freehand(f) => f.points.first().copied().unwrap_or(Point::ZERO),
            _ => self.anchor(),
        }
    }

    /// Regenerate the shape's ID with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Circle(s) => s.id = new_id,
            Shape::Ellipse(s) => s.id = new_id,
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Square(s) => s.id = new_id,
            Shape::Line(s) => s.id = new_id,
            Shape::Triangle(s) => s.id = new_id,
            Shape::Freehand(s) => s.id = new_id,
        }
    }

    /// Copy this shape under a fresh identity.
    ///
    /// `Clone` keeps the id and is what history snapshots use; this is the
    /// copy/paste operation and never reuses the source id.
    pub fn duplicate(&self) -> Shape {
        let mut copy = self.clone();
        copy.regenerate_id();
        copy
    }

    /// Whether every coordinate and size is finite.
    pub fn is_finite(&self) -> bool {
        let point = |p: &Point| p.x.is_finite() && p.y.is_finite();
        match self {
            Shape::Circle(c) => point(&c.center) && c.radius.is_finite(),
            Shape::Ellipse(e) => {
                point(&e.center) && e.radius_x.is_finite() && e.radius_y.is_finite()
            }
            Shape::Rectangle(r) => {
                point(&r.position) && r.width.is_finite() && r.height.is_finite()
            }
            Shape::Square(s) => point(&s.position) && s.side_length.is_finite(),
            Shape::Line(l) => point(&l.start) && point(&l.end),
            Shape::Triangle(t) => t.vertices().iter().all(point),
            Shape::Freehand(f) => f.points.iter().all(point),
        }
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}

impl From<Ellipse> for Shape {
    fn from(s: Ellipse) -> Self {
        Shape::Ellipse(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Shape::Rectangle(s)
    }
}

impl From<Square> for Shape {
    fn from(s: Square) -> Self {
        Shape::Square(s)
    }
}

impl From<Line> for Shape {
    fn from(s: Line) -> Self {
        Shape::Line(s)
    }
}

impl From<Triangle> for Shape {
    fn from(s: Triangle) -> Self {
        Shape::Triangle(s)
    }
}

impl From<Freehand> for Shape {
    fn from(s: Freehand) -> Self {
        Shape::Freehand(s)
    }
}

/// Bounding box of a point set (zero rect when empty).
pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
}
