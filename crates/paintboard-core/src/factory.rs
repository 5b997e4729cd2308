//! Turns creation gestures into canonical shapes.
//!
//! Every function here is pure: nothing touches a document, so a failed
//! creation has nothing to undo.

use crate::error::{PaintError, PaintResult};
use crate::shapes::{
    Circle, Ellipse, Freehand, Line, Rectangle, Shape, ShapeKind, ShapeStyle, Square, Triangle,
};
use kurbo::{Point, Rect};

/// The pointer input a shape is created from.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// A press at `start` released at `end`.
    Drag { start: Point, end: Point },
    /// Every sampled point of a freehand stroke, in order.
    Stroke(Vec<Point>),
}

impl Gesture {
    pub fn drag(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Gesture::Drag {
            start: start.into(),
            end: end.into(),
        }
    }

    fn is_finite(&self) -> bool {
        let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
        match self {
            Gesture::Drag { start, end } => finite(start) && finite(end),
            Gesture::Stroke(points) => points.iter().all(finite),
        }
    }
}

/// Resolve a kind tag and build the shape.
pub fn create_shape_by_tag(tag: &str, gesture: &Gesture, style: ShapeStyle) -> PaintResult<Shape> {
    let kind: ShapeKind = tag.parse()?;
    create_shape(kind, gesture, style)
}

/// Build the canonical geometry for `kind` from a gesture.
pub fn create_shape(kind: ShapeKind, gesture: &Gesture, style: ShapeStyle) -> PaintResult<Shape> {
    if !gesture.is_finite() {
        return Err(PaintError::InvalidGesture {
            kind,
            reason: "coordinates must be finite",
        });
    }

    let mut shape = match (kind, gesture) {
        (ShapeKind::Freehand, Gesture::Stroke(points)) => {
            Shape::from(Freehand::from_points(points.clone()))
        }
        (ShapeKind::Freehand, Gesture::Drag { .. }) => {
            return Err(PaintError::InvalidGesture {
                kind,
                reason: "freehand shapes are created from a point list",
            });
        }
        (_, Gesture::Stroke(_)) => {
            return Err(PaintError::InvalidGesture {
                kind,
                reason: "expected a two-point drag",
            });
        }
        (kind, Gesture::Drag { start, end }) => from_drag(kind, *start, *end),
    };

    *shape.style_mut() = style;
    Ok(shape)
}

fn from_drag(kind: ShapeKind, start: Point, end: Point) -> Shape {
    let drag_box = Rect::from_points(start, end);
    match kind {
        ShapeKind::Circle => Circle::through(start, end).into(),
        ShapeKind::Rectangle => Rectangle::from_corners(start, end).into(),
        ShapeKind::Square => Square::from_corners(start, end).into(),
        ShapeKind::Ellipse => Ellipse::from_rect(drag_box).into(),
        ShapeKind::Triangle => Triangle::in_box(drag_box).into(),
        ShapeKind::Line => Line::new(start, end).into(),
        ShapeKind::Freehand => Freehand::from_points(vec![start, end]).into(),
    }
}
