//! Square shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// An axis-aligned square.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Length of every side.
    pub side_length: f64,
    pub style: ShapeStyle,
}

impl Square {
    pub fn new(position: Point, side_length: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            side_length,
            style: ShapeStyle::default(),
        }
    }

    pub(crate) fn reconstruct(
        id: ShapeId,
        position: Point,
        side_length: f64,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id,
            position,
            side_length,
            style,
        }
    }

    /// Create a square from a drag: the side is the longer drag extent,
    /// anchored at the drag box's top-left corner.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let side = (p2.x - p1.x).abs().max((p2.y - p1.y).abs());
        Self::new(Point::new(p1.x.min(p2.x), p1.y.min(p2.y)), side)
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.side_length,
            self.position.y + self.side_length,
        )
    }
}

impl ShapeTrait for Square {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
    }

    fn anchor(&self) -> Point {
        self.position
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
