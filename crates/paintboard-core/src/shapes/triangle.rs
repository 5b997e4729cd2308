//! Triangle shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, points_bounds};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// A triangle given by its three vertices. `p1` is the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    pub style: ShapeStyle,
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            p1,
            p2,
            p3,
            style: ShapeStyle::default(),
        }
    }

    pub(crate) fn reconstruct(
        id: ShapeId,
        p1: Point,
        p2: Point,
        p3: Point,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id,
            p1,
            p2,
            p3,
            style,
        }
    }

    /// Isosceles triangle inscribed in a drag box: apex at the middle of the
    /// top edge, base along the bottom edge.
    pub fn in_box(rect: Rect) -> Self {
        Self::new(
            Point::new(rect.x0 + rect.width() / 2.0, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        )
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.p1, self.p2, self.p3]
    }
}

impl ShapeTrait for Triangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn anchor(&self) -> Point {
        self.p1
    }

    fn bounds(&self) -> Rect {
        points_bounds(&self.vertices())
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
