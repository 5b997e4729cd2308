//! Line segment shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, points_bounds};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// First endpoint; the anchor.
    pub start: Point,
    pub end: Point,
    pub style: ShapeStyle,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }

    pub(crate) fn reconstruct(id: ShapeId, start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id,
            start,
            end,
            style,
        }
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn bounds(&self) -> Rect {
        points_bounds(&[self.start, self.end])
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_kept_verbatim() {
        let line = Line::new(Point::new(50.0, 20.0), Point::new(10.0, 80.0));
        assert_eq!(line.anchor(), Point::new(50.0, 20.0));
        assert_eq!(line.end, Point::new(10.0, 80.0));
        assert_eq!(line.bounds(), Rect::new(10.0, 20.0, 50.0, 80.0));
    }

    #[test]
    fn test_degenerate_bounds() {
        let p = Point::new(3.0, 4.0);
        let line = Line::new(p, p);
        assert_eq!(line.bounds(), Rect::from_points(p, p));
    }
}
