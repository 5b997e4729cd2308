//! Freehand drawing shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, points_bounds};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// A stroke sampled as an ordered point list.
///
/// Point order is the stroke order and is never rearranged. The shared
/// anchor is unused and reads as the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    pub points: Vec<Point>,
    pub style: ShapeStyle,
}

impl Freehand {
    pub fn new() -> Self {
        Self::from_points(Vec::new())
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }

    pub(crate) fn reconstruct(id: ShapeId, points: Vec<Point>, style: ShapeStyle) -> Self {
        Self { id, points, style }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Freehand {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Freehand
    }

    fn anchor(&self) -> Point {
        Point::ZERO
    }

    fn bounds(&self) -> Rect {
        points_bounds(&self.points)
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
    fn test_empty_stroke() {
        let stroke = Freehand::default();
        assert!(stroke.is_empty());
        assert_eq!(stroke.anchor(), Point::ZERO);
        assert_eq!(stroke.bounds(), Rect::ZERO);
    }

    #[test]
    fn test_point_order_kept() {
        let points = vec![Point::new(9.0, 1.0), Point::new(0.0, 0.0), Point::new(4.0, 7.0)];
        let stroke = Freehand::from_points(points.clone());
        assert_eq!(stroke.points, points);
        assert_eq!(stroke.bounds(), Rect::new(0.0, 0.0, 9.0, 7.0));
    }
}
