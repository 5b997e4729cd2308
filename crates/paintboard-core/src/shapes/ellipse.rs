//! Ellipse shape.

use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// An axis-aligned ellipse anchored at its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    pub center: Point,
    /// Semi-axis along x.
    pub radius_x: f64,
    /// Semi-axis along y.
    pub radius_y: f64,
    pub style: ShapeStyle,
}

impl Ellipse {
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self::reconstruct(Uuid::new_v4(), center, radius_x, radius_y, ShapeStyle::default())
    }

    /// Rebuild an imported ellipse under its recorded id.
    pub(crate) fn reconstruct(
        id: ShapeId,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id,
            center,
            radius_x,
            radius_y,
            style,
        }
    }

    /// The ellipse inscribed in a drag box.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.center(), rect.width() / 2.0, rect.height() / 2.0)
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (2.0 * self.radius_x, 2.0 * self.radius_y))
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
