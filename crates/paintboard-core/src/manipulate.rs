//! Move, resize and recolor transforms on a single shape.
//!
//! These functions only touch geometry and style. Recording history is the
//! caller's job.

use crate::shapes::{Shape, normalize_fill};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which edges a resize drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    /// Right edge: width only.
    Right,
    /// Bottom edge: height only.
    Bottom,
    /// Bottom-right corner: both dimensions.
    Both,
    /// Whatever the shape kind resizes by. Rectangles treat it as `Both`.
    #[default]
    Default,
}

impl ResizeAnchor {
    fn grows_width(self) -> bool {
        matches!(self, ResizeAnchor::Right | ResizeAnchor::Both | ResizeAnchor::Default)
    }

    fn grows_height(self) -> bool {
        matches!(self, ResizeAnchor::Bottom | ResizeAnchor::Both | ResizeAnchor::Default)
    }
}

impl FromStr for ResizeAnchor {
    type Err = std::convert::Infallible;

    /// Unrecognized names fall back to [`ResizeAnchor::Default`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "right" => ResizeAnchor::Right,
            "bottom" => ResizeAnchor::Bottom,
            "both" => ResizeAnchor::Both,
            _ => ResizeAnchor::Default,
        })
    }
}

/// Translate every coordinate that positions the shape.
pub fn move_shape(shape: &mut Shape, delta: Vec2) {
    match shape {
        Shape::Circle(c) => c.center += delta,
        Shape::Ellipse(e) => e.center += delta,
        Shape::Rectangle(r) => r.position += delta,
        Shape::Square(s) => s.position += delta,
        Shape::Line(l) => {
            l.start += delta;
            l.end += delta;
        }
        Shape::Triangle(t) => {
            t.p1 += delta;
            t.p2 += delta;
            t.p3 += delta;
        }
        Shape::Freehand(f) => {
            for point in &mut f.points {
                *point += delta;
            }
        }
    }
}

/// Whether [`resize_shape`] does anything for this shape's kind.
pub fn supports_resize(shape: &Shape) -> bool {
    match shape {
        Shape::Circle(_)
        | Shape::Ellipse(_)
        | Shape::Rectangle(_)
        | Shape::Square(_)
        | Shape::Line(_) => true,
        Shape::Triangle(_) | Shape::Freehand(_) => false,
    }
}

/// Grow or shrink a shape by `delta`, never below `min_size`.
///
/// Returns false for kinds that have no resize policy (triangles and
/// freehand strokes), which are left untouched.
pub fn resize_shape(shape: &mut Shape, anchor: ResizeAnchor, delta: Vec2, min_size: f64) -> bool {
    match shape {
        Shape::Rectangle(r) => {
            let mut width = r.width;
            let mut height = r.height;
            if anchor.grows_width() {
                width += delta.x;
            }
            if anchor.grows_height() {
                height += delta.y;
            }
            r.width = width.max(min_size);
            r.height = height.max(min_size);
        }
        Shape::Square(s) => {
            s.side_length = (s.side_length + delta.x.max(delta.y)).max(min_size);
        }
        Shape::Circle(c) => {
            // dx is read as a radial delta
            c.radius = (c.radius + delta.x).max(min_size);
        }
        Shape::Ellipse(e) => {
            e.radius_x = (e.radius_x + delta.x).max(min_size);
            e.radius_y = (e.radius_y + delta.y).max(min_size);
        }
        Shape::Line(l) => {
            l.end += delta;
        }
        Shape::Triangle(_) | Shape::Freehand(_) => return false,
    }
    true
}

/// Set the stroke color.
pub fn recolor(shape: &mut Shape, color: &str) {
    shape.style_mut().stroke_color = color.to_string();
}

/// Set the fill color; `None` or the transparent sentinel clears it.
pub fn refill(shape: &mut Shape, color: Option<&str>) {
    shape.style_mut().fill_color = normalize_fill(color);
}
