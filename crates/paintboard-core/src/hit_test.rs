//! Point containment and proximity tests used for selection.
//!
//! Filled kinds (rectangle, square, circle, ellipse, triangle) hit anywhere
//! inside, bounds included. Lines and freehand strokes hit within a
//! tolerance of any segment. Degenerate geometry never hits.

use crate::config::DEFAULT_HIT_TOLERANCE;
use crate::shapes::{Shape, Triangle};
use kurbo::{Point, Rect, Vec2};

/// Hit-test with the default tolerance.
pub fn hit_test(shape: &Shape, point: Point) -> bool {
    hit_test_with_tolerance(shape, point, DEFAULT_HIT_TOLERANCE)
}

/// Check whether `point` hits `shape`. `tolerance` only applies to strokes.
pub fn hit_test_with_tolerance(shape: &Shape, point: Point, tolerance: f64) -> bool {
    match shape {
        Shape::Rectangle(r) => contains_inclusive(r.as_rect(), point),
        Shape::Square(s) => contains_inclusive(s.as_rect(), point),
        Shape::Circle(c) => {
            let d = point - c.center;
            d.hypot2() <= c.radius * c.radius
        }
        Shape::Ellipse(e) => {
            if e.radius_x <= 0.0 || e.radius_y <= 0.0 {
                return false;
            }
            let dx = (point.x - e.center.x) / e.radius_x;
            let dy = (point.y - e.center.y) / e.radius_y;
            dx * dx + dy * dy <= 1.0
        }
        Shape::Line(l) => segment_hit(point, l.start, l.end, tolerance),
        Shape::Triangle(t) => triangle_contains(t, point),
        Shape::Freehand(f) => polyline_hit(point, &f.points, tolerance),
    }
}

/// Find the topmost shape under `point`.
///
/// Shapes later in the slice are drawn on top and win.
pub fn find_topmost(shapes: &[Shape], point: Point, tolerance: f64) -> Option<&Shape> {
    shapes
        .iter()
        .rev()
        .find(|shape| hit_test_with_tolerance(shape, point, tolerance))
}

/// `kurbo::Rect::contains` excludes the far edges; selection includes them.
fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Distance from a point to the segment a→b, or `None` for a zero-length segment.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> Option<f64> {
    let seg: Vec2 = b - a;
    let len_sq = seg.hypot2();
    if len_sq == 0.0 {
        return None;
    }
    let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    let projection = a + seg * t;
    Some(point.distance(projection))
}

fn segment_hit(point: Point, a: Point, b: Point, tolerance: f64) -> bool {
    point_to_segment_dist(point, a, b).is_some_and(|dist| dist <= tolerance)
}

/// Strokes with fewer than two points have no segments and never hit.
fn polyline_hit(point: Point, points: &[Point], tolerance: f64) -> bool {
    points
        .windows(2)
        .any(|w| segment_hit(point, w[0], w[1], tolerance))
}

/// Barycentric containment, edges included.
fn triangle_contains(triangle: &Triangle, point: Point) -> bool {
    let Triangle { p1, p2, p3, .. } = *triangle;
    let denom = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
    if denom == 0.0 {
        return false;
    }
    let a = ((p2.y - p3.y) * (point.x - p3.x) + (p3.x - p2.x) * (point.y - p3.y)) / denom;
    let b = ((p3.y - p1.y) * (point.x - p3.x) + (p1.x - p3.x) * (point.y - p3.y)) / denom;
    let c = 1.0 - a - b;
    a >= 0.0 && b >= 0.0 && c >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Ellipse, Freehand, Line, Rectangle, Square};

    #[test]
    fn test_rectangle_inclusive_bounds() {
        let rect = Shape::from(Rectangle::new(Point::new(0.0, 0.0), 100.0, 50.0));
        assert!(hit_test(&rect, Point::new(50.0, 25.0)));
        assert!(hit_test(&rect, Point::new(0.0, 0.0)));
        assert!(hit_test(&rect, Point::new(100.0, 50.0)));
        assert!(!hit_test(&rect, Point::new(100.1, 50.0)));
        assert!(!hit_test(&rect, Point::new(-0.1, 10.0)));
    }

    #[test]
    fn test_square() {
        let sq = Shape::from(Square::new(Point::new(10.0, 10.0), 20.0));
        assert!(hit_test(&sq, Point::new(30.0, 30.0)));
        assert!(!hit_test(&sq, Point::new(31.0, 30.0)));
    }

    #[test]
    fn test_circle() {
        let circle = Shape::from(Circle::new(Point::new(0.0, 0.0), 10.0));
        assert!(hit_test(&circle, Point::new(0.0, 0.0)));
        assert!(hit_test(&circle, Point::new(10.0, 0.0)));
        assert!(hit_test(&circle, Point::new(6.0, 8.0)));
        assert!(!hit_test(&circle, Point::new(8.0, 8.0)));
    }

    #[test]
    fn test_ellipse() {
        let ellipse = Shape::from(Ellipse::new(Point::new(50.0, 50.0), 30.0, 10.0));
        assert!(hit_test(&ellipse, Point::new(50.0, 50.0)));
        assert!(hit_test(&ellipse, Point::new(80.0, 50.0)));
        assert!(!hit_test(&ellipse, Point::new(50.0, 61.0)));
        assert!(!hit_test(&ellipse, Point::new(75.0, 58.0)));
    }

    #[test]
    fn test_flat_ellipse_never_hits() {
        let ellipse = Shape::from(Ellipse::new(Point::new(0.0, 0.0), 10.0, 0.0));
        assert!(!hit_test(&ellipse, Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_line_tolerance() {
        let line = Shape::from(Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0)));
        assert!(hit_test(&line, Point::new(50.0, 0.0)));
        assert!(hit_test(&line, Point::new(50.0, 5.0)));
        assert!(!hit_test(&line, Point::new(50.0, 5.5)));
        // Projection is clamped to the segment ends.
        assert!(hit_test(&line, Point::new(103.0, 4.0)));
        assert!(!hit_test(&line, Point::new(106.0, 0.0)));
    }

    #[test]
    fn test_zero_length_line_never_hits() {
        let line = Shape::from(Line::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0)));
        assert!(!hit_test(&line, Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_triangle() {
        let tri = Shape::from(Triangle::new(
            Point::new(20.0, 0.0),
            Point::new(0.0, 30.0),
            Point::new(40.0, 30.0),
        ));
        assert!(hit_test(&tri, Point::new(20.0, 15.0)));
        assert!(hit_test(&tri, Point::new(20.0, 0.0)));
        assert!(hit_test(&tri, Point::new(0.0, 30.0)));
        assert!(!hit_test(&tri, Point::new(2.0, 2.0)));
        assert!(!hit_test(&tri, Point::new(20.0, 31.0)));
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Shape::from(Triangle::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 20.0),
        ));
        assert!(!hit_test(&tri, Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_freehand() {
        let stroke = Shape::from(Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ]));
        assert!(hit_test(&stroke, Point::new(50.0, 3.0)));
        assert!(hit_test(&stroke, Point::new(97.0, 50.0)));
        assert!(!hit_test(&stroke, Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_freehand_skips_repeated_points() {
        let stroke = Shape::from(Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        ]));
        assert!(hit_test(&stroke, Point::new(5.0, 1.0)));
    }

    #[test]
    fn test_short_freehand_never_hits() {
        let single = Shape::from(Freehand::from_points(vec![Point::new(1.0, 1.0)]));
        assert!(!hit_test(&single, Point::new(1.0, 1.0)));
        let empty = Shape::from(Freehand::new());
        assert!(!hit_test(&empty, Point::ZERO));
    }

    #[test]
    fn test_custom_tolerance() {
        let line = Shape::from(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        assert!(!hit_test_with_tolerance(&line, Point::new(5.0, 8.0), 5.0));
        assert!(hit_test_with_tolerance(&line, Point::new(5.0, 8.0), 10.0));
    }

    #[test]
    fn test_topmost_wins() {
        let circle = Shape::from(Circle::new(Point::new(50.0, 50.0), 30.0));
        let rect = Shape::from(Rectangle::from_corners(
            Point::new(40.0, 40.0),
            Point::new(60.0, 60.0),
        ));
        let rect_id = rect.id();
        let circle_id = circle.id();
        let shapes = vec![circle, rect];

        let hit = find_topmost(&shapes, Point::new(50.0, 50.0), DEFAULT_HIT_TOLERANCE);
        assert_eq!(hit.map(Shape::id), Some(rect_id));

        // Outside the rectangle only the circle remains.
        let hit = find_topmost(&shapes, Point::new(25.0, 50.0), DEFAULT_HIT_TOLERANCE);
        assert_eq!(hit.map(Shape::id), Some(circle_id));

        assert!(find_topmost(&shapes, Point::new(500.0, 500.0), DEFAULT_HIT_TOLERANCE).is_none());
    }

    #[test]
    fn test_segment_distance() {
        let d = point_to_segment_dist(Point::new(5.0, 3.0), Point::ZERO, Point::new(10.0, 0.0));
        assert_eq!(d, Some(3.0));
        assert_eq!(point_to_segment_dist(Point::ZERO, Point::ZERO, Point::ZERO), None);
    }
}
