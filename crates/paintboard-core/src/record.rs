//! Flat, self-describing shape records for export and import.
//!
//! One record carries the kind tag, identity, colors, the anchor and only the
//! geometry fields that kind uses. Field names are camelCase on the wire
//! (`fillColor`, `radiusX`, `sideLength`, ...).

use crate::error::DecodeError;
use crate::shapes::{
    Circle, DEFAULT_STROKE, Ellipse, Freehand, Line, Rectangle, Shape, ShapeId, ShapeKind,
    ShapeStyle, Square, Triangle,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A single point of a freehand record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for PointRecord {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<PointRecord> for Point {
    fn from(p: PointRecord) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Wire form of one shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, alias = "fillcolor")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y3: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<PointRecord>>,
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        let anchor = shape.anchor();
        let style = shape.style();
        let mut record = ShapeRecord {
            kind: shape.kind().as_str().to_string(),
            id: Some(shape.id().to_string()),
            x: Some(anchor.x),
            y: Some(anchor.y),
            color: Some(style.stroke_color.clone()),
            fill_color: Some(style.fill_or_transparent().to_string()),
            ..Default::default()
        };

        match shape {
            Shape::Circle(c) => record.radius = Some(c.radius),
            Shape::Ellipse(e) => {
                record.radius_x = Some(e.radius_x);
                record.radius_y = Some(e.radius_y);
            }
            Shape::Rectangle(r) => {
                record.width = Some(r.width);
                record.height = Some(r.height);
            }
            Shape::Square(s) => record.side_length = Some(s.side_length),
            Shape::Line(l) => {
                record.x2 = Some(l.end.x);
                record.y2 = Some(l.end.y);
            }
            Shape::Triangle(t) => {
                record.x2 = Some(t.p2.x);
                record.y2 = Some(t.p2.y);
                record.x3 = Some(t.p3.x);
                record.y3 = Some(t.p3.y);
            }
            Shape::Freehand(f) => {
                record.points = Some(f.points.iter().copied().map(PointRecord::from).collect());
            }
        }
        record
    }
}

impl ShapeRecord {
    /// Validate the record and build the shape it describes.
    ///
    /// A missing or blank id gets a fresh one. Coordinates must be finite
    /// and sizes non-negative.
    pub fn into_shape(self) -> Result<Shape, DecodeError> {
        let kind: ShapeKind = self
            .kind
            .parse()
            .map_err(|_| DecodeError::UnknownKind(self.kind.clone()))?;

        let id = match self.id.as_deref().map(str::trim) {
            None | Some("") => Uuid::new_v4(),
            Some(raw) => Uuid::parse_str(raw).map_err(|_| DecodeError::InvalidId(raw.to_string()))?,
        };

        let style = ShapeStyle::new(
            self.color.as_deref().unwrap_or(DEFAULT_STROKE),
            self.fill_color.as_deref(),
        );

        let shape: Shape = match kind {
            // Freehand ignores its anchor.
            ShapeKind::Freehand => {
                Freehand::reconstruct(id, decode_points(self.points)?, style).into()
            }
            ShapeKind::Circle => Circle::reconstruct(
                id,
                anchor(kind, self.x, self.y)?,
                size(kind, "radius", self.radius)?,
                style,
            )
            .into(),
            ShapeKind::Ellipse => Ellipse::reconstruct(
                id,
                anchor(kind, self.x, self.y)?,
                size(kind, "radiusX", self.radius_x)?,
                size(kind, "radiusY", self.radius_y)?,
                style,
            )
            .into(),
            ShapeKind::Rectangle => Rectangle::reconstruct(
                id,
                anchor(kind, self.x, self.y)?,
                size(kind, "width", self.width)?,
                size(kind, "height", self.height)?,
                style,
            )
            .into(),
            ShapeKind::Square => Square::reconstruct(
                id,
                anchor(kind, self.x, self.y)?,
                size(kind, "sideLength", self.side_length)?,
                style,
            )
            .into(),
            ShapeKind::Line => {
                let start = anchor(kind, self.x, self.y)?;
                let end = vertex(kind, ("x2", "y2"), self.x2, self.y2)?;
                Line::reconstruct(id, start, end, style).into()
            }
            ShapeKind::Triangle => {
                let p1 = anchor(kind, self.x, self.y)?;
                let p2 = vertex(kind, ("x2", "y2"), self.x2, self.y2)?;
                let p3 = vertex(kind, ("x3", "y3"), self.x3, self.y3)?;
                Triangle::reconstruct(id, p1, p2, p3, style).into()
            }
        };
        Ok(shape)
    }
}

/// Convert every record, failing on the first invalid one or on a repeated id.
pub fn decode_records(records: Vec<ShapeRecord>) -> Result<Vec<Shape>, DecodeError> {
    let mut seen: HashSet<ShapeId> = HashSet::with_capacity(records.len());
    let mut shapes = Vec::with_capacity(records.len());
    for record in records {
        let shape = record.into_shape()?;
        if !seen.insert(shape.id()) {
            return Err(DecodeError::DuplicateId(shape.id()));
        }
        shapes.push(shape);
    }
    Ok(shapes)
}

/// Records for a shape sequence, in order.
pub fn encode_records(shapes: &[Shape]) -> Vec<ShapeRecord> {
    shapes.iter().map(ShapeRecord::from).collect()
}

fn decode_points(points: Option<Vec<PointRecord>>) -> Result<Vec<Point>, DecodeError> {
    points
        .unwrap_or_default()
        .into_iter()
        .map(|p| {
            finite("points.x", p.x)?;
            finite("points.y", p.y)?;
            Ok(Point::from(p))
        })
        .collect()
}

fn anchor(kind: ShapeKind, x: Option<f64>, y: Option<f64>) -> Result<Point, DecodeError> {
    vertex(kind, ("x", "y"), x, y)
}

fn vertex(
    kind: ShapeKind,
    (x_field, y_field): (&'static str, &'static str),
    x: Option<f64>,
    y: Option<f64>,
) -> Result<Point, DecodeError> {
    Ok(Point::new(required(kind, x_field, x)?, required(kind, y_field, y)?))
}

fn finite(field: &str, value: f64) -> Result<f64, DecodeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DecodeError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn required(kind: ShapeKind, field: &'static str, value: Option<f64>) -> Result<f64, DecodeError> {
    let value = value.ok_or(DecodeError::MissingField { kind, field })?;
    finite(field, value)
}

fn size(kind: ShapeKind, field: &'static str, value: Option<f64>) -> Result<f64, DecodeError> {
    let value = required(kind, field, value)?;
    if value < 0.0 {
        return Err(DecodeError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value)
}
