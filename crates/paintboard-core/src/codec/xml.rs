//! XML encoding of a record sequence.
//!
//! Written as `<shapes>` holding one `<shape>` per record, each field a child
//! element. Freehand points nest as `<points><point><x/><y/></point></points>`.
//! The reader goes by position rather than by name: any root, record or point
//! element name is accepted, so list wrappers such as `<ArrayList><item>`
//! load too.
//!
//! Text content is kept verbatim. An empty `<color/>` is an empty string,
//! distinct from an absent element; only numbers are trimmed.

use crate::error::{DecodeError, PaintError, PaintResult};
use crate::record::{PointRecord, ShapeRecord};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

const ROOT: &str = "shapes";
const RECORD: &str = "shape";
const POINTS: &str = "points";
const POINT: &str = "point";

pub(super) fn to_string(records: &[ShapeRecord]) -> PaintResult<String> {
    let mut writer = RecordWriter::new(Vec::new());
    writer.write(records)?;
    String::from_utf8(writer.into_inner()).map_err(|e| PaintError::Encode(e.to_string()))
}

pub(super) fn from_str(input: &str) -> Result<Vec<ShapeRecord>, DecodeError> {
    RecordParser::new(input).parse()
}

struct RecordWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
        }
    }

    fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write(&mut self, records: &[ShapeRecord]) -> PaintResult<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.start(ROOT)?;
        for record in records {
            self.write_record(record)?;
        }
        self.end(ROOT)
    }

    fn write_record(&mut self, record: &ShapeRecord) -> PaintResult<()> {
        self.start(RECORD)?;
        self.text_element("type", &record.kind)?;
        if let Some(id) = &record.id {
            self.text_element("id", id)?;
        }
        self.number_element("x", record.x)?;
        self.number_element("y", record.y)?;
        if let Some(color) = &record.color {
            self.text_element("color", color)?;
        }
        if let Some(fill) = &record.fill_color {
            self.text_element("fillColor", fill)?;
        }
        self.number_element("radius", record.radius)?;
        self.number_element("radiusX", record.radius_x)?;
        self.number_element("radiusY", record.radius_y)?;
        self.number_element("width", record.width)?;
        self.number_element("height", record.height)?;
        self.number_element("sideLength", record.side_length)?;
        self.number_element("x2", record.x2)?;
        self.number_element("y2", record.y2)?;
        self.number_element("x3", record.x3)?;
        self.number_element("y3", record.y3)?;
        if let Some(points) = &record.points {
            self.start(POINTS)?;
            for point in points {
                self.start(POINT)?;
                self.text_element("x", &point.x.to_string())?;
                self.text_element("y", &point.y.to_string())?;
                self.end(POINT)?;
            }
            self.end(POINTS)?;
        }
        self.end(RECORD)
    }

    fn number_element(&mut self, name: &str, value: Option<f64>) -> PaintResult<()> {
        match value {
            Some(value) => self.text_element(name, &value.to_string()),
            None => Ok(()),
        }
    }

    fn text_element(&mut self, name: &str, text: &str) -> PaintResult<()> {
        self.start(name)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn start(&mut self, name: &str) -> PaintResult<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> PaintResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn event(&mut self, event: Event<'_>) -> PaintResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| PaintError::Encode(e.to_string()))
    }
}

/// Element content as seen by the parser.
enum Node {
    Open(String),
    Empty(String),
}

struct RecordParser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> RecordParser<'a> {
    fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }

    fn parse(&mut self) -> Result<Vec<ShapeRecord>, DecodeError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(_)) => return self.parse_records(),
                Ok(Event::Empty(_)) => return Ok(Vec::new()),
                Ok(Event::Eof) => return Err(DecodeError::Xml("missing root element".to_string())),
                Err(e) => return Err(DecodeError::Xml(e.to_string())),
                _ => {}
            }
        }
    }

    fn parse_records(&mut self) -> Result<Vec<ShapeRecord>, DecodeError> {
        let mut records = Vec::new();
        while let Some(node) = self.next_child()? {
            match node {
                Node::Open(_) => records.push(self.parse_record()?),
                Node::Empty(_) => records.push(ShapeRecord::default()),
            }
        }
        Ok(records)
    }

    fn parse_record(&mut self) -> Result<ShapeRecord, DecodeError> {
        let mut record = ShapeRecord::default();
        while let Some(node) = self.next_child()? {
            match node {
                Node::Open(name) if name.eq_ignore_ascii_case(POINTS) => {
                    record.points = Some(self.parse_points()?);
                }
                Node::Open(name) => {
                    let text = self.read_text()?;
                    assign_field(&mut record, &name, text)?;
                }
                Node::Empty(name) if name.eq_ignore_ascii_case(POINTS) => {
                    record.points = Some(Vec::new());
                }
                Node::Empty(name) => assign_field(&mut record, &name, String::new())?,
            }
        }
        Ok(record)
    }

    fn parse_points(&mut self) -> Result<Vec<PointRecord>, DecodeError> {
        let mut points = Vec::new();
        while let Some(node) = self.next_child()? {
            let (mut x, mut y) = (None, None);
            if let Node::Open(_) = node {
                while let Some(coord) = self.next_child()? {
                    let (name, text) = match coord {
                        Node::Open(name) => {
                            let text = self.read_text()?;
                            (name, text)
                        }
                        Node::Empty(name) => (name, String::new()),
                    };
                    match name.as_str() {
                        "x" => x = parse_number("points.x", &text)?,
                        "y" => y = parse_number("points.y", &text)?,
                        _ => {}
                    }
                }
            }
            let missing = |field: &str| DecodeError::InvalidValue {
                field: field.to_string(),
                value: "missing".to_string(),
            };
            points.push(PointRecord {
                x: x.ok_or_else(|| missing("points.x"))?,
                y: y.ok_or_else(|| missing("points.y"))?,
            });
        }
        Ok(points)
    }

    /// Advance to the next child element of the current one.
    ///
    /// Returns `None` once the current element closes.
    fn next_child(&mut self) -> Result<Option<Node>, DecodeError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    return Ok(Some(Node::Open(local_name(e.local_name().as_ref()))));
                }
                Ok(Event::Empty(ref e)) => {
                    return Ok(Some(Node::Empty(local_name(e.local_name().as_ref()))));
                }
                Ok(Event::End(_)) => return Ok(None),
                Ok(Event::Eof) => {
                    return Err(DecodeError::Xml("unexpected end of document".to_string()));
                }
                Err(e) => return Err(DecodeError::Xml(e.to_string())),
                _ => {}
            }
        }
    }

    /// Collect the text of the element just opened, through its end tag.
    ///
    /// Text inside nested elements is skipped.
    fn read_text(&mut self) -> Result<String, DecodeError> {
        let mut text = String::new();
        let mut nested = 0usize;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_event_into(&mut buf) {
                Ok(Event::Text(ref e)) if nested == 0 => {
                    let unescaped = e.unescape().map_err(|e| DecodeError::Xml(e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Ok(Event::CData(ref e)) if nested == 0 => {
                    text.push_str(&String::from_utf8_lossy(e));
                }
                Ok(Event::Start(_)) => nested += 1,
                Ok(Event::End(_)) => {
                    if nested == 0 {
                        return Ok(text);
                    }
                    nested -= 1;
                }
                Ok(Event::Eof) => {
                    return Err(DecodeError::Xml("unexpected end of document".to_string()));
                }
                Err(e) => return Err(DecodeError::Xml(e.to_string())),
                _ => {}
            }
        }
    }
}

fn local_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

fn assign_field(record: &mut ShapeRecord, name: &str, text: String) -> Result<(), DecodeError> {
    match name.to_ascii_lowercase().as_str() {
        "type" => record.kind = text.trim().to_string(),
        "id" => record.id = Some(text),
        "color" => record.color = Some(text),
        "fillcolor" => record.fill_color = Some(text),
        "x" => record.x = parse_number("x", &text)?,
        "y" => record.y = parse_number("y", &text)?,
        "radius" => record.radius = parse_number("radius", &text)?,
        "radiusx" => record.radius_x = parse_number("radiusX", &text)?,
        "radiusy" => record.radius_y = parse_number("radiusY", &text)?,
        "width" => record.width = parse_number("width", &text)?,
        "height" => record.height = parse_number("height", &text)?,
        "sidelength" => record.side_length = parse_number("sideLength", &text)?,
        "x2" => record.x2 = parse_number("x2", &text)?,
        "y2" => record.y2 = parse_number("y2", &text)?,
        "x3" => record.x3 = parse_number("x3", &text)?,
        "y3" => record.y3 = parse_number("y3", &text)?,
        _ => {}
    }
    Ok(())
}

/// Blank text reads as an absent value.
fn parse_number(field: &str, text: &str) -> Result<Option<f64>, DecodeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| DecodeError::InvalidValue {
            field: field.to_string(),
            value: trimmed.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_record() -> ShapeRecord {
        ShapeRecord {
            kind: "circle".to_string(),
            id: Some("2f1d3c1e-8a1b-4c55-9d7e-0b7d7b0e1a11".to_string()),
            x: Some(10.5),
            y: Some(-3.0),
            color: Some("#ff0000".to_string()),
            fill_color: Some("transparent".to_string()),
            radius: Some(4.25),
            ..Default::default()
        }
    }

    #[test]
    fn test_layout() {
        let xml = to_string(&[circle_record()]).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<shapes>"));
        assert!(xml.contains("<type>circle</type>"));
        assert!(xml.contains("<radius>4.25</radius>"));
        assert!(xml.contains("<fillColor>transparent</fillColor>"));
        assert!(!xml.contains("<width>"));
    }

    #[test]
    fn test_reads_back_written_records() {
        let stroke = ShapeRecord {
            kind: "freehand".to_string(),
            x: Some(0.0),
            y: Some(0.0),
            color: Some("<&>".to_string()),
            fill_color: Some("transparent".to_string()),
            points: Some(vec![PointRecord { x: 1.0, y: 2.0 }, PointRecord { x: 0.1, y: -7.5 }]),
            ..Default::default()
        };
        let records = vec![circle_record(), stroke];
        let xml = to_string(&records).unwrap();
        assert_eq!(from_str(&xml).unwrap(), records);
    }

    #[test]
    fn test_color_text_kept_verbatim() {
        let records = vec![
            ShapeRecord {
                color: Some(" red ".to_string()),
                ..circle_record()
            },
            ShapeRecord {
                id: Some("9c1d4f4a-07a2-4d0e-8f43-3a1b2c3d4e5f".to_string()),
                color: Some(String::new()),
                fill_color: Some("  ".to_string()),
                ..circle_record()
            },
        ];
        let xml = to_string(&records).unwrap();
        assert!(xml.contains("<color> red </color>"));
        assert_eq!(from_str(&xml).unwrap(), records);
    }

    #[test]
    fn test_empty_text_differs_from_absent() {
        let xml = "<shapes><shape><type>circle</type><color/></shape>\
                   <shape><type> circle </type><x> 4 </x></shape></shapes>";
        let records = from_str(xml).unwrap();
        assert_eq!(records[0].color.as_deref(), Some(""));
        assert_eq!(records[1].color, None);
        assert_eq!(records[1].kind, "circle");
        assert_eq!(records[1].x, Some(4.0));
    }

    #[test]
    fn test_reads_list_wrapper_layout() {
        let xml = r#"
            <ArrayList>
              <item>
                <type>rectangle</type>
                <x>1</x><y>2</y>
                <color>blue</color>
                <fillColor/>
                <width>3</width><height>4</height>
              </item>
              <item>
                <type>freehand</type>
                <points>
                  <points><x>5</x><y>6</y></points>
                  <points><x>7</x><y>8</y></points>
                </points>
              </item>
            </ArrayList>"#;
        let records = from_str(xml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, "rectangle");
        assert_eq!(records[0].fill_color.as_deref(), Some(""));
        assert_eq!(records[0].height, Some(4.0));
        assert_eq!(
            records[1].points,
            Some(vec![PointRecord { x: 5.0, y: 6.0 }, PointRecord { x: 7.0, y: 8.0 }])
        );
    }

    #[test]
    fn test_empty_root() {
        assert!(from_str("<shapes/>").unwrap().is_empty());
        assert!(from_str("<shapes></shapes>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(from_str(""), Err(DecodeError::Xml(_))));
        assert!(matches!(from_str("<shapes><shape></shapes>"), Err(DecodeError::Xml(_))));
        assert!(matches!(from_str("<shapes><shape>"), Err(DecodeError::Xml(_))));
        assert!(matches!(
            from_str("<shapes><shape><x>abc</x></shape></shapes>"),
            Err(DecodeError::InvalidValue { .. })
        ));
    }
}
