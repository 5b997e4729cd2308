//! The drawing document and its editing operations.

use crate::codec::ExportFormat;
use crate::config::DocumentConfig;
use crate::error::{PaintError, PaintResult};
use crate::factory::{Gesture, create_shape_by_tag};
use crate::hit_test::find_topmost;
use crate::history::History;
use crate::manipulate::{ResizeAnchor, move_shape, recolor, refill, resize_shape, supports_resize};
use crate::record::{ShapeRecord, decode_records, encode_records};
use crate::shapes::{Shape, ShapeId, ShapeStyle};
use kurbo::{Point, Vec2};

/// Inputs for [`Document::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreateParams {
    pub gesture: Gesture,
    /// Falls back to the document's default stroke.
    pub stroke_color: Option<String>,
    /// `None` or "transparent" means no fill.
    pub fill_color: Option<String>,
}

impl CreateParams {
    pub fn new(gesture: Gesture) -> Self {
        Self {
            gesture,
            stroke_color: None,
            fill_color: None,
        }
    }

    pub fn with_stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(color.into());
        self
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }
}

/// An ordered shape sequence with selection, clipboard and history.
///
/// Later shapes are drawn on top. Every forward edit records one undo step;
/// queries and selection never do. Operations that need a selection are
/// no-ops when nothing live is selected.
#[derive(Debug, Clone)]
pub struct Document {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
    /// Copied shape, by reference.
    clipboard: Option<ShapeId>,
    history: History,
    config: DocumentConfig,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with default settings.
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        Self {
            shapes: Vec::new(),
            selected: None,
            clipboard: None,
            history: History::with_limit(config.history_limit),
            config,
        }
    }

    /// Drop all shapes, history, selection, clipboard and drag state.
    pub fn reset(&mut self) {
        self.shapes.clear();
        self.selected = None;
        self.clipboard = None;
        self.history.clear();
        log::debug!("document reset");
    }

    // --- Queries ---

    /// Shapes in z-order, bottom first.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shape(id))
    }

    pub fn clipboard_id(&self) -> Option<ShapeId> {
        self.clipboard
    }

    pub fn is_dragging(&self) -> bool {
        self.history.is_dragging()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // --- Creation ---

    /// Build a shape of kind `kind` from a gesture and append it.
    ///
    /// Fails without touching the document on an unknown kind or a gesture
    /// the kind cannot be built from.
    pub fn create(&mut self, kind: &str, params: CreateParams) -> PaintResult<ShapeId> {
        let stroke = params
            .stroke_color
            .unwrap_or_else(|| self.config.default_stroke.clone());
        let style = ShapeStyle::new(stroke, params.fill_color.as_deref());
        let shape = create_shape_by_tag(kind, &params.gesture, style)?;
        Ok(self.add_shape(shape))
    }

    /// Append an already built shape. A clashing id is replaced.
    pub fn add_shape(&mut self, mut shape: Shape) -> ShapeId {
        if self.shape(shape.id()).is_some() {
            shape.regenerate_id();
        }
        self.begin_edit();
        let id = shape.id();
        log::debug!("add {} {}", shape.kind(), id);
        self.shapes.push(shape);
        id
    }

    // --- History ---

    /// Step back one edit. An open drag is committed first.
    pub fn undo(&mut self) -> bool {
        self.commit_drag();
        let undone = self.history.undo(&mut self.shapes);
        if undone {
            self.prune_selection();
        }
        undone
    }

    /// Reapply the last undone edit. An open drag is committed first.
    pub fn redo(&mut self) -> bool {
        self.commit_drag();
        let redone = self.history.redo(&mut self.shapes);
        if redone {
            self.prune_selection();
        }
        redone
    }

    // --- Selection ---

    /// Select the topmost shape under `point`, or clear the selection.
    pub fn select_at(&mut self, point: Point) -> Option<ShapeId> {
        self.selected = find_topmost(&self.shapes, point, self.config.hit_tolerance).map(Shape::id);
        self.selected
    }

    // --- Dragging ---

    /// Open a drag, holding one snapshot until [`Document::end_move`].
    ///
    /// Returns false if a drag is already open.
    pub fn start_move(&mut self) -> bool {
        self.history.start_move(&self.shapes)
    }

    /// Translate the selected shape during a drag.
    ///
    /// Outside a drag this is rejected and nothing moves. A delta that would
    /// leave a non-finite coordinate is rejected the same way. Returns
    /// whether a shape was moved.
    pub fn move_selected(&mut self, delta: Vec2) -> PaintResult<bool> {
        if !self.history.is_dragging() {
            log::warn!("move of ({}, {}) received outside a drag; ignored", delta.x, delta.y);
            return Err(PaintError::NotDragging);
        }
        let Some(index) = self.selected_index() else {
            return Ok(false);
        };
        let mut moved = self.shapes[index].clone();
        move_shape(&mut moved, delta);
        if !moved.is_finite() {
            log::warn!("move of ({}, {}) leaves non-finite geometry; ignored", delta.x, delta.y);
            return Err(PaintError::NonFiniteGeometry);
        }
        self.shapes[index] = moved;
        Ok(true)
    }

    /// Close the drag, recording it as one undo step.
    pub fn end_move(&mut self) -> bool {
        let committed = self.history.end_move();
        if committed {
            log::debug!("drag committed");
        }
        committed
    }

    // --- Editing the selection ---

    /// Resize the selected shape.
    ///
    /// Kinds without a resize policy, non-finite deltas and resizes that
    /// would overflow are left alone and record nothing.
    pub fn resize(&mut self, anchor: ResizeAnchor, delta: Vec2) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        if !delta.is_finite() || !supports_resize(&self.shapes[index]) {
            return false;
        }
        let mut resized = self.shapes[index].clone();
        if !resize_shape(&mut resized, anchor, delta, self.config.min_size) {
            return false;
        }
        if !resized.is_finite() {
            log::warn!("resize by ({}, {}) leaves non-finite geometry; ignored", delta.x, delta.y);
            return false;
        }
        self.begin_edit();
        log::debug!(
            "resize {} {} by ({}, {})",
            resized.kind(),
            resized.id(),
            delta.x,
            delta.y
        );
        self.shapes[index] = resized;
        true
    }

    pub fn set_stroke_color(&mut self, color: &str) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.begin_edit();
        recolor(&mut self.shapes[index], color);
        true
    }

    pub fn set_fill_color(&mut self, color: Option<&str>) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.begin_edit();
        refill(&mut self.shapes[index], color);
        true
    }

    /// Remember the selected shape for a later paste.
    pub fn copy(&mut self) -> bool {
        let Some(id) = self.selected_shape().map(Shape::id) else {
            return false;
        };
        self.clipboard = Some(id);
        true
    }

    /// Paste a copy of the clipboard shape and select it.
    ///
    /// The copy is moved so its reference point lands on `target`; a target
    /// of `(0, 0)` offsets it by the configured paste offset instead. Does
    /// nothing if the copied shape is no longer in the document, or if the
    /// copy would land at a non-finite position.
    pub fn paste(&mut self, target: Point) -> Option<ShapeId> {
        let mut copy = self.clipboard.and_then(|id| self.shape(id))?.duplicate();
        let delta = if target == Point::ZERO {
            Vec2::new(self.config.paste_offset, self.config.paste_offset)
        } else {
            target - copy.reference_point()
        };
        move_shape(&mut copy, delta);
        if !copy.is_finite() {
            log::warn!("paste at ({}, {}) leaves non-finite geometry; ignored", target.x, target.y);
            return None;
        }

        self.begin_edit();
        let id = copy.id();
        log::debug!("paste {} {}", copy.kind(), id);
        self.shapes.push(copy);
        self.selected = Some(id);
        Some(id)
    }

    /// Remove the selected shape.
    pub fn delete(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.begin_edit();
        let removed = self.shapes.remove(index);
        log::debug!("delete {} {}", removed.kind(), removed.id());
        self.selected = None;
        true
    }

    /// Remove every shape. Always records an undo step.
    pub fn clear(&mut self) {
        self.begin_edit();
        log::debug!("clear {} shapes", self.shapes.len());
        self.shapes.clear();
        self.selected = None;
    }

    // --- Transfer ---

    pub fn export_records(&self) -> Vec<ShapeRecord> {
        encode_records(&self.shapes)
    }

    /// Replace the shape sequence with decoded records as one undo step.
    ///
    /// Every record is validated first; on error the document is unchanged.
    pub fn import_records(&mut self, records: Vec<ShapeRecord>) -> PaintResult<()> {
        let shapes = decode_records(records)?;
        self.begin_edit();
        log::info!("imported {} shapes", shapes.len());
        self.shapes = shapes;
        self.prune_selection();
        Ok(())
    }

    pub fn export(&self, format: ExportFormat) -> PaintResult<String> {
        let encoded = format.encode(&self.export_records())?;
        log::info!("exported {} shapes as {}", self.shapes.len(), format);
        Ok(encoded)
    }

    pub fn import(&mut self, format: ExportFormat, input: &str) -> PaintResult<()> {
        let records = format.decode(input)?;
        self.import_records(records)
    }

    // --- Internals ---

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Snapshot before a forward edit, closing any open drag first so the
    /// drag and the edit stay separate undo steps.
    fn begin_edit(&mut self) {
        self.commit_drag();
        self.history.snapshot_for_undo(&self.shapes);
    }

    fn commit_drag(&mut self) {
        if self.history.end_move() {
            log::debug!("open drag committed before edit");
        }
    }

    fn prune_selection(&mut self) {
        if self.selected.is_some() && self.selected_index().is_none() {
            self.selected = None;
        }
    }
}
