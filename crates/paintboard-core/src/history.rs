//! Linear undo/redo over whole-document snapshots.

use crate::shapes::Shape;

/// An independently owned copy of the shape sequence at one instant.
///
/// `History` only ever deals in snapshots, so the copy strategy can change
/// without touching the stack logic.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    shapes: Vec<Shape>,
}

impl Snapshot {
    /// Deep-copy the live sequence. Ids are kept.
    pub fn capture(shapes: &[Shape]) -> Self {
        Self {
            shapes: shapes.to_vec(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Undo and redo stacks plus the snapshot held open by an active drag.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Taken at drag start, pushed once at drag end.
    pending_move: Option<Snapshot>,
    /// Maximum undo depth.
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` undo entries.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record the state before a forward edit and drop the redo branch.
    pub fn snapshot_for_undo(&mut self, live: &[Shape]) {
        self.push_undo(Snapshot::capture(live));
        self.redo_stack.clear();
        log::debug!(
            "history: snapshot of {} shapes (undo depth {})",
            live.len(),
            self.undo_stack.len()
        );
    }

    /// Restore the previous state. Returns false when there is nothing to undo.
    pub fn undo(&mut self, live: &mut Vec<Shape>) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(Snapshot::capture(live));
        *live = snapshot.into_shapes();
        self.log_depths("undo");
        true
    }

    /// Reapply the last undone state. Returns false when there is nothing to redo.
    pub fn redo(&mut self, live: &mut Vec<Shape>) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.push_undo(Snapshot::capture(live));
        *live = snapshot.into_shapes();
        self.log_depths("redo");
        true
    }

    fn log_depths(&self, step: &str) {
        log::debug!(
            "history: {} (undo depth {}, redo depth {})",
            step,
            self.undo_stack.len(),
            self.redo_stack.len()
        );
    }

    /// Open a drag. Returns false if one is already open, keeping its snapshot.
    pub fn start_move(&mut self, live: &[Shape]) -> bool {
        if self.pending_move.is_some() {
            return false;
        }
        self.pending_move = Some(Snapshot::capture(live));
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.pending_move.is_some()
    }

    /// Close the drag, recording its start state as one undo entry.
    ///
    /// Returns false when no drag was open.
    pub fn end_move(&mut self) -> bool {
        let Some(snapshot) = self.pending_move.take() else {
            return false;
        };
        self.push_undo(snapshot);
        self.redo_stack.clear();
        log::debug!("history: drag committed (undo depth {})", self.undo_stack.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop every entry and any open drag.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending_move = None;
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if let Some(limit) = self.limit {
            let excess = self.undo_stack.len().saturating_sub(limit);
            self.undo_stack.drain(..excess);
        }
    }
}
