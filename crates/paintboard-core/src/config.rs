//! Tunable document parameters.

use crate::shapes::DEFAULT_STROKE;
use serde::{Deserialize, Serialize};

/// Proximity tolerance for line and freehand hit-testing.
pub const DEFAULT_HIT_TOLERANCE: f64 = 5.0;

/// Smallest size a resize may shrink a dimension to.
pub const DEFAULT_MIN_SIZE: f64 = 5.0;

/// Offset applied to a paste that names no target point.
pub const DEFAULT_PASTE_OFFSET: f64 = 20.0;

/// Parameters for a [`crate::Document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Line/freehand hit distance.
    pub hit_tolerance: f64,
    /// Resize floor for widths, heights, sides and radii.
    pub min_size: f64,
    /// Default paste offset along both axes.
    pub paste_offset: f64,
    /// Stroke color for shapes created without one.
    pub default_stroke: String,
    /// Maximum undo depth. `None` keeps every entry.
    pub history_limit: Option<usize>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            min_size: DEFAULT_MIN_SIZE,
            paste_offset: DEFAULT_PASTE_OFFSET,
            default_stroke: DEFAULT_STROKE.to_string(),
            history_limit: None,
        }
    }
}

impl DocumentConfig {
    /// Cap the undo stack.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}
