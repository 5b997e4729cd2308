//! Paintboard Core Library
//!
//! Document, geometry and history engine for the Paintboard drawing server.

pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod factory;
pub mod hit_test;
pub mod history;
pub mod manipulate;
pub mod record;
pub mod shapes;
pub mod storage;

pub use codec::ExportFormat;
pub use config::DocumentConfig;
pub use document::{CreateParams, Document};
pub use error::{DecodeError, PaintError, PaintResult};
pub use factory::{Gesture, create_shape, create_shape_by_tag};
pub use hit_test::{find_topmost, hit_test};
pub use history::{History, Snapshot};
pub use manipulate::ResizeAnchor;
pub use record::{PointRecord, ShapeRecord};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeStyle};
pub use storage::{export_to_path, import_from_path};
