use paintboard_core::Document;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state handed to every handler.
///
/// All requests go through the one document lock, so edits are applied
/// one at a time in arrival order.
#[derive(Clone)]
pub struct AppState {
    pub document: Arc<Mutex<Document>>,
}

impl AppState {
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
        }
    }
}
