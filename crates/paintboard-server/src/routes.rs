//! HTTP surface over the shared document.
//!
//! Every editing endpoint answers with the full shape list after the edit.

use crate::config::{CorsOrigin, ServerConfig};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use kurbo::{Point, Vec2};
use paintboard_core::{
    CreateParams, ExportFormat, Gesture, PointRecord, ResizeAnchor, ShapeKind, ShapeRecord,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

type ShapesResult = Result<Json<Vec<ShapeRecord>>, ApiError>;

/// Build the application router.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origin))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shapes", get(list_shapes))
        .route("/create", post(create))
        .route("/undo", post(undo))
        .route("/redo", post(redo))
        .route("/select", post(select))
        .route("/move/start", post(start_move))
        .route("/move", post(move_selected))
        .route("/move/end", post(end_move))
        .route("/resize", post(resize))
        .route("/color", post(set_color))
        .route("/fill", post(set_fill))
        .route("/copy", post(copy))
        .route("/paste", post(paste))
        .route("/delete", post(delete))
        .route("/clear", post(clear))
        .route("/save/json", get(save_json))
        .route("/save/xml", get(save_xml))
        .route("/load", post(load))
}

fn cors_layer(origin: &CorsOrigin) -> CorsLayer {
    match origin {
        CorsOrigin::Any => CorsLayer::permissive(),
        CorsOrigin::Exact(value) => CorsLayer::new()
            .allow_origin(value.clone())
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

// --- Request bodies ---

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: CreateBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub x1: Option<f64>,
    pub y1: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub color: Option<String>,
    pub fill_color: Option<String>,
    pub points: Option<Vec<PointRecord>>,
}

impl CreateBody {
    fn into_params(self, kind: ShapeKind) -> Result<CreateParams, ApiError> {
        let gesture = match (kind, self.points) {
            (ShapeKind::Freehand, points) => {
                Gesture::Stroke(points.unwrap_or_default().into_iter().map(Point::from).collect())
            }
            (_, Some(points)) => Gesture::Stroke(points.into_iter().map(Point::from).collect()),
            (_, None) => {
                let coord = |value: Option<f64>, name: &str| {
                    value.ok_or_else(|| ApiError::BadRequest(format!("missing `{name}`")))
                };
                Gesture::drag(
                    (coord(self.x1, "x1")?, coord(self.y1, "y1")?),
                    (coord(self.x2, "x2")?, coord(self.y2, "y2")?),
                )
            }
        };
        Ok(CreateParams {
            gesture,
            stroke_color: self.color,
            fill_color: self.fill_color,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PointBody {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct DeltaBody {
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Deserialize)]
pub struct ResizeBody {
    #[serde(default)]
    pub anchor: Option<String>,
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Deserialize)]
pub struct ColorBody {
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct FillBody {
    #[serde(rename = "fillColor", default)]
    pub fill_color: Option<String>,
}

// --- Handlers ---

async fn health() -> &'static str {
    "ok"
}

async fn shapes_of(state: &AppState) -> Json<Vec<ShapeRecord>> {
    Json(state.document.lock().await.export_records())
}

pub async fn list_shapes(State(state): State<AppState>) -> Json<Vec<ShapeRecord>> {
    shapes_of(&state).await
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateRequest>,
) -> ShapesResult {
    let kind: ShapeKind = body.kind.parse()?;
    let params = body.params.into_params(kind)?;
    let mut doc = state.document.lock().await;
    doc.create(kind.as_str(), params)?;
    Ok(Json(doc.export_records()))
}

pub async fn undo(State(state): State<AppState>) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.undo();
    Json(doc.export_records())
}

pub async fn redo(State(state): State<AppState>) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.redo();
    Json(doc.export_records())
}

/// Select the topmost shape under the point. Answers with the selection.
pub async fn select(
    State(state): State<AppState>,
    Json(body): Json<PointBody>,
) -> Json<Option<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.select_at(Point::new(body.x, body.y));
    Json(doc.selected_shape().map(ShapeRecord::from))
}

pub async fn start_move(State(state): State<AppState>) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.start_move();
    Json(doc.export_records())
}

pub async fn move_selected(
    State(state): State<AppState>,
    Json(body): Json<DeltaBody>,
) -> ShapesResult {
    let mut doc = state.document.lock().await;
    doc.move_selected(Vec2::new(body.dx, body.dy))?;
    Ok(Json(doc.export_records()))
}

pub async fn end_move(State(state): State<AppState>) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.end_move();
    Json(doc.export_records())
}

pub async fn resize(
    State(state): State<AppState>,
    Json(body): Json<ResizeBody>,
) -> Json<Vec<ShapeRecord>> {
    let anchor = body
        .anchor
        .and_then(|name| name.parse().ok())
        .unwrap_or(ResizeAnchor::Default);
    let mut doc = state.document.lock().await;
    doc.resize(anchor, Vec2::new(body.dx, body.dy));
    Json(doc.export_records())
}

pub async fn set_color(
    State(state): State<AppState>,
    Json(body): Json<ColorBody>,
) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.set_stroke_color(&body.color);
    Json(doc.export_records())
}

pub async fn set_fill(
    State(state): State<AppState>,
    Json(body): Json<FillBody>,
) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.set_fill_color(body.fill_color.as_deref());
    Json(doc.export_records())
}

pub async fn copy(State(state): State<AppState>) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.copy();
    Json(doc.export_records())
}

/// Paste at the given point. A missing body pastes at the default offset.
pub async fn paste(
    State(state): State<AppState>,
    body: Option<Json<PointBody>>,
) -> Json<Vec<ShapeRecord>> {
    let target = body.map_or(Point::ZERO, |Json(p)| Point::new(p.x, p.y));
    let mut doc = state.document.lock().await;
    doc.paste(target);
    Json(doc.export_records())
}

pub async fn delete(State(state): State<AppState>) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.delete();
    Json(doc.export_records())
}

pub async fn clear(State(state): State<AppState>) -> Json<Vec<ShapeRecord>> {
    let mut doc = state.document.lock().await;
    doc.clear();
    Json(doc.export_records())
}

pub async fn save_json(State(state): State<AppState>) -> Result<Response, ApiError> {
    save(&state, ExportFormat::Json).await
}

pub async fn save_xml(State(state): State<AppState>) -> Result<Response, ApiError> {
    save(&state, ExportFormat::Xml).await
}

async fn save(state: &AppState, format: ExportFormat) -> Result<Response, ApiError> {
    let body = state.document.lock().await.export(format)?;
    let disposition = format!("attachment; filename=\"{}\"", format.file_name());
    Ok((
        [
            (CONTENT_TYPE, format.mime_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Replace the document with an uploaded `file` field.
pub async fn load(State(state): State<AppState>, mut multipart: Multipart) -> ShapesResult {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        return load_upload(&state, &file_name, &bytes).await;
    }
    Err(ApiError::BadRequest("missing `file` field".to_string()))
}

async fn load_upload(state: &AppState, file_name: &str, bytes: &[u8]) -> ShapesResult {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ApiError::BadRequest(format!("upload is not UTF-8: {e}")))?;
    let format = ExportFormat::from_file_name(file_name);
    let mut doc = state.document.lock().await;
    doc.import(format, text)?;
    tracing::info!("Loaded {} shapes from {:?}", doc.len(), file_name);
    Ok(Json(doc.export_records()))
}
