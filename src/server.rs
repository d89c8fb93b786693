//! HTTP surface for swatch extraction
//!
//! Exposes named and all-swatch extraction for an image given by `url` or
//! by `path` (relative to the configured file root).

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::builder::PaletteBuilder;
use crate::config::Config;
use crate::error::{AppError, ErrorBody, SourceError};
use crate::source::{ImageLoader, ImageSource, PixelSource};
use crate::swatch::{NamedSwatchesRecord, SwatchRecord};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PixelSource>,
    pub builder: PaletteBuilder,
    pub file_root: Option<Arc<PathBuf>>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Swatch API",
        description = "Dominant color swatches extracted from images",
        version = "0.1.0"
    ),
    tags(
        (name = "Swatches", description = "Swatch extraction endpoints")
    ),
    paths(health, get_named_swatches, get_all_swatches),
    components(schemas(SwatchRecord, NamedSwatchesRecord, ErrorBody))
)]
struct ApiDoc;

/// Image source query: exactly one of `url` or `path`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SourceQuery {
    /// Remote image URL (http or https)
    pub url: Option<String>,
    /// Image path relative to the server's file root
    pub path: Option<String>,
}

/// Create application state from configuration
pub fn create_app_state(config: &Config) -> Result<AppState, reqwest::Error> {
    let client = Client::builder().timeout(config.fetch_timeout).build()?;

    Ok(AppState {
        source: Arc::new(ImageLoader::new(client, config.resize_area)),
        builder: PaletteBuilder::new(config.max_colors),
        file_root: config.file_root.clone().map(Arc::new),
    })
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/swatches/named", get(get_named_swatches))
        .route("/swatches/all", get(get_all_swatches))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/openapi.json", get(openapi_json))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
async fn health() -> &'static str {
    "ok"
}

/// Get OpenAPI JSON specification
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Get named swatches
///
/// Returns the best swatch for each of the six profiles. Profiles without a
/// matching color are `null`.
#[utoipa::path(
    get,
    path = "/swatches/named",
    tag = "Swatches",
    params(SourceQuery),
    responses(
        (status = 200, description = "Six named swatches", body = NamedSwatchesRecord),
        (status = 400, description = "Missing, duplicate or invalid source", body = ErrorBody),
        (status = 403, description = "Path source refused", body = ErrorBody),
        (status = 404, description = "Source image absent", body = ErrorBody),
        (status = 422, description = "Source image unusable", body = ErrorBody),
        (status = 500, description = "Extraction failed", body = ErrorBody),
        (status = 502, description = "Source image could not be fetched", body = ErrorBody)
    )
)]
async fn get_named_swatches(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<NamedSwatchesRecord>, AppError> {
    let source = resolve_source(&state, query).await?;
    tracing::info!("Named swatches request: {}", source);

    let pixels = state.source.fetch_pixels(&source).await?;
    let builder = state.builder;
    let named = run_blocking(move || builder.named_swatches(&pixels)).await?;

    Ok(Json(NamedSwatchesRecord::from(&named)))
}

/// Get all swatches
///
/// Returns every quantized swatch, most populous first.
#[utoipa::path(
    get,
    path = "/swatches/all",
    tag = "Swatches",
    params(SourceQuery),
    responses(
        (status = 200, description = "All swatches by descending population", body = Vec<SwatchRecord>),
        (status = 400, description = "Missing, duplicate or invalid source", body = ErrorBody),
        (status = 403, description = "Path source refused", body = ErrorBody),
        (status = 404, description = "Source image absent", body = ErrorBody),
        (status = 422, description = "Source image unusable", body = ErrorBody),
        (status = 500, description = "Extraction failed", body = ErrorBody),
        (status = 502, description = "Source image could not be fetched", body = ErrorBody)
    )
)]
async fn get_all_swatches(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<Vec<SwatchRecord>>, AppError> {
    let source = resolve_source(&state, query).await?;
    tracing::info!("All swatches request: {}", source);

    let pixels = state.source.fetch_pixels(&source).await?;
    let builder = state.builder;
    let swatches = run_blocking(move || builder.all_swatches(&pixels)).await?;

    Ok(Json(swatches.iter().map(SwatchRecord::from).collect()))
}

/// Turn query parameters into an image source, enforcing the file root
async fn resolve_source(state: &AppState, query: SourceQuery) -> Result<ImageSource, AppError> {
    match (query.url, query.path) {
        (Some(url), None) => {
            let parsed = Url::parse(&url)
                .map_err(|e| AppError::BadRequest(format!("invalid url {:?}: {}", url, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::BadRequest(format!(
                    "unsupported url scheme: {}",
                    parsed.scheme()
                )));
            }
            Ok(ImageSource::Url(url))
        }
        (None, Some(path)) => {
            let root = state.file_root.as_deref().ok_or_else(|| {
                AppError::Forbidden("path sources are disabled (FILE_ROOT is not set)".to_string())
            })?;
            let resolved = resolve_under_root(root, &path).await?;
            Ok(ImageSource::Path(resolved))
        }
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "give either url or path, not both".to_string(),
        )),
        (None, None) => Err(AppError::BadRequest(
            "missing image source: give url or path".to_string(),
        )),
    }
}

/// Run CPU-bound palette work on the blocking pool
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Palette task failed: {}", e)))
}

/// Resolve `requested` against `root`, refusing anything that escapes it
///
/// Error messages only ever name `requested`, never the root.
async fn resolve_under_root(root: &Path, requested: &str) -> Result<PathBuf, AppError> {
    let canonical_root = canonicalize(root, "file root").await?;
    let joined = root.join(requested.trim_start_matches('/'));
    let candidate = canonicalize(&joined, requested).await?;

    if !candidate.starts_with(&canonical_root) {
        tracing::warn!("Refusing path outside file root: {}", requested);
        return Err(AppError::Forbidden(format!(
            "{} is outside the file root",
            requested
        )));
    }

    let metadata = tokio::fs::metadata(&candidate)
        .await
        .map_err(|e| SourceError::Fetch(format!("{}: {}", requested, e)))?;
    if !metadata.is_file() {
        return Err(AppError::BadRequest(format!("{:?} is not a file", requested)));
    }

    Ok(candidate)
}

async fn canonicalize(path: &Path, label: &str) -> Result<PathBuf, SourceError> {
    tokio::fs::canonicalize(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SourceError::Absent(format!("{} not found", label)),
        _ => SourceError::Fetch(format!("{}: {}", label, e)),
    })
}
