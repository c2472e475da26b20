//! API Handlers
//!
//! HTTP request handlers that serve files from the serve root through the
//! page cache.

use std::io::ErrorKind;
use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::cache::PageCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::mime::content_type_for;
use crate::models::HealthResponse;

/// Header reporting whether a page came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// File served for directory requests.
const INDEX_FILE: &str = "index.html";

/// Application state shared across all handlers.
///
/// The cache is not synchronized itself, and a lookup updates recency, so
/// every access goes through the mutex.
#[derive(Clone)]
pub struct AppState {
    /// Shared page cache
    pub cache: Arc<Mutex<PageCache>>,
    /// Directory files are served from
    pub root: Arc<PathBuf>,
}

impl AppState {
    /// Creates a new AppState with the given cache and serve root.
    pub fn new(cache: PageCache, root: impl Into<PathBuf>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
            root: Arc::new(root.into()),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfiguration` if the configured capacity
    /// is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = PageCache::new(config.cache_capacity)?;
        Ok(Self::new(cache, config.serve_root.clone()))
    }
}

/// Handler for GET /
pub async fn index_handler(State(state): State<AppState>) -> Result<Response> {
    serve_page(&state, "").await
}

/// Handler for GET /*path
///
/// Returns the file at `path` under the serve root, from the cache when
/// possible.
pub async fn file_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response> {
    serve_page(&state, &path).await
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cached_pages = state.cache.lock().await.len();
    Json(HealthResponse::healthy(cached_pages))
}

/// Looks the page up in the cache, falling back to disk and caching the
/// result on a miss.
async fn serve_page(state: &AppState, request_path: &str) -> Result<Response> {
    let (key, file_path) = resolve_request_path(&state.root, request_path)?;

    {
        let mut cache = state.cache.lock().await;
        if let Some(entry) = cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return page_response(entry.content_type(), entry.payload().to_vec(), "HIT");
        }
    }

    debug!(key = %key, path = %file_path.display(), "Cache miss, reading from disk");
    let data = read_file(&key, &file_path).await?;
    let content_type = content_type_for(&file_path);

    state
        .cache
        .lock()
        .await
        .put(key.as_str(), content_type, &data);

    page_response(content_type, data, "MISS")
}

async fn read_file(key: &str, file_path: &FsPath) -> Result<Vec<u8>> {
    let metadata = tokio::fs::metadata(file_path)
        .await
        .map_err(|e| io_error(key, file_path, e))?;
    if metadata.is_dir() {
        return Err(CacheError::NotFound(key.to_string()));
    }

    tokio::fs::read(file_path)
        .await
        .map_err(|e| io_error(key, file_path, e))
}

fn io_error(key: &str, file_path: &FsPath, err: std::io::Error) -> CacheError {
    if err.kind() == ErrorKind::NotFound {
        return CacheError::NotFound(key.to_string());
    }
    error!(path = %file_path.display(), error = %err, "Failed to read file");
    CacheError::Internal(format!("failed to read {}", key))
}

fn page_response(content_type: &str, body: Vec<u8>, cache_status: &str) -> Result<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(CACHE_STATUS_HEADER, cache_status)
        .body(Body::from(body))
        .map_err(|e| CacheError::Internal(e.to_string()))
}

/// Maps a request path to its cache key and the file under `root`.
///
/// Empty paths and paths ending in `/` resolve to `index.html`. Any `..`,
/// root or prefix component is rejected.
pub fn resolve_request_path(root: &FsPath, request_path: &str) -> Result<(String, PathBuf)> {
    let mut relative = PathBuf::new();
    for component in FsPath::new(request_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(CacheError::InvalidRequest(format!(
                    "path escapes serve root: {}",
                    request_path
                )));
            }
        }
    }

    if relative.as_os_str().is_empty() || request_path.ends_with('/') {
        relative.push(INDEX_FILE);
    }

    let key = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .fold(String::new(), |mut key, part| {
            key.push('/');
            key.push_str(part);
            key
        });

    Ok((key, root.join(relative)))
}
