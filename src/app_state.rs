//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::transactions::TextEncoding;

/// The default limit on the size of a single upload request.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// The state of the REST server.
///
/// Uploads are never stored, so the state only holds settings.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The encoding preselected in the upload form.
    pub default_encoding: TextEncoding,

    /// The largest request body accepted by the upload endpoints, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create a new [AppState] that accepts uploads up to `max_upload_bytes`.
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            default_encoding: TextEncoding::default(),
            max_upload_bytes,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl FromRef<AppState> for TextEncoding {
    fn from_ref(state: &AppState) -> Self {
        state.default_encoding
    }
}
