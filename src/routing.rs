//! Application router configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    filter_page::{export_filtered, export_other, filter_transactions, get_filter_page},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let upload_routes = Router::new()
        .route(endpoints::FILTER_API, post(filter_transactions))
        .route(endpoints::EXPORT_FILTERED, post(export_filtered))
        .route(endpoints::EXPORT_OTHER, post(export_other))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes));

    Router::new()
        .route(endpoints::FILTER_VIEW, get(get_filter_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .merge(upload_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}
