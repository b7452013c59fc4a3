//! The API endpoints URIs.

/// The page with the upload form, filters and results.
pub const FILTER_VIEW: &str = "/";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route that runs the filters over the uploaded reports and returns the results.
pub const FILTER_API: &str = "/api/filter";
/// The route to download the rows with the picked amounts as CSV.
pub const EXPORT_FILTERED: &str = "/api/export/filtered";
/// The route to download the other rows of the same senders as CSV.
pub const EXPORT_OTHER: &str = "/api/export/other";
