//! The page for uploading transaction reports, filtering them and downloading the results.
//!
//! The page keeps no state on the server: every change to the form re-sends
//! the uploaded files together with the current filters.

mod endpoint;
mod form;
mod view;

pub use endpoint::{export_filtered, export_other, filter_transactions, get_filter_page};
