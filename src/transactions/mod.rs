//! The transaction filtering pipeline.
//!
//! Uploaded reports are parsed into rows ([ingest]), then narrowed by
//! transaction date ([filter_by_date]) and sender name ([filter_by_name]),
//! and finally split by amount ([partition_by_amount]). Every stage takes the
//! previous stage's rows and returns new rows, so each can be used and tested
//! on its own. [run] chains the stages for the web pages.
//!
//! Nothing in this module knows about HTTP or HTML.

mod amounts;
mod date_filter;
mod dates;
mod encoding;
mod error;
mod export;
mod ingest;
mod model;
mod name_filter;
mod pipeline;

pub use amounts::{
    AmountSelection, Partition, Summary, available_amounts, collapse_to_unique_sender,
    partition_by_amount,
};
pub use date_filter::{DateRange, DateSelection, date_bounds, filter_by_date};
pub use encoding::{ALL_ENCODINGS, TextEncoding, UnknownEncoding};
pub use error::{ExportError, ParseError};
pub use export::{FILTERED_FILE_NAME, OTHER_FILE_NAME, to_csv};
pub use ingest::{UploadedFile, ingest, parse_amount, parse_report};
pub use model::TransactionRow;
pub use name_filter::{NameFilter, filter_by_name};
pub use pipeline::{FilterCriteria, FilterResults, Outcome, run};
