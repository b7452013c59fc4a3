//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    internal_server_error::InternalServerError,
    transactions::{ExportError, ParseError},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The multipart form could not be read.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// An uploaded file is not a CSV file.
    #[error("File '{0}' is not a CSV")]
    NotCSV(String),

    /// An uploaded report could not be parsed.
    #[error(transparent)]
    InvalidReport(#[from] ParseError),

    /// The encoding field did not name a supported encoding.
    #[error("unsupported encoding \"{0}\"")]
    UnsupportedEncoding(String),

    /// A date field was not in the `YYYY-MM-DD` format used by date inputs.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// An amount field was not a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The sender names could not be turned into a filter.
    #[error("invalid sender names: {0}")]
    InvalidNameFilter(String),

    /// A result table could not be written as CSV.
    #[error(transparent)]
    ExportFailed(#[from] ExportError),

    /// A request body that is not an upload was larger than the given number of bytes.
    #[error("request body is larger than {0} bytes")]
    RequestTooLarge(usize),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ExportFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::RequestTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Error::MultipartError(_) => "Upload failed",
            Error::NotCSV(_) => "File type must be CSV",
            Error::InvalidReport(_) => "Could not read the uploaded file",
            Error::UnsupportedEncoding(_) => "Unsupported encoding",
            Error::InvalidDate(_) => "Invalid date",
            Error::InvalidAmount(_) => "Invalid amount",
            Error::InvalidNameFilter(_) => "Invalid sender names",
            Error::ExportFailed(_) => "Download failed",
            Error::RequestTooLarge(_) => "Request too large",
        }
    }

    fn details(&self) -> String {
        match self {
            Error::InvalidReport(ParseError::Decode { .. }) => {
                format!("{self}. Try choosing a different file encoding.")
            }
            Error::InvalidReport(_) => format!(
                "{self}. Check that the file is a CSV transaction report with a banner line \
                followed by a header row."
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            Error::MultipartError(_) | Error::ExportFailed(_) => {
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        }
    }

    /// Render the error as an alert for htmx requests.
    pub(crate) fn into_alert_response(self) -> Response {
        self.log();

        let status_code = self.status_code();
        let alert = Alert {
            message: self.title().to_owned(),
            details: self.details(),
        };

        (status_code, alert.into_html()).into_response()
    }

    fn log(&self) {
        match self {
            Error::MultipartError(_) | Error::ExportFailed(_) => {
                tracing::error!("An unexpected error occurred: {}", self)
            }
            error => tracing::debug!("Rejected request: {error}"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.log();

        let status_code = self.status_code();
        let details = self.details();
        let page = InternalServerError {
            description: self.title(),
            fix: &details,
        };

        (status_code, page.into_html()).into_response()
    }
}
