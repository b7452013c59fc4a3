use axum::{
    extract::{Multipart, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;

use crate::{
    Error,
    filter_page::{
        form::FilterRequest,
        view::{FormValues, filter_page_view, results_view},
    },
    transactions::{
        DateSelection, FILTERED_FILE_NAME, OTHER_FILE_NAME, Outcome, TextEncoding, TransactionRow,
        to_csv,
    },
};

/// Route handler for the filter page.
pub async fn get_filter_page(State(encoding): State<TextEncoding>) -> Response {
    let values = FormValues {
        encoding,
        names: "",
        unique_senders: false,
    };
    let results = results_view(None, DateSelection::default());

    filter_page_view(&values, &results).into_response()
}

/// Route handler that runs the filters over the uploaded reports.
///
/// htmx requests get the results fragment, other requests get the whole page
/// so the form still works without JavaScript.
pub async fn filter_transactions(
    State(encoding): State<TextEncoding>,
    HxRequest(is_htmx): HxRequest,
    multipart: Multipart,
) -> Response {
    let respond_with_error = |error: Error| {
        if is_htmx {
            error.into_alert_response()
        } else {
            error.into_response()
        }
    };

    let request = match FilterRequest::from_multipart(multipart, encoding).await {
        Ok(request) => request,
        Err(error) => return respond_with_error(error),
    };

    let outcome = match request.outcome() {
        Ok(outcome) => outcome,
        Err(error) => return respond_with_error(error),
    };

    let results = results_view(outcome.as_ref(), request.criteria.dates);

    if is_htmx {
        return results.into_response();
    }

    let values = FormValues {
        encoding: request.criteria.encoding,
        names: &request.names_input,
        unique_senders: request.criteria.collapse_to_unique_sender,
    };

    filter_page_view(&values, &results).into_response()
}

/// The two result tables that can be downloaded.
#[derive(Debug, Clone, Copy)]
enum ExportTable {
    Filtered,
    Other,
}

impl ExportTable {
    fn file_name(self) -> &'static str {
        match self {
            ExportTable::Filtered => FILTERED_FILE_NAME,
            ExportTable::Other => OTHER_FILE_NAME,
        }
    }

    /// The rows of this table, empty if the filters left nothing to show.
    fn rows(self, outcome: Option<Outcome>) -> Vec<TransactionRow> {
        match (self, outcome) {
            (ExportTable::Filtered, Some(Outcome::Results(results))) => results.partition.filtered,
            (ExportTable::Other, Some(Outcome::Results(results))) => results.partition.other,
            _ => Vec::new(),
        }
    }
}

/// Route handler for downloading the rows with the picked amounts.
pub async fn export_filtered(
    State(encoding): State<TextEncoding>,
    multipart: Multipart,
) -> Response {
    export(ExportTable::Filtered, encoding, multipart).await
}

/// Route handler for downloading the other rows of the same senders.
pub async fn export_other(State(encoding): State<TextEncoding>, multipart: Multipart) -> Response {
    export(ExportTable::Other, encoding, multipart).await
}

async fn export(table: ExportTable, encoding: TextEncoding, multipart: Multipart) -> Response {
    let result = async {
        let request = FilterRequest::from_multipart(multipart, encoding).await?;
        let rows = table.rows(request.outcome()?);
        let csv = to_csv(&rows)?;

        tracing::debug!("Exporting {} rows as {}", rows.len(), table.file_name());

        Ok::<_, Error>(csv)
    }
    .await;

    match result {
        Ok(csv) => csv_attachment(table.file_name(), csv),
        Err(error) => error.into_response(),
    }
}

fn csv_attachment(file_name: &str, csv: String) -> Response {
    let disposition = format!("attachment; filename=\"{file_name}\"");

    match HeaderValue::from_str(&disposition) {
        Ok(disposition) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/csv; charset=utf-8"),
                ),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not create content disposition header: {error}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
