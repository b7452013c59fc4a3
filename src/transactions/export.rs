//! Writing result tables as downloadable CSV.

use serde::Serialize;

use super::{
    ExportError, TransactionRow,
    model::{AMOUNT_COLUMN, MESSAGE_COLUMN, SENDER_NAME_COLUMN, TRANSACTION_DAY_COLUMN},
};

/// The file name for the table of rows with the picked amounts.
pub const FILTERED_FILE_NAME: &str = "filtered_transactions.csv";
/// The file name for the table of other rows by the same senders.
pub const OTHER_FILE_NAME: &str = "other_transactions.csv";

const HEADERS: [&str; 4] = [
    SENDER_NAME_COLUMN,
    AMOUNT_COLUMN,
    MESSAGE_COLUMN,
    TRANSACTION_DAY_COLUMN,
];

/// The columns shown to the user, in display order.
#[derive(Serialize)]
struct ExportRow<'a> {
    sender_name: &'a str,
    amount: Option<f64>,
    message: &'a str,
    transaction_day: String,
}

impl<'a> From<&'a TransactionRow> for ExportRow<'a> {
    fn from(row: &'a TransactionRow) -> Self {
        Self {
            sender_name: &row.sender_name,
            amount: row.amount,
            message: row.message.as_deref().unwrap_or_default(),
            transaction_day: row.transaction_day.to_string(),
        }
    }
}

/// Write `rows` as comma separated values with a header row and no index column.
///
/// The header is written even when there are no rows. Missing values are
/// written as empty cells.
pub fn to_csv(rows: &[TransactionRow]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(HEADERS)
        .map_err(|error| ExportError(error.to_string()))?;

    for row in rows {
        writer
            .serialize(ExportRow::from(row))
            .map_err(|error| ExportError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| ExportError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| ExportError(error.to_string()))
}
