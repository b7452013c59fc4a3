//! The row type produced by ingestion and consumed by every filter stage.

use time::Date;

/// Column holding the name of the payer.
pub const SENDER_NAME_COLUMN: &str = "Sendername";
/// Column holding the transaction amount.
pub const AMOUNT_COLUMN: &str = "Amount";
/// Column holding the transaction date.
pub const TRANSACTION_DAY_COLUMN: &str = "Transday";
/// Column holding the posting (accounting) date.
pub const POSTING_DAY_COLUMN: &str = "Accday";
/// Column holding the value date.
pub const VALUE_DAY_COLUMN: &str = "Valueday";
/// Column holding the date of the payment message.
pub const MESSAGE_DAY_COLUMN: &str = "Messageday";
/// Column holding the free-text payment message.
pub const MESSAGE_COLUMN: &str = "Message";

/// A single parsed record from a transaction report.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// The payer. An empty string means the report had no sender for this row.
    pub sender_name: String,
    /// The amount, or `None` if the cell could not be read as a number.
    pub amount: Option<f64>,
    /// The day the transaction took place.
    pub transaction_day: Date,
    /// The posting date, `None` when the column is absent or the cell is empty.
    pub posting_day: Option<Date>,
    /// The value date, `None` when the column is absent or the cell is empty.
    pub value_day: Option<Date>,
    /// The message date, `None` when the column is absent or the cell is empty.
    pub message_day: Option<Date>,
    /// The payment message, `None` when the column is absent or the cell is empty.
    pub message: Option<String>,
    /// Any other columns as `(header, value)` pairs, in file order.
    pub other_columns: Vec<(String, String)>,
}

impl TransactionRow {
    /// Create a row with only the fields the filters look at.
    pub fn new(sender_name: &str, amount: Option<f64>, transaction_day: Date) -> Self {
        Self {
            sender_name: sender_name.to_owned(),
            amount,
            transaction_day,
            posting_day: None,
            value_day: None,
            message_day: None,
            message: None,
            other_columns: Vec::new(),
        }
    }
}
