use super::TextEncoding;

/// The reasons an uploaded report could not be turned into rows.
///
/// Any of these fails the whole upload: rows from the other files are not
/// kept.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ParseError {
    /// The bytes are not valid text in the selected encoding.
    #[error("'{file}' could not be decoded as {encoding}")]
    Decode {
        /// The uploaded file name.
        file: String,
        /// The encoding selected by the user.
        encoding: TextEncoding,
    },

    /// The CSV itself is malformed, e.g. rows with a different number of fields.
    #[error("'{file}' is not a valid CSV file: {message}")]
    Csv {
        /// The uploaded file name.
        file: String,
        /// The CSV reader's description of the problem.
        message: String,
    },

    /// A column the filters depend on is not in the header row.
    #[error("'{file}' has no '{column}' column")]
    MissingColumn {
        /// The uploaded file name.
        file: String,
        /// The header of the missing column.
        column: &'static str,
    },

    /// No single date format fits every value in a date column.
    #[error("could not read '{value}' in column '{column}' of '{file}' as a date")]
    InvalidDate {
        /// The uploaded file name.
        file: String,
        /// The header of the date column.
        column: &'static str,
        /// The first value that no format could read.
        value: String,
    },

    /// A row has no transaction date.
    #[error("'{file}' has a row without a transaction date on line {line}")]
    MissingTransactionDate {
        /// The uploaded file name.
        file: String,
        /// The line of the row, counting the banner line.
        line: u64,
    },
}

/// The filtered rows could not be written out as CSV.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("could not write CSV: {0}")]
pub struct ExportError(pub String);
