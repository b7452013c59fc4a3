//! Parsing uploaded transaction reports into rows.
//!
//! A report is a comma separated file whose first line is a banner written by
//! the bank (e.g. "Umsatzliste vom 01.02.2024"). The line after the banner is
//! the header row.

use csv::StringRecord;
use time::Date;

use super::{
    ParseError, TextEncoding, TransactionRow,
    dates::{DateFormat, detect_format},
    model::{
        AMOUNT_COLUMN, MESSAGE_COLUMN, MESSAGE_DAY_COLUMN, POSTING_DAY_COLUMN,
        SENDER_NAME_COLUMN, TRANSACTION_DAY_COLUMN, VALUE_DAY_COLUMN,
    },
};

/// A file as received from the upload form.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// The file name sent by the browser, used in error messages.
    pub name: String,
    /// The raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Wrap the contents of the file called `name`.
    pub fn new(name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_owned(),
            bytes: bytes.into(),
        }
    }
}

/// Parse every file and concatenate the rows in upload order.
///
/// # Errors
/// Returns the first [ParseError] encountered. Rows from files that parsed
/// successfully are discarded in that case.
pub fn ingest(
    files: &[UploadedFile],
    encoding: TextEncoding,
) -> Result<Vec<TransactionRow>, ParseError> {
    let mut dataset = Vec::new();

    for file in files {
        let rows = parse_report(&file.name, &file.bytes, encoding)?;
        tracing::debug!("Parsed {} rows from '{}'", rows.len(), file.name);
        dataset.extend(rows);
    }

    Ok(dataset)
}

/// Parse a single report.
///
/// Amounts that are not numbers become `None` instead of failing the file.
/// Dates must all be readable: see [detect_format].
pub fn parse_report(
    file_name: &str,
    bytes: &[u8],
    encoding: TextEncoding,
) -> Result<Vec<TransactionRow>, ParseError> {
    let text = encoding.decode(bytes).ok_or_else(|| ParseError::Decode {
        file: file_name.to_owned(),
        encoding,
    })?;
    let table = skip_banner(&text);

    let csv_error = |error: csv::Error| ParseError::Csv {
        file: file_name.to_owned(),
        message: error.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(table.as_bytes());
    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = Columns::locate(&headers, file_name)?;
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    let formats = DateFormats {
        transaction_day: column_format(
            &records,
            Some(columns.transaction_day),
            TRANSACTION_DAY_COLUMN,
            file_name,
        )?,
        posting_day: column_format(&records, columns.posting_day, POSTING_DAY_COLUMN, file_name)?,
        value_day: column_format(&records, columns.value_day, VALUE_DAY_COLUMN, file_name)?,
        message_day: column_format(&records, columns.message_day, MESSAGE_DAY_COLUMN, file_name)?,
    };

    records
        .iter()
        .map(|record| build_row(record, &headers, &columns, &formats, file_name))
        .collect()
}

/// Drop the banner line. A file with a single line has no table.
fn skip_banner(text: &str) -> &str {
    text.split_once('\n').map(|(_, rest)| rest).unwrap_or_default()
}

/// Coerce a cell to a number, treating anything unreadable as missing.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Positions of the known columns in the header row.
struct Columns {
    sender_name: usize,
    amount: usize,
    transaction_day: usize,
    posting_day: Option<usize>,
    value_day: Option<usize>,
    message_day: Option<usize>,
    message: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord, file_name: &str) -> Result<Self, ParseError> {
        let find = |name: &str| headers.iter().position(|header| header.trim() == name);
        let require = |name: &'static str| {
            find(name).ok_or_else(|| ParseError::MissingColumn {
                file: file_name.to_owned(),
                column: name,
            })
        };

        Ok(Self {
            sender_name: require(SENDER_NAME_COLUMN)?,
            amount: require(AMOUNT_COLUMN)?,
            transaction_day: require(TRANSACTION_DAY_COLUMN)?,
            posting_day: find(POSTING_DAY_COLUMN),
            value_day: find(VALUE_DAY_COLUMN),
            message_day: find(MESSAGE_DAY_COLUMN),
            message: find(MESSAGE_COLUMN),
        })
    }

    fn is_known(&self, index: usize) -> bool {
        index == self.sender_name
            || index == self.amount
            || index == self.transaction_day
            || Some(index) == self.posting_day
            || Some(index) == self.value_day
            || Some(index) == self.message_day
            || Some(index) == self.message
    }
}

struct DateFormats {
    transaction_day: Option<&'static DateFormat>,
    posting_day: Option<&'static DateFormat>,
    value_day: Option<&'static DateFormat>,
    message_day: Option<&'static DateFormat>,
}

/// Detect the format of the column at `index`, if the column exists.
fn column_format(
    records: &[StringRecord],
    index: Option<usize>,
    column: &'static str,
    file_name: &str,
) -> Result<Option<&'static DateFormat>, ParseError> {
    let Some(index) = index else {
        return Ok(None);
    };

    let values: Vec<&str> = records
        .iter()
        .map(|record| record.get(index).unwrap_or_default())
        .collect();

    match detect_format(&values) {
        Some(format) => {
            tracing::debug!("Reading column '{column}' of '{file_name}' as {}", format.pattern);
            Ok(Some(format))
        }
        None => Err(ParseError::InvalidDate {
            file: file_name.to_owned(),
            column,
            value: first_unreadable_date(&values),
        }),
    }
}

/// The first value that does not look like a date in any format, for error messages.
fn first_unreadable_date(values: &[&str]) -> String {
    values
        .iter()
        .map(|value| value.trim())
        .find(|value| !value.is_empty() && detect_format(&[value]).is_none())
        .or_else(|| values.iter().map(|value| value.trim()).find(|value| !value.is_empty()))
        .unwrap_or_default()
        .to_owned()
}

fn parse_optional_date(
    record: &StringRecord,
    index: Option<usize>,
    format: Option<&DateFormat>,
) -> Option<Date> {
    let value = record.get(index?)?.trim();

    if value.is_empty() {
        return None;
    }

    format?.parse(value)
}

fn build_row(
    record: &StringRecord,
    headers: &StringRecord,
    columns: &Columns,
    formats: &DateFormats,
    file_name: &str,
) -> Result<TransactionRow, ParseError> {
    // The banner line is not seen by the CSV reader, so add it back for error messages.
    let line = record.position().map_or(0, |position| position.line() + 1);

    let transaction_day = parse_optional_date(
        record,
        Some(columns.transaction_day),
        formats.transaction_day,
    )
    .ok_or_else(|| ParseError::MissingTransactionDate {
        file: file_name.to_owned(),
        line,
    })?;

    let other_columns = record
        .iter()
        .enumerate()
        .filter(|(index, _)| !columns.is_known(*index))
        .map(|(index, value)| {
            (
                headers.get(index).unwrap_or_default().to_owned(),
                value.to_owned(),
            )
        })
        .collect();

    Ok(TransactionRow {
        sender_name: record
            .get(columns.sender_name)
            .unwrap_or_default()
            .trim()
            .to_owned(),
        amount: parse_amount(record.get(columns.amount).unwrap_or_default()),
        transaction_day,
        posting_day: parse_optional_date(record, columns.posting_day, formats.posting_day),
        value_day: parse_optional_date(record, columns.value_day, formats.value_day),
        message_day: parse_optional_date(record, columns.message_day, formats.message_day),
        message: columns
            .message
            .and_then(|index| record.get(index))
            .filter(|message| !message.trim().is_empty())
            .map(str::to_owned),
        other_columns,
    })
}

#[cfg(test)]
mod ingest_tests {
    use time::macros::date;

    use crate::transactions::{ParseError, TextEncoding};

    use super::{UploadedFile, ingest, parse_amount, parse_report};

    const REPORT: &str = "\
        Transaction report 01.01.2024 - 31.03.2024\n\
        Accday,Transday,Valueday,Sendername,Amount,Reference\n\
        02.01.2024,01.01.2024,02.01.2024,Anna Müller,10.00,R-1\n\
        05.02.2024,04.02.2024,05.02.2024,Ann Lee,20.5,R-2\n\
        06.03.2024,06.03.2024,,Susann Berg,n/a,R-3\n";

    #[test]
    fn parses_rows_after_the_banner() {
        let rows = parse_report("report.csv", REPORT.as_bytes(), TextEncoding::Utf8).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].sender_name, "Anna Müller");
        assert_eq!(rows[0].amount, Some(10.0));
        assert_eq!(rows[0].transaction_day, date!(2024 - 01 - 01));
        assert_eq!(rows[0].posting_day, Some(date!(2024 - 01 - 02)));
        assert_eq!(rows[1].amount, Some(20.5));
        assert_eq!(rows[1].transaction_day, date!(2024 - 02 - 04));
    }

    #[test]
    fn unreadable_amounts_become_missing() {
        let rows = parse_report("report.csv", REPORT.as_bytes(), TextEncoding::Utf8).unwrap();

        assert_eq!(rows[2].amount, None);
        assert_eq!(rows[2].value_day, None);
    }

    #[test]
    fn keeps_unknown_columns() {
        let rows = parse_report("report.csv", REPORT.as_bytes(), TextEncoding::Utf8).unwrap();

        assert_eq!(
            rows[1].other_columns,
            vec![("Reference".to_owned(), "R-2".to_owned())]
        );
        assert_eq!(rows[1].message, None);
    }

    #[test]
    fn reads_message_columns() {
        let report = "\
            banner\n\
            Sendername,Amount,Message,Messageday,Transday\n\
            Ann Lee,5,Membership fee,2024-01-02,2024-01-01\n";

        let rows = parse_report("report.csv", report.as_bytes(), TextEncoding::Utf8).unwrap();

        assert_eq!(rows[0].message.as_deref(), Some("Membership fee"));
        assert_eq!(rows[0].message_day, Some(date!(2024 - 01 - 02)));
    }

    #[test]
    fn empty_message_is_missing() {
        let report = "banner\nSendername,Amount,Message,Transday\nAnn Lee,5,,2024-01-01\n";

        let rows = parse_report("report.csv", report.as_bytes(), TextEncoding::Utf8).unwrap();

        assert_eq!(rows[0].message, None);
    }

    #[test]
    fn concatenates_files_in_upload_order() {
        let first = "banner\nSendername,Amount,Transday\nA,1,2024-01-02\nB,2,2024-01-01\n";
        let second = "banner\nSendername,Amount,Transday\nC,3,2023-12-31\n";

        let rows = ingest(
            &[
                UploadedFile::new("first.csv", first),
                UploadedFile::new("second.csv", second),
            ],
            TextEncoding::Utf8,
        )
        .unwrap();

        let senders: Vec<_> = rows.iter().map(|row| row.sender_name.as_str()).collect();
        assert_eq!(senders, ["A", "B", "C"]);
    }

    #[test]
    fn decodes_latin1() {
        let report = b"banner\nSendername,Amount,Transday\nJ\xfcrgen,1,2024-01-02\n";

        let rows = parse_report("report.csv", report, TextEncoding::Iso8859_1).unwrap();

        assert_eq!(rows[0].sender_name, "Jürgen");
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let report = b"banner\nSendername,Amount,Transday\nJ\xfcrgen,1,2024-01-02\n";

        let result = parse_report("report.csv", report, TextEncoding::Utf8);

        assert_eq!(
            result,
            Err(ParseError::Decode {
                file: "report.csv".to_owned(),
                encoding: TextEncoding::Utf8
            })
        );
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let report = "banner\nName,Amount,Transday\nA,1,2024-01-02\n";

        let result = parse_report("report.csv", report.as_bytes(), TextEncoding::Utf8);

        assert_eq!(
            result,
            Err(ParseError::MissingColumn {
                file: "report.csv".to_owned(),
                column: "Sendername"
            })
        );
    }

    #[test]
    fn reads_unpadded_dates() {
        let cases = [
            ("1.2.2024", "15.12.2024"),
            ("1/2/2024", "15/12/2024"),
            ("2024-2-1", "2024-12-15"),
        ];

        for (first, second) in cases {
            let report =
                format!("banner\nSendername,Amount,Transday\nA,1,{first}\nB,2,{second}\n");

            let rows = parse_report("report.csv", report.as_bytes(), TextEncoding::Utf8).unwrap();

            assert_eq!(rows[0].transaction_day, date!(2024 - 02 - 01), "{first}");
            assert_eq!(rows[1].transaction_day, date!(2024 - 12 - 15), "{second}");
        }
    }

    #[test]
    fn unparseable_date_is_an_error() {
        let report = "banner\nSendername,Amount,Transday\nA,1,2024-01-02\nB,2,someday\n";

        let result = parse_report("report.csv", report.as_bytes(), TextEncoding::Utf8);

        assert_eq!(
            result,
            Err(ParseError::InvalidDate {
                file: "report.csv".to_owned(),
                column: "Transday",
                value: "someday".to_owned()
            })
        );
    }

    #[test]
    fn empty_transaction_date_is_an_error() {
        let report = "banner\nSendername,Amount,Transday\nA,1,2024-01-02\nB,2,\n";

        let result = parse_report("report.csv", report.as_bytes(), TextEncoding::Utf8);

        assert_eq!(
            result,
            Err(ParseError::MissingTransactionDate {
                file: "report.csv".to_owned(),
                line: 4
            })
        );
    }

    #[test]
    fn ragged_rows_are_an_error() {
        let report = "banner\nSendername,Amount,Transday\nA,1,2024-01-02,extra\n";

        let result = parse_report("report.csv", report.as_bytes(), TextEncoding::Utf8);

        assert!(matches!(result, Err(ParseError::Csv { .. })));
    }

    #[test]
    fn one_bad_file_fails_the_batch() {
        let good = "banner\nSendername,Amount,Transday\nA,1,2024-01-02\n";
        let bad = "banner\nName,Amount,Transday\nB,1,2024-01-02\n";

        let result = ingest(
            &[UploadedFile::new("good.csv", good), UploadedFile::new("bad.csv", bad)],
            TextEncoding::Utf8,
        );

        assert!(result.is_err());
    }

    #[test]
    fn header_only_report_has_no_rows() {
        let report = "banner\nSendername,Amount,Transday\n";

        let rows = parse_report("report.csv", report.as_bytes(), TextEncoding::Utf8).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn amount_coercion() {
        assert_eq!(parse_amount(" 12.50 "), Some(12.5));
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount("1,234.56"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }
}
