//! Reading the filter form out of a multipart request.

use axum::extract::{Multipart, multipart::Field};
use time::{Date, macros::format_description};

use crate::{
    Error,
    transactions::{
        AmountSelection, FilterCriteria, NameFilter, Outcome, TextEncoding, UploadedFile, ingest,
        run,
    },
};

/// The content types browsers send for CSV files.
const CSV_CONTENT_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];

/// Everything submitted with the filter form.
#[derive(Debug, Clone, Default)]
pub(crate) struct FilterRequest {
    pub files: Vec<UploadedFile>,
    pub criteria: FilterCriteria,
    /// The sender names exactly as typed, for filling the form back in.
    pub names_input: String,
}

impl FilterRequest {
    /// Read the form fields from `multipart`.
    ///
    /// `encoding` is used when the form does not name one.
    pub(crate) async fn from_multipart(
        mut multipart: Multipart,
        encoding: TextEncoding,
    ) -> Result<Self, Error> {
        let mut request = FilterRequest::default();
        request.criteria.encoding = encoding;
        let mut amounts = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|error| Error::MultipartError(error.to_string()))?
        {
            match field.name().unwrap_or_default() {
                "files" => {
                    if let Some(file) = read_file(field).await? {
                        request.files.push(file);
                    }
                }
                "encoding" => {
                    let value = read_text(field).await?;
                    request.criteria.encoding = value
                        .parse()
                        .map_err(|_| Error::UnsupportedEncoding(value))?;
                }
                "start_date" => {
                    request.criteria.dates.start = parse_date(&read_text(field).await?)?;
                }
                "end_date" => {
                    request.criteria.dates.end = parse_date(&read_text(field).await?)?;
                }
                "names" => {
                    let value = read_text(field).await?;
                    request.criteria.names = NameFilter::parse(&value)
                        .map_err(|error| Error::InvalidNameFilter(error.to_string()))?;
                    request.names_input = value;
                }
                "amounts" => {
                    let value = read_text(field).await?;
                    let amount = value
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|amount| amount.is_finite())
                        .ok_or(Error::InvalidAmount(value))?;
                    amounts.push(amount);
                }
                "unique_senders" => {
                    let value = read_text(field).await?;
                    request.criteria.collapse_to_unique_sender =
                        matches!(value.as_str(), "on" | "true");
                }
                name => tracing::debug!("Ignoring unknown form field '{name}'"),
            }
        }

        request.criteria.amounts = AmountSelection::from_amounts(amounts);

        Ok(request)
    }

    /// Parse the uploaded files and run the filters.
    ///
    /// Returns `None` when no files were uploaded.
    pub(crate) fn outcome(&self) -> Result<Option<Outcome>, Error> {
        if self.files.is_empty() {
            return Ok(None);
        }

        let dataset = ingest(&self.files, self.criteria.encoding)?;

        Ok(Some(run(&dataset, &self.criteria)))
    }
}

async fn read_text(field: Field<'_>) -> Result<String, Error> {
    field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })
}

/// Read an uploaded file, or `None` if the file input was left empty.
async fn read_file(field: Field<'_>) -> Result<Option<UploadedFile>, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();
    let is_csv = field
        .content_type()
        .is_some_and(|content_type| CSV_CONTENT_TYPES.contains(&content_type))
        || file_name.to_lowercase().ends_with(".csv");

    let data = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    // Browsers send an empty part when no file is chosen.
    if file_name.is_empty() && data.is_empty() {
        return Ok(None);
    }

    if !is_csv {
        return Err(Error::NotCSV(file_name));
    }

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    Ok(Some(UploadedFile::new(&file_name, data.to_vec())))
}

/// Parse a date input value. An empty value means no date was picked.
fn parse_date(value: &str) -> Result<Option<Date>, Error> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(None);
    }

    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(|_| Error::InvalidDate(value.to_owned()))
}
