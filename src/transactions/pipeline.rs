//! Runs the filter stages in order over an ingested dataset.

use super::{
    TextEncoding, TransactionRow,
    amounts::{AmountSelection, Partition, available_amounts, partition_by_amount},
    date_filter::{DateRange, DateSelection, date_bounds, filter_by_date},
    name_filter::{NameFilter, filter_by_name},
};

/// Everything the user picked in the filter form.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// The encoding used to decode the uploaded reports.
    pub encoding: TextEncoding,
    /// The transaction date range.
    pub dates: DateSelection,
    /// The sender name fragments.
    pub names: NameFilter,
    /// The picked amounts.
    pub amounts: AmountSelection,
    /// Keep only the most recent row per sender in the filtered table.
    pub collapse_to_unique_sender: bool,
}

/// What is left after running every filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No rows are left after the date filter. `date_bounds` is `None` when the
    /// upload itself had no rows.
    NoTransactions {
        /// The first and last transaction date of the upload.
        date_bounds: Option<DateRange>,
    },
    /// The name filter matched none of the rows in the date range.
    NoNameMatches {
        /// The first and last transaction date of the upload.
        date_bounds: DateRange,
    },
    /// At least one row passed the date and name filters.
    Results(FilterResults),
}

/// The tables and numbers shown once at least one row passes the filters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResults {
    /// The first and last transaction date of the whole upload.
    pub date_bounds: DateRange,
    /// The amounts that can be picked, smallest first.
    pub available_amounts: Vec<f64>,
    /// The amounts actually applied, after dropping picks that are not available.
    pub amounts: AmountSelection,
    /// The rows split by the applied amounts.
    pub partition: Partition,
}

/// Apply the date, name and amount filters to `dataset`.
pub fn run(dataset: &[TransactionRow], criteria: &FilterCriteria) -> Outcome {
    let Some(bounds) = date_bounds(dataset) else {
        return Outcome::NoTransactions { date_bounds: None };
    };

    let in_range = filter_by_date(dataset, criteria.dates.start, criteria.dates.end);

    if in_range.is_empty() {
        return Outcome::NoTransactions {
            date_bounds: Some(bounds),
        };
    }

    let matching = filter_by_name(&in_range, &criteria.names);

    if matching.is_empty() {
        tracing::debug!(
            "No transactions match the names {:?}",
            criteria.names.fragments()
        );
        return Outcome::NoNameMatches {
            date_bounds: bounds,
        };
    }

    let available_amounts = available_amounts(&matching);
    let amounts = criteria.amounts.clone().restrict_to(&available_amounts);
    let partition = partition_by_amount(&matching, &amounts, criteria.collapse_to_unique_sender);

    tracing::debug!(
        "{} of {} transactions passed the filters, {} other transactions by the same senders",
        partition.filtered.len(),
        dataset.len(),
        partition.other.len()
    );

    Outcome::Results(FilterResults {
        date_bounds: bounds,
        available_amounts,
        amounts,
        partition,
    })
}
