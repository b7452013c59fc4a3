//! Restricting rows to a range of transaction dates.

use time::Date;

use super::TransactionRow;

/// An inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first day in the range.
    pub start: Date,
    /// The last day in the range.
    pub end: Date,
}

impl DateRange {
    /// Whether `date` is on or between the first and last day.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The dates picked by the user. Either end may still be unset while the
/// user is choosing a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateSelection {
    /// The picked first day.
    pub start: Option<Date>,
    /// The picked last day.
    pub end: Option<Date>,
}

impl DateSelection {
    /// The dates to show in the date pickers: the user's choice, or the
    /// bounds of the data when nothing has been chosen.
    pub fn or_bounds(self, bounds: DateRange) -> Self {
        if self.start.is_none() && self.end.is_none() {
            Self {
                start: Some(bounds.start),
                end: Some(bounds.end),
            }
        } else {
            self
        }
    }
}

/// The earliest and latest transaction dates, or `None` for an empty dataset.
pub fn date_bounds(dataset: &[TransactionRow]) -> Option<DateRange> {
    let start = dataset.iter().map(|row| row.transaction_day).min()?;
    let end = dataset.iter().map(|row| row.transaction_day).max()?;

    Some(DateRange { start, end })
}

/// Keep the rows whose transaction date lies within `start..=end`.
///
/// If either bound is `None` the rows are returned unchanged.
pub fn filter_by_date(
    dataset: &[TransactionRow],
    start: Option<Date>,
    end: Option<Date>,
) -> Vec<TransactionRow> {
    if dataset.is_empty() {
        return Vec::new();
    }

    let (Some(start), Some(end)) = (start, end) else {
        return dataset.to_vec();
    };

    let range = DateRange { start, end };

    dataset
        .iter()
        .filter(|row| range.contains(row.transaction_day))
        .cloned()
        .collect()
}

#[cfg(test)]
mod date_filter_tests {
    use time::macros::date;

    use crate::transactions::TransactionRow;

    use super::{DateRange, DateSelection, date_bounds, filter_by_date};

    fn dataset() -> Vec<TransactionRow> {
        vec![
            TransactionRow::new("A", Some(1.0), date!(2024 - 01 - 15)),
            TransactionRow::new("B", Some(2.0), date!(2024 - 01 - 01)),
            TransactionRow::new("C", Some(3.0), date!(2024 - 02 - 29)),
        ]
    }

    #[test]
    fn bounds_are_min_and_max() {
        assert_eq!(
            date_bounds(&dataset()),
            Some(DateRange {
                start: date!(2024 - 01 - 01),
                end: date!(2024 - 02 - 29)
            })
        );
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        assert_eq!(date_bounds(&[]), None);
    }

    #[test]
    fn filtering_by_the_bounds_is_the_identity() {
        let dataset = dataset();
        let bounds = date_bounds(&dataset).unwrap();

        let filtered = filter_by_date(&dataset, Some(bounds.start), Some(bounds.end));

        assert_eq!(filtered, dataset);
    }

    #[test]
    fn bounds_are_inclusive() {
        let filtered = filter_by_date(
            &dataset(),
            Some(date!(2024 - 01 - 01)),
            Some(date!(2024 - 01 - 15)),
        );

        let senders: Vec<_> = filtered.iter().map(|row| row.sender_name.as_str()).collect();
        assert_eq!(senders, ["A", "B"]);
    }

    #[test]
    fn missing_bound_does_not_filter() {
        let dataset = dataset();

        assert_eq!(filter_by_date(&dataset, Some(date!(2024 - 02 - 01)), None), dataset);
        assert_eq!(filter_by_date(&dataset, None, Some(date!(2024 - 01 - 01))), dataset);
    }

    #[test]
    fn empty_dataset_stays_empty() {
        assert!(filter_by_date(&[], Some(date!(2024 - 01 - 01)), Some(date!(2024 - 12 - 31))).is_empty());
        assert!(filter_by_date(&[], None, None).is_empty());
    }

    #[test]
    fn selection_defaults_to_bounds() {
        let bounds = DateRange {
            start: date!(2024 - 01 - 01),
            end: date!(2024 - 02 - 29),
        };

        assert_eq!(
            DateSelection::default().or_bounds(bounds),
            DateSelection {
                start: Some(bounds.start),
                end: Some(bounds.end)
            }
        );

        let partial = DateSelection {
            start: Some(date!(2024 - 01 - 10)),
            end: None,
        };
        assert_eq!(partial.or_bounds(bounds), partial);
    }
}
