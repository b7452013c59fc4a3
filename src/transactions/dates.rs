//! Detecting and applying the day format used by a date column.
//!
//! Reports from different banks write dates differently, but a single column
//! always uses one format. The format is chosen once per column and then
//! applied to every cell, so a column can never mix day-first and month-first
//! readings.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// A day format that a date column may use.
#[derive(Debug)]
pub struct DateFormat {
    /// A human readable pattern, used in logs.
    pub pattern: &'static str,
    items: &'static [BorrowedFormatItem<'static>],
}

impl DateFormat {
    /// Parse the day part of `value`, ignoring any time of day that follows it.
    pub fn parse(&self, value: &str) -> Option<Date> {
        Date::parse(day_part(value), self.items).ok()
    }
}

/// The formats tried for each column, in order of preference.
///
/// Day-first formats come before month-first ones, so `01/02/2024` is read as
/// the first of February. Zero-padded layouts are tried before the unpadded
/// ones. An unpadded layout also reads padded values, so a column that mixes
/// `1.2.2024` and `15.12.2024` falls through to it.
pub const CANDIDATE_FORMATS: &[DateFormat] = &[
    DateFormat {
        pattern: "YYYY-MM-DD",
        items: format_description!("[year]-[month]-[day]"),
    },
    DateFormat {
        pattern: "DD.MM.YYYY",
        items: format_description!("[day].[month].[year]"),
    },
    DateFormat {
        pattern: "DD/MM/YYYY",
        items: format_description!("[day]/[month]/[year]"),
    },
    DateFormat {
        pattern: "MM/DD/YYYY",
        items: format_description!("[month]/[day]/[year]"),
    },
    DateFormat {
        pattern: "YYYY/MM/DD",
        items: format_description!("[year]/[month]/[day]"),
    },
    DateFormat {
        pattern: "DD-MM-YYYY",
        items: format_description!("[day]-[month]-[year]"),
    },
    DateFormat {
        pattern: "YYYYMMDD",
        items: format_description!("[year][month][day]"),
    },
    DateFormat {
        pattern: "YYYY-M-D",
        items: format_description!("[year]-[month padding:none]-[day padding:none]"),
    },
    DateFormat {
        pattern: "D.M.YYYY",
        items: format_description!("[day padding:none].[month padding:none].[year]"),
    },
    DateFormat {
        pattern: "D/M/YYYY",
        items: format_description!("[day padding:none]/[month padding:none]/[year]"),
    },
    DateFormat {
        pattern: "M/D/YYYY",
        items: format_description!("[month padding:none]/[day padding:none]/[year]"),
    },
    DateFormat {
        pattern: "YYYY/M/D",
        items: format_description!("[year]/[month padding:none]/[day padding:none]"),
    },
    DateFormat {
        pattern: "D-M-YYYY",
        items: format_description!("[day padding:none]-[month padding:none]-[year]"),
    },
];

/// Find the first candidate format that parses every non-empty value.
///
/// Returns `None` if no single format fits the whole column.
pub fn detect_format(values: &[&str]) -> Option<&'static DateFormat> {
    CANDIDATE_FORMATS.iter().find(|format| {
        values
            .iter()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .all(|value| format.parse(value).is_some())
    })
}

/// Strip a trailing time of day, e.g. "2024-01-31 00:00:00" or "2024-01-31T08:15".
fn day_part(value: &str) -> &str {
    value
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod date_format_tests {
    use time::macros::date;

    use super::detect_format;

    #[test]
    fn detects_iso_dates() {
        let format = detect_format(&["2024-01-31", "2024-02-01"]).unwrap();

        assert_eq!(format.pattern, "YYYY-MM-DD");
        assert_eq!(format.parse("2024-01-31"), Some(date!(2024 - 01 - 31)));
    }

    #[test]
    fn detects_dotted_day_first_dates() {
        let format = detect_format(&["31.01.2024", "01.02.2024"]).unwrap();

        assert_eq!(format.parse("01.02.2024"), Some(date!(2024 - 02 - 01)));
    }

    #[test]
    fn one_format_is_used_for_the_whole_column() {
        // 13/01/2024 rules out month-first, so 02/01/2024 must be the 2nd of January.
        let format = detect_format(&["02/01/2024", "13/01/2024"]).unwrap();

        assert_eq!(format.pattern, "DD/MM/YYYY");
        assert_eq!(format.parse("02/01/2024"), Some(date!(2024 - 01 - 02)));
    }

    #[test]
    fn falls_back_to_month_first_when_day_first_fails() {
        let format = detect_format(&["01/13/2024", "02/01/2024"]).unwrap();

        assert_eq!(format.pattern, "MM/DD/YYYY");
        assert_eq!(format.parse("02/01/2024"), Some(date!(2024 - 02 - 01)));
    }

    #[test]
    fn ignores_time_of_day_and_empty_cells() {
        let format = detect_format(&["2024-01-31 00:00:00", "", "2024-02-01T10:00"]).unwrap();

        assert_eq!(
            format.parse("2024-01-31 00:00:00"),
            Some(date!(2024 - 01 - 31))
        );
    }

    #[test]
    fn compact_dates() {
        let format = detect_format(&["20250412"]).unwrap();

        assert_eq!(format.parse("20250412"), Some(date!(2025 - 04 - 12)));
    }

    #[test]
    fn detects_unpadded_dates() {
        let cases = [
            (["1.2.2024", "15.12.2024"], "D.M.YYYY", date!(2024 - 02 - 01)),
            (["1/2/2024", "15/12/2024"], "D/M/YYYY", date!(2024 - 02 - 01)),
            (["1/2/2024", "12/15/2024"], "M/D/YYYY", date!(2024 - 01 - 02)),
            (["2024-2-1", "2024-12-15"], "YYYY-M-D", date!(2024 - 02 - 01)),
        ];

        for (values, want_pattern, want_first) in cases {
            let format = detect_format(&values).unwrap();

            assert_eq!(format.pattern, want_pattern, "values {values:?}");
            assert_eq!(format.parse(values[0]), Some(want_first), "values {values:?}");
        }
    }

    #[test]
    fn padded_layouts_win_when_every_value_is_padded() {
        let format = detect_format(&["01.02.2024", "15.12.2024"]).unwrap();

        assert_eq!(format.pattern, "DD.MM.YYYY");
    }

    #[test]
    fn mixed_formats_cannot_be_detected() {
        assert!(detect_format(&["2024-01-31", "31.01.2024"]).is_none());
        assert!(detect_format(&["yesterday"]).is_none());
    }
}
