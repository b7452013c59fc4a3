//! Restricting rows to senders matching a list of name fragments.

use regex::{Regex, RegexBuilder};

use super::TransactionRow;

/// A set of literal, case-insensitive name fragments.
///
/// Fragments are never interpreted as regular expressions: "a.b" only matches
/// names containing "a.b".
#[derive(Debug, Clone)]
pub struct NameFilter {
    fragments: Vec<String>,
    pattern: Option<Regex>,
}

impl NameFilter {
    /// A filter that lets every row through.
    pub fn none() -> Self {
        Self {
            fragments: Vec::new(),
            pattern: None,
        }
    }

    /// Build a filter from comma separated user input, e.g. "ann, müller".
    ///
    /// Fragments are trimmed and empty fragments are dropped. If no fragments
    /// remain, the filter lets every row through.
    ///
    /// # Errors
    /// Returns an error if the combined pattern exceeds the regex size limit,
    /// which only happens for extremely long input.
    pub fn parse(input: &str) -> Result<Self, regex::Error> {
        let fragments: Vec<String> = input
            .split(',')
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_owned)
            .collect();

        if fragments.is_empty() {
            return Ok(Self::none());
        }

        let alternation = fragments
            .iter()
            .map(|fragment| regex::escape(fragment))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            fragments,
            pattern: Some(pattern),
        })
    }

    /// Whether any fragments were given.
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// The trimmed, non-empty fragments in input order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Whether `sender_name` contains any of the fragments.
    ///
    /// An inactive filter matches everything, including empty names.
    pub fn matches(&self, sender_name: &str) -> bool {
        match &self.pattern {
            Some(pattern) => !sender_name.trim().is_empty() && pattern.is_match(sender_name),
            None => true,
        }
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::none()
    }
}

/// Keep the rows whose sender matches `names`.
pub fn filter_by_name(dataset: &[TransactionRow], names: &NameFilter) -> Vec<TransactionRow> {
    if !names.is_active() {
        return dataset.to_vec();
    }

    dataset
        .iter()
        .filter(|row| names.matches(&row.sender_name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod name_filter_tests {
    use time::macros::date;

    use crate::transactions::TransactionRow;

    use super::{NameFilter, filter_by_name};

    fn row(sender_name: &str) -> TransactionRow {
        TransactionRow::new(sender_name, Some(1.0), date!(2024 - 01 - 01))
    }

    fn senders(rows: &[TransactionRow]) -> Vec<&str> {
        rows.iter().map(|row| row.sender_name.as_str()).collect()
    }

    #[test]
    fn matches_case_insensitive_substrings() {
        let dataset = vec![row("Anna Müller"), row("Ann Lee"), row("Susann"), row("An")];
        let names = NameFilter::parse("ann").unwrap();

        let filtered = filter_by_name(&dataset, &names);

        assert_eq!(senders(&filtered), ["Anna Müller", "Ann Lee", "Susann"]);
    }

    #[test]
    fn matches_any_fragment() {
        let dataset = vec![row("Anna Müller"), row("Bob Brown"), row("Carol King")];
        let names = NameFilter::parse(" MÜLLER ,carol").unwrap();

        let filtered = filter_by_name(&dataset, &names);

        assert_eq!(senders(&filtered), ["Anna Müller", "Carol King"]);
    }

    #[test]
    fn fragments_are_literal() {
        let dataset = vec![row("A.B Services"), row("AxB Services"), row("(Bracket) Ltd")];

        let dotted = NameFilter::parse("a.b").unwrap();
        assert_eq!(senders(&filter_by_name(&dataset, &dotted)), ["A.B Services"]);

        let bracketed = NameFilter::parse("(bracket").unwrap();
        assert_eq!(
            senders(&filter_by_name(&dataset, &bracketed)),
            ["(Bracket) Ltd"]
        );
    }

    #[test]
    fn empty_input_passes_everything_through() {
        let dataset = vec![row("Anna"), row("")];

        for input in ["", "   ", ", ,"] {
            let names = NameFilter::parse(input).unwrap();

            assert!(!names.is_active());
            assert_eq!(filter_by_name(&dataset, &names), dataset);
        }
    }

    #[test]
    fn empty_sender_never_matches() {
        let dataset = vec![row(""), row("  "), row("Anna")];
        let names = NameFilter::parse("a").unwrap();

        assert_eq!(senders(&filter_by_name(&dataset, &names)), ["Anna"]);
    }

    #[test]
    fn no_matches_gives_empty_result() {
        let dataset = vec![row("Anna")];
        let names = NameFilter::parse("zed").unwrap();

        assert!(filter_by_name(&dataset, &names).is_empty());
    }

    #[test]
    fn keeps_cleaned_fragments() {
        let names = NameFilter::parse(" ann ,, lee ").unwrap();

        assert_eq!(names.fragments(), ["ann", "lee"]);
    }
}
