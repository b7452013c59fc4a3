//! Splitting rows by amount and summarising the result.

use std::collections::HashSet;

use super::TransactionRow;

/// The amounts the user wants to see.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AmountSelection {
    /// No amounts were picked, so every amount is included.
    #[default]
    All,
    /// Only these amounts are included. Never empty.
    Specific(Vec<f64>),
}

impl AmountSelection {
    /// Build a selection from the picked amounts, where picking nothing means [AmountSelection::All].
    pub fn from_amounts(mut amounts: Vec<f64>) -> Self {
        amounts.retain(|amount| amount.is_finite());
        amounts.sort_by(f64::total_cmp);
        amounts.dedup();

        if amounts.is_empty() {
            Self::All
        } else {
            Self::Specific(amounts)
        }
    }

    /// Whether `amount` was picked. A missing amount is never picked.
    ///
    /// Every present amount is included by [AmountSelection::All].
    pub fn includes(&self, amount: Option<f64>) -> bool {
        match (self, amount) {
            (_, None) => false,
            (Self::All, Some(_)) => true,
            (Self::Specific(amounts), Some(amount)) => amounts.contains(&amount),
        }
    }

    /// Drop picked amounts that are no longer on offer.
    ///
    /// If none of the picked amounts are on offer the selection resets to
    /// [AmountSelection::All], the same as a freshly rendered amount picker.
    pub fn restrict_to(self, available: &[f64]) -> Self {
        match self {
            Self::All => Self::All,
            Self::Specific(amounts) => Self::from_amounts(
                amounts
                    .into_iter()
                    .filter(|amount| available.contains(amount))
                    .collect(),
            ),
        }
    }

    /// Whether `amount` was explicitly picked, for checking its box in the amount picker.
    pub fn is_selected(&self, amount: f64) -> bool {
        match self {
            Self::All => false,
            Self::Specific(amounts) => amounts.contains(&amount),
        }
    }
}

/// The distinct amounts present in `dataset`, smallest first.
pub fn available_amounts(dataset: &[TransactionRow]) -> Vec<f64> {
    let mut amounts: Vec<f64> = dataset.iter().filter_map(|row| row.amount).collect();
    amounts.sort_by(f64::total_cmp);
    amounts.dedup();
    amounts
}

/// Count, total and average of a table's amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// The number of rows, including rows with a missing amount.
    pub count: usize,
    /// The sum of the present amounts, `None` if no amount is present.
    pub total: Option<f64>,
    /// The mean of the present amounts, `None` if no amount is present.
    pub average: Option<f64>,
}

impl Summary {
    /// Summarise the amounts of `rows`.
    pub fn of(rows: &[TransactionRow]) -> Self {
        let amounts: Vec<f64> = rows.iter().filter_map(|row| row.amount).collect();

        let (total, average) = if amounts.is_empty() {
            (None, None)
        } else {
            let total: f64 = amounts.iter().sum();
            (Some(total), Some(total / amounts.len() as f64))
        };

        Self {
            count: rows.len(),
            total,
            average,
        }
    }
}

/// The result of splitting rows by amount.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// Rows with a picked amount.
    pub filtered: Vec<TransactionRow>,
    /// Rows from the senders in `filtered` with amounts that were not picked.
    pub other: Vec<TransactionRow>,
    /// The summary of `filtered`.
    pub filtered_summary: Summary,
    /// The summary of `other`.
    pub other_summary: Summary,
}

/// Split `dataset` into the rows with picked amounts and the other rows of
/// the same senders.
///
/// With [AmountSelection::All] every row is in `filtered` and `other` is
/// empty. If `collapse_unique` is set, `filtered` keeps only the most recent
/// row of each sender; `other` is not collapsed.
pub fn partition_by_amount(
    dataset: &[TransactionRow],
    selection: &AmountSelection,
    collapse_unique: bool,
) -> Partition {
    let (filtered, other) = match selection {
        AmountSelection::All => (dataset.to_vec(), Vec::new()),
        AmountSelection::Specific(_) => {
            let filtered: Vec<TransactionRow> = dataset
                .iter()
                .filter(|row| selection.includes(row.amount))
                .cloned()
                .collect();
            let senders: HashSet<&str> = filtered
                .iter()
                .map(|row| row.sender_name.as_str())
                .collect();
            let other = dataset
                .iter()
                .filter(|row| {
                    senders.contains(row.sender_name.as_str()) && !selection.includes(row.amount)
                })
                .cloned()
                .collect();

            (filtered, other)
        }
    };

    let filtered = if collapse_unique {
        collapse_to_unique_sender(filtered)
    } else {
        filtered
    };

    Partition {
        filtered_summary: Summary::of(&filtered),
        other_summary: Summary::of(&other),
        filtered,
        other,
    }
}

/// Keep the most recent row of each sender, most recent first.
///
/// Rows from the same day keep their original order, so the first of them wins.
pub fn collapse_to_unique_sender(mut rows: Vec<TransactionRow>) -> Vec<TransactionRow> {
    rows.sort_by(|a, b| b.transaction_day.cmp(&a.transaction_day));

    let mut seen = HashSet::new();
    rows.retain(|row| seen.insert(row.sender_name.clone()));
    rows
}
