//! Spending grouped by category, and transaction search.

use statement_core::Transaction;

/// Label used for expenses that carry no category
pub const OTHER_CATEGORY: &str = "Other";

/// Total spent in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    /// Absolute amount
    pub total: f64,
    pub transaction_count: usize,
}

/// Sum expenses per category, in the order categories first appear.
///
/// Credits are ignored; uncategorized expenses are counted under "Other".
pub fn spending_by_category(txns: &[Transaction]) -> Vec<CategorySpend> {
    let mut out: Vec<CategorySpend> = Vec::new();

    for t in txns.iter().filter(|t| t.is_expense()) {
        let category = t.category.as_deref().unwrap_or(OTHER_CATEGORY);
        match out.iter_mut().find(|c| c.category == category) {
            Some(c) => {
                c.total += t.abs_amount();
                c.transaction_count += 1;
            }
            None => out.push(CategorySpend {
                category: category.to_string(),
                total: t.abs_amount(),
                transaction_count: 1,
            }),
        }
    }

    out
}

/// Sum of all expenses (absolute)
pub fn total_spending(txns: &[Transaction]) -> f64 {
    txns.iter().filter(|t| t.is_expense()).map(|t| t.abs_amount()).sum()
}

/// Case-insensitive description filter. An empty term keeps everything.
pub fn search_transactions<'a>(txns: &'a [Transaction], term: &str) -> Vec<&'a Transaction> {
    let term = term.to_lowercase();
    txns.iter()
        .filter(|t| t.description.to_lowercase().contains(&term))
        .collect()
}
