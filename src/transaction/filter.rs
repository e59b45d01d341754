//! Narrowing the transaction list by type and a free-text search term.

use serde::Deserialize;

use crate::transaction::{Transaction, TransactionType};

/// Which transaction types to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// Keep income and expenses.
    #[default]
    All,
    /// Keep only income.
    Income,
    /// Keep only expenses.
    Expense,
}

impl TypeFilter {
    /// Parse a query-string value. Unknown values select [TypeFilter::All].
    pub fn from_query(value: &str) -> Self {
        match value {
            "income" => TypeFilter::Income,
            "expense" => TypeFilter::Expense,
            _ => TypeFilter::All,
        }
    }

    /// The query-string value for this filter.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }

    fn matches(self, type_: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => type_ == TransactionType::Income,
            TypeFilter::Expense => type_ == TransactionType::Expense,
        }
    }
}

impl<'de> Deserialize<'de> for TypeFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(TypeFilter::from_query(&value))
    }
}

/// The criteria for [filter_transactions].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionFilter {
    /// Which transaction types to keep.
    #[serde(default, rename = "type")]
    pub type_filter: TypeFilter,
    /// Text to look for in the description or category. Empty matches everything.
    #[serde(default)]
    pub search: String,
}

impl TransactionFilter {
    /// Whether any criterion narrows the list.
    pub fn is_active(&self) -> bool {
        self.type_filter != TypeFilter::All || !self.search.is_empty()
    }
}

/// Keep the transactions that match `filter`, preserving their relative order.
///
/// The search is a case-insensitive substring match against the description
/// and the category. The term is matched as given, including any whitespace.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    let search = filter.search.to_lowercase();

    transactions
        .iter()
        .filter(|transaction| filter.type_filter.matches(transaction.type_))
        .filter(|transaction| {
            search.is_empty()
                || transaction.description.to_lowercase().contains(&search)
                || transaction.category.to_lowercase().contains(&search)
        })
        .cloned()
        .collect()
}
