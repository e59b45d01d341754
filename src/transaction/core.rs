//! The transaction record exchanged with the Gateway.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::gateway::wire;

/// The Gateway-assigned identifier of a transaction.
pub type TransactionId = i64;

/// The categories offered by the transaction form, in display order.
pub const CATEGORIES: [&str; 14] = [
    "Housing",
    "Transportation",
    "Food",
    "Utilities",
    "Insurance",
    "Healthcare",
    "Savings",
    "Personal",
    "Entertainment",
    "Education",
    "Clothing",
    "Gifts",
    "Income",
    "Other",
];

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// The lowercase value used on the wire and in forms.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The capitalised name for display.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense entry owned by the Gateway.
///
/// The amount is always positive, its direction is given by `type_`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// The Gateway-assigned ID.
    pub id: TransactionId,
    /// The value of the transaction, always greater than zero.
    #[serde(deserialize_with = "wire::amount::deserialize")]
    pub amount: f64,
    /// One of [CATEGORIES].
    pub category: String,
    /// Text detailing the transaction.
    pub description: String,
    /// The date the transaction happened.
    #[serde(deserialize_with = "wire::date::deserialize")]
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// When the Gateway stored the transaction.
    #[serde(default, deserialize_with = "wire::timestamp::deserialize")]
    pub created_at: Option<OffsetDateTime>,
}

/// The user-editable fields of a transaction, as sent to the Gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionFormData {
    /// The value of the transaction, always greater than zero.
    pub amount: f64,
    /// One of [CATEGORIES].
    pub category: String,
    /// Text detailing the transaction.
    pub description: String,
    /// The date the transaction happened.
    #[serde(serialize_with = "wire::date::serialize")]
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub type_: TransactionType,
}

impl From<&Transaction> for TransactionFormData {
    fn from(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount,
            category: transaction.category.clone(),
            description: transaction.description.clone(),
            date: transaction.date,
            type_: transaction.type_,
        }
    }
}

/// Remove the transaction with `id` from `transactions`, keeping the order of the rest.
///
/// Returns the removed transaction, or `None` if no transaction has `id`.
///
/// This is the in-memory counterpart of the delete flow in the browser, where the
/// deleted row is swapped out of the table instead of re-fetching the list. It is
/// part of the library API for callers that keep their own copy of the list.
pub fn remove_transaction(
    transactions: &mut Vec<Transaction>,
    id: TransactionId,
) -> Option<Transaction> {
    let index = transactions
        .iter()
        .position(|transaction| transaction.id == id)?;

    Some(transactions.remove(index))
}
