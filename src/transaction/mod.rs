//! Transaction management.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` record exchanged with the Gateway
//! - Filtering the transaction list by type and search term
//! - View handlers and htmx endpoints for listing, creating, editing and deleting

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod filter;
mod form;
mod transactions_page;
mod view;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{
    CATEGORIES, Transaction, TransactionFormData, TransactionId, TransactionType,
    remove_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use filter::{TransactionFilter, TypeFilter, filter_transactions};
pub use transactions_page::get_transactions_page;
pub(crate) use view::{display_date, signed_amount};
