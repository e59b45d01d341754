//! Dashboard module
//!
//! Provides an overview page with the user's balance, totals, charts and
//! most recent transactions.

mod aggregation;
mod cards;
mod charts;
mod handlers;

pub use aggregation::{CategoryTotal, DashboardSummary, summarize};
pub use handlers::get_dashboard_page;
