use scraper::ElementRef;
use time::macros::date;

use crate::transaction::{Transaction, TransactionId, TransactionType};

/// A transaction dated 2024-01-15 with no creation time.
pub fn transaction(
    id: TransactionId,
    amount: f64,
    type_: TransactionType,
    category: &str,
    description: &str,
) -> Transaction {
    Transaction {
        id,
        amount,
        category: category.to_owned(),
        description: description.to_owned(),
        date: date!(2024 - 01 - 15),
        type_,
        created_at: None,
    }
}

/// The Salary/Lunch/Dinner fixture used across the aggregation and filter tests.
pub fn salary_lunch_dinner() -> Vec<Transaction> {
    vec![
        transaction(1, 100.0, TransactionType::Income, "Income", "Salary"),
        transaction(2, 40.0, TransactionType::Expense, "Food", "Lunch"),
        transaction(3, 60.0, TransactionType::Expense, "Food", "Dinner"),
    ]
}

#[track_caller]
pub fn assert_transaction_type_inputs(form: &ElementRef, checked_type: Option<&str>) {
    let selector = scraper::Selector::parse("input[type=radio][name=type]").unwrap();
    let inputs = form.select(&selector).collect::<Vec<_>>();
    assert_eq!(
        inputs.len(),
        2,
        "want 2 transaction type inputs, got {}",
        inputs.len()
    );

    let checked_count = inputs
        .iter()
        .filter(|input| input.value().attr("checked").is_some())
        .count();
    assert_eq!(
        checked_count, 1,
        "want exactly one transaction type input checked, got {checked_count}"
    );

    if let Some(checked_type) = checked_type {
        let expected_checked = inputs.iter().any(|input| {
            input.value().attr("value") == Some(checked_type)
                && input.value().attr("checked").is_some()
        });
        assert!(
            expected_checked,
            "want {checked_type} to be checked, but it was not"
        );
    }
}
