//! The transaction form shared by the create and edit pages, and its validation.

use std::collections::BTreeMap;

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints,
    gateway::wire::{ISO_DATE, date::parse_date},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::core::{CATEGORIES, Transaction, TransactionFormData, TransactionType},
};

pub const AMOUNT_ERROR: &str = "Amount must be greater than 0";
pub const DESCRIPTION_ERROR: &str = "Description is required";
pub const CATEGORY_ERROR: &str = "Category is required";
pub const DATE_REQUIRED_ERROR: &str = "Date is required";
pub const DATE_INVALID_ERROR: &str = "Date must be a valid date";

/// Field name to message for every field that failed validation.
#[derive(Debug, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The form exactly as the browser sent it.
///
/// Amount and date stay as text so that bad input can be reported next to the field
/// instead of rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransactionForm {
    #[serde(rename = "type")]
    pub type_: TransactionType,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
}

impl RawTransactionForm {
    /// Check every field, returning the data for the Gateway or all the problems found.
    pub fn validate(&self) -> Result<TransactionFormData, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount > 0.0);
        if amount.is_none() {
            errors.insert("amount", AMOUNT_ERROR);
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert("description", DESCRIPTION_ERROR);
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.insert("category", CATEGORY_ERROR);
        }

        let date = self.date.trim();
        let date = if date.is_empty() {
            errors.insert("date", DATE_REQUIRED_ERROR);
            None
        } else {
            let parsed = parse_date(date);
            if parsed.is_none() {
                errors.insert("date", DATE_INVALID_ERROR);
            }
            parsed
        };

        match (amount, date) {
            (Some(amount), Some(date)) if errors.is_empty() => Ok(TransactionFormData {
                amount,
                category: category.to_owned(),
                description: description.to_owned(),
                date,
                type_: self.type_,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Transaction> for RawTransactionForm {
    fn from(transaction: &Transaction) -> Self {
        Self {
            type_: transaction.type_,
            amount: format!("{:.2}", transaction.amount),
            category: transaction.category.clone(),
            description: transaction.description.clone(),
            date: transaction.date.format(ISO_DATE).unwrap_or_default(),
        }
    }
}

/// Where the form is sent and how it is labelled.
pub enum FormAction<'a> {
    Create,
    Update { endpoint: &'a str },
}

/// Render the complete transaction form.
///
/// The form replaces itself when re-rendered with validation errors, and Gateway
/// failures are shown in the alert container.
pub fn transaction_form(
    action: FormAction<'_>,
    values: &RawTransactionForm,
    errors: &ValidationErrors,
) -> Markup {
    let (title, button_text, hx_post, hx_put) = match action {
        FormAction::Create => (
            "New Transaction",
            "Add Transaction",
            Some(endpoints::TRANSACTIONS_API),
            None,
        ),
        FormAction::Update { endpoint } => {
            ("Edit Transaction", "Update Transaction", None, Some(endpoint))
        }
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { (title) }

            (transaction_form_fields(values, errors))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                (button_text)
            }
        }
    }
}

fn field_error(errors: &ValidationErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p class=(FORM_ERROR_STYLE) { (message) }
        }
    }
}

fn transaction_form_fields(values: &RawTransactionForm, errors: &ValidationErrors) -> Markup {
    let is_expense = matches!(values.type_, TransactionType::Expense);

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div
                {
                    input
                        name="type"
                        id="transaction-type-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label for="transaction-type-expense" class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div
                {
                    input
                        name="type"
                        id="transaction-type-income"
                        type="radio"
                        value="income"
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label for="transaction-type-income" class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.00"
                required
                autofocus
                value=(values.amount)
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors, "amount"))
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                required
                value=(values.description)
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors, "description"))
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[values.category.is_empty()] { "Select a category" }

                @for category in CATEGORIES {
                    option value=(category) selected[values.category == category] { (category) }
                }
            }

            (field_error(errors, "category"))
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                required
                value=(values.date)
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors, "date"))
        }
    }
}
