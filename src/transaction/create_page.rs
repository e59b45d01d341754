//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    gateway::wire::ISO_DATE,
    html::{FORM_CONTAINER_STYLE, LINK_STYLE, base},
    navigation::NavBar,
    timezone::{get_local_offset, local_today},
    transaction::{
        core::TransactionType,
        form::{FormAction, RawTransactionForm, ValidationErrors, transaction_form},
    },
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Wrap a transaction form in the page layout shared by the create and edit pages.
pub fn transaction_form_page(title: &str, active_endpoint: &str, form: Markup) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            (form)

            a href=(endpoints::TRANSACTIONS_VIEW) class={ "mt-4 " (LINK_STYLE) }
            {
                "Cancel"
            }
        }
    };

    base(title, &[], &content)
}

/// Renders the page for creating a transaction, with today's date filled in.
pub async fn get_new_transaction_page(State(state): State<NewTransactionPageState>) -> Response {
    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let today = local_today(local_offset)
        .format(ISO_DATE)
        .unwrap_or_default();
    let values = RawTransactionForm {
        type_: TransactionType::Expense,
        amount: String::new(),
        category: String::new(),
        description: String::new(),
        date: today,
    };
    let form = transaction_form(FormAction::Create, &values, &ValidationErrors::default());

    transaction_form_page("Add Transaction", endpoints::NEW_TRANSACTION_VIEW, form).into_response()
}
