//! The page for editing an existing transaction.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    endpoints::{self, format_endpoint},
    gateway::{Credential, GatewayClient},
    transaction::{
        core::TransactionId,
        create_page::transaction_form_page,
        form::{FormAction, RawTransactionForm, ValidationErrors, transaction_form},
    },
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    pub gateway: GatewayClient,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
        }
    }
}

/// Renders the form for editing a transaction, filled in with its current values.
///
/// The form is only rendered once the transaction has been fetched. A missing
/// transaction gives the 404 page.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Extension(credential): Extension<Credential>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let transaction = match state
        .gateway
        .get_transaction(&credential, transaction_id)
        .await
    {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::error!("Could not get transaction {transaction_id}: {error}");
            return error.into_response();
        }
    };

    let update_endpoint = format_endpoint(endpoints::TRANSACTION_API, transaction.id);
    let form = transaction_form(
        FormAction::Update {
            endpoint: &update_endpoint,
        },
        &RawTransactionForm::from(&transaction),
        &ValidationErrors::default(),
    );

    transaction_form_page("Edit Transaction", endpoints::TRANSACTIONS_VIEW, form).into_response()
}
