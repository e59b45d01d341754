//! Defines the endpoint for updating a transaction.

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    gateway::{Credential, GatewayClient},
    transaction::{
        core::TransactionId,
        form::{FormAction, RawTransactionForm, transaction_form},
    },
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub gateway: GatewayClient,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
        }
    }
}

/// A route handler for updating a transaction, redirects to transactions view on success.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Extension(credential): Extension<Credential>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<RawTransactionForm>,
) -> Response {
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            let endpoint = format_endpoint(endpoints::TRANSACTION_API, transaction_id);
            return transaction_form(
                FormAction::Update {
                    endpoint: &endpoint,
                },
                &form,
                &errors,
            )
            .into_response();
        }
    };

    match state
        .gateway
        .update_transaction(&credential, transaction_id, &data)
        .await
    {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::NotFound) => {
            tracing::error!("Tried to update missing transaction {transaction_id}");
            Error::UpdateMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
