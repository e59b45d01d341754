//! Defines the endpoint for creating a new transaction.

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState, endpoints,
    gateway::{Credential, GatewayClient},
    transaction::form::{FormAction, RawTransactionForm, transaction_form},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub gateway: GatewayClient,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
///
/// Invalid input re-renders the form with the problems listed next to each field, without
/// contacting the Gateway.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(credential): Extension<Credential>,
    Form(form): Form<RawTransactionForm>,
) -> Response {
    let data = match form.validate() {
        Ok(data) => data,
        Err(errors) => {
            return transaction_form(FormAction::Create, &form, &errors).into_response();
        }
    };

    if let Err(error) = state.gateway.create_transaction(&credential, &data).await {
        tracing::error!("could not create transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
