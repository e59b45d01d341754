use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    gateway::{Credential, GatewayClient},
    transaction::core::TransactionId,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub gateway: GatewayClient,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// On success the response replaces the table row with nothing and shows a success alert
/// out of band. On failure the row is left alone and an error alert is shown.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(credential): Extension<Credential>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state
        .gateway
        .delete_transaction(&credential, transaction_id)
        .await
    {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(()) => Html(
            Alert::success("Transaction deleted successfully", "")
                .into_oob_html()
                .into_string(),
        )
        .into_response(),
        Err(Error::NotFound) => {
            tracing::error!("Tried to delete missing transaction {transaction_id}");
            Error::DeleteMissingTransaction.into_alert_response()
        }
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
