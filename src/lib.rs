//! Spendwise is a web client for tracking personal income and expenses.
//!
//! This library serves HTML pages and htmx endpoints directly. It keeps no data
//! of its own: every read and write goes to a remote Gateway over HTTP, using
//! the bearer credential stored in the user's private cookie.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use axum_htmx::HxRedirect;
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
mod dashboard;
mod endpoints;
mod gateway;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{CategoryTotal, DashboardSummary, summarize};
pub use gateway::{Credential, GatewayClient};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    CATEGORIES, Transaction, TransactionFilter, TransactionFormData, TransactionId,
    TransactionType, TypeFilter, filter_transactions, remove_transaction,
};

use crate::{
    alert::{Alert, render_alert},
    auth::invalidate_auth_cookie,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// The message shown when the Gateway gives no reason for a failure.
pub(crate) const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The Gateway rejected the credential, or the request carried none.
    ///
    /// Holds the Gateway's message, if it sent one.
    #[error("the gateway rejected the credential: {0:?}")]
    Unauthorized(Option<String>),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The Gateway could not be reached, or the request timed out.
    #[error("could not send the request to the gateway: {0}")]
    GatewayRequest(String),

    /// The Gateway answered with an error status other than 401 or 404.
    #[error("the gateway responded with status {status}: {message:?}")]
    GatewayResponse {
        /// The HTTP status code of the response.
        status: u16,
        /// The `message` field of the JSON body, if present.
        message: Option<String>,
    },

    /// The Gateway's response body could not be decoded.
    #[error("could not decode the gateway response: {0}")]
    InvalidGatewayResponse(String),

    /// The configured Gateway URL is not an absolute http(s) URL.
    #[error("invalid gateway URL {0}")]
    InvalidGatewayUrl(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Tried to delete a transaction that the Gateway does not have
    #[error("tried to delete a transaction that does not exist")]
    DeleteMissingTransaction,

    /// Tried to update a transaction that the Gateway does not have
    #[error("tried to update a transaction that does not exist")]
    UpdateMissingTransaction,
}

impl Error {
    /// The text to show the user for this error.
    ///
    /// The Gateway's own message is preferred, falling back to [GENERIC_ERROR_MESSAGE].
    pub(crate) fn user_message(&self) -> &str {
        match self {
            Error::Unauthorized(Some(message))
            | Error::GatewayResponse {
                message: Some(message),
                ..
            } => message.as_str(),
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    /// Convert the error into an alert for htmx endpoints.
    ///
    /// A rejected credential removes the cookie and redirects to the log-in page instead.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::Unauthorized(_) => (
                invalidate_auth_cookie(CookieJar::new()),
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                StatusCode::OK,
            )
                .into_response(),
            Error::UpdateMissingTransaction => render_alert(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                ),
            ),
            Error::DeleteMissingTransaction => render_alert(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Failed to delete transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted.",
                ),
            ),
            Error::NotFound => render_alert(
                StatusCode::NOT_FOUND,
                Alert::error("Not found", "The transaction could not be found."),
            ),
            Error::GatewayResponse { status, .. } => render_alert(
                error_status(status),
                Alert::error("Something went wrong", self.user_message()),
            ),
            Error::GatewayRequest(_) => render_alert(
                StatusCode::BAD_GATEWAY,
                Alert::error("Could not reach the server", GENERIC_ERROR_MESSAGE),
            ),
            Error::InvalidTimezoneError(timezone) => render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error("Invalid Timezone Settings", &invalid_timezone_fix(&timezone)),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_alert(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error("Something went wrong", GENERIC_ERROR_MESSAGE),
                )
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Unauthorized(_) => (
                invalidate_auth_cookie(CookieJar::new()),
                Redirect::to(endpoints::LOG_IN_VIEW),
            )
                .into_response(),
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                get_404_not_found_response()
            }
            Error::GatewayResponse { status, .. } => InternalServerError {
                status: error_status(status),
                description: "The transaction service reported an error",
                fix: self.user_message(),
            }
            .into_response(),
            Error::GatewayRequest(_) | Error::InvalidGatewayResponse(_) => InternalServerError {
                status: StatusCode::BAD_GATEWAY,
                description: "Could not reach the transaction service",
                fix: GENERIC_ERROR_MESSAGE,
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &invalid_timezone_fix(&timezone),
                ..Default::default()
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                InternalServerError::default().into_response()
            }
        }
    }
}

fn invalid_timezone_fix(timezone: &str) -> String {
    format!(
        "Could not get local timezone \"{timezone}\". Check your server settings and \
        ensure the timezone has been set to valid, canonical timezone string"
    )
}

/// Use the Gateway's status if it is an error status, otherwise 502 Bad Gateway.
fn error_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}
