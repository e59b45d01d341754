//! The HTTP client for the remote Gateway.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    Error,
    endpoints::{
        GATEWAY_LOG_IN, GATEWAY_SIGN_UP, GATEWAY_TRANSACTION, GATEWAY_TRANSACTIONS,
        format_endpoint,
    },
    gateway::Credential,
    transaction::{Transaction, TransactionFormData, TransactionId},
};

/// A typed client for the Gateway's transaction and auth APIs.
///
/// Cloning is cheap, clones share one connection pool.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    /// The base URL without a trailing slash, e.g. "http://localhost:5000".
    base_url: String,
}

/// The account details returned by the Gateway after logging in or signing up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatewayUser {
    /// The Gateway's user ID.
    pub id: i64,
    /// The name chosen at sign up.
    pub username: String,
}

/// A successful log in or sign up.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// The bearer credential for later requests.
    pub token: Credential,
    /// The account the credential belongs to.
    pub user: GatewayUser,
}

/// The body of a log in request.
#[derive(Debug, Serialize)]
pub struct LogInRequest<'a> {
    /// The account email.
    pub email: &'a str,
    /// The account password.
    pub password: &'a str,
}

/// The body of a sign up request.
#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    /// The name to display for the account.
    pub username: &'a str,
    /// The account email.
    pub email: &'a str,
    /// The account password.
    pub password: &'a str,
}

/// The Gateway reports failures as `{"message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: Option<String>,
}

impl GatewayClient {
    /// Create a client for the Gateway at `base_url`.
    ///
    /// Every request fails with [Error::GatewayRequest] if it takes longer than `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidGatewayUrl] if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = base_url.trim().trim_end_matches('/');
        let url = Url::parse(base_url)
            .map_err(|error| Error::InvalidGatewayUrl(format!("{base_url}: {error}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidGatewayUrl(format!(
                "{base_url}: the scheme must be http or https"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::GatewayRequest(error.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transaction_url(&self, id: TransactionId) -> String {
        self.url(&format_endpoint(GATEWAY_TRANSACTION, id))
    }

    /// Get every transaction of the user, newest first.
    pub async fn list_transactions(&self, token: &Credential) -> Result<Vec<Transaction>, Error> {
        tracing::debug!("Listing transactions");
        let request = self
            .http
            .get(self.url(GATEWAY_TRANSACTIONS))
            .bearer_auth(token.as_str());

        send_json(request).await
    }

    /// Get a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if the transaction does not exist.
    pub async fn get_transaction(
        &self,
        token: &Credential,
        id: TransactionId,
    ) -> Result<Transaction, Error> {
        tracing::debug!("Getting transaction {id}");
        let request = self
            .http
            .get(self.transaction_url(id))
            .bearer_auth(token.as_str());

        send_json(request).await
    }

    /// Create a transaction and return it with its new ID.
    pub async fn create_transaction(
        &self,
        token: &Credential,
        form: &TransactionFormData,
    ) -> Result<Transaction, Error> {
        tracing::debug!("Creating transaction");
        let request = self
            .http
            .post(self.url(GATEWAY_TRANSACTIONS))
            .bearer_auth(token.as_str())
            .json(form);

        send_json(request).await
    }

    /// Replace the editable fields of a transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if the transaction does not exist.
    pub async fn update_transaction(
        &self,
        token: &Credential,
        id: TransactionId,
        form: &TransactionFormData,
    ) -> Result<Transaction, Error> {
        tracing::debug!("Updating transaction {id}");
        let request = self
            .http
            .put(self.transaction_url(id))
            .bearer_auth(token.as_str())
            .json(form);

        send_json(request).await
    }

    /// Delete a transaction.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if the transaction does not exist.
    pub async fn delete_transaction(
        &self,
        token: &Credential,
        id: TransactionId,
    ) -> Result<(), Error> {
        tracing::debug!("Deleting transaction {id}");
        let request = self
            .http
            .delete(self.transaction_url(id))
            .bearer_auth(token.as_str());

        send(request).await.map(|_| ())
    }

    /// Exchange an email and password for a credential.
    ///
    /// # Errors
    ///
    /// Returns [Error::Unauthorized] with the Gateway's message if the credentials are wrong.
    pub async fn log_in(&self, body: &LogInRequest<'_>) -> Result<AuthSession, Error> {
        let request = self.http.post(self.url(GATEWAY_LOG_IN)).json(body);

        send_json(request).await
    }

    /// Create an account and return a credential for it.
    ///
    /// # Errors
    ///
    /// Returns [Error::GatewayResponse] with status 409 if the email is already registered.
    pub async fn sign_up(&self, body: &SignUpRequest<'_>) -> Result<AuthSession, Error> {
        let request = self.http.post(self.url(GATEWAY_SIGN_UP)).json(body);

        send_json(request).await
    }
}

/// Send `request` and map any non-success status to an [Error].
async fn send(request: RequestBuilder) -> Result<reqwest::Response, Error> {
    let response = request.send().await.map_err(|error| {
        tracing::error!("Could not reach the gateway: {error}");
        Error::GatewayRequest(error.to_string())
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);

    match status {
        StatusCode::UNAUTHORIZED => Err(Error::Unauthorized(message)),
        StatusCode::NOT_FOUND => Err(Error::NotFound),
        status => {
            tracing::error!("The gateway responded with {status}: {message:?}");
            Err(Error::GatewayResponse {
                status: status.as_u16(),
                message,
            })
        }
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, Error> {
    let response = send(request).await?;

    response.json::<T>().await.map_err(|error| {
        tracing::error!("Could not decode the gateway response: {error}");
        Error::InvalidGatewayResponse(error.to_string())
    })
}
