//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The Gateway checks the email and password and issues the credential kept in the cookie.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error, GENERIC_ERROR_MESSAGE,
    auth::{normalize_redirect_url, set_auth_cookie},
    endpoints,
    gateway::{GatewayClient, LogInRequest},
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, TextInput, auth_card, base, loading_spinner},
};

/// Shown when the Gateway rejects the log-in without giving a reason.
pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Invalid email or password";

fn log_in_form(email: &str, error_message: Option<&str>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            (TextInput {
                name: "email",
                label: "Email",
                type_: "email",
                value: email,
                placeholder: "you@example.com",
                autofocus: true,
                error_message: None,
            }.into_html())

            (TextInput {
                name: "password",
                label: "Password",
                type_: "password",
                value: "",
                placeholder: "••••••••",
                autofocus: false,
                error_message,
            }.into_html())

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                a href=(endpoints::SIGN_UP_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Sign up here"
                }
            }
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let log_in_form = log_in_form("", None, redirect_url.as_deref());
    let content = auth_card("Log in to your account", &log_in_form);

    base("Log In", &[], &content).into_response()
}

/// The state needed to perform a log-in or sign-up.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which the credential cookie is kept.
    pub cookie_duration: Duration,
    /// The client for the Gateway that checks the email and password.
    pub gateway: GatewayClient,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            gateway: state.gateway.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the credential cookie is set and the client is redirected
/// to the requested page or the dashboard. Otherwise, the form is returned with an error
/// message explaining the problem.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();

    let session = match state
        .gateway
        .log_in(&LogInRequest {
            email: &user_data.email,
            password: &user_data.password,
        })
        .await
    {
        Ok(session) => session,
        Err(
            Error::Unauthorized(message)
            | Error::GatewayResponse {
                status: 400..=499,
                message,
            },
        ) => {
            let message = message.as_deref().unwrap_or(INVALID_CREDENTIALS_ERROR_MSG);
            return log_in_form(&user_data.email, Some(message), redirect_url).into_response();
        }
        Err(error) => {
            tracing::error!("Could not log in: {error}");
            return log_in_form(&user_data.email, Some(GENERIC_ERROR_MESSAGE), redirect_url)
                .into_response();
        }
    };

    tracing::debug!("User {} logged in", session.user.id);
    let redirect_url = redirect_url.unwrap_or(endpoints::DASHBOARD_VIEW);
    let jar = set_auth_cookie(jar, session.token, state.cookie_duration);

    (
        StatusCode::SEE_OTHER,
        HxRedirect(redirect_url.to_owned()),
        jar,
    )
        .into_response()
}

/// The query string of the log-in page.
#[derive(Deserialize)]
pub struct RedirectQuery {
    /// Where to send the user after logging in.
    pub redirect_url: Option<String>,
}

/// The raw data entered by the user in the log-in form.
///
/// Nothing is validated here, the Gateway checks the email and password.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,

    /// Password entered during log-in.
    pub password: String,

    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}
