//! The sign-up page and the endpoint that creates an account on the Gateway.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{log_in::LogInState, set_auth_cookie},
    endpoints,
    gateway::SignUpRequest,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_ERROR_STYLE, LINK_STYLE, TextInput, auth_card, base,
        loading_spinner,
    },
};

pub const PASSWORDS_DO_NOT_MATCH_MSG: &str = "Passwords do not match";
pub const SIGN_UP_FAILED_MSG: &str = "Failed to create account. Please try again.";

fn sign_up_form(username: &str, email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::SIGN_UP_API)
            hx-target="this"
            hx-swap="outerHTML"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(error_message) = error_message {
                p role="alert" class=(FORM_ERROR_STYLE) { (error_message) }
            }

            (TextInput {
                name: "username",
                label: "Username",
                type_: "text",
                value: username,
                placeholder: "Choose a username",
                autofocus: true,
                error_message: None,
            }.into_html())

            (TextInput {
                name: "email",
                label: "Email",
                type_: "email",
                value: email,
                placeholder: "you@example.com",
                autofocus: false,
                error_message: None,
            }.into_html())

            (TextInput {
                name: "password",
                label: "Password",
                type_: "password",
                value: "",
                placeholder: "Create a password",
                autofocus: false,
                error_message: None,
            }.into_html())

            (TextInput {
                name: "confirm_password",
                label: "Confirm Password",
                type_: "password",
                value: "",
                placeholder: "Confirm your password",
                autofocus: false,
                error_message: None,
            }.into_html())

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Create account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Already have an account? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the sign-up page.
pub async fn get_sign_up_page() -> Response {
    let form = sign_up_form("", "", None);
    let content = auth_card("Create your account", &form);

    base("Sign Up", &[], &content).into_response()
}

/// The raw data entered by the user in the sign-up form.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignUpData {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Create an account on the Gateway and log the new user in.
///
/// The passwords are compared before the Gateway is contacted. On failure the form is
/// returned with the Gateway's message, or a generic one.
pub async fn post_sign_up(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<SignUpData>,
) -> Response {
    if user_data.password != user_data.confirm_password {
        return sign_up_form(
            &user_data.username,
            &user_data.email,
            Some(PASSWORDS_DO_NOT_MATCH_MSG),
        )
        .into_response();
    }

    let session = match state
        .gateway
        .sign_up(&SignUpRequest {
            username: &user_data.username,
            email: &user_data.email,
            password: &user_data.password,
        })
        .await
    {
        Ok(session) => session,
        Err(error) => {
            tracing::error!("Could not create account: {error}");
            let message = match &error {
                Error::Unauthorized(Some(message))
                | Error::GatewayResponse {
                    message: Some(message),
                    ..
                } => message.as_str(),
                _ => SIGN_UP_FAILED_MSG,
            };

            return sign_up_form(&user_data.username, &user_data.email, Some(message))
                .into_response();
        }
    };

    tracing::info!("Created account for user {}", session.user.username);
    let jar = set_auth_cookie(jar, session.token, state.cookie_duration);

    (
        StatusCode::SEE_OTHER,
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        jar,
    )
        .into_response()
}
