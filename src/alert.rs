//! Dismissible notifications shown after htmx requests.
//!
//! Error alerts are swapped into the page's alert container through the
//! `hx-target-error` attribute. Success alerts travel out of band next to
//! the main response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// A short message with optional details.
pub struct Alert<'a> {
    pub kind: AlertKind,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            kind: AlertKind::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            kind: AlertKind::Error,
            message,
            details,
        }
    }

    pub fn into_html(self) -> Markup {
        let style = match self.kind {
            AlertKind::Success => {
                "p-4 rounded-lg shadow-lg border text-green-800 bg-green-50 \
                border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
            }
            AlertKind::Error => {
                "p-4 rounded-lg shadow-lg border text-red-800 bg-red-50 \
                border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            }
        };

        html! {
            div role="alert" data-alert-kind=(self.kind.as_str()) class=(style)
            {
                div class="flex items-start justify-between gap-3"
                {
                    div
                    {
                        p class="font-semibold" { (self.message) }

                        @if !self.details.is_empty() {
                            p class="text-sm mt-1" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        onclick="this.closest('[role=alert]').remove()"
                        class="text-lg leading-none opacity-70 hover:opacity-100"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Wrap the alert so htmx swaps it into the alert container regardless of the request's target.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="innerHTML"
            {
                (self.into_html())
            }
        }
    }
}

impl AlertKind {
    fn as_str(self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
        }
    }
}

/// Respond with just the alert markup and `status`.
pub fn render_alert(status: StatusCode, alert: Alert) -> Response {
    (status, alert.into_html()).into_response()
}

#[cfg(test)]
mod alert_tests {
    use axum::http::StatusCode;
    use scraper::{Html, Selector};

    use crate::test_utils::parse_html_fragment;

    use super::{Alert, render_alert};

    #[tokio::test]
    async fn renders_error_alert_with_status() {
        let response = render_alert(
            StatusCode::NOT_FOUND,
            Alert::error("Failed to delete transaction", "Not found"),
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No alert found");
        assert_eq!(alert.value().attr("data-alert-kind"), Some("error"));
        let text = alert.text().collect::<String>();
        assert!(text.contains("Failed to delete transaction"));
        assert!(text.contains("Not found"));
    }

    #[test]
    fn oob_alert_targets_alert_container() {
        let markup = Alert::success("Transaction deleted successfully", "").into_oob_html();
        let html = Html::parse_fragment(&markup.into_string());

        let container = html
            .select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("No alert container found");
        assert_eq!(container.value().attr("hx-swap-oob"), Some("innerHTML"));
        assert_eq!(
            container
                .select(&Selector::parse("p").unwrap())
                .count(),
            1,
            "want only the message paragraph when details are empty"
        );
    }
}
