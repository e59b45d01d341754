//! Dashboard HTTP handler and page rendering.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    dashboard::{
        aggregation::{DashboardSummary, summarize},
        cards::{recent_transactions_view, summary_cards_view},
        charts::{charts_script, charts_view, dashboard_charts},
    },
    endpoints,
    gateway::{Credential, GatewayClient},
    html::{ECHARTS_SCRIPT, HeadElement, base},
    navigation::NavBar,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The client for fetching the user's transactions.
    pub gateway: GatewayClient,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
        }
    }
}

/// Display a page with an overview of the user's finances.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(credential): Extension<Credential>,
) -> Response {
    let transactions = match state.gateway.list_transactions(&credential).await {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("Could not get transactions for the dashboard: {error}");
            return error.into_response();
        }
    };

    let summary = summarize(&transactions);

    dashboard_view(&summary).into_response()
}

fn dashboard_view(summary: &DashboardSummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let charts = dashboard_charts(summary);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h1 class="w-full text-2xl font-bold mb-6" { "Dashboard" }

            (summary_cards_view(summary))

            (charts_view(&charts))

            (recent_transactions_view(&summary.recent))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}
