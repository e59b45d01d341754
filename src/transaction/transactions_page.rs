//! The page listing the user's transactions, with search and a type filter.

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;

use crate::{
    AppState,
    gateway::{Credential, GatewayClient},
    transaction::{
        filter::{TransactionFilter, filter_transactions},
        view::{transactions_table, transactions_view},
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    pub gateway: GatewayClient,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            gateway: state.gateway.clone(),
        }
    }
}

/// Render the transactions page.
///
/// Requests made by htmx, i.e. from the filter form, get only the table back.
pub async fn get_transactions_page(
    State(state): State<TransactionsState>,
    Extension(credential): Extension<Credential>,
    HxRequest(is_htmx_request): HxRequest,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let transactions = match state.gateway.list_transactions(&credential).await {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("Could not get transactions: {error}");

            return if is_htmx_request {
                error.into_alert_response()
            } else {
                error.into_response()
            };
        }
    };

    let transactions = filter_transactions(&transactions, &filter);

    if is_htmx_request {
        transactions_table(&transactions, &filter).into_response()
    } else {
        transactions_view(&transactions, &filter).into_response()
    }
}

#[cfg(test)]
mod transactions_page_tests {
    use axum::{
        Extension,
        extract::{Query, State},
        http::StatusCode,
    };
    use axum_htmx::HxRequest;
    use scraper::{Html, Selector};

    use crate::{
        endpoints,
        gateway::Credential,
        test_utils::{
            assert_valid_html, get_header, parse_html_document, parse_html_fragment,
            gateway::{StubGateway, stub_transactions},
        },
        transaction::{TransactionFilter, TypeFilter},
    };

    use super::{TransactionsState, get_transactions_page};

    #[track_caller]
    fn row_descriptions(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("tbody tr td:nth-child(2)").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn lists_all_transactions_in_gateway_order() {
        let gateway = StubGateway::spawn(stub_transactions()).await;
        let state = TransactionsState {
            gateway: gateway.client(),
        };

        let response = get_transactions_page(
            State(state),
            Extension(gateway.credential()),
            HxRequest(false),
            Query(TransactionFilter::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(row_descriptions(&document), vec!["Salary", "Lunch", "Dinner"]);
    }

    #[tokio::test]
    async fn htmx_request_gets_filtered_table_only() {
        let gateway = StubGateway::spawn(stub_transactions()).await;
        let state = TransactionsState {
            gateway: gateway.client(),
        };

        let response = get_transactions_page(
            State(state),
            Extension(gateway.credential()),
            HxRequest(true),
            Query(TransactionFilter {
                type_filter: TypeFilter::Expense,
                search: "LUNCH".to_owned(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert!(
            html.select(&Selector::parse("nav").unwrap()).next().is_none(),
            "want only the table partial"
        );
        assert_eq!(row_descriptions(&html), vec!["Lunch"]);
    }

    #[tokio::test]
    async fn rejected_credential_redirects_to_log_in() {
        let gateway = StubGateway::spawn(stub_transactions()).await;
        let state = TransactionsState {
            gateway: gateway.client(),
        };

        let response = get_transactions_page(
            State(state),
            Extension(Credential::new("expired")),
            HxRequest(false),
            Query(TransactionFilter::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::LOG_IN_VIEW);
        assert!(get_header(&response, "set-cookie").starts_with("token=deleted"));
    }
}
