//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_sign_up_page, post_log_in,
        post_sign_up,
    },
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_new_transaction_page, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::SIGN_UP_VIEW, get(get_sign_up_page))
        .route(endpoints::SIGN_UP_API, post(post_sign_up))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::NEW_TRANSACTION_VIEW, get(get_new_transaction_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST/PUT/DELETE routes need to use the HX-REDIRECT header for auth redirects to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(
                endpoints::TRANSACTION_API,
                put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        AppState,
        auth::COOKIE_TOKEN,
        endpoints::{self, format_endpoint},
        test_utils::gateway::{STUB_EMAIL, STUB_PASSWORD, StubGateway, stub_transactions},
    };

    use super::build_router;

    fn get_test_server(gateway: &StubGateway) -> TestServer {
        let state = AppState::new("router-test-secret", "Etc/UTC", gateway.client())
            .expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn logged_out_page_request_redirects_to_log_in() {
        let gateway = StubGateway::spawn(stub_transactions()).await;
        let server = get_test_server(&gateway);

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header("location");
        let location = location.to_str().unwrap();
        assert!(
            location.starts_with(endpoints::LOG_IN_VIEW),
            "want redirect to {}, got {location}",
            endpoints::LOG_IN_VIEW
        );
    }

    #[tokio::test]
    async fn logged_out_api_request_gets_hx_redirect() {
        let gateway = StubGateway::spawn(stub_transactions()).await;
        let server = get_test_server(&gateway);

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION_API, 1))
            .await;

        response.assert_status_ok();
        let location = response.header("hx-redirect");
        assert!(
            location.to_str().unwrap().starts_with(endpoints::LOG_IN_VIEW),
            "got {location:?}"
        );
        assert_eq!(gateway.transaction_ids(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn log_in_then_view_and_delete() {
        let gateway = StubGateway::spawn(stub_transactions()).await;
        let server = get_test_server(&gateway);

        let response = server
            .post(endpoints::LOG_IN_API)
            .form(&[("email", STUB_EMAIL), ("password", STUB_PASSWORD)])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        let token_cookie = response.cookie(COOKIE_TOKEN);

        let response = server
            .get(endpoints::DASHBOARD_VIEW)
            .add_cookie(token_cookie.clone())
            .await;
        response.assert_status_ok();
        assert!(response.text().contains("Recent Transactions"));

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION_API, 2))
            .add_cookie(token_cookie)
            .await;
        response.assert_status_ok();
        assert_eq!(gateway.transaction_ids(), vec![1, 3]);
    }

    #[tokio::test]
    async fn auth_pages_are_public() {
        let gateway = StubGateway::spawn(vec![]).await;
        let server = get_test_server(&gateway);

        for path in [endpoints::LOG_IN_VIEW, endpoints::SIGN_UP_VIEW] {
            server.get(path).await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let gateway = StubGateway::spawn(vec![]).await;
        let server = get_test_server(&gateway);

        let response = server.get("/does/not/exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_page_is_500() {
        let gateway = StubGateway::spawn(vec![]).await;
        let server = get_test_server(&gateway);

        let response = server.get(endpoints::INTERNAL_ERROR_VIEW).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
