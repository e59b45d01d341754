//! An in-process Gateway for exercising the real HTTP client and handlers.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::gateway::{Credential, GatewayClient};

pub(crate) const STUB_TOKEN: &str = "stub-token";
pub(crate) const STUB_EMAIL: &str = "user@example.com";
pub(crate) const STUB_PASSWORD: &str = "hunter22";

/// Serve `router` on a random loopback port and return its base URL.
pub(crate) async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind stub gateway");
    let address = listener.local_addr().expect("Could not get local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub gateway stopped unexpectedly");
    });

    format!("http://{address}")
}

/// The Salary/Lunch/Dinner records encoded the way the Gateway sends them.
pub(crate) fn stub_transactions() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "user_id": 1,
            "amount": "100.00",
            "category": "Income",
            "description": "Salary",
            "date": "Mon, 15 Jan 2024 00:00:00 GMT",
            "type": "income",
            "created_at": "Mon, 15 Jan 2024 09:00:00 GMT"
        }),
        json!({
            "id": 2,
            "user_id": 1,
            "amount": "40.00",
            "category": "Food",
            "description": "Lunch",
            "date": "Mon, 15 Jan 2024 00:00:00 GMT",
            "type": "expense",
            "created_at": "Mon, 15 Jan 2024 12:30:00 GMT"
        }),
        json!({
            "id": 3,
            "user_id": 1,
            "amount": "60.00",
            "category": "Food",
            "description": "Dinner",
            "date": "Mon, 15 Jan 2024 00:00:00 GMT",
            "type": "expense",
            "created_at": "Mon, 15 Jan 2024 19:00:00 GMT"
        }),
    ]
}

type Records = Arc<Mutex<Vec<Value>>>;

/// A running stub Gateway backed by an in-memory list of JSON records.
pub(crate) struct StubGateway {
    pub url: String,
    records: Records,
}

impl StubGateway {
    pub(crate) async fn spawn(records: Vec<Value>) -> Self {
        let records: Records = Arc::new(Mutex::new(records));
        let router = Router::new()
            .route(
                "/api/transactions",
                get(list_transactions).post(create_transaction),
            )
            .route(
                "/api/transactions/{id}",
                get(get_transaction)
                    .put(update_transaction)
                    .delete(delete_transaction),
            )
            .route("/api/auth/login", post(log_in))
            .route("/api/auth/signup", post(sign_up))
            .with_state(records.clone());

        let url = spawn_router(router).await;

        Self { url, records }
    }

    pub(crate) fn client(&self) -> GatewayClient {
        GatewayClient::new(&self.url, Duration::from_secs(5)).expect("Could not create client")
    }

    pub(crate) fn credential(&self) -> Credential {
        Credential::new(STUB_TOKEN)
    }

    pub(crate) fn transaction_ids(&self) -> Vec<i64> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter_map(|record| record["id"].as_i64())
            .collect()
    }

    pub(crate) fn transaction(&self, id: i64) -> Option<Value> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|record| record["id"].as_i64() == Some(id))
            .cloned()
    }
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {STUB_TOKEN}"))
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn unauthorized() -> Response {
    message(StatusCode::UNAUTHORIZED, "Token is invalid")
}

fn not_found() -> Response {
    message(StatusCode::NOT_FOUND, "Transaction not found")
}

async fn list_transactions(State(records): State<Records>, headers: HeaderMap) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }

    Json(records.lock().unwrap().clone()).into_response()
}

async fn get_transaction(
    State(records): State<Records>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }

    match records
        .lock()
        .unwrap()
        .iter()
        .find(|record| record["id"].as_i64() == Some(id))
    {
        Some(record) => Json(record.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_transaction(
    State(records): State<Records>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }

    let mut records = records.lock().unwrap();
    let id = records
        .iter()
        .filter_map(|record| record["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    body["id"] = json!(id);
    body["created_at"] = json!("2024-02-01 09:00:00");
    records.insert(0, body.clone());

    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_transaction(
    State(records): State<Records>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }

    let mut records = records.lock().unwrap();
    let Some(record) = records
        .iter_mut()
        .find(|record| record["id"].as_i64() == Some(id))
    else {
        return not_found();
    };

    for field in ["amount", "category", "description", "date", "type"] {
        if let Some(value) = body.get(field) {
            record[field] = value.clone();
        }
    }

    Json(record.clone()).into_response()
}

async fn delete_transaction(
    State(records): State<Records>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }

    let mut records = records.lock().unwrap();
    let count_before = records.len();
    records.retain(|record| record["id"].as_i64() != Some(id));

    if records.len() == count_before {
        return not_found();
    }

    message(StatusCode::OK, "Transaction deleted successfully")
}

fn session_body() -> Value {
    json!({
        "token": STUB_TOKEN,
        "user": { "id": 1, "username": "stub", "email": STUB_EMAIL }
    })
}

async fn log_in(Json(body): Json<Value>) -> Response {
    if body["email"] == STUB_EMAIL && body["password"] == STUB_PASSWORD {
        Json(session_body()).into_response()
    } else {
        message(StatusCode::UNAUTHORIZED, "Invalid email or password")
    }
}

async fn sign_up(Json(body): Json<Value>) -> Response {
    if body["email"] == STUB_EMAIL {
        return message(StatusCode::CONFLICT, "User with this email already exists");
    }

    (StatusCode::CREATED, Json(session_body())).into_response()
}
