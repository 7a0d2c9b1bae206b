#![allow(dead_code)]

use ddb_client::client::{
    Client, Logger, MealComponentCreationRequestInput, MealComponentType, MealCreationRequestInput,
    Transport, TransportFuture,
};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::{MockServer, Request};

/// A transport that fails the test if anything is dispatched through it.
#[derive(Debug, Default)]
pub struct PanickingTransport;

impl Transport for PanickingTransport {
    fn execute(&self, request: reqwest::Request) -> TransportFuture<'_> {
        panic!("unexpected dispatch of {} {}", request.method(), request.url())
    }
}

/// A client whose transport panics on dispatch.
pub fn offline_client() -> Client {
    Client::builder("https://ddb.test")
        .transport(PanickingTransport)
        .logger(Logger::new("ddb-client-tests"))
        .build()
        .expect("Failed to build offline client")
}

/// A client pointed at a mock server.
pub fn client_for(server: &MockServer) -> Client {
    Client::builder(server.uri())
        .logger(Logger::new("ddb-client-tests"))
        .build()
        .expect("Failed to build client for mock server")
}

pub fn envelope(data: Value) -> Value {
    json!({ "data": data, "pagination": null, "error": null })
}

pub fn page_envelope(data: Value, page: u64, limit: u64, total_count: u64) -> Value {
    json!({
        "data": data,
        "pagination": { "page": page, "limit": limit, "totalCount": total_count },
        "error": null,
    })
}

pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({ "data": null, "error": { "code": code, "message": message } })
}

pub fn meal_creation_input() -> MealCreationRequestInput {
    MealCreationRequestInput {
        name: "Soup night".to_string(),
        description: "Something warm".to_string(),
        minimum_estimated_portions: 4.0,
        maximum_estimated_portions: Some(6.0),
        eligible_for_meal_plans: true,
        components: vec![MealComponentCreationRequestInput {
            recipe_id: "r_1".to_string(),
            recipe_scale: 1.0,
            component_type: MealComponentType::Main,
        }],
    }
}

/// All requests the mock server has seen, in order.
pub async fn received(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("Request recording is disabled")
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ddb_client=debug")),
        )
        .with_test_writer()
        .try_init();
}
