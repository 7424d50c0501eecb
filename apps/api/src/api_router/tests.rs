use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use loadline_application::{AuthorizationService, QuoteService};
use loadline_domain::{
    LogisticsProvider, LogisticsProviderId, OrderId, Principal, ProviderContact, roles,
};
use loadline_infrastructure::{InMemoryPrincipalRepository, InMemoryQuoteRepository};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use super::build_router;
use crate::auth::BearerTokenVerifier;
use crate::auth::test_tokens::{TEST_SECRET, expired_token_for, token_for};
use crate::state::AppState;

const SUPER_ADMIN_ID: i64 = 1;
const STAFF_ID: i64 = 2;
const ROLELESS_ID: i64 = 3;
const UNKNOWN_ID: i64 = 404;

fn provider(id: i64, name: &str, cost_per_km: Decimal) -> LogisticsProvider {
    match LogisticsProvider::new(
        LogisticsProviderId::new(id),
        name,
        ProviderContact {
            address: format!("{id} Transport Hub, Pune"),
            phone: "+91-9876543210".to_owned(),
            email: format!("ops@provider{id}.test"),
            website: format!("https://provider{id}.test"),
        },
        cost_per_km,
    ) {
        Ok(provider) => provider,
        Err(error) => panic!("invalid test provider: {error}"),
    }
}

fn test_router() -> Router {
    let principals = InMemoryPrincipalRepository::with_principals([
        Principal::with_role(
            SUPER_ADMIN_ID.to_string(),
            roles::SUPER_ADMIN,
            ["manage_orders"],
        ),
        Principal::with_role(STAFF_ID.to_string(), roles::STAFF, ["track_orders"]),
        Principal::anonymous(ROLELESS_ID.to_string()),
    ]);
    let quotes = Arc::new(InMemoryQuoteRepository::with_data(
        [(OrderId::new(1), Decimal::new(120, 0))],
        [
            provider(3, "Premium Movers", Decimal::new(410, 2)),
            provider(1, "FastShip Logistics", Decimal::new(250, 2)),
            provider(2, "BudgetFreight", Decimal::new(175, 2)),
        ],
    ));

    let app_state = AppState {
        authorization_service: AuthorizationService::new(Arc::new(principals)),
        quote_service: QuoteService::new(quotes.clone(), quotes),
        token_verifier: BearerTokenVerifier::new(TEST_SECRET),
        postgres_pool: None,
    };

    match build_router(app_state, "http://localhost:3000") {
        Ok(router) => router,
        Err(error) => panic!("failed to build test router: {error}"),
    }
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match builder.body(Body::empty()) {
        Ok(request) => request,
        Err(error) => panic!("failed to build test request: {error}"),
    }
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = match test_router().oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    let status = response.status();

    let bytes = match response.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(error) => panic!("failed to read response body: {error}"),
    };
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

fn prices(body: &Value) -> Vec<f64> {
    body["providers"]
        .as_array()
        .map(|providers| {
            providers
                .iter()
                .filter_map(|provider| provider["totalPrice"].as_f64())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn health_is_public() {
    let (status, body) = send(get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["postgres"]["status"], "disabled");
}

#[tokio::test]
async fn route_quotes_are_ranked_cheapest_first() {
    let token = token_for(SUPER_ADMIN_ID);
    let (status, body) = send(get(
        "/orders/logistics-providers/quotes?pickupAddress=%20123%20Main%20St%20&deliveryAddress=456%20Market%20Rd&totalDistanceKm=150.75",
        Some(token.as_str()),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pickupAddress"], "123 Main St");
    assert_eq!(body["deliveryAddress"], "456 Market Rd");
    assert_eq!(body["totalDistanceKm"], 150.75);
    assert_eq!(body["providersCount"], 3);
    assert_eq!(prices(&body), vec![263.81, 376.88, 618.08]);
    assert_eq!(body["providers"][1]["name"], "FastShip Logistics");
    assert_eq!(body["providers"][1]["costPerKm"], 2.5);
}

#[tokio::test]
async fn order_quotes_use_stored_distance() {
    let token = token_for(SUPER_ADMIN_ID);
    let (status, body) = send(get("/orders/provider-quotes/1", Some(token.as_str()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderId"], 1);
    assert_eq!(body["distanceKm"], 120.0);
    assert_eq!(prices(&body), vec![210.0, 300.0, 492.0]);
}

#[tokio::test]
async fn missing_order_is_not_found() {
    let token = token_for(SUPER_ADMIN_ID);
    let (status, body) = send(get("/orders/provider-quotes/9999", Some(token.as_str()))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "not found: order with id 9999 not found");
}

#[tokio::test]
async fn malformed_order_id_is_bad_request() {
    let token = token_for(SUPER_ADMIN_ID);
    let (status, _) = send(get("/orders/provider-quotes/abc", Some(token.as_str()))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_pickup_address_is_bad_request() {
    let token = token_for(SUPER_ADMIN_ID);
    let (status, body) = send(get(
        "/orders/logistics-providers/quotes?pickupAddress=%20%20&deliveryAddress=456%20Market%20Rd&totalDistanceKm=10",
        Some(token.as_str()),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "validation error: pickup address is required");
}

#[tokio::test]
async fn non_positive_or_missing_distance_is_bad_request() {
    let token = token_for(SUPER_ADMIN_ID);

    for query in ["totalDistanceKm=0", "totalDistanceKm=-4", "totalDistanceKm=far", ""] {
        let uri = format!(
            "/orders/logistics-providers/quotes?pickupAddress=A&deliveryAddress=B&{query}"
        );
        let (status, body) = send(get(uri.as_str(), Some(token.as_str()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "query: {query}");
        assert_eq!(
            body["message"],
            "validation error: total distance must be a positive number"
        );
    }
}

#[tokio::test]
async fn missing_or_invalid_token_is_unauthorized() {
    let (status, _) = send(get("/orders/provider-quotes/1", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(get("/orders/provider-quotes/1", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = expired_token_for(SUPER_ADMIN_ID);
    let (status, _) = send(get("/orders/provider-quotes/1", Some(expired.as_str()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_subject_is_unauthorized() {
    let token = token_for(UNKNOWN_ID);
    let (status, _) = send(get("/auth/me", Some(token.as_str()))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn role_outside_requirement_is_forbidden() {
    let token = token_for(STAFF_ID);
    let (status, body) = send(get("/orders/provider-quotes/1", Some(token.as_str()))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "forbidden: insufficient role: 'Staff' is not accepted"
    );
}

#[tokio::test]
async fn principal_without_role_is_forbidden_even_with_role_claim() {
    let token = token_for(ROLELESS_ID);
    let (status, body) = send(get("/orders/provider-quotes/1", Some(token.as_str()))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "forbidden: user role not found");
}

#[tokio::test]
async fn me_is_available_to_any_known_principal() {
    let token = token_for(ROLELESS_ID);
    let (status, body) = send(get("/auth/me", Some(token.as_str()))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "3");
    assert_eq!(body["email"], "user3@loadline.test");
    assert_eq!(body["role"], Value::Null);
    assert_eq!(body["permissions"], Value::Null);
}

#[tokio::test]
async fn unknown_route_is_not_found_without_authentication() {
    let (status, _) = send(get("/orders", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
