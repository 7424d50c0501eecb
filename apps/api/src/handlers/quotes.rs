use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use loadline_application::QuoteRouteInput;
use loadline_core::AppError;
use loadline_domain::OrderId;
use rust_decimal::Decimal;
use tracing::debug;

use crate::dto::{OrderQuotesResponse, RouteQuoteQuery, RouteQuotesResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn order_quotes_handler(
    State(state): State<AppState>,
    order_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<OrderQuotesResponse>> {
    let Path(order_id) = order_id.map_err(|rejection| {
        AppError::Validation(format!("invalid order id: {}", rejection.body_text()))
    })?;

    let quotes = state
        .quote_service
        .quote_for_order(OrderId::new(order_id))
        .await?;
    debug!(
        order_id,
        providers = quotes.quotes.len(),
        distance_km = %quotes.distance.as_decimal(),
        "computed order quotes"
    );

    Ok(Json(quotes.into()))
}

pub async fn route_quotes_handler(
    State(state): State<AppState>,
    query: Result<Query<RouteQuoteQuery>, QueryRejection>,
) -> ApiResult<Json<RouteQuotesResponse>> {
    let Query(query) = query.map_err(|rejection| {
        AppError::Validation(format!("invalid quote query: {}", rejection.body_text()))
    })?;

    let quotes = state
        .quote_service
        .quote_for_route(QuoteRouteInput {
            pickup_address: query.pickup_address.unwrap_or_default(),
            delivery_address: query.delivery_address.unwrap_or_default(),
            total_distance_km: parse_distance(query.total_distance_km.as_deref())?,
        })
        .await?;
    debug!(
        providers = quotes.providers_count(),
        distance_km = %quotes.distance.as_decimal(),
        "computed route quotes"
    );

    Ok(Json(quotes.into()))
}

fn parse_distance(value: Option<&str>) -> Result<Decimal, AppError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<Decimal>().ok())
        .ok_or_else(|| AppError::Validation("total distance must be a positive number".to_owned()))
}
