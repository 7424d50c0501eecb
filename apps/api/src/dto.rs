use loadline_application::{OrderQuotes, RouteQuotes};
use loadline_domain::{Principal, Quote};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
}

/// One runtime dependency health status.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-dependency-status.ts"
)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    pub detail: Option<String>,
}

/// Query string for quoting an ad-hoc route.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/route-quote-query.ts"
)]
pub struct RouteQuoteQuery {
    pub pickup_address: Option<String>,
    pub delivery_address: Option<String>,
    pub total_distance_km: Option<String>,
}

/// One provider with its computed price.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/provider-quote-response.ts"
)]
pub struct ProviderQuoteResponse {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub cost_per_km: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub total_price: Decimal,
}

impl From<Quote> for ProviderQuoteResponse {
    fn from(quote: Quote) -> Self {
        let total_price = quote.total_price();
        let provider = quote.provider();
        let contact = provider.contact();

        Self {
            id: provider.id().as_i64(),
            name: provider.name().as_str().to_owned(),
            address: contact.address.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            website: contact.website.clone(),
            cost_per_km: provider.cost_per_km(),
            total_price,
        }
    }
}

/// Ranked quotes for a stored order.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/order-quotes-response.ts"
)]
pub struct OrderQuotesResponse {
    pub order_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub distance_km: Decimal,
    pub providers: Vec<ProviderQuoteResponse>,
}

impl From<OrderQuotes> for OrderQuotesResponse {
    fn from(value: OrderQuotes) -> Self {
        Self {
            order_id: value.order_id.as_i64(),
            distance_km: value.distance.as_decimal(),
            providers: value.quotes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ranked quotes for an ad-hoc route.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/route-quotes-response.ts"
)]
pub struct RouteQuotesResponse {
    pub pickup_address: String,
    pub delivery_address: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub total_distance_km: Decimal,
    pub providers_count: usize,
    pub providers: Vec<ProviderQuoteResponse>,
}

impl From<RouteQuotes> for RouteQuotesResponse {
    fn from(value: RouteQuotes) -> Self {
        let providers_count = value.providers_count();

        Self {
            pickup_address: value.pickup_address.into(),
            delivery_address: value.delivery_address.into(),
            total_distance_km: value.distance.as_decimal(),
            providers_count,
            providers: value.quotes.into_iter().map(Into::into).collect(),
        }
    }
}

/// API representation of the authenticated principal.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/principal-response.ts"
)]
pub struct PrincipalResponse {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl PrincipalResponse {
    pub fn new(principal: &Principal, email: Option<&str>) -> Self {
        Self {
            id: principal.id().to_owned(),
            email: email.map(str::to_owned),
            role: principal.role().map(str::to_owned),
            permissions: principal
                .permissions()
                .map(|permissions| permissions.iter().cloned().collect()),
        }
    }
}
