use async_trait::async_trait;
use loadline_core::AppResult;
use loadline_domain::{LogisticsProvider, OrderId};
use rust_decimal::Decimal;

/// Read port for stored orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Returns the total distance in kilometers of an order, if it exists.
    async fn find_order_distance(&self, order_id: OrderId) -> AppResult<Option<Decimal>>;
}

/// Read port for logistics providers.
#[async_trait]
pub trait LogisticsProviderRepository: Send + Sync {
    /// Lists every provider, ordered by identifier.
    async fn list_logistics_providers(&self) -> AppResult<Vec<LogisticsProvider>>;
}
