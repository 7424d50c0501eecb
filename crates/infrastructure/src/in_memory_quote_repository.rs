use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use loadline_application::{LogisticsProviderRepository, OrderRepository};
use loadline_core::AppResult;
use loadline_domain::{LogisticsProvider, LogisticsProviderId, OrderId};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

/// In-memory order and logistics provider read model.
#[derive(Debug, Default)]
pub struct InMemoryQuoteRepository {
    order_distances: RwLock<HashMap<OrderId, Decimal>>,
    providers: RwLock<BTreeMap<LogisticsProviderId, LogisticsProvider>>,
}

impl InMemoryQuoteRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with order distances and providers.
    #[must_use]
    pub fn with_data(
        order_distances: impl IntoIterator<Item = (OrderId, Decimal)>,
        providers: impl IntoIterator<Item = LogisticsProvider>,
    ) -> Self {
        Self {
            order_distances: RwLock::new(order_distances.into_iter().collect()),
            providers: RwLock::new(
                providers
                    .into_iter()
                    .map(|provider| (provider.id(), provider))
                    .collect(),
            ),
        }
    }

    /// Stores or replaces the distance of an order.
    pub async fn save_order_distance(&self, order_id: OrderId, distance_km: Decimal) {
        self.order_distances
            .write()
            .await
            .insert(order_id, distance_km);
    }

    /// Stores or replaces a logistics provider.
    pub async fn save_logistics_provider(&self, provider: LogisticsProvider) {
        self.providers.write().await.insert(provider.id(), provider);
    }
}

#[async_trait]
impl OrderRepository for InMemoryQuoteRepository {
    async fn find_order_distance(&self, order_id: OrderId) -> AppResult<Option<Decimal>> {
        Ok(self.order_distances.read().await.get(&order_id).copied())
    }
}

#[async_trait]
impl LogisticsProviderRepository for InMemoryQuoteRepository {
    async fn list_logistics_providers(&self) -> AppResult<Vec<LogisticsProvider>> {
        Ok(self.providers.read().await.values().cloned().collect())
    }
}
