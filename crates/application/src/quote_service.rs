use std::sync::Arc;

use loadline_core::{AppError, AppResult, NonEmptyString};
use loadline_domain::{DistanceKm, LogisticsProvider, OrderId, Quote, rank_quotes};
use rust_decimal::Decimal;

use crate::{LogisticsProviderRepository, OrderRepository};

/// Input payload for quoting an ad-hoc route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRouteInput {
    /// Pickup location address.
    pub pickup_address: String,
    /// Delivery location address.
    pub delivery_address: String,
    /// Total route distance in kilometers.
    pub total_distance_km: Decimal,
}

/// Ranked quotes for a stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuotes {
    /// Quoted order.
    pub order_id: OrderId,
    /// Distance taken from the order.
    pub distance: DistanceKm,
    /// Provider quotes, cheapest first.
    pub quotes: Vec<Quote>,
}

/// Ranked quotes for an ad-hoc route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuotes {
    /// Trimmed pickup address.
    pub pickup_address: NonEmptyString,
    /// Trimmed delivery address.
    pub delivery_address: NonEmptyString,
    /// Requested distance.
    pub distance: DistanceKm,
    /// Provider quotes, cheapest first.
    pub quotes: Vec<Quote>,
}

impl RouteQuotes {
    /// Returns how many providers were quoted.
    #[must_use]
    pub fn providers_count(&self) -> usize {
        self.quotes.len()
    }
}

/// Application service computing delivery price quotes.
#[derive(Clone)]
pub struct QuoteService {
    order_repository: Arc<dyn OrderRepository>,
    provider_repository: Arc<dyn LogisticsProviderRepository>,
}

impl QuoteService {
    /// Creates a new quote service from repository implementations.
    #[must_use]
    pub fn new(
        order_repository: Arc<dyn OrderRepository>,
        provider_repository: Arc<dyn LogisticsProviderRepository>,
    ) -> Self {
        Self {
            order_repository,
            provider_repository,
        }
    }

    /// Quotes every provider for the distance of a stored order.
    pub async fn quote_for_order(&self, order_id: OrderId) -> AppResult<OrderQuotes> {
        let stored_distance = self
            .order_repository
            .find_order_distance(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("order with id {order_id} not found")))?;

        let distance = DistanceKm::new(stored_distance).map_err(|error| {
            AppError::Internal(format!(
                "order with id {order_id} has an invalid stored distance: {error}"
            ))
        })?;

        let providers = self.fetch_providers().await?;
        let quotes = rank_quotes(distance, providers)?;

        Ok(OrderQuotes {
            order_id,
            distance,
            quotes,
        })
    }

    /// Quotes every provider for an explicit pickup/delivery route.
    pub async fn quote_for_route(&self, input: QuoteRouteInput) -> AppResult<RouteQuotes> {
        let pickup_address = NonEmptyString::new(input.pickup_address)
            .map_err(|_| AppError::Validation("pickup address is required".to_owned()))?;
        let delivery_address = NonEmptyString::new(input.delivery_address)
            .map_err(|_| AppError::Validation("delivery address is required".to_owned()))?;
        let distance = DistanceKm::positive(input.total_distance_km)?;

        let providers = self.fetch_providers().await?;
        let quotes = rank_quotes(distance, providers)?;

        Ok(RouteQuotes {
            pickup_address,
            delivery_address,
            distance,
            quotes,
        })
    }

    async fn fetch_providers(&self) -> AppResult<Vec<LogisticsProvider>> {
        self.provider_repository
            .list_logistics_providers()
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to fetch logistics providers: {error}"))
            })
    }
}
