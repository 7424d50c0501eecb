use async_trait::async_trait;

use loadline_application::{LogisticsProviderRepository, OrderRepository};
use loadline_core::{AppError, AppResult};
use loadline_domain::{LogisticsProvider, LogisticsProviderId, OrderId, ProviderContact};
use rust_decimal::Decimal;

use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed read model for orders and logistics providers.
#[derive(Clone)]
pub struct PostgresQuoteRepository {
    pool: PgPool,
}

impl PostgresQuoteRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LogisticsProviderRow {
    id: i64,
    name: String,
    address: String,
    phone: String,
    email: String,
    website: String,
    cost_per_km: Decimal,
}

impl TryFrom<LogisticsProviderRow> for LogisticsProvider {
    type Error = AppError;

    fn try_from(row: LogisticsProviderRow) -> Result<Self, Self::Error> {
        let id = LogisticsProviderId::new(row.id);
        Self::new(
            id,
            row.name,
            ProviderContact {
                address: row.address,
                phone: row.phone,
                email: row.email,
                website: row.website,
            },
            row.cost_per_km,
        )
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to decode logistics provider '{id}': {error}"
            ))
        })
    }
}

#[async_trait]
impl OrderRepository for PostgresQuoteRepository {
    async fn find_order_distance(&self, order_id: OrderId) -> AppResult<Option<Decimal>> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT total_distance_km
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load order '{order_id}': {error}"))
        })
    }
}

#[async_trait]
impl LogisticsProviderRepository for PostgresQuoteRepository {
    async fn list_logistics_providers(&self) -> AppResult<Vec<LogisticsProvider>> {
        let rows = sqlx::query_as::<_, LogisticsProviderRow>(
            r#"
            SELECT id, name, address, phone, email, website, cost_per_km
            FROM logistics_providers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list logistics providers: {error}"))
        })?;

        rows.into_iter().map(LogisticsProvider::try_from).collect()
    }
}

#[cfg(test)]
mod tests;
