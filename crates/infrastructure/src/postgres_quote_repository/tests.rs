use loadline_application::{LogisticsProviderRepository, OrderRepository};
use loadline_domain::OrderId;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresQuoteRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres quote tests: {error}");
    }

    Some(pool)
}

async fn insert_provider(pool: &PgPool, name: &str, cost_per_km: Decimal) -> i64 {
    match sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO logistics_providers (name, address, phone, email, website, cost_per_km)
            VALUES ($1, '789 Transport Hub, Pune', '+91-9876543210', 'ops@carrier.test', 'https://carrier.test', $2)
            RETURNING id
            "#,
    )
    .bind(name)
    .bind(cost_per_km)
    .fetch_one(pool)
    .await
    {
        Ok(id) => id,
        Err(error) => panic!("failed to insert test provider: {error}"),
    }
}

#[tokio::test]
async fn order_distance_is_read_as_decimal() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let order_id = match sqlx::query_scalar::<_, i64>(
        r#"
            INSERT INTO orders (pickup_address, delivery_address, total_distance_km)
            VALUES ('123 Main St', '456 Market Rd', 150.75)
            RETURNING id
            "#,
    )
    .fetch_one(&pool)
    .await
    {
        Ok(id) => id,
        Err(error) => panic!("failed to insert test order: {error}"),
    };

    let repository = PostgresQuoteRepository::new(pool);
    let distance = repository
        .find_order_distance(OrderId::new(order_id))
        .await;

    assert_eq!(distance.ok().flatten(), Some(Decimal::new(15075, 2)));
}

#[tokio::test]
async fn missing_order_has_no_distance() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresQuoteRepository::new(pool);
    let distance = repository.find_order_distance(OrderId::new(i64::MAX)).await;

    assert!(matches!(distance, Ok(None)));
}

#[tokio::test]
async fn providers_are_listed_in_primary_key_order() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let first = insert_provider(&pool, "Zeta Freight", Decimal::new(300, 2)).await;
    let second = insert_provider(&pool, "Alpha Couriers", Decimal::new(125, 2)).await;

    let repository = PostgresQuoteRepository::new(pool);
    let providers = repository.list_logistics_providers().await;
    assert!(providers.is_ok());

    let ids: Vec<i64> = providers
        .unwrap_or_default()
        .iter()
        .map(|provider| provider.id().as_i64())
        .filter(|id| *id == first || *id == second)
        .collect();
    assert_eq!(ids, vec![first, second]);
}
