//! Delivery price quoting.
//!
//! Prices are computed on exact decimals and rounded half-up to cents, then
//! ranked cheapest first. Ranking is a stable sort, so providers with equal
//! prices keep the order they were supplied in.

use loadline_core::{AppError, AppResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::LogisticsProvider;

/// Decimal places kept on a quoted price.
pub const PRICE_SCALE: u32 = 2;

/// Non-negative travel distance in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DistanceKm(Decimal);

impl DistanceKm {
    /// Creates a distance, rejecting negative values.
    pub fn new(value: Decimal) -> AppResult<Self> {
        if value < Decimal::ZERO {
            return Err(AppError::Validation(
                "total distance must not be negative".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Creates a distance, rejecting zero and negative values.
    pub fn positive(value: Decimal) -> AppResult<Self> {
        if value <= Decimal::ZERO {
            return Err(AppError::Validation(
                "total distance must be a positive number".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the distance value.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

/// Computes `distance × cost_per_km` rounded half-up to [`PRICE_SCALE`] places.
pub fn price_for_distance(distance: DistanceKm, cost_per_km: Decimal) -> AppResult<Decimal> {
    distance
        .as_decimal()
        .checked_mul(cost_per_km)
        .map(|price| {
            price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
        })
        .ok_or_else(|| {
            AppError::Validation(format!(
                "price for {} km at {cost_per_km} per km is out of range",
                distance.as_decimal()
            ))
        })
}

/// A provider's computed price for one distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    provider: LogisticsProvider,
    total_price: Decimal,
}

impl Quote {
    /// Returns the quoted provider.
    #[must_use]
    pub fn provider(&self) -> &LogisticsProvider {
        &self.provider
    }

    /// Returns the rounded total price.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }
}

/// Prices every provider for the distance and ranks the quotes cheapest first.
pub fn rank_quotes(
    distance: DistanceKm,
    providers: impl IntoIterator<Item = LogisticsProvider>,
) -> AppResult<Vec<Quote>> {
    let mut quotes = providers
        .into_iter()
        .map(|provider| {
            price_for_distance(distance, provider.cost_per_km()).map(|total_price| Quote {
                provider,
                total_price,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    quotes.sort_by(|left, right| left.total_price.cmp(&right.total_price));

    Ok(quotes)
}
