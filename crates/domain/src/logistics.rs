use loadline_core::{AppError, AppResult, NonEmptyString};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unique identifier for a logistics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LogisticsProviderId(i64);

impl LogisticsProviderId {
    /// Creates an identifier from its stored key.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the stored key.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LogisticsProviderId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Public contact details of a logistics provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderContact {
    /// Postal address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Public website URL.
    pub website: String,
}

/// Carrier that can be quoted for a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogisticsProvider {
    id: LogisticsProviderId,
    name: NonEmptyString,
    contact: ProviderContact,
    cost_per_km: Decimal,
}

impl LogisticsProvider {
    /// Creates a provider snapshot, rejecting a negative per-kilometer cost.
    pub fn new(
        id: LogisticsProviderId,
        name: impl Into<String>,
        contact: ProviderContact,
        cost_per_km: Decimal,
    ) -> AppResult<Self> {
        if cost_per_km < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "cost per km for logistics provider '{id}' must not be negative"
            )));
        }

        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            contact,
            cost_per_km,
        })
    }

    /// Returns the provider identifier.
    #[must_use]
    pub fn id(&self) -> LogisticsProviderId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the contact details.
    #[must_use]
    pub fn contact(&self) -> &ProviderContact {
        &self.contact
    }

    /// Returns the cost charged per kilometer.
    #[must_use]
    pub fn cost_per_km(&self) -> Decimal {
        self.cost_per_km
    }
}
