//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod logistics;
mod order;
mod quote;

pub use access::{AccessDenial, OperationRequirement, Principal, roles};
pub use logistics::{LogisticsProvider, LogisticsProviderId, ProviderContact};
pub use order::OrderId;
pub use quote::{DistanceKm, PRICE_SCALE, Quote, price_for_distance, rank_quotes};
