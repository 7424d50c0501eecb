//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod quote_ports;
mod quote_service;

pub use authorization_service::{AuthorizationService, PrincipalRepository};
pub use quote_ports::{LogisticsProviderRepository, OrderRepository};
pub use quote_service::{OrderQuotes, QuoteRouteInput, QuoteService, RouteQuotes};
