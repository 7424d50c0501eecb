//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_principal_repository;
mod in_memory_quote_repository;
mod postgres_principal_repository;
mod postgres_quote_repository;

pub use in_memory_principal_repository::InMemoryPrincipalRepository;
pub use in_memory_quote_repository::InMemoryQuoteRepository;
pub use postgres_principal_repository::PostgresPrincipalRepository;
pub use postgres_quote_repository::PostgresQuoteRepository;
