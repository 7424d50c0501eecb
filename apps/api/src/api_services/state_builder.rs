use std::sync::Arc;

use loadline_application::{AuthorizationService, QuoteService};
use loadline_infrastructure::{PostgresPrincipalRepository, PostgresQuoteRepository};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::auth::BearerTokenVerifier;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> AppState {
    let principal_repository = Arc::new(PostgresPrincipalRepository::new(pool.clone()));
    let quote_repository = Arc::new(PostgresQuoteRepository::new(pool.clone()));

    AppState {
        authorization_service: AuthorizationService::new(principal_repository),
        quote_service: QuoteService::new(quote_repository.clone(), quote_repository),
        token_verifier: BearerTokenVerifier::new(config.jwt_secret.as_str()),
        postgres_pool: Some(pool),
    }
}
