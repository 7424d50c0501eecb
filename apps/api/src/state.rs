use loadline_application::{AuthorizationService, QuoteService};
use sqlx::PgPool;

use crate::auth::BearerTokenVerifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub quote_service: QuoteService,
    pub token_verifier: BearerTokenVerifier,
    pub postgres_pool: Option<PgPool>,
}
