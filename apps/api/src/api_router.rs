mod cors;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use loadline_core::AppError;
use loadline_domain::{OperationRequirement, roles};
use tower_http::trace::TraceLayer;

use crate::middleware::AccessGuard;
use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let quote_routes = Router::new()
        .route(
            "/orders/provider-quotes/{order_id}",
            get(handlers::quotes::order_quotes_handler),
        )
        .route(
            "/orders/logistics-providers/quotes",
            get(handlers::quotes::route_quotes_handler),
        )
        .route_layer(from_fn_with_state(
            AccessGuard::new(
                app_state.authorization_service.clone(),
                OperationRequirement::roles([roles::SUPER_ADMIN]),
            ),
            middleware::require_access,
        ));

    let account_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me_handler))
        .route_layer(from_fn_with_state(
            AccessGuard::new(
                app_state.authorization_service.clone(),
                OperationRequirement::unrestricted(),
            ),
            middleware::require_access,
        ));

    let protected_routes = quote_routes
        .merge(account_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}

#[cfg(test)]
mod tests;
