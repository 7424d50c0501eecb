use std::sync::Arc;

use axum::extract::{Extension, Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use loadline_application::AuthorizationService;
use loadline_core::{AppError, UserIdentity};
use loadline_domain::OperationRequirement;
use tracing::{debug, warn};

use crate::error::ApiResult;
use crate::state::AppState;

/// Requirement attached to one group of routes at registration time.
#[derive(Clone)]
pub struct AccessGuard {
    authorization_service: AuthorizationService,
    requirement: Arc<OperationRequirement>,
}

impl AccessGuard {
    pub fn new(
        authorization_service: AuthorizationService,
        requirement: OperationRequirement,
    ) -> Self {
        Self {
            authorization_service,
            requirement: Arc::new(requirement),
        }
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let identity = state.token_verifier.verify(token)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn require_access(
    State(guard): State<AccessGuard>,
    Extension(identity): Extension<UserIdentity>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal = guard
        .authorization_service
        .resolve_principal(&identity)
        .await?;
    let route = request.uri().path().to_owned();

    if let Err(denial) = guard
        .authorization_service
        .authorize(&principal, &guard.requirement)
    {
        warn!(
            principal_id = principal.id(),
            route = %route,
            reason = denial.as_str(),
            "access denied: {denial}"
        );
        return Err(AppError::from(denial).into());
    }

    debug!(principal_id = principal.id(), route = %route, "access granted");
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
