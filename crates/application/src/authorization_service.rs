use std::sync::Arc;

use async_trait::async_trait;
use loadline_core::{AppError, AppResult, UserIdentity};
use loadline_domain::{AccessDenial, OperationRequirement, Principal};

/// Repository port resolving a subject to its role and permissions.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Finds the principal for a subject, or `None` when the subject is unknown.
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>>;
}

/// Application service for per-request authorization decisions.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn PrincipalRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn PrincipalRepository>) -> Self {
        Self { repository }
    }

    /// Resolves the principal behind an authenticated identity.
    pub async fn resolve_principal(&self, identity: &UserIdentity) -> AppResult<Principal> {
        self.repository
            .find_principal(identity.subject())
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized(format!(
                    "subject '{}' is not a known user",
                    identity.subject()
                ))
            })
    }

    /// Checks the principal against the operation requirement.
    ///
    /// The denial is returned as-is so callers can log its kind before
    /// converting it into [`AppError::Forbidden`].
    pub fn authorize(
        &self,
        principal: &Principal,
        requirement: &OperationRequirement,
    ) -> Result<(), AccessDenial> {
        requirement.evaluate(principal)
    }
}
