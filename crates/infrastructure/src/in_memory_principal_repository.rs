use std::collections::HashMap;

use async_trait::async_trait;
use loadline_application::PrincipalRepository;
use loadline_core::AppResult;
use loadline_domain::Principal;
use tokio::sync::RwLock;

/// In-memory principal directory keyed by subject.
#[derive(Debug, Default)]
pub struct InMemoryPrincipalRepository {
    principals: RwLock<HashMap<String, Principal>>,
}

impl InMemoryPrincipalRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the given principals.
    #[must_use]
    pub fn with_principals(principals: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            principals: RwLock::new(
                principals
                    .into_iter()
                    .map(|principal| (principal.id().to_owned(), principal))
                    .collect(),
            ),
        }
    }

    /// Stores or replaces a principal.
    pub async fn save_principal(&self, principal: Principal) {
        self.principals
            .write()
            .await
            .insert(principal.id().to_owned(), principal);
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>> {
        Ok(self.principals.read().await.get(subject).cloned())
    }
}
