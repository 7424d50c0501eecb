use async_trait::async_trait;

use loadline_application::PrincipalRepository;
use loadline_core::{AppError, AppResult};
use loadline_domain::Principal;

use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed repository resolving users to their role and permissions.
#[derive(Clone)]
pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PrincipalRow {
    id: i64,
    role_name: Option<String>,
    permission_names: Vec<String>,
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>> {
        let Ok(user_id) = subject.parse::<i64>() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT
                users.id,
                roles.name AS role_name,
                ARRAY_REMOVE(
                    ARRAY_AGG(permissions.name ORDER BY permissions.name),
                    NULL
                ) AS permission_names
            FROM users
            LEFT JOIN roles
                ON roles.id = users.role_id
            LEFT JOIN role_permissions
                ON role_permissions.role_id = roles.id
            LEFT JOIN permissions
                ON permissions.id = role_permissions.permission_id
            WHERE users.id = $1
            GROUP BY users.id, roles.name
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load principal for subject '{subject}': {error}"
            ))
        })?;

        Ok(row.map(principal_from_row))
    }
}

// A user without a role carries neither role nor permission data.
fn principal_from_row(row: PrincipalRow) -> Principal {
    match row.role_name {
        Some(role_name) => Principal::with_role(row.id.to_string(), role_name, row.permission_names),
        None => Principal::anonymous(row.id.to_string()),
    }
}
