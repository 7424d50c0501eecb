use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use loadline_core::{AppError, AppResult, UserIdentity};
use serde::Deserialize;

/// Claims read from a bearer token. `exp` is enforced by the validator and
/// a `role` claim, when present, is ignored in favor of the stored role.
#[derive(Debug, Deserialize)]
struct BearerClaims {
    sub: SubjectClaim,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SubjectClaim {
    Text(String),
    Number(i64),
}

impl SubjectClaim {
    fn into_subject(self) -> String {
        match self {
            Self::Text(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

/// Verifies HS256 bearer tokens signed with the shared secret.
#[derive(Clone)]
pub struct BearerTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl BearerTokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> AppResult<UserIdentity> {
        let token_data = decode::<BearerClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|error| AppError::Unauthorized(format!("invalid bearer token: {error}")))?;

        let subject = token_data.claims.sub.into_subject();
        if subject.trim().is_empty() {
            return Err(AppError::Unauthorized(
                "bearer token subject must not be empty".to_owned(),
            ));
        }

        Ok(UserIdentity::new(subject, token_data.claims.email))
    }
}
