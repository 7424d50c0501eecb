use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use loadline_core::AppError;
use tracing_subscriber::EnvFilter;

const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub jwt_secret: String,
    pub api_host: String,
    pub api_port: u16,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_non_empty_env("DATABASE_URL")?;
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(10);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let jwt_secret = required_env("JWT_SECRET")?;
        validate_jwt_secret(jwt_secret.as_str())?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            jwt_secret,
            api_host,
            api_port,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn validate_jwt_secret(secret: &str) -> Result<(), AppError> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(AppError::Validation(format!(
            "JWT_SECRET must be at least {MIN_JWT_SECRET_LENGTH} characters"
        )));
    }

    Ok(())
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{ApiConfig, validate_jwt_secret};

    fn config(api_host: &str) -> ApiConfig {
        ApiConfig {
            migrate_only: false,
            database_url: "postgres://localhost/loadline".to_owned(),
            database_max_connections: 10,
            frontend_url: "http://localhost:3000".to_owned(),
            jwt_secret: "a".repeat(32),
            api_host: api_host.to_owned(),
            api_port: 3001,
        }
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let result = validate_jwt_secret("too-short");
        assert!(result.is_err());
        assert!(validate_jwt_secret("x".repeat(32).as_str()).is_ok());
    }

    #[test]
    fn socket_address_requires_ip_host() {
        let address = config("127.0.0.1").socket_address();
        assert_eq!(
            address.map(|address| address.to_string()).unwrap_or_default(),
            "127.0.0.1:3001"
        );
        assert!(config("localhost").socket_address().is_err());
    }
}
