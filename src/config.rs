use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {key} is invalid: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub admin_key: String,
}

const DEFAULT_PORT: u16 = 8080;

impl EnvConfig {
    fn get_env(key: &'static str) -> Result<String, ConfigError> {
        env::var(key).map_err(|_| ConfigError::Missing(key))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        let admin_key = Self::get_env("ADMIN_KEY")?;
        if admin_key.trim().is_empty() {
            return Err(ConfigError::Invalid { key: "ADMIN_KEY", value: admin_key });
        }

        Ok(EnvConfig {
            port,
            db_url: Self::get_env("DATABASE_URL")?,
            admin_key,
        })
    }
}
