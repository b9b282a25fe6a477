use std::collections::HashMap;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    /// External DDL script; the bundled schema is used when absent.
    pub schema_path: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let schema_path = env_map
            .get("SCHEMA_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let max_connections = match env_map.get("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "DB_MAX_CONNECTIONS".to_string(),
                        format!("must be a positive integer, got {}", raw),
                    ))
                }
            },
        };

        Ok(Config {
            database_path,
            schema_path,
            max_connections,
        })
    }

    /// Read the external DDL script, if one is configured.
    pub fn load_schema_script(&self) -> Result<Option<String>, ConfigError> {
        match &self.schema_path {
            None => Ok(None),
            Some(path) => std::fs::read_to_string(path).map(Some).map_err(|e| {
                ConfigError::InvalidValue("SCHEMA_PATH".to_string(), format!("{}: {}", path, e))
            }),
        }
    }
}
