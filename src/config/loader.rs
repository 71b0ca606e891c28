use std::{env, path::PathBuf};

use super::env::{AppConfig, ConfigError, CorsConfig, DirectoryConfig, LoggingConfig, ServerConfig};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let model_dir = PathBuf::from(var("MODEL_DIR").unwrap_or_else(|| "model_assets".to_string()));

        let require_assets = match var("REQUIRE_ASSETS") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                key: "REQUIRE_ASSETS",
                value,
            })?,
            None => false,
        };

        let port = match var("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => 8002,
        };

        let cors = match var("CORS_ALLOWED_ORIGINS") {
            None => CorsConfig::AnyOrigin,
            Some(value) if value == "*" => CorsConfig::AnyOrigin,
            Some(value) => {
                let origins = value
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>();
                if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
                    return Err(ConfigError::Invalid {
                        key: "CORS_ALLOWED_ORIGINS",
                        value,
                    });
                }
                CorsConfig::Origins(origins)
            }
        };

        let server = ServerConfig {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            cors,
        };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            model_dir,
            require_assets,
            server,
            directories,
            logging,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
