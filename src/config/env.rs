use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_dir: PathBuf,
    pub require_assets: bool,
    pub server: ServerConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsConfig {
    AnyOrigin,
    Origins(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
