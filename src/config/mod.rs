pub mod env;
mod loader;

pub use env::{AppConfig, CorsConfig, DirectoryConfig};
pub use loader::load_config;
