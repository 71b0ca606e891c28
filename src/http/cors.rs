use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::CorsConfig;

/// `*` allows every origin without credentials. An explicit origin list
/// mirrors the requested method and headers and allows credentials.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let layer = match config {
        CorsConfig::AnyOrigin => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::Origins(origins) => {
            let origins = origins
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .with_context(|| format!("invalid CORS origin {origin:?}"))
                })
                .collect::<Result<Vec<_>>>()?;
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    };
    Ok(layer)
}
