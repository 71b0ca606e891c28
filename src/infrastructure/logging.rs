use std::io;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{config::AppConfig, infrastructure::directories::ResolvedPaths};

static INIT: OnceCell<()> = OnceCell::new();
static GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Log targets emitted by this service.
const SERVICE_TARGETS: [&str; 4] = ["assets", "pipeline", "http", "lifecycle"];

/// `RUST_LOG` wins when set. Otherwise the service targets follow
/// `LOG_LEVEL` and everything else (hyper, axum internals) stays at `warn`.
fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    service_filter(level)
}

fn service_filter(level: &str) -> Result<EnvFilter> {
    let mut directives = vec!["warn".to_string(), format!("{}={level}", env!("CARGO_CRATE_NAME"))];
    directives.extend(SERVICE_TARGETS.iter().map(|target| format!("{target}={level}")));
    EnvFilter::try_new(directives.join(","))
        .with_context(|| format!("invalid LOG_LEVEL {level:?}"))
}

pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths) -> Result<()> {
    INIT.get_or_try_init::<_, anyhow::Error>(|| {
        let env_filter = build_filter(&config.logging.level)?;

        let file_appender = tracing_appender::rolling::daily(&paths.logs_dir, "server.log");
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        let _ = GUARD.set(guard);

        let console_layer = fmt::layer()
            .with_writer(io::stdout)
            .with_target(true)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_ansi(false)
            .with_thread_names(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        tracing::info!(
            target: "lifecycle",
            logs = %paths.logs_dir.display(),
            level = %config.logging.level,
            "tracing initialized"
        );
        Ok(())
    })?;
    Ok(())
}
