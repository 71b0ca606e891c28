use std::{future::IntoFuture, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use tokio::{net::TcpListener, time::timeout};

use crate::{
    ai::ModelAssets,
    config::AppConfig,
    http::{self, ApiState},
    infrastructure::shutdown::Shutdown,
    pipeline::EmailClassifier,
};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct ClassifierApp {
    config: Arc<AppConfig>,
    state: Arc<ApiState>,
    shutdown: Shutdown,
}

impl ClassifierApp {
    /// Loads the model assets once. A load failure aborts startup when
    /// `REQUIRE_ASSETS` is set; otherwise the server starts degraded and
    /// reports the failure on every classification request.
    pub fn initialize(config: AppConfig, shutdown: Shutdown) -> Result<Self> {
        let config = Arc::new(config);

        let state = match ModelAssets::load(&config.model_dir) {
            Ok(assets) => {
                let loaded_at = assets.loaded_at();
                let classifier = EmailClassifier::new(Arc::new(assets));
                ApiState::ready(Arc::new(classifier), config.model_dir.clone(), loaded_at)
            }
            Err(err) if config.require_assets => {
                return Err(err).context("failed to load machine learning assets on startup");
            }
            Err(err) => {
                tracing::error!(
                    target: "assets",
                    error = %err,
                    artifact = %err.artifact(),
                    "모델 자산 로드 실패 - 분류 요청은 거부됩니다"
                );
                ApiState::degraded(config.model_dir.clone())
            }
        };

        Ok(Self {
            config,
            state: Arc::new(state),
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let ClassifierApp {
            config,
            state,
            shutdown,
        } = self;

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let app = http::router(state.clone(), &config.server.cors)?;

        tracing::info!(
            target: "lifecycle",
            %addr,
            assets_loaded = state.is_ready(),
            "이메일 분류 서버 시작"
        );

        let mut graceful = shutdown.subscribe();
        let server = axum::serve(listener, app)
            .with_graceful_shutdown(async move { graceful.notified().await })
            .into_future();
        tokio::pin!(server);

        let mut shutdown_listener = shutdown.subscribe();
        tokio::select! {
            res = &mut server => {
                res.context("http server exited with an error")?;
                if !shutdown_listener.is_triggered() {
                    tracing::warn!(target: "lifecycle", "http server stopped without a shutdown signal");
                }
            }
            _ = shutdown_listener.notified() => {
                tracing::info!(target: "lifecycle", "종료 신호 감지 (CTRL+C / SIGTERM)");
                match timeout(SHUTDOWN_TIMEOUT, &mut server).await {
                    Ok(res) => res.context("http server exited with an error")?,
                    Err(_) => {
                        tracing::warn!(
                            target: "lifecycle",
                            "in-flight requests did not finish within {:?}; forcing exit",
                            SHUTDOWN_TIMEOUT
                        );
                    }
                }
            }
        }

        tracing::info!(target: "lifecycle", "서버 종료 완료");
        Ok(())
    }
}
