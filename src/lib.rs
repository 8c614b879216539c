pub mod api; // HTTP form + JSON endpoint
pub mod classifier; // Trained classifier seam (ONNX / mock)
pub mod config;
pub mod form; // Form Renderer
pub mod models;
pub mod predictor; // Inference Adapter
pub mod risk;

use tracing_subscriber::EnvFilter;

/// Anything that stops the application from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Classifier failed to load: {0}")]
    Classifier(#[from] classifier::ClassifierError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the model, serve the form until Ctrl-C.
///
/// The classifier is loaded before the listener binds; if that fails the
/// process never accepts a request.
pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::ServerConfig::from_env()?;
    let classifier = classifier::load_classifier(&settings)?;
    tracing::info!(
        backend = classifier.backend(),
        path = %settings.model_path.display(),
        "Classifier ready"
    );

    let mut server = api::start_server(classifier, settings.bind_addr).await?;
    tracing::info!(url = %server.url(), "Serving readmission form");

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    server.stopped().await;

    Ok(())
}
