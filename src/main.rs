use std::sync::Arc;

use anyhow::Context;

use mail_sorter::config::RelayConfig;
use mail_sorter::llm::create_provider;
use mail_sorter::relay::{Classifier, ClassifierConfig, relay_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = RelayConfig::from_env().context("loading relay configuration")?;

    eprintln!("📬 mail-sorter relay v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   Classify: http://0.0.0.0:{}/classify", config.port);

    let llm = create_provider(&config.llm_config());
    let classifier = Arc::new(Classifier::new(llm, ClassifierConfig::from(&config)));
    let app = relay_routes(classifier);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("binding port {}", config.port))?;
    tracing::info!(port = config.port, "Server running");

    axum::serve(listener, app).await.context("relay server stopped")?;
    Ok(())
}
