use roster_api::config::Config;
use roster_api::error::StartupError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    if let Err(err) = start().await {
        tracing::error!("Error creating application: {}", err);
        std::process::exit(1);
    }
}

async fn start() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    roster_api::run(config).await
}
