use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use food_calorie_finder::classifier::{ensure_assets, VitClassifier};
use food_calorie_finder::nutrition::NutritionClient;
use food_calorie_finder::{router, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    if config.api_key.is_none() {
        warn!("API_KEY is not set; nutrition lookups will be rejected by the API");
    }

    let assets = ensure_assets(&config.model)
        .await
        .context("model files are unavailable")?;
    let classifier = tokio::task::spawn_blocking(move || VitClassifier::load(&assets))
        .await?
        .context("failed to load the classification model")?;
    info!(classes = classifier.labels().len(), "classifier loaded");

    let state = Arc::new(AppState {
        classifier: Arc::new(classifier),
        nutrition: NutritionClient::new(config.nutrition_api_url.clone(), config.api_key.clone()),
    });
    let app = router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "server running; open it in a browser to upload a food photo");

    axum::serve(listener, app).await?;
    Ok(())
}
