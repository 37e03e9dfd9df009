use std::sync::Arc;

use mindwell_api::config::ApiConfig;
use mindwell_api::state::AppState;
use mindwell_checkin::catalog::Catalog;
use mindwell_instruments::catalog::validate_clinical_catalog;
use mindwell_storage::s3::S3DocumentStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    // A broken catalog is a deploy defect; refuse to start.
    Catalog::builtin().validate()?;
    validate_clinical_catalog()?;

    let config = ApiConfig::from_env()?;
    tracing::info!(bucket = %config.store.bucket, prefix = ?config.store.prefix, "starting mindwell api");

    let store = S3DocumentStore::from_config(config.store.clone()).await;
    let state = AppState::new(Arc::new(store), config);

    lambda_http::run(mindwell_api::app(state)).await.map_err(|e| eyre::eyre!(e))
}
