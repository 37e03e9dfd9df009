use aws_sdk_s3::Client;

use crate::config::StoreConfig;

/// S3 client for the configured region. Credentials come from the default
/// provider chain (Lambda execution role in production).
pub async fn build_client(config: &StoreConfig) -> Client {
    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;
    Client::new(&sdk_config)
}
