use lambda_runtime::{run, service_fn, tracing, Error};
use s3_bucket_lister::{function_handler, ListerConfig, S3};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = ListerConfig::from_env()?;
    let s3 = S3::with_config(&config).await;
    let lister = s3
        .bucket(config.bucket.clone())
        .lister()
        .with_max_keys(config.max_keys);

    run(service_fn(|event| function_handler(event, &lister))).await
}
