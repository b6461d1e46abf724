use tracing::debug;

use crate::config::S3BlobConfig;

/// Build an S3 client from the standard AWS environment credential chain.
///
/// When an endpoint URL override is configured the client switches to
/// path-style addressing, which S3-compatible services expect.
pub async fn build_client(config: &S3BlobConfig) -> aws_sdk_s3::Client {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom S3 endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
