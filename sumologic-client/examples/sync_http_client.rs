use std::{env, thread::sleep, time::Duration};

use sumologic_client::{
    http::{sync::SumoLogicClient, HttpConfig},
    resource::{AwsCloudTrailSource, Collector, HttpSource},
    ClientError, ClientResult,
};
use tracing::{info, warn};

const AWS_RETRIES: u32 = 5;

fn main() -> ClientResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::metadata::LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    let endpoint = env::var("SUMOLOGIC_ENDPOINT")
        .unwrap_or_else(|_| "https://api.sumologic.com/api/v1/".to_string());
    let auth_token = env::var("SUMOLOGIC_AUTH_TOKEN").unwrap_or_default();

    let http_config = HttpConfig::new(&endpoint, &auth_token)?
        .with_headers([("User-Agent", "sumologic-client-example")])?
        .with_timeout(Duration::from_secs(30));
    let client = SumoLogicClient::from_config(http_config);

    let collector = client.create_hosted_collector(&Collector {
        description: Some("created by the sync example".to_string()),
        category: Some("examples".to_string()),
        ..Collector::hosted("sumologic-client-example")
    })?;
    let Some(collector_id) = collector.id else {
        warn!("the created collector has no id");
        return Ok(());
    };
    info!(collector_id, "hosted collector created");

    let mut source = HttpSource::named("http-example");
    source.message_per_request = true;
    let source = client.create_http_source(collector_id, &source)?;
    info!(url = ?source.url, "http source created");

    if let Some(source_id) = source.base.id {
        let (mut source, etag) = client.get_http_source(collector_id, source_id)?;
        source.base.category = Some("examples/http".to_string());
        client.update_http_source(collector_id, &source, etag.as_deref().unwrap_or_default())?;
        info!(source_id, "http source updated");
    }

    if let Ok(role_arn) = env::var("SUMOLOGIC_AWS_ROLE_ARN") {
        let trail = AwsCloudTrailSource::new("cloudtrail-example", "cloudtrail", "*", role_arn);
        let trail = create_with_retries(&client, collector_id, &trail)?;
        info!(source_id = ?trail.base.id, "cloudtrail source created");
    }

    // deleting the collector removes its sources
    match client.delete_hosted_collector(collector_id) {
        Err(err) if err.is_not_found() => warn!("collector already deleted"),
        result => result?,
    }
    info!(collector_id, "hosted collector deleted");

    Ok(())
}

// IAM roles can take a while to be usable by Sumo Logic once created.
fn create_with_retries(
    client: &SumoLogicClient,
    collector_id: u64,
    source: &AwsCloudTrailSource,
) -> ClientResult<AwsCloudTrailSource> {
    let mut attempt = 1;
    loop {
        match client.create_aws_cloudtrail_source(collector_id, source) {
            Err(err @ ClientError::AwsAuthentication(_)) if attempt < AWS_RETRIES => {
                warn!(attempt, "{err}, retrying");
                sleep(Duration::from_secs(5 * u64::from(attempt)));
                attempt += 1;
            }
            result => return result,
        }
    }
}
