use std::sync::Arc;

use lambda_runtime::{run, service_fn, tracing, Error, LambdaEvent};
use launches::dynamo::DynamoRepository;
use launches::{sync_launches, Config, LaunchRepository, SpaceXClient};
use serde_json::Value;

mod event;
mod response;

use response::SyncResponse;

#[derive(Clone)]
struct Services {
    spacex: Arc<SpaceXClient>,
    repo: Arc<dyn LaunchRepository>,
}

async fn handle(services: &Services, payload: &Value) -> SyncResponse {
    tracing::info!("received event: {payload}");
    let dry_run = event::parse_dry_run(payload);

    let Services { spacex, repo } = services.clone();
    let task = tokio::spawn(async move { sync_launches(&spacex, repo.as_ref(), dry_run).await });

    match task.await {
        Ok(Ok(summary)) => SyncResponse::completed(summary),
        Ok(Err(err)) => SyncResponse::failed(&err),
        Err(err) => SyncResponse::unexpected(err),
    }
}

async fn handler(services: &Services, event: LambdaEvent<Value>) -> Result<SyncResponse, Error> {
    Ok(handle(services, &event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = Config::from_env()?;
    let sdk_config = aws_config::load_from_env().await;
    let services = Services {
        spacex: Arc::new(SpaceXClient::new()?),
        repo: Arc::new(DynamoRepository::new(&sdk_config, &config.table_name)),
    };
    tracing::info!("syncing launches into table {}", config.table_name);

    let services = &services;
    run(service_fn(move |event| async move { handler(services, event).await })).await?;

    Ok(())
}
