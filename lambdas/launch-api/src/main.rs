use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use lambda_http::{run, tracing, Error};
use launches::dynamo::DynamoRepository;
use launches::Config;

mod error;
mod routes;

use routes::AppState;

async fn serve_local(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("serving launches API on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = Config::from_env()?;
    let sdk_config = aws_config::load_from_env().await;
    let state = AppState {
        repo: Arc::new(DynamoRepository::new(&sdk_config, &config.table_name)),
        table_name: config.table_name.clone(),
    };
    let app = routes::router(state, &config.static_dir);

    match config.bind_addr {
        Some(addr) => serve_local(app, addr).await?,
        None => run(app).await?,
    }

    Ok(())
}
