use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

use todo_core::{SqliteTodoStore, TodoService};
use todo_rpc::TodoRpcClient;
use todo_server::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "todo_server=info,todo_rpc=info,todo_core=info,tower_http=info".into()
            }),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    info!(
        http_addr = %config.http_addr,
        grpc_addr = %config.grpc_addr,
        rpc_endpoint = %config.rpc_endpoint,
        "configuration loaded"
    );

    let store = SqliteTodoStore::connect(&config.database_url)
        .await
        .with_context(|| format!("opening database {}", config.database_url))?;
    let service = TodoService::new(Arc::new(store.clone()));

    let grpc_listener = TcpListener::bind(config.grpc_addr)
        .await
        .with_context(|| format!("binding gRPC listener on {}", config.grpc_addr))?;
    let (grpc_stop, grpc_stopped) = oneshot::channel::<()>();
    let grpc = tokio::spawn(async move {
        let signal = async {
            grpc_stopped.await.ok();
        };
        if let Err(e) = todo_rpc::serve_with_shutdown(grpc_listener, service, signal).await {
            error!(error = %e, "gRPC server failed");
        }
    });
    info!(addr = %config.grpc_addr, "gRPC server listening");

    let client = TodoRpcClient::connect(&config.rpc_endpoint)
        .await
        .with_context(|| format!("connecting to {}", config.rpc_endpoint))?;

    let http_listener = TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("binding HTTP listener on {}", config.http_addr))?;
    info!(addr = %config.http_addr, "HTTP server listening");

    let router = todo_server::app_with_cors(client, config.cors_origin.clone());
    axum::serve(http_listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("shutting down");
    grpc_stop.send(()).ok();
    if let Err(e) = grpc.await {
        error!(error = %e, "gRPC task panicked");
    }
    store.close().await;
    info!("shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
    }
}
