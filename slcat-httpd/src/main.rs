mod dto;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use slcat_rs_client::{ClientConfig, QueryRunner, ResultCache};
use tokio::sync::Mutex;
use tracing::info;

use crate::routes::AppState;

/// HTTP front-end for SeedLink station-catalog discovery.
#[derive(Parser, Debug)]
#[command(name = "slcat-httpd", version, about)]
struct Args {
    /// HTTP listen address
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Socket connect/read timeout for catalog queries, in seconds
    #[arg(long, default_value_t = 5)]
    socket_timeout: u64,

    /// How long a fetched catalog stays fresh, in seconds
    #[arg(long, default_value_t = 60)]
    cache_refresh: u64,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let socket_timeout = Duration::from_secs(args.socket_timeout);
    let config = ClientConfig {
        connect_timeout: socket_timeout,
        read_timeout: socket_timeout,
    };
    let cache = ResultCache::new(Duration::from_secs(args.cache_refresh));
    let state = AppState {
        runner: Arc::new(Mutex::new(QueryRunner::new(config, cache))),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    info!(
        listen = %args.listen,
        socket_timeout_secs = args.socket_timeout,
        cache_refresh_secs = args.cache_refresh,
        "slcat-httpd listening"
    );
    axum::serve(listener, app).await
}
