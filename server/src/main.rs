use std::net::SocketAddr;
use std::path::Path;

use anyhow::{bail, Result};
use axum::Router;
use clap::Parser;
use engine::config::EngineConfig;
use engine::persist::{load_index, IndexPaths};
use server::build_app;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Engine configuration file (corpus_path, index_path, indexer_type)
    #[arg(long, default_value = "conf/engine.conf")]
    config: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = EngineConfig::from_file(Path::new(&args.config))?;
    let index = load_index(&IndexPaths::new(&config.index_path))?;
    if index.kind() != config.indexer_type {
        bail!(
            "configuration selects the {} indexer but {} holds a {} index",
            config.indexer_type,
            config.index_path.display(),
            index.kind()
        );
    }
    tracing::info!(
        num_docs = index.num_docs(),
        kind = %index.kind(),
        "serving loaded index"
    );

    let app: Router = build_app(index);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
