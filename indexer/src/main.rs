use std::path::Path;

use anyhow::Result;
use clap::Parser;
use engine::config::EngineConfig;
use engine::index::construct;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the search index described by an engine configuration file", long_about = None)]
struct Args {
    /// Engine configuration file (corpus_path, index_path, indexer_type)
    #[arg(long, default_value = "conf/engine.conf")]
    config: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = EngineConfig::from_file(Path::new(&args.config))?;
    let index = construct(&config)?;
    tracing::info!(
        num_docs = index.num_docs(),
        num_terms = index.num_terms(),
        output = %config.index_path.display(),
        "index build complete"
    );
    Ok(())
}
