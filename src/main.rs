use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod batch;
mod chart;
mod config;
mod error;
mod histogram;
mod output;
mod processing;

#[derive(Parser, Debug)]
#[command(name = "graylevel-transforms")]
#[command(about = "Apply log, gamma and equalization transforms to grayscale images and chart their histograms")]
#[command(version)]
pub struct Args {
    /// Directory receiving the output tree
    #[arg(long, env = "GRAYLEVEL_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Directory holding input1.tif .. input4.tif for the default batch
    #[arg(long, env = "GRAYLEVEL_INPUT_DIR", default_value = "input")]
    pub input_dir: PathBuf,

    /// JSON batch manifest: [{"path": "...", "local_equalization": true}, ...]
    #[arg(long, env = "GRAYLEVEL_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting graylevel-transforms v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = config::Config::try_from(args)?;
    tracing::info!(
        "Processing {} inputs into {}",
        config.batch.len(),
        config.output_dir.display()
    );

    batch::run(&config)?;

    Ok(())
}
