//! Thin CLI front end: reads one ECG image, runs the full pipeline, prints
//! the canonical JSON contract. Installs the process-wide tracing
//! subscriber and config, same shape as the teacher's `main.rs`.

use std::path::PathBuf;

use clap::Parser;

use cardiolens_core::config::{self, PipelineConfig};
use cardiolens_core::types::Bitmap;
use cardiolens_core::Orchestrator;

#[derive(Parser, Debug)]
#[command(name = "cardiolens", about = "12-lead ECG digitization and interpretation core")]
struct Args {
    /// Path to a rasterized ECG image (PNG/JPEG).
    image: PathBuf,

    /// Session id to stamp on the output contract.
    #[arg(long, default_value = "local-session")]
    session_id: String,

    /// Optional path to a TOML config file; overrides CARDIOLENS_CONFIG.
    #[arg(long, env = "CARDIOLENS_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let args = Args::parse();

    let pipeline_config = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        }
        None => PipelineConfig::load(),
    };
    config::init(pipeline_config);

    let bytes = std::fs::read(&args.image)?;
    let bitmap = Bitmap::decode(&bytes)?;

    let contract = Orchestrator::run(&bitmap, args.session_id, config::get());

    let json = if args.pretty {
        serde_json::to_string_pretty(&contract)?
    } else {
        serde_json::to_string(&contract)?
    };
    println!("{json}");

    Ok(())
}
