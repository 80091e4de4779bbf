mod error;
mod feed;
mod parser;
mod pipeline;
mod stats;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

const DEFAULT_FEED_URL: &str =
    "https://www.fsc.gov.tw/RSS/Messages?serno=201202290003&language=chinese";
const DEFAULT_OUT_DIR: &str = "docs/cases";

#[derive(Parser)]
#[command(name = "fsc_cases", about = "FSC enforcement notice crawler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed and save one JSON document per case
    Run {
        /// RSS feed to read
        #[arg(long, env = "FSC_FEED_URL", default_value = DEFAULT_FEED_URL)]
        feed_url: String,
        /// Directory for <dataserno>.json files
        #[arg(short, long, env = "FSC_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
    },
    /// Run the field extractor over a local HTML or text file
    Extract {
        file: PathBuf,
    },
    /// Show how many saved cases have each field populated
    Stats {
        #[arg(short, long, env = "FSC_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { feed_url, out_dir } => {
            let summary = pipeline::run(&feed_url, &out_dir).await?;
            if !summary.succeeded() {
                bail!("No cases were saved");
            }
            Ok(())
        }
        Commands::Extract { file } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let fields = parser::extract(&html);
            println!("{}", serde_json::to_string_pretty(&fields)?);
            Ok(())
        }
        Commands::Stats { out_dir } => {
            if !out_dir.is_dir() {
                bail!("{} does not exist. Run 'run' first.", out_dir.display());
            }
            let s = stats::collect(&out_dir)?;
            stats::print(&s);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
