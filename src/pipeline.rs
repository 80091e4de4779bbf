use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::feed::{self, FeedEntry};
use crate::parser;
use crate::store;

/// Tally returned after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn succeeded(&self) -> bool {
        self.saved > 0
    }

    pub fn print(&self) {
        println!(
            "Successfully saved {} cases as individual JSON files",
            self.saved
        );
        if self.failed > 0 {
            println!("Failed to save {} cases", self.failed);
        }
    }
}

/// Fetch the feed and write one document per case into `out_dir`.
pub async fn run(feed_url: &str, out_dir: &Path) -> Result<RunSummary> {
    store::ensure_dir(out_dir)?;
    let entries = feed::fetch_entries(feed_url)
        .await
        .context("Error fetching feed")?;
    let summary = save_entries(&entries, out_dir);
    summary.print();
    Ok(summary)
}

/// Build and save each entry in feed order. Failures are counted, not raised.
pub fn save_entries(entries: &[FeedEntry], out_dir: &Path) -> RunSummary {
    let pb = ProgressBar::new(entries.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut summary = RunSummary::default();
    for entry in entries {
        let saved = parser::build_case(entry).and_then(|case| {
            pb.set_message(case.dataserno.clone());
            store::save(out_dir, &case)
        });
        match saved {
            Ok(path) => {
                summary.saved += 1;
                info!(path = %path.display(), "saved case");
            }
            Err(e) => {
                summary.failed += 1;
                debug!(error = %e, "skipping entry");
                pb.println(format!("Warning: {e}"));
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(saved = summary.saved, failed = summary.failed, "run finished");
    summary
}
