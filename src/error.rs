use std::path::PathBuf;

use thiserror::Error;

/// Failures that drop a single feed entry without stopping the run.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("could not extract dataserno from link: {link}")]
    MissingId { link: String },

    #[error("error encoding case {id}: {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("error saving case to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
