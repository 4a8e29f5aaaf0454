use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    pub results_path: PathBuf,
    pub message_path: PathBuf,
}

/// UTC stamp shared by the files of one run, e.g. `20250601_093015`.
pub fn run_stamp() -> String {
    Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Write `results_<stamp>.json` and `email_<stamp>.txt` into `dir`, creating it if needed.
pub fn write_artifacts(
    dir: &Path,
    stamp: &str,
    results: &Value,
    message: &str,
) -> Result<SavedArtifacts> {
    std::fs::create_dir_all(dir)?;

    let results_path = dir.join(format!("results_{stamp}.json"));
    std::fs::write(&results_path, serde_json::to_string_pretty(results)?)?;

    let message_path = dir.join(format!("email_{stamp}.txt"));
    std::fs::write(&message_path, message)?;

    debug!(
        results = %results_path.display(),
        message = %message_path.display(),
        "Artifacts written"
    );
    Ok(SavedArtifacts {
        results_path,
        message_path,
    })
}
