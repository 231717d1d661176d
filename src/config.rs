use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Tunables for the ingest engine. Library callers that don't care can use
/// [`Config::default`]; the orchestrator needs nothing beyond these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Worker count for parallel ingest. `0` means hardware parallelism.
    pub worker_threads: usize,
    /// File size (uncompressed) at or above which parallel ingest is used.
    pub parallel_threshold_bytes: u64,
    /// When `true`, a duplicate id encountered during ingest is an error
    /// instead of silently letting the last writer win.
    pub strict_duplicate_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            parallel_threshold_bytes: 1024 * 1024,
            strict_duplicate_ids: false,
        }
    }
}

impl Config {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| crate::error::TracEonError::Config(e.to_string()))
    }

    /// Resolve `worker_threads` against detected hardware parallelism.
    pub fn resolved_worker_threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.worker_threads
        }
    }
}
