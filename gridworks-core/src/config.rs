// Engine configuration and resource guards

use serde::{Deserialize, Serialize};

/// Configuration for one worker engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of records accepted in a single request. Requests
    /// over this limit are rejected with a failure response rather than
    /// risking memory exhaustion in the worker.
    pub max_records: usize,

    /// Requests taking longer than this (milliseconds) are logged at warn
    /// level so slow operations are visible without metrics plumbing.
    pub slow_request_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_records: 1_000_000,
            slow_request_ms: 250,
        }
    }
}

impl EngineConfig {
    pub fn check_record_count(&self, count: usize) -> crate::Result<()> {
        if count > self.max_records {
            return Err(crate::Error::Rejected(format!(
                "request carries {} records (max: {})",
                count, self.max_records
            )));
        }
        Ok(())
    }
}
