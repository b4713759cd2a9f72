//! Human-readable lifecycle trace for one aggregation
//!
//! Each entry is mirrored to `tracing` at debug level so the returned trace
//! and the log stream agree.

use std::fmt;
use std::time::Instant;
use tracing::debug;

/// Pipeline stage a trace entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    FanOut,
    Geolocate,
    Normalize,
    Dorks,
    Score,
    Complete,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate",
            Stage::FanOut => "fan-out",
            Stage::Geolocate => "geolocate",
            Stage::Normalize => "normalize",
            Stage::Dorks => "dorks",
            Stage::Score => "score",
            Stage::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Ordered, append-only trace
#[derive(Debug)]
pub struct TraceBuilder {
    started: Instant,
    entries: Vec<String>,
}

impl Default for TraceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Append an entry stamped with the time since the trace began
    pub fn record(&mut self, stage: Stage, message: impl AsRef<str>) {
        let entry = format!(
            "[+{}ms] {}: {}",
            self.started.elapsed().as_millis(),
            stage,
            message.as_ref()
        );
        debug!("{}", entry);
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> Vec<String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_order() {
        let mut trace = TraceBuilder::new();
        trace.record(Stage::Validate, "request accepted");
        trace.record(Stage::Score, format!("score {}", 83));

        let entries = trace.finish();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with("[+"));
        assert!(entries[0].ends_with("validate: request accepted"));
        assert!(entries[1].ends_with("score: score 83"));
    }
}
