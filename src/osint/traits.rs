// The OsintSource trait plus the coordinator that fans out to every source.
//
// Reputation services are slow and flaky, so each lookup runs under its own
// timeout and a dead source degrades the scan instead of failing it. The
// outcome distinguishes "source answered with nothing" (empty signals) from
// "source unavailable" (None).

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::scoring::Signal;

#[async_trait]
pub trait OsintSource: Send + Sync {
    /// Short stable identifier, e.g. "urlhaus".
    fn name(&self) -> &'static str;

    /// Look up reputation signals for a URL or domain.
    async fn lookup(&self, url: &str) -> Result<Vec<Signal>>;
}

/// One source's result within a batch. `signals: None` means the source
/// timed out or errored, not that it found nothing.
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub source: &'static str,
    pub signals: Option<Vec<Signal>>,
}

impl SourceOutcome {
    pub fn is_available(&self) -> bool {
        self.signals.is_some()
    }
}

/// Runs every registered source concurrently, each under its own timeout.
pub struct OsintCoordinator {
    sources: Vec<Box<dyn OsintSource>>,
    timeout: Duration,
}

impl OsintCoordinator {
    pub fn new(sources: Vec<Box<dyn OsintSource>>, timeout: Duration) -> Self {
        Self { sources, timeout }
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Query all sources for the given URL. Always returns one outcome per
    /// source, in registration order.
    pub async fn batch_lookup(&self, url: &str) -> Vec<SourceOutcome> {
        let lookups = self.sources.iter().map(|source| async {
            let name = source.name();
            match tokio::time::timeout(self.timeout, source.lookup(url)).await {
                Ok(Ok(signals)) => {
                    debug!(source = name, signals = signals.len(), "lookup complete");
                    SourceOutcome {
                        source: name,
                        signals: Some(signals),
                    }
                }
                Ok(Err(err)) => {
                    warn!(source = name, error = %err, "lookup failed");
                    SourceOutcome {
                        source: name,
                        signals: None,
                    }
                }
                Err(_) => {
                    warn!(source = name, timeout_ms = self.timeout.as_millis() as u64, "lookup timed out");
                    SourceOutcome {
                        source: name,
                        signals: None,
                    }
                }
            }
        });
        join_all(lookups).await
    }
}
