//! Query Worker
//!
//! Runs one batch against the lookup port and forwards the records to the
//! shared sink. One worker per batch; workers share nothing but the sink.

use crate::application::aggregator::ResultSink;
use crate::domain::errors::LookupError;
use crate::domain::ports::LookupService;
use crate::domain::services::Batch;
use std::sync::Arc;

/// Why a batch contributed no results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// The worker task ended without reporting (panic or abort).
    #[error("lookup worker did not complete")]
    Aborted,
}

/// A batch whose lookup call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub batch_index: usize,
    /// Addresses that were submitted in the failed batch
    pub addresses: Vec<String>,
    pub error: BatchError,
}

/// A batch whose records reached the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub batch_index: usize,
    /// Number of records pushed into the sink
    pub pushed: usize,
}

/// Executes the lookup for a single batch.
pub struct QueryWorker {
    batch: Batch,
    lookup: Arc<dyn LookupService>,
    sink: ResultSink,
}

impl QueryWorker {
    pub fn new(batch: Batch, lookup: Arc<dyn LookupService>, sink: ResultSink) -> Self {
        Self {
            batch,
            lookup,
            sink,
        }
    }

    /// Query the batch and push every returned record.
    ///
    /// On failure nothing is pushed for this batch. A response holding more
    /// records than the batch has items is cut to the batch length so the
    /// sink never exceeds its capacity.
    pub async fn run(self) -> Result<BatchOutcome, BatchFailure> {
        let index = self.batch.index();
        let size = self.batch.len();

        tracing::debug!("dispatching batch {} ({} addresses)", index, size);

        let results = match self.lookup.query(self.batch.items()).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(
                    "batch {} failed ({} addresses, {} error): {}",
                    index,
                    size,
                    e.kind(),
                    e
                );
                return Err(BatchFailure {
                    batch_index: index,
                    addresses: self.batch.addresses(),
                    error: e.into(),
                });
            }
        };

        if results.len() > size {
            tracing::warn!(
                "batch {} returned {} records for {} addresses, keeping the first {}",
                index,
                results.len(),
                size,
                size
            );
        }

        let mut pushed = 0;
        for result in results.into_iter().take(size) {
            self.sink.push(result).await;
            pushed += 1;
        }

        tracing::debug!("batch {} done, {} records", index, pushed);

        Ok(BatchOutcome {
            batch_index: index,
            pushed,
        })
    }
}
