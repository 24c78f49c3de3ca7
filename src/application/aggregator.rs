//! Result Aggregator
//!
//! Fan-in point for lookup workers. Backed by a bounded tokio channel whose
//! capacity equals the number of unique addresses in the invocation, which
//! is the maximum number of records that can ever be pushed.

use crate::domain::entities::LookupResult;
use tokio::sync::mpsc;

/// Collects records pushed concurrently by every worker of one invocation.
///
/// [`Aggregator::drain`] must only be called once every worker holding a
/// [`ResultSink`] has finished; the orchestrator guarantees this by joining
/// all worker tasks first.
pub struct Aggregator {
    tx: mpsc::Sender<LookupResult>,
    rx: mpsc::Receiver<LookupResult>,
    capacity: usize,
}

impl Aggregator {
    /// Create an aggregator able to hold `capacity` records without blocking.
    pub fn with_capacity(capacity: usize) -> Self {
        // tokio rejects zero-capacity channels
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self { tx, rx, capacity }
    }

    /// Get a new handle workers can push into.
    pub fn sink(&self) -> ResultSink {
        ResultSink {
            tx: self.tx.clone(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consume the aggregator and return every pushed record.
    ///
    /// Returns once all outstanding sinks have been dropped.
    pub async fn drain(self) -> Vec<LookupResult> {
        let Self {
            tx,
            mut rx,
            capacity,
        } = self;
        drop(tx);

        let mut results = Vec::with_capacity(capacity);
        while let Some(result) = rx.recv().await {
            results.push(result);
        }
        results
    }
}

/// Cloneable push handle into an [`Aggregator`].
#[derive(Clone)]
pub struct ResultSink {
    tx: mpsc::Sender<LookupResult>,
}

impl ResultSink {
    /// Push one record. Safe to call from any number of tasks at once.
    pub async fn push(&self, result: LookupResult) {
        if self.tx.send(result).await.is_err() {
            tracing::warn!("aggregator already drained, dropping lookup result");
        }
    }
}
