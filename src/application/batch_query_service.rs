//! Batch Query Service - Main application use case
//!
//! Orchestrates one lookup invocation: dedupe the input, partition it into
//! batches, fan out one worker per batch, wait for every worker, then drain
//! the aggregated records.

use crate::application::aggregator::Aggregator;
use crate::application::query_worker::{BatchError, BatchFailure, QueryWorker};
use crate::domain::entities::{LookupRequestItem, LookupResult};
use crate::domain::ports::LookupService;
use crate::domain::services::{dedupe, partition};
use crate::domain::value_objects::BatchSize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Tuning for [`BatchQueryService`].
#[derive(Debug, Clone, Default)]
pub struct BatchQueryOptions {
    /// Maximum number of addresses per lookup call
    pub max_batch_size: BatchSize,
    /// Maximum number of lookup calls in flight. `None` runs every batch at once.
    pub max_concurrency: Option<usize>,
}

/// Outcome of one invocation, including the batches that failed.
#[derive(Debug, Clone, Default)]
pub struct BatchQueryReport {
    /// Records returned by the lookup service, in no particular order
    pub results: Vec<LookupResult>,
    /// Failed batches, ordered by batch index
    pub failures: Vec<BatchFailure>,
    /// Number of distinct input addresses
    pub unique_addresses: usize,
    /// Number of batches dispatched
    pub batches: usize,
}

impl BatchQueryReport {
    /// Whether every batch reached the lookup service successfully.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Addresses from failed batches, in submission order.
    pub fn failed_addresses(&self) -> Vec<String> {
        self.failures
            .iter()
            .flat_map(|f| f.addresses.iter().cloned())
            .collect()
    }
}

/// Batch query service - main application use case.
///
/// The service is best-effort: a failing batch reduces the result set but
/// never aborts the whole invocation.
pub struct BatchQueryService {
    lookup: Arc<dyn LookupService>,
    options: BatchQueryOptions,
}

impl BatchQueryService {
    /// Create a new batch query service.
    pub fn new(lookup: Arc<dyn LookupService>, options: BatchQueryOptions) -> Self {
        Self { lookup, options }
    }

    pub fn options(&self) -> &BatchQueryOptions {
        &self.options
    }

    /// Resolve every distinct address in `addresses`.
    ///
    /// Results from failed batches are silently omitted; use
    /// [`batch_query_with_report`](Self::batch_query_with_report) to learn
    /// which batches failed.
    pub async fn batch_query<I, S>(&self, addresses: I) -> Vec<LookupResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.batch_query_with_report(addresses).await.results
    }

    /// Resolve every distinct address and report failed batches alongside
    /// the results.
    pub async fn batch_query_with_report<I, S>(&self, addresses: I) -> BatchQueryReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique = dedupe(addresses);
        let unique_addresses = unique.len();

        if unique.is_empty() {
            tracing::debug!("batch query with no addresses, skipping lookup");
            return BatchQueryReport::default();
        }

        let items: Vec<LookupRequestItem> =
            unique.into_iter().map(LookupRequestItem::new).collect();
        let batches = partition(items, self.options.max_batch_size);
        let batch_count = batches.len();

        tracing::debug!(
            "batch query: {} unique addresses in {} batches (max {} per batch)",
            unique_addresses,
            batch_count,
            self.options.max_batch_size
        );

        let aggregator = Aggregator::with_capacity(unique_addresses);
        let limiter = self
            .options
            .max_concurrency
            .map(|n| Arc::new(Semaphore::new(n.max(1))));

        // Batches that have not reported back yet
        let mut pending: HashMap<usize, Vec<String>> = batches
            .iter()
            .map(|b| (b.index(), b.addresses()))
            .collect();

        // Fan out: every worker is spawned before any is awaited
        let mut workers = JoinSet::new();
        for batch in batches {
            let worker = QueryWorker::new(batch, self.lookup.clone(), aggregator.sink());
            let limiter = limiter.clone();

            workers.spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                worker.run().await
            });
        }

        // Barrier: join every worker before reading the aggregator
        let mut failures = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(outcome)) => {
                    pending.remove(&outcome.batch_index);
                }
                Ok(Err(failure)) => {
                    pending.remove(&failure.batch_index);
                    failures.push(failure);
                }
                Err(e) => {
                    tracing::warn!("lookup worker task failed: {}", e);
                }
            }
        }

        for (batch_index, addresses) in pending {
            failures.push(BatchFailure {
                batch_index,
                addresses,
                error: BatchError::Aborted,
            });
        }
        failures.sort_by_key(|f| f.batch_index);

        let results = aggregator.drain().await;

        tracing::debug!(
            "batch query finished: {} records, {} of {} batches failed",
            results.len(),
            failures.len(),
            batch_count
        );

        BatchQueryReport {
            results,
            failures,
            unique_addresses,
            batches: batch_count,
        }
    }
}
