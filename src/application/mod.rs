//! Application Layer
//!
//! The batch query use case and the fan-out / fan-in machinery behind it.

pub mod aggregator;
pub mod batch_query_service;
pub mod query_worker;

pub use aggregator::{Aggregator, ResultSink};
pub use batch_query_service::{BatchQueryOptions, BatchQueryReport, BatchQueryService};
pub use query_worker::{BatchError, BatchFailure, BatchOutcome, QueryWorker};
