//! ipbatch Library
//!
//! Resolves location and network-operator metadata for many IP addresses
//! at once through a remote batch-lookup service. Addresses are
//! deduplicated, split into batches the service accepts, and queried
//! concurrently; the records of every batch are merged into one collection.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::outbound::{IpApiConfig, IpApiLookupService};
pub use application::{BatchFailure, BatchQueryOptions, BatchQueryReport, BatchQueryService};
pub use config::{load_config, Config, OutputFormat};
pub use domain::entities::{LookupRequestItem, LookupResult};
pub use domain::errors::LookupError;
pub use domain::ports::LookupService;
pub use domain::services::{dedupe, partition, Batch};
pub use domain::value_objects::BatchSize;
