//! Lookup Service Port
//!
//! Defines the interface for resolving a batch of addresses to metadata.

use crate::domain::entities::{LookupRequestItem, LookupResult};
use crate::domain::errors::LookupError;
use async_trait::async_trait;

/// Remote batch-lookup capability.
///
/// This is an outbound port that abstracts the lookup backend.
/// Implementations may call ip-api.com, another HTTP service, or serve
/// canned data in tests.
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Resolve one batch of addresses.
    ///
    /// The response may hold fewer records than the request (partial
    /// failure on the service side) and its order need not match the
    /// request order.
    async fn query(&self, batch: &[LookupRequestItem]) -> Result<Vec<LookupResult>, LookupError>;
}
