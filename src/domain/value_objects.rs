//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of items per call accepted by the ip-api batch endpoint.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Upper bound on the number of items in one batch.
///
/// Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BatchSize(usize);

impl BatchSize {
    /// Create a batch size, or `None` if `size` is zero.
    ///
    /// # Examples
    /// ```
    /// use ipbatch::BatchSize;
    ///
    /// assert_eq!(BatchSize::new(50).map(|s| s.get()), Some(50));
    /// assert!(BatchSize::new(0).is_none());
    /// ```
    pub fn new(size: usize) -> Option<Self> {
        if size == 0 {
            None
        } else {
            Some(Self(size))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(DEFAULT_MAX_BATCH_SIZE)
    }
}

impl TryFrom<usize> for BatchSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "batch size must be greater than zero".to_string())
    }
}

impl From<BatchSize> for usize {
    fn from(size: BatchSize) -> Self {
        size.0
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
