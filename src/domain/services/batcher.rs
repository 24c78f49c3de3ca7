//! Batch Partitioning
//!
//! Splits deduplicated request items into contiguous batches that fit the
//! remote service's per-call limit.

use crate::domain::entities::LookupRequestItem;
use crate::domain::value_objects::BatchSize;

/// A non-empty, contiguous group of request items submitted in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Position of this batch in creation order
    index: usize,
    items: Vec<LookupRequestItem>,
}

impl Batch {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn items(&self) -> &[LookupRequestItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for batches produced by [`partition`].
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Addresses of this batch, in submission order.
    pub fn addresses(&self) -> Vec<String> {
        self.items.iter().map(|i| i.address.clone()).collect()
    }
}

/// Partition `items` into batches of at most `max_size` items.
///
/// All batches but the last are full. Concatenating the batches in order
/// reproduces `items` exactly. Empty input yields no batches.
pub fn partition(items: Vec<LookupRequestItem>, max_size: BatchSize) -> Vec<Batch> {
    let max = max_size.get();
    let mut batches = Vec::with_capacity(items.len().div_ceil(max));
    let mut iter = items.into_iter().peekable();

    while iter.peek().is_some() {
        let chunk: Vec<LookupRequestItem> = iter.by_ref().take(max).collect();
        batches.push(Batch {
            index: batches.len(),
            items: chunk,
        });
    }

    batches
}
