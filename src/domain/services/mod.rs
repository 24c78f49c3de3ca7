mod batcher;
mod dedup;

pub use batcher::{partition, Batch};
pub use dedup::dedupe;
