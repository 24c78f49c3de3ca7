//! Domain Layer
//!
//! Lookup entities, value objects, the outbound lookup port and the pure
//! dedupe / partition services.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use value_objects::BatchSize;
