//! Storage layer: finalized analyses persisted as opaque JSON blobs keyed by
//! document id. Only complete analysis runs are ever written; the core never
//! sees the storage format.

mod error;
mod store;

pub use error::StoreError;
pub use store::{AnalysisRecord, FileStore};
