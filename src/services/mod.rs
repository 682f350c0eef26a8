pub mod enrich;
pub mod filter;
pub mod sync;

pub use enrich::Enricher;
pub use sync::{SyncError, SyncService, SyncStats};
