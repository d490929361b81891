//! Pure status and derived-value encoders, one per resource family.
//!
//! Nothing here performs I/O; every function maps decoded records to values
//! and label sets so it can be checked against literal fixtures.

pub mod backup;
pub mod download_client;
pub mod indexer;
pub mod library;
pub mod queue;
pub mod system;
pub mod update;

pub use backup::{backup_age, freshest};
pub use download_client::download_client_reading;
pub use indexer::indexer_status;
pub use library::LibraryTotals;
pub use queue::queue_counts;
pub use system::{health_reading, system_status_reading};
pub use update::update_reading;
