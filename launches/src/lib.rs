//! Shared pieces of the SpaceX launches service: the remote client, the
//! launch record model, the DynamoDB-backed repository and the sync job
//! that ties them together.

pub mod config;
pub mod dynamo;
pub mod error;
pub mod model;
pub mod repository;
pub mod spacex;
pub mod stats;
pub mod sync;

pub use config::Config;
pub use error::{RemoteError, StoreError, SyncError};
pub use model::{LaunchRecord, LaunchStatus};
pub use repository::{ContinuationToken, LaunchRepository, MemoryRepository, Page, UpsertOutcome};
pub use spacex::SpaceXClient;
pub use sync::{sync_launches, SyncSummary};
