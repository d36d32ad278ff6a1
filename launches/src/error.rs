use thiserror::Error;

/// The SpaceX API could not be reached or answered with something unusable.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Error connecting to SpaceX API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to fetch {what}: {status} - {body}")]
    Status {
        what: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse JSON from SpaceX API: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Item must contain 'launch_id' as primary key")]
    InvalidInput,

    #[error("Scan limit must be at least 1")]
    InvalidLimit,

    #[error("Error {op} DynamoDB: {message}")]
    Backend { op: &'static str, message: String },

    #[error("Malformed launch item: {0}")]
    Malformed(String),
}

impl StoreError {
    pub(crate) fn backend(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Backend {
            op,
            message: err.to_string(),
        }
    }
}

/// Anything that aborts a sync run. Upserts committed before the failure stay
/// committed.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    RemoteUnavailable(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
