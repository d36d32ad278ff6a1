use std::collections::HashMap;

use lambda_runtime::tracing;
use launches::{SyncError, SyncSummary};
use serde::Serialize;
use serde_json::json;

/// API Gateway proxy style result, also returned verbatim to direct invokes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl SyncResponse {
    fn new(status_code: u16, body: serde_json::Value) -> Self {
        Self {
            status_code,
            headers: HashMap::from([("Content-Type".to_owned(), "application/json".to_owned())]),
            body: body.to_string(),
        }
    }

    pub fn completed(summary: SyncSummary) -> Self {
        Self::new(
            200,
            json!({"message": "Launches sync completed", "summary": summary}),
        )
    }

    pub fn failed(err: &SyncError) -> Self {
        let (status_code, message) = match err {
            SyncError::RemoteUnavailable(_) => {
                tracing::error!("SpaceX API error: {err}");
                (502, "Failed to fetch launches from SpaceX API")
            }
            SyncError::Store(_) => {
                tracing::error!("DynamoDB repository error: {err}");
                (500, "Failed to write launches to DynamoDB")
            }
        };

        Self::new(status_code, json!({"message": message, "error": err.to_string()}))
    }

    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        tracing::error!("unexpected error: {err}");
        Self::new(
            500,
            json!({"message": "Unexpected error during launches sync", "error": err.to_string()}),
        )
    }
}
