use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use aws_types::SdkConfig;

use crate::error::StoreError;
use crate::model::LaunchRecord;
use crate::repository::{check_limit, stamp, ContinuationToken, LaunchRepository, Page, UpsertOutcome};

const KEY: &str = "launch_id";

type Item = HashMap<String, AttributeValue>;

/// Launch table backed by DynamoDB, partition key `launch_id`.
#[derive(Debug, Clone)]
pub struct DynamoRepository {
    client: Client,
    table_name: String,
}

impl DynamoRepository {
    pub fn new(config: &SdkConfig, table_name: impl Into<String>) -> Self {
        Self::from_client(Client::new(config), table_name)
    }

    pub fn from_client(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl LaunchRepository for DynamoRepository {
    async fn upsert(&self, record: LaunchRecord) -> Result<UpsertOutcome, StoreError> {
        let record = stamp(record)?;
        let resp = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(&record)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| StoreError::backend("writing item to", DisplayErrorContext(e)))?;

        let existed = resp.attributes().is_some_and(|old| !old.is_empty());
        tracing::debug!(launch_id = %record.launch_id, existed, "upserted launch");

        Ok(if existed {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        })
    }

    async fn get(&self, launch_id: &str) -> Result<Option<LaunchRecord>, StoreError> {
        let resp = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY, AttributeValue::S(launch_id.to_owned()))
            .send()
            .await
            .map_err(|e| StoreError::backend("reading item from", DisplayErrorContext(e)))?;

        resp.item().map(from_item).transpose()
    }

    async fn list(
        &self,
        limit: usize,
        token: Option<ContinuationToken>,
    ) -> Result<Page, StoreError> {
        check_limit(limit)?;
        let start_key = token.map(|ContinuationToken(id)| {
            HashMap::from([(KEY.to_owned(), AttributeValue::S(id))])
        });

        let resp = self
            .client
            .scan()
            .table_name(&self.table_name)
            .limit(i32::try_from(limit).unwrap_or(i32::MAX))
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(|e| StoreError::backend("scanning", DisplayErrorContext(e)))?;

        // Items that no longer decode are skipped, not fatal.
        let records = resp
            .items()
            .iter()
            .filter_map(|item| match from_item(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!("skipping unreadable launch item: {err}");
                    None
                }
            })
            .collect();

        let next = resp
            .last_evaluated_key()
            .and_then(|key| key.get(KEY))
            .and_then(|id| id.as_s().ok())
            .map(|id| ContinuationToken(id.clone()));

        Ok(Page { records, next })
    }
}

fn to_item(record: &LaunchRecord) -> Item {
    let mut item = HashMap::from([
        (KEY.to_owned(), s(&record.launch_id)),
        ("mission_name".to_owned(), s(&record.mission_name)),
        ("rocket_id".to_owned(), s(&record.rocket_id)),
        ("launch_date_utc".to_owned(), s(&record.launch_date_utc)),
        (
            "launch_date_unix".to_owned(),
            AttributeValue::N(record.launch_date_unix.to_string()),
        ),
        ("status".to_owned(), s(record.status.as_str())),
    ]);

    let optional = [
        ("launchpad_id", &record.launchpad_id),
        ("details", &record.details),
        ("article_link", &record.article_link),
        ("wikipedia", &record.wikipedia),
        ("video_link", &record.video_link),
        ("updated_at", &record.updated_at),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            item.insert(name.to_owned(), s(value));
        }
    }

    item
}

fn from_item(item: &Item) -> Result<LaunchRecord, StoreError> {
    let required = |name: &str| {
        opt_string(item, name)
            .ok_or_else(|| StoreError::Malformed(format!("missing attribute '{name}'")))
    };

    let launch_date_unix = match item.get("launch_date_unix") {
        Some(AttributeValue::N(n)) => n
            .parse::<f64>()
            .map(|f| f as i64)
            .map_err(|_| StoreError::Malformed(format!("bad launch_date_unix '{n}'")))?,
        _ => 0,
    };

    Ok(LaunchRecord {
        launch_id: required(KEY)?,
        mission_name: required("mission_name")?,
        rocket_id: opt_string(item, "rocket_id").unwrap_or_default(),
        launch_date_utc: opt_string(item, "launch_date_utc").unwrap_or_default(),
        launch_date_unix,
        status: required("status")?.parse().map_err(StoreError::Malformed)?,
        launchpad_id: opt_string(item, "launchpad_id"),
        details: opt_string(item, "details"),
        article_link: opt_string(item, "article_link"),
        wikipedia: opt_string(item, "wikipedia"),
        video_link: opt_string(item, "video_link"),
        updated_at: opt_string(item, "updated_at"),
    })
}

fn s(value: &str) -> AttributeValue {
    AttributeValue::S(value.to_owned())
}

// Older items carry NULL for absent optionals; anything but S reads as absent.
fn opt_string(item: &Item, name: &str) -> Option<String> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(String::to_owned)
}
