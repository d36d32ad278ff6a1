use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::model::LaunchRecord;

/// Page size used when draining the whole table.
pub const SCAN_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Opaque cursor handed back by [`LaunchRepository::list`] to resume a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(pub(crate) String);

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub records: Vec<LaunchRecord>,
    pub next: Option<ContinuationToken>,
}

/// Storage for launch records keyed by `launch_id`. Writes are last-writer-wins.
#[async_trait]
pub trait LaunchRepository: Send + Sync {
    /// Writes `record`, replacing any record with the same `launch_id`, and
    /// stamps `updated_at` with the write time.
    async fn upsert(&self, record: LaunchRecord) -> Result<UpsertOutcome, StoreError>;

    async fn get(&self, launch_id: &str) -> Result<Option<LaunchRecord>, StoreError>;

    /// Up to `limit` records in no particular business order. `limit` must be
    /// non-zero.
    async fn list(
        &self,
        limit: usize,
        token: Option<ContinuationToken>,
    ) -> Result<Page, StoreError>;

    async fn scan_all(&self) -> Result<Vec<LaunchRecord>, StoreError> {
        let mut records = Vec::new();
        let mut token = None;

        loop {
            let page = self.list(SCAN_PAGE_SIZE, token).await?;
            records.extend(page.records);
            match page.next {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        Ok(records)
    }
}

pub(crate) fn check_limit(limit: usize) -> Result<(), StoreError> {
    if limit == 0 {
        return Err(StoreError::InvalidLimit);
    }
    Ok(())
}

pub(crate) fn stamp(mut record: LaunchRecord) -> Result<LaunchRecord, StoreError> {
    if record.launch_id.is_empty() {
        return Err(StoreError::InvalidInput);
    }
    record.updated_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));
    Ok(record)
}

/// In-process store with the same semantics as the DynamoDB table. Used by
/// tests and local development.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    items: RwLock<BTreeMap<String, LaunchRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl LaunchRepository for MemoryRepository {
    async fn upsert(&self, record: LaunchRecord) -> Result<UpsertOutcome, StoreError> {
        let record = stamp(record)?;
        let previous = self
            .items
            .write()
            .await
            .insert(record.launch_id.clone(), record);

        Ok(match previous {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Inserted,
        })
    }

    async fn get(&self, launch_id: &str) -> Result<Option<LaunchRecord>, StoreError> {
        Ok(self.items.read().await.get(launch_id).cloned())
    }

    async fn list(
        &self,
        limit: usize,
        token: Option<ContinuationToken>,
    ) -> Result<Page, StoreError> {
        check_limit(limit)?;
        let items = self.items.read().await;
        let start = match &token {
            Some(ContinuationToken(key)) => Bound::Excluded(key.as_str()),
            None => Bound::Unbounded,
        };

        let mut range = items.range::<str, _>((start, Bound::Unbounded));
        let records: Vec<LaunchRecord> = range.by_ref().take(limit).map(|(_, r)| r.clone()).collect();
        let next = match (range.next(), records.last()) {
            (Some(_), Some(last)) => Some(ContinuationToken(last.launch_id.clone())),
            _ => None,
        };

        Ok(Page { records, next })
    }
}
