use serde::Serialize;

use crate::error::SyncError;
use crate::model::normalize;
use crate::repository::{LaunchRepository, UpsertOutcome};
use crate::spacex::SpaceXClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub total_fetched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub dry_run: bool,
}

/// Pulls every launch from SpaceX and upserts it into `repo`, one at a time.
///
/// A failed fetch aborts before anything is written. A failed write aborts the
/// rest of the run but leaves earlier writes in place. With `dry_run` set the
/// launches are fetched and normalized but never written.
pub async fn sync_launches(
    client: &SpaceXClient,
    repo: &dyn LaunchRepository,
    dry_run: bool,
) -> Result<SyncSummary, SyncError> {
    tracing::info!(dry_run, "starting launches sync");

    let raw_launches = client.fetch_all().await?;
    let mut summary = SyncSummary {
        total_fetched: raw_launches.len(),
        inserted: 0,
        updated: 0,
        dry_run,
    };
    tracing::info!("fetched {} launches from SpaceX API", summary.total_fetched);

    for raw in &raw_launches {
        let record = normalize(raw);
        if dry_run {
            continue;
        }

        match repo.upsert(record).await? {
            UpsertOutcome::Inserted => summary.inserted += 1,
            UpsertOutcome::Updated => summary.updated += 1,
        }
    }

    tracing::info!(?summary, "sync finished");
    Ok(summary)
}
