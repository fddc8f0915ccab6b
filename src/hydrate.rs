//! Second pass that fills in type badges on cards painted from listing data.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::document::GridContainer;
use crate::state::ListingEntry;
use crate::ui::type_badges;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HydrationReport {
    pub filled: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// The card id and detail url for an entry whose slot is mounted and empty.
fn target<'a>(entry: &'a ListingEntry, container: &GridContainer) -> Option<(String, &'a str)> {
    if entry.types().is_some() {
        return None;
    }
    let url = entry.url()?;
    let id = entry.display_id();
    if container.type_slot(&id).is_none() || container.slot_is_populated(&id) {
        debug!(%id, "hydration not needed");
        return None;
    }
    Some((id, url))
}

/// Fetches details one entry at a time, awaiting each before the next.
pub async fn hydrate_types(
    client: &ApiClient,
    entries: &[ListingEntry],
    container: &mut GridContainer,
) -> HydrationReport {
    let mut report = HydrationReport::default();
    for entry in entries {
        let Some((id, url)) = target(entry, container) else {
            report.skipped += 1;
            continue;
        };
        match client.fetch_item_detail(url).await {
            Some(detail) => {
                container.fill_type_slot(&id, type_badges(&detail.types));
                report.filled += 1;
            }
            None => {
                warn!(%id, "leaving type badges empty");
                report.failed += 1;
            }
        }
    }
    info!(
        filled = report.filled,
        skipped = report.skipped,
        failed = report.failed,
        "hydration finished"
    );
    report
}

/// Same selection rules as [`hydrate_types`], with up to `concurrency`
/// fetches in flight. Dropping the returned future aborts them.
pub async fn hydrate_types_bounded(
    client: &ApiClient,
    entries: &[ListingEntry],
    container: &mut GridContainer,
    concurrency: usize,
) -> HydrationReport {
    let mut report = HydrationReport::default();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut join_set = JoinSet::new();
    let mut queued = HashSet::new();
    for entry in entries {
        let Some((id, url)) = target(entry, container) else {
            report.skipped += 1;
            continue;
        };
        // Slots only fill once fetches land, so repeats are caught here.
        if !queued.insert(id.clone()) {
            debug!(%id, "already queued");
            report.skipped += 1;
            continue;
        }
        let url = url.to_string();
        let client = client.clone();
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (id, None);
            };
            let detail = client.fetch_item_detail(&url).await;
            (id, detail)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((id, Some(detail))) => {
                if container.fill_type_slot(&id, type_badges(&detail.types)) {
                    report.filled += 1;
                } else {
                    report.skipped += 1;
                }
            }
            Ok((id, None)) => {
                warn!(%id, "leaving type badges empty");
                report.failed += 1;
            }
            Err(err) => {
                warn!(error = %err, "hydration task did not complete");
                report.failed += 1;
            }
        }
    }
    info!(
        filled = report.filled,
        skipped = report.skipped,
        failed = report.failed,
        concurrency,
        "hydration finished"
    );
    report
}
