// src/listing/refresher.rs
//! Periodic refresh of the job listing.
//!
//! Every refresh takes a sequence number when it is issued. A response is
//! only rendered if no newer refresh has been rendered already, so a slow
//! response can never overwrite a fresher listing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::filter::ListingFilter;
use super::types::{JobRecord, RefreshOutcome};
use super::view::{render_listing, ListingView};
use crate::core::ListingSource;
use crate::error::{PortalError, PortalResult};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(300_000);

/// Shortest period `spawn` accepts; anything below is raised to it
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// Fetch the listing, logging a failure before handing it back
pub async fn fetch_listing<S: ListingSource>(source: &S) -> PortalResult<Vec<JobRecord>> {
    source.search().await.map_err(|e| {
        error!("Listing fetch failed: {:#}", e);
        PortalError::Fetch(e)
    })
}

pub struct ListingRefresher<S, V> {
    source: S,
    view: V,
    filter: Option<ListingFilter>,
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl<S, V> ListingRefresher<S, V>
where
    S: ListingSource,
    V: ListingView,
{
    pub fn new(source: S, view: V) -> Self {
        Self {
            source,
            view,
            filter: None,
            issued: AtomicU64::new(0),
            applied: Mutex::new(0),
        }
    }

    pub fn with_filter(mut self, filter: Option<ListingFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Sequence number of the refresh currently shown, 0 before the first
    pub async fn applied_sequence(&self) -> u64 {
        *self.applied.lock().await
    }

    /// Fetch the listing once and replace the view with it.
    ///
    /// On any failure the view keeps its previous content.
    pub async fn refresh(&self) -> PortalResult<RefreshOutcome> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let records = fetch_listing(&self.source).await?;
        let cards = render_listing(&records, self.filter.as_ref());
        let count = cards.len();

        let mut applied = self.applied.lock().await;
        if *applied > seq {
            warn!(
                "Discarding listing refresh #{}: #{} was already rendered",
                seq, *applied
            );
            return Ok(RefreshOutcome::Stale);
        }

        if let Err(e) = self.view.replace(cards).await {
            error!("Listing refresh #{} could not be rendered: {:#}", seq, e);
            return Err(PortalError::Render(e));
        }
        *applied = seq;

        info!(
            "Listing refresh #{} rendered {} of {} job records",
            seq,
            count,
            records.len()
        );
        Ok(RefreshOutcome::Rendered(count))
    }

    /// Refresh now, then every `period` until the returned handle is stopped
    /// or dropped. Each tick runs its own refresh task, so refreshes may
    /// overlap when the server is slower than `period`.
    pub fn spawn(self: Arc<Self>, period: Duration) -> RefreshHandle {
        let period = if period < MIN_REFRESH_INTERVAL {
            warn!(
                "Refresh period {:?} is too short, using {:?}",
                period, MIN_REFRESH_INTERVAL
            );
            MIN_REFRESH_INTERVAL
        } else {
            period
        };
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut in_flight = JoinSet::new();
            info!("Listing refresher started, period {:?}", period);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let refresher = Arc::clone(&self);
                        in_flight.spawn(async move {
                            // failures are logged by refresh()
                            let _ = refresher.refresh().await;
                        });
                    }
                    Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                }
            }

            in_flight.abort_all();
            info!("Listing refresher stopped");
        });

        RefreshHandle { stop_tx, task }
    }
}

/// Owns a running refresh schedule. Dropping it also stops the schedule.
pub struct RefreshHandle {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop ticking, abort in-flight refreshes and wait for the task to end
    pub async fn stop(self) {
        let Self { stop_tx, task } = self;
        let _ = stop_tx.send(());
        if let Err(e) = task.await {
            if !e.is_cancelled() {
                error!("Listing refresher task failed: {}", e);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
