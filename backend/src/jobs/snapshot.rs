//! Month-end progress snapshot job
//!
//! A spawned loop that wakes hourly and, on the last calendar day of the
//! month, freezes every user's progress percentage. The at-most-once-per-day
//! guard keeps the hourly wakeups from re-running the sweep after it has
//! already fired.

use std::time::Duration;

use chrono::{NaiveDate, Utc};

use crate::error::AppResult;
use crate::services::StatisticsService;
use crate::AppState;

const TICK_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the snapshot scheduler until the process exits.
///
/// Spawned from main alongside the HTTP server.
pub async fn run_snapshot_scheduler(state: AppState) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    let mut last_run: Option<NaiveDate> = None;

    loop {
        interval.tick().await;

        let today = Utc::now().date_naive();
        if last_run == Some(today) {
            continue;
        }
        last_run = Some(today);

        if let Err(err) = run_snapshot_tick(&state, today).await {
            tracing::error!(error = %err, "Snapshot tick failed");
        }
    }
}

/// One scheduler tick: a no-op unless `today` is the last day of its month
pub async fn run_snapshot_tick(state: &AppState, today: NaiveDate) -> AppResult<()> {
    if !shared::stock::is_last_day_of_month(today) {
        tracing::debug!(%today, "Not a month boundary, skipping snapshot");
        return Ok(());
    }

    let updated = StatisticsService::new(state.db.clone())
        .snapshot_all_users()
        .await?;

    tracing::info!(%today, updated, "Monthly progress snapshot complete");
    Ok(())
}
