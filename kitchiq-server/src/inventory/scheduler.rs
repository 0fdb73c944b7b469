//! Inventory Expiry Scheduler
//!
//! A single repeating background task that scans all restaurants' inventory
//! once a day at a fixed local hour and raises a log-level alert per
//! expiring item. External delivery (email/SMS) is a deferred extension
//! point. The same scan is manually invokable for operational testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Days, Local, NaiveDate};
use tokio_util::sync::CancellationToken;

use shared::AppResult;
use shared::util::now_millis;

use crate::inventory::expiry;
use crate::store::Store;

/// Result of one scan trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Scan ran to completion
    Completed { scanned: usize, expiring: usize },
    /// A scan was still in flight; this trigger was dropped, not queued
    Skipped,
}

/// Owns the recurring expiry scan.
///
/// Cloning is cheap and every clone shares the in-flight flag, so the
/// scheduled task and the manual endpoint can never overlap.
#[derive(Clone)]
pub struct ExpiryScheduler {
    store: Store,
    scan_hour: u32,
    in_flight: Arc<AtomicBool>,
}

impl ExpiryScheduler {
    pub fn new(store: Store, scan_hour: u32) -> Self {
        Self {
            store,
            scan_hour: scan_hour.min(23),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run one scan now, unless one is already in flight.
    pub fn run_scan(&self) -> AppResult<ScanOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("Expiry scan already in flight, dropping trigger");
            return Ok(ScanOutcome::Skipped);
        }

        let result = self.scan();
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    fn scan(&self) -> AppResult<ScanOutcome> {
        let items = self.store.list_inventory_all()?;
        let scanned = items.len();

        let now = now_millis();
        let expiring = expiry::expiring_items(items, now);

        for entry in &expiring {
            tracing::warn!(
                target: "expiry",
                restaurant_id = %entry.item.restaurant_id,
                item = %entry.item.name,
                quantity = entry.item.quantity,
                days_left = entry.days_left,
                "Inventory item expiring soon"
            );
        }

        Ok(ScanOutcome::Completed {
            scanned,
            expiring: expiring.len(),
        })
    }

    /// The repeating task body: sleep until the next local fire hour, scan,
    /// repeat. A failed scan is logged and waits for the next trigger.
    pub async fn run(&self, shutdown: CancellationToken) {
        tracing::info!(
            hour = self.scan_hour,
            "Expiry scheduler started (daily at {:02}:00 local)",
            self.scan_hour
        );

        loop {
            let now = Local::now();
            let fire = next_fire(now, self.scan_hour);
            let wait = (fire - now)
                .to_std()
                .unwrap_or(std::time::Duration::from_secs(60));

            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Expiry scheduler stopped");
                    break;
                }
                _ = tokio::time::sleep(wait) => {
                    match self.run_scan() {
                        Ok(ScanOutcome::Completed { scanned, expiring }) => {
                            tracing::info!(scanned, expiring, "Daily expiry scan finished");
                        }
                        Ok(ScanOutcome::Skipped) => {}
                        Err(e) => {
                            tracing::error!(error = %e, "Daily expiry scan failed");
                        }
                    }
                }
            }
        }
    }
}

fn fire_at(date: NaiveDate, hour: u32) -> Option<DateTime<Local>> {
    date.and_hms_opt(hour, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
}

/// The next wall-clock fire time strictly after `now`
fn next_fire(now: DateTime<Local>, hour: u32) -> DateTime<Local> {
    let today = now.date_naive();
    if let Some(fire) = fire_at(today, hour)
        && fire > now
    {
        return fire;
    }
    today
        .checked_add_days(Days::new(1))
        .and_then(|tomorrow| fire_at(tomorrow, hour))
        .unwrap_or_else(|| now + chrono::Duration::hours(24))
}
