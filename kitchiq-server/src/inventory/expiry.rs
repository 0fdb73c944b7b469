//! Expiry classification
//!
//! One predicate shared by the scoped on-demand read and the scheduled
//! global scan, so the two paths can never drift.

use shared::models::{ExpiringItem, InventoryItem};

/// Lookahead window for "expiring soon"
pub const EXPIRY_WINDOW_DAYS: i64 = 2;

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Whether an item counts as expiring soon: stock on hand and an expiry
/// timestamp inside the lookahead window. Items with zero quantity are
/// excluded regardless of expiry proximity.
pub fn expiring_within_window(item: &InventoryItem, now_millis: i64) -> bool {
    item.quantity > 0 && item.expiry_date <= now_millis + EXPIRY_WINDOW_DAYS * DAY_MILLIS
}

/// Whole days until expiry, rounded up; 0 for items expiring today,
/// negative for items already past their date.
pub fn days_left(expiry_millis: i64, now_millis: i64) -> i64 {
    let delta = expiry_millis - now_millis;
    delta.div_euclid(DAY_MILLIS) + i64::from(delta.rem_euclid(DAY_MILLIS) > 0)
}

/// Classify one item against the window
pub fn classify(item: InventoryItem, now_millis: i64) -> Option<ExpiringItem> {
    if !expiring_within_window(&item, now_millis) {
        return None;
    }
    let days_left = days_left(item.expiry_date, now_millis);
    Some(ExpiringItem { item, days_left })
}

/// Classify a batch of items, keeping only those expiring soon
pub fn expiring_items(
    items: impl IntoIterator<Item = InventoryItem>,
    now_millis: i64,
) -> Vec<ExpiringItem> {
    items
        .into_iter()
        .filter_map(|item| classify(item, now_millis))
        .collect()
}
