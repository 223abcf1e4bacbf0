//! Workload summary metrics.
//!
//! Derives aggregate figures from the original requests and the
//! allocator's outstanding counts. Pure: the same inputs always yield
//! the same report.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total items | Sum of requested counts |
//! | Total hours | Σ count × hours-per-item, rounded to 2 dp |
//! | Estimated days | ceil(total hours / (workers × shift)) |
//! | Outstanding | Sum of outstanding counts |
//! | Overtime by category | outstanding × hours-per-item, rounded to 2 dp |
//! | Overtime | Σ unrounded overtime by category, rounded once |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::OutstandingMap;
use crate::models::{RateTable, RequestedCounts, WorkRequest};

/// Aggregate workload report.
///
/// Serializes with the field names the web client consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSummary {
    /// Sum of all requested counts.
    #[serde(rename = "totalTasks")]
    pub total_requested_items: u64,
    /// Hours needed for every requested item (2 dp).
    pub total_hours: f64,
    /// Working days needed at full roster capacity.
    pub estimated_days: u64,
    /// Sum of outstanding counts.
    #[serde(rename = "outstandingTasks")]
    pub total_outstanding: u64,
    /// Outstanding counts as reported by the allocator.
    #[serde(rename = "outstandingByType")]
    pub outstanding_by_category: OutstandingMap,
    /// Hours needed to clear all outstanding items (2 dp).
    pub overtime: f64,
    /// Hours needed to clear each category's outstanding items (2 dp).
    #[serde(rename = "overtimeByType")]
    pub overtime_by_category: BTreeMap<String, f64>,
}

impl WorkloadSummary {
    /// Computes the summary.
    ///
    /// # Arguments
    /// * `requests` - The original, unmodified requests.
    /// * `worker_count` - Roster size.
    /// * `shift_hours` - Shift length.
    /// * `outstanding` - Unplaced counts (from the allocator or any other source).
    /// * `rates` - Category rates.
    pub fn calculate(
        requests: &[WorkRequest],
        worker_count: usize,
        shift_hours: f64,
        outstanding: &OutstandingMap,
        rates: &RateTable,
    ) -> Self {
        let total_requested_items: u64 = requests.iter().map(|r| u64::from(r.count)).sum();
        let total_hours: f64 = requests
            .iter()
            .map(|r| f64::from(r.count) * rates.hours_per_item(&r.name, shift_hours))
            .sum();

        let estimated_days = if worker_count == 0 || shift_hours <= 0.0 {
            0
        } else {
            (total_hours / (worker_count as f64 * shift_hours)).ceil() as u64
        };

        let mut overtime = 0.0;
        let mut overtime_by_category = BTreeMap::new();
        for name in RequestedCounts::from_requests(requests).names() {
            let left = outstanding.get(name).copied().unwrap_or(0);
            let hours = if left > 0 {
                let hours = f64::from(left) * rates.hours_per_item(name, shift_hours);
                overtime += hours;
                round2(hours)
            } else {
                0.0
            };
            overtime_by_category.insert(name.to_string(), hours);
        }

        Self {
            total_requested_items,
            total_hours: round2(total_hours),
            estimated_days,
            total_outstanding: outstanding.values().map(|&c| u64::from(c)).sum(),
            outstanding_by_category: outstanding.clone(),
            overtime: round2(overtime),
            overtime_by_category,
        }
    }

    /// Whether any requested item was left unplaced.
    pub fn has_outstanding(&self) -> bool {
        self.total_outstanding > 0
    }

    /// Whether the whole caseload fits in a single day.
    pub fn fits_in_one_day(&self) -> bool {
        self.estimated_days <= 1 && !self.has_outstanding()
    }
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
