//! Worker model.
//!
//! A worker is one roster slot for the day. The public record carries only
//! what callers see: identity, ordered work items, hours used and a
//! per-category case tally. Reservation roles live on the internal roster
//! and never reach this type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One unit of assigned work (or reported filler time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Category name, or the filler label.
    pub name: String,
    /// Hours this single unit consumes.
    pub hours: f64,
}

impl WorkItem {
    /// Creates a new work item.
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours,
        }
    }
}

/// A worker's allocation for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// 1-based roster position.
    pub id: usize,
    /// Assigned items in assignment order.
    pub tasks: Vec<WorkItem>,
    /// Cumulative hours used.
    pub hours: f64,
    /// Category → number of items assigned. Filler is never tallied.
    pub case_counts: BTreeMap<String, u32>,
}

impl Worker {
    /// Creates an empty worker.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            tasks: Vec::new(),
            hours: 0.0,
            case_counts: BTreeMap::new(),
        }
    }

    /// Number of items of `category` assigned to this worker.
    pub fn assigned(&self, category: &str) -> u32 {
        self.case_counts.get(category).copied().unwrap_or(0)
    }

    /// Total tallied items across categories.
    pub fn total_cases(&self) -> u64 {
        self.case_counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Sum of the hours of items named `name`.
    pub fn hours_on(&self, name: &str) -> f64 {
        self.tasks
            .iter()
            .filter(|t| t.name == name)
            .map(|t| t.hours)
            .sum()
    }
}

/// Reservation role of a roster slot, fixed at roster construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerRole {
    /// Open to every category for the whole shift.
    Ordinary,
    /// Wholly reserved for a non-requestable fixed duty.
    FixedDuty,
    /// Shift tail reserved for the tail category.
    PartialReserved,
    /// Given first claim on the flagship category.
    Dedicated,
}

impl WorkerRole {
    /// Whether the slot takes part in ordinary category assignment.
    pub fn is_assignable(self) -> bool {
        !matches!(self, WorkerRole::FixedDuty)
    }
}
