//! Work categories and throughput rates.
//!
//! Every category has a reference rate: the number of items one worker
//! completes in one reference-length shift. The reference shift is a
//! fixed baseline (7 h), independent of the configured working hours.
//!
//! # Formulas
//!
//! | Quantity | Definition |
//! |----------|-----------|
//! | Hours per item | `reference_shift / rate` |
//! | Capacity | `floor(available_hours × rate / reference_shift)` |
//!
//! The two are algebraically related but take different rounding paths.
//! Capacity always uses the floor form.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Baseline shift length (hours) against which rates are defined.
pub const REFERENCE_SHIFT_HOURS: f64 = 7.0;

/// Rate assumed for categories missing from the table.
pub const DEFAULT_RATE: f64 = 1.0;

/// A named class of work item with its own throughput rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCategory {
    /// Category identifier (e.g., "Priority Breast").
    pub name: String,
    /// Items per reference shift.
    pub rate: f64,
}

impl WorkCategory {
    /// Creates a new category.
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }
}

/// Read-only lookup table of category rates.
///
/// Owned by the allocation policy; never mutated during a run, so a
/// single table can back concurrent allocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Reference shift length (hours).
    pub reference_shift_hours: f64,
    /// Category name → items per reference shift.
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    /// Creates an empty table on the standard 7-hour reference shift.
    pub fn new() -> Self {
        Self {
            reference_shift_hours: REFERENCE_SHIFT_HOURS,
            rates: HashMap::new(),
        }
    }

    /// Rates used by the surgical pathology grossing room.
    pub fn pathology() -> Self {
        [
            ("Priority Small", 80.0),
            ("Priority Small - Mid-day", 80.0),
            ("Priority Breast", 5.0),
            ("Priority Sarcoma", 5.0),
            ("Priority GI", 5.0),
            ("Priority Gyne", 5.0),
            ("Priority Head + Neck", 5.0),
            ("Priority Miscellaneous", 80.0),
            ("NICU Placentas", 10.0),
            ("Routine Small", 80.0),
            ("Routine Breast", 5.0),
            ("Routine GI", 5.0),
            ("Routine Gyne", 5.0),
            ("Routine Head + Neck", 5.0),
            ("Routine Miscellaneous", 80.0),
            ("Routine Placenta", 10.0),
            ("Non Tumour Bones", 10.0),
        ]
        .into_iter()
        .fold(Self::new(), |table, (name, rate)| table.with_rate(name, rate))
    }

    /// Sets the reference shift length.
    pub fn with_reference_shift(mut self, hours: f64) -> Self {
        self.reference_shift_hours = hours;
        self
    }

    /// Adds or replaces a category rate.
    pub fn with_rate(mut self, name: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(name.into(), rate);
        self
    }

    /// Adds or replaces a category.
    pub fn with_category(self, category: WorkCategory) -> Self {
        self.with_rate(category.name, category.rate)
    }

    /// Rate for a category ([`DEFAULT_RATE`] if unknown).
    pub fn rate(&self, name: &str) -> f64 {
        self.rates.get(name).copied().unwrap_or(DEFAULT_RATE)
    }

    /// Hours one item of `name` consumes.
    ///
    /// `shift_hours` only matters as the fallback for non-positive rates;
    /// otherwise the configured shift cancels out.
    pub fn hours_per_item(&self, name: &str, shift_hours: f64) -> f64 {
        let rate = self.rate(name);
        if rate > 0.0 {
            self.reference_shift_hours / rate
        } else {
            shift_hours
        }
    }

    /// Whole items of `name` that fit in `available_hours`.
    pub fn capacity(&self, name: &str, available_hours: f64) -> u32 {
        let rate = self.rate(name);
        if available_hours <= 0.0 || rate <= 0.0 {
            return 0;
        }
        (available_hours * rate / self.reference_shift_hours).floor() as u32
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new()
    }
}
