//! Allocation policy.
//!
//! Every operational rule the allocator applies is data on this type:
//! the rate table, the category priority order, the reservation
//! carve-outs and the flagship category. The allocator never consults
//! global state.
//!
//! # Reservations
//!
//! | Reservation | Slots | Effect |
//! |-------------|-------|--------|
//! | Fixed duty | just before the partial block (or the last slots) | excluded from every pass, reported fully booked |
//! | Partial shift | trailing slots | tail reserved for one category |
//! | Flagship | first ordinary slot | first claim on the flagship category, rest of shift filled |

use serde::{Deserialize, Serialize};

use super::RateTable;

/// A wholly reserved block of workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDutyReservation {
    /// Name of the fixed duty (e.g., "Autopsy").
    pub label: String,
    /// Number of workers reserved.
    pub workers: usize,
}

impl FixedDutyReservation {
    /// Creates a fixed-duty reservation.
    pub fn new(label: impl Into<String>, workers: usize) -> Self {
        Self {
            label: label.into(),
            workers,
        }
    }
}

/// Length of the reserved shift tail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailWindow {
    /// A fixed number of hours, clamped to the shift length.
    Hours(f64),
    /// Exactly half the shift.
    HalfShift,
}

impl TailWindow {
    /// Tail duration (hours) for a shift of `shift_hours`.
    pub fn duration(self, shift_hours: f64) -> f64 {
        match self {
            TailWindow::Hours(hours) => hours.clamp(0.0, shift_hours.max(0.0)),
            TailWindow::HalfShift => shift_hours / 2.0,
        }
    }
}

/// A trailing block of workers whose shift tail is pre-committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialShiftReservation {
    /// Category assignable only inside the reserved tail.
    pub category: String,
    /// Number of trailing workers reserved.
    pub workers: usize,
    /// Length of the reserved tail.
    pub tail: TailWindow,
    /// Categories allowed to run into the tail during the greedy pass.
    #[serde(default)]
    pub open_categories: Vec<String>,
}

impl PartialShiftReservation {
    /// Creates a partial-shift reservation.
    pub fn new(category: impl Into<String>, workers: usize, tail: TailWindow) -> Self {
        Self {
            category: category.into(),
            workers,
            tail,
            open_categories: Vec::new(),
        }
    }

    /// Lets `category` use the tail during the greedy pass.
    pub fn with_open_category(mut self, category: impl Into<String>) -> Self {
        self.open_categories.push(category.into());
        self
    }

    /// Whether `category` may use the tail during the greedy pass.
    pub fn is_open_to(&self, category: &str) -> bool {
        self.open_categories.iter().any(|c| c == category)
    }
}

/// The full rule set for one allocation.
///
/// # Example
///
/// ```
/// use u_caseload::models::{AllocationPolicy, RateTable};
///
/// let policy = AllocationPolicy::new()
///     .with_rates(RateTable::new().with_rate("Frozen Section", 20.0))
///     .with_priority_order(["Frozen Section"]);
/// assert!(policy.fixed_duty.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default = "AllocationPolicy::new")]
pub struct AllocationPolicy {
    /// Category throughput rates.
    pub rates: RateTable,
    /// Total category order for the greedy pass.
    pub priority_order: Vec<String>,
    /// Wholly reserved block.
    pub fixed_duty: Option<FixedDutyReservation>,
    /// Tail-reserved block.
    pub partial_shift: Option<PartialShiftReservation>,
    /// Category offered to the dedicated worker first.
    pub flagship: Option<String>,
    /// Name under which the dedicated worker's unused time is reported.
    pub filler_label: String,
}

impl AllocationPolicy {
    /// Creates a policy with no rates, no ordering and no reservations.
    pub fn new() -> Self {
        Self {
            rates: RateTable::new(),
            priority_order: Vec::new(),
            fixed_duty: None,
            partial_shift: None,
            flagship: None,
            filler_label: "Reserved".to_string(),
        }
    }

    /// Grossing-room rules: autopsy cover, mid-day small-specimen tail,
    /// a dedicated Priority Small worker.
    pub fn pathology() -> Self {
        Self::new()
            .with_rates(RateTable::pathology())
            .with_priority_order([
                "Priority Small",
                "Priority Breast",
                "Priority Sarcoma",
                "Priority GI",
                "Priority Gyne",
                "Priority Head + Neck",
                "Priority Miscellaneous",
                "NICU Placentas",
                "Priority Small - Mid-day",
                "Routine Small",
                "Routine Breast",
                "Routine GI",
                "Routine Gyne",
                "Routine Head + Neck",
                "Routine Miscellaneous",
                "Routine Placenta",
                "Non Tumour Bones",
            ])
            .with_fixed_duty(FixedDutyReservation::new("Autopsy", 1))
            .with_partial_shift(
                PartialShiftReservation::new("Priority Small - Mid-day", 3, TailWindow::Hours(3.0))
                    .with_open_category("Priority Small"),
            )
            .with_flagship("Priority Small")
    }

    /// Sets the rate table.
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    /// Sets the category priority order.
    pub fn with_priority_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priority_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the fixed-duty reservation.
    pub fn with_fixed_duty(mut self, reservation: FixedDutyReservation) -> Self {
        self.fixed_duty = Some(reservation);
        self
    }

    /// Sets the partial-shift reservation.
    pub fn with_partial_shift(mut self, reservation: PartialShiftReservation) -> Self {
        self.partial_shift = Some(reservation);
        self
    }

    /// Sets the flagship category.
    pub fn with_flagship(mut self, category: impl Into<String>) -> Self {
        self.flagship = Some(category.into());
        self
    }

    /// Sets the filler label.
    pub fn with_filler_label(mut self, label: impl Into<String>) -> Self {
        self.filler_label = label.into();
        self
    }

    /// Drops every reservation and the flagship, keeping rates and order.
    pub fn without_reservations(mut self) -> Self {
        self.fixed_duty = None;
        self.partial_shift = None;
        self.flagship = None;
        self
    }

    /// The tail category, if a partial-shift reservation is configured.
    pub fn tail_category(&self) -> Option<&str> {
        self.partial_shift.as_ref().map(|p| p.category.as_str())
    }

    /// Greedy-pass order for a set of requested names: the priority order,
    /// then requested names missing from it, in the order given.
    pub fn category_order<'a>(&'a self, requested: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        let mut order: Vec<&str> = self.priority_order.iter().map(String::as_str).collect();
        for name in requested {
            if !order.contains(&name) {
                order.push(name);
            }
        }
        order
    }
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self::pathology()
    }
}
