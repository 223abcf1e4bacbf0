//! Working roster for a single allocation run.
//!
//! Holds the per-worker state the allocator mutates: role, task entries,
//! clock position and case tally. Roles are designated once in
//! [`Roster::build`] and only leave the roster through the public
//! [`Worker`] projection, which drops them.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{AllocationPolicy, RateTable, RequestedCounts, WorkItem, Worker, WorkerRole};

/// Gaps shorter than this are not worth a filler entry.
const FILLER_EPSILON: f64 = 1e-9;

/// An entry on a worker's task list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TaskEntry {
    /// One unit of a requested category.
    Case { category: String, hours: f64 },
    /// Reported time that is spoken for but carries no case.
    VisibleFillerTime { label: String, hours: f64 },
    /// Bookkeeping only; never reported.
    InternalPlaceholder { hours: f64 },
}

impl TaskEntry {
    fn hours(&self) -> f64 {
        match self {
            TaskEntry::Case { hours, .. }
            | TaskEntry::VisibleFillerTime { hours, .. }
            | TaskEntry::InternalPlaceholder { hours } => *hours,
        }
    }

    fn into_item(self) -> Option<WorkItem> {
        match self {
            TaskEntry::Case { category, hours } => Some(WorkItem::new(category, hours)),
            TaskEntry::VisibleFillerTime { label, hours } => Some(WorkItem::new(label, hours)),
            TaskEntry::InternalPlaceholder { .. } => None,
        }
    }
}

/// Mutable per-worker state during allocation.
#[derive(Debug, Clone)]
pub(crate) struct RosterSlot {
    pub id: usize,
    pub role: WorkerRole,
    pub entries: Vec<TaskEntry>,
    pub hours: f64,
    pub case_counts: BTreeMap<String, u32>,
}

impl RosterSlot {
    fn new(id: usize, role: WorkerRole) -> Self {
        Self {
            id,
            role,
            entries: Vec::new(),
            hours: 0.0,
            case_counts: BTreeMap::new(),
        }
    }

    /// Appends `count` units of `category`, each costing `hours_per_item`.
    fn assign_cases(&mut self, category: &str, hours_per_item: f64, count: u32) {
        self.entries
            .extend((0..count).map(|_| TaskEntry::Case {
                category: category.to_string(),
                hours: hours_per_item,
            }));
        self.hours += hours_per_item * f64::from(count);
        *self.case_counts.entry(category.to_string()).or_insert(0) += count;
    }

    /// Marks the rest of the shift as spoken for.
    fn fill_remaining(&mut self, label: &str, shift_hours: f64) {
        let gap = shift_hours - self.hours;
        if gap > FILLER_EPSILON {
            self.entries.push(TaskEntry::VisibleFillerTime {
                label: label.to_string(),
                hours: gap,
            });
        }
        self.hours = shift_hours;
    }

    /// Public view: roles dropped, placeholders stripped, fixed duty
    /// reported as a full shift with no items.
    pub fn into_worker(self, shift_hours: f64) -> Worker {
        let itemized: f64 = self.entries.iter().map(TaskEntry::hours).sum();
        debug!(worker = self.id, role = ?self.role, hours = self.hours, itemized, "worker booked");
        if self.role == WorkerRole::FixedDuty {
            return Worker {
                hours: shift_hours,
                ..Worker::new(self.id)
            };
        }
        Worker {
            id: self.id,
            tasks: self
                .entries
                .into_iter()
                .filter_map(TaskEntry::into_item)
                .collect(),
            hours: self.hours,
            case_counts: self.case_counts,
        }
    }
}

/// Shift geometry shared by every slot.
#[derive(Debug, Clone)]
struct ShiftWindow {
    shift_hours: f64,
    tail_hours: f64,
    open_categories: Vec<String>,
}

impl ShiftWindow {
    /// Latest clock position a greedy-pass assignment of `category` may reach.
    fn head_limit(&self, role: WorkerRole, category: &str) -> f64 {
        match role {
            WorkerRole::Ordinary | WorkerRole::Dedicated => self.shift_hours,
            WorkerRole::PartialReserved => {
                if self.open_categories.iter().any(|c| c == category) {
                    self.shift_hours
                } else {
                    self.shift_hours - self.tail_hours
                }
            }
            WorkerRole::FixedDuty => 0.0,
        }
    }

    fn tail_start(&self) -> f64 {
        self.shift_hours - self.tail_hours
    }
}

/// Designates a role for each of `worker_count` slots.
///
/// 1. Fixed duty: the block just before the partial block if the roster
///    holds both, otherwise the last slots.
/// 2. Partial: the trailing slots not already on fixed duty.
/// 3. Dedicated: the first ordinary slot, when `with_dedicated`.
pub(crate) fn designate_roles(
    worker_count: usize,
    policy: &AllocationPolicy,
    with_dedicated: bool,
) -> Vec<WorkerRole> {
    let mut roles = vec![WorkerRole::Ordinary; worker_count];
    let partial = policy
        .partial_shift
        .as_ref()
        .map_or(0, |p| p.workers.min(worker_count));

    if let Some(fixed) = &policy.fixed_duty {
        let reserved = fixed.workers.min(worker_count);
        let end = if worker_count >= partial + reserved {
            worker_count - partial
        } else {
            worker_count
        };
        for role in &mut roles[end - reserved..end] {
            *role = WorkerRole::FixedDuty;
        }
    }

    for role in &mut roles[worker_count - partial..] {
        if *role == WorkerRole::Ordinary {
            *role = WorkerRole::PartialReserved;
        }
    }

    if with_dedicated {
        if let Some(role) = roles.iter_mut().find(|r| **r == WorkerRole::Ordinary) {
            *role = WorkerRole::Dedicated;
        }
    }

    roles
}

/// The day's roster.
#[derive(Debug, Clone)]
pub(crate) struct Roster {
    slots: Vec<RosterSlot>,
    window: ShiftWindow,
}

impl Roster {
    /// Builds `worker_count` slots with roles designated per `policy`.
    ///
    /// Fixed-duty slots start out covered by a whole-shift placeholder.
    pub fn build(
        worker_count: usize,
        shift_hours: f64,
        policy: &AllocationPolicy,
        requested: &RequestedCounts,
    ) -> Self {
        let with_dedicated = policy
            .flagship
            .as_deref()
            .is_some_and(|flagship| requested.get(flagship) > 0);
        let roles = designate_roles(worker_count, policy, with_dedicated);

        let slots = roles
            .into_iter()
            .enumerate()
            .map(|(idx, role)| {
                let mut slot = RosterSlot::new(idx + 1, role);
                if let (WorkerRole::FixedDuty, Some(fixed)) = (role, &policy.fixed_duty) {
                    debug!(worker = slot.id, duty = %fixed.label, "reserved for fixed duty");
                    slot.entries
                        .push(TaskEntry::InternalPlaceholder { hours: shift_hours });
                    slot.hours = shift_hours;
                }
                slot
            })
            .collect();

        let window = ShiftWindow {
            shift_hours,
            tail_hours: policy
                .partial_shift
                .as_ref()
                .map_or(0.0, |p| p.tail.duration(shift_hours)),
            open_categories: policy
                .partial_shift
                .as_ref()
                .map(|p| p.open_categories.clone())
                .unwrap_or_default(),
        };

        Self { slots, window }
    }

    /// Offers the dedicated slot first claim on `category`, then fills the
    /// rest of its shift. Returns the count left unclaimed.
    pub fn claim_dedicated(
        &mut self,
        category: &str,
        count: u32,
        rates: &RateTable,
        filler_label: &str,
    ) -> u32 {
        let shift_hours = self.window.shift_hours;
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|s| s.role == WorkerRole::Dedicated)
        else {
            return count;
        };

        let capacity = rates.capacity(category, shift_hours - slot.hours);
        let claimed = count.min(capacity);
        if claimed > 0 {
            slot.assign_cases(category, rates.hours_per_item(category, shift_hours), claimed);
        }
        slot.fill_remaining(filler_label, shift_hours);
        debug!(worker = slot.id, category, claimed, "dedicated claim");

        count - claimed
    }

    /// Greedy pass for one category over assignable slots in roster order.
    /// Returns the count that did not fit.
    pub fn place(&mut self, category: &str, mut count: u32, rates: &RateTable) -> u32 {
        let Self { slots, window } = self;
        let hours_per_item = rates.hours_per_item(category, window.shift_hours);

        for slot in slots.iter_mut().filter(|s| s.role.is_assignable()) {
            if count == 0 {
                break;
            }
            let available = window.head_limit(slot.role, category) - slot.hours;
            let placed = count.min(rates.capacity(category, available));
            if placed > 0 {
                slot.assign_cases(category, hours_per_item, placed);
                count -= placed;
                debug!(worker = slot.id, category, placed, hours = slot.hours, "placed cases");
            }
        }

        count
    }

    /// Tail pass: places `category` only inside partial slots' reserved
    /// tails, starting from `max(hours, shift - tail)`.
    pub fn place_in_tail(&mut self, category: &str, mut count: u32, rates: &RateTable) -> u32 {
        let Self { slots, window } = self;
        let hours_per_item = rates.hours_per_item(category, window.shift_hours);

        for slot in slots
            .iter_mut()
            .filter(|s| s.role == WorkerRole::PartialReserved)
        {
            if count == 0 {
                break;
            }
            let start = slot.hours.max(window.tail_start());
            let placed = count.min(rates.capacity(category, window.shift_hours - start));
            if placed > 0 {
                slot.hours = start;
                slot.assign_cases(category, hours_per_item, placed);
                count -= placed;
                debug!(worker = slot.id, category, placed, hours = slot.hours, "placed tail cases");
            }
        }

        count
    }

    /// Projects every slot to its public view.
    pub fn into_workers(self) -> Vec<Worker> {
        let shift_hours = self.window.shift_hours;
        self.slots
            .into_iter()
            .map(|slot| slot.into_worker(shift_hours))
            .collect()
    }

    #[cfg(test)]
    pub fn slots(&self) -> &[RosterSlot] {
        &self.slots
    }
}
