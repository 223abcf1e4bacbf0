//! Capacity-constrained greedy case allocator.
//!
//! # Algorithm
//!
//! 1. Build the roster and designate roles (fixed duty, partial shift,
//!    dedicated).
//! 2. Dedicated pre-pass: the dedicated worker claims the flagship
//!    category up to a full shift; the rest of its shift is filled.
//! 3. Greedy pass: walk categories in priority order; fill workers in
//!    roster order up to `floor(available × rate / reference_shift)`.
//!    Partial-shift workers only offer their head unless the category
//!    is open to the tail.
//! 4. Tail pass: place the tail category inside partial workers' tails.
//! 5. Project to public workers; leftovers become outstanding counts.
//!
//! # Complexity
//! O(c * w + n) where c=categories, w=workers, n=items placed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::roster::Roster;
use super::{ScheduleOutcome, ScheduleRequest, WorkloadSummary};
use crate::models::{AllocationPolicy, RequestedCounts, WorkRequest, Worker};

/// Category → requested-but-unplaced item count.
pub type OutstandingMap = BTreeMap<String, u32>;

/// Result of one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Per-worker allocations in roster order.
    pub workers: Vec<Worker>,
    /// Unplaced counts, one entry per requested category.
    pub outstanding: OutstandingMap,
}

impl Allocation {
    /// Total items placed for `category` across workers.
    pub fn assigned(&self, category: &str) -> u32 {
        self.workers.iter().map(|w| w.assigned(category)).sum()
    }

    /// Total outstanding items across categories.
    pub fn total_outstanding(&self) -> u64 {
        self.outstanding.values().map(|&c| u64::from(c)).sum()
    }

    /// Worker by 1-based id.
    pub fn worker(&self, id: usize) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    /// Whether nothing was allocated (degenerate input).
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty() && self.outstanding.is_empty()
    }
}

/// Greedy case allocator.
///
/// Stateless apart from its policy; each call builds and discards its
/// own roster, so one allocator can serve concurrent callers.
///
/// # Example
///
/// ```
/// use u_caseload::models::{AllocationPolicy, RateTable, WorkRequest};
/// use u_caseload::scheduler::Allocator;
///
/// let policy = AllocationPolicy::new()
///     .with_rates(RateTable::new().with_rate("Biopsy", 80.0))
///     .with_priority_order(["Biopsy"]);
/// let allocator = Allocator::new(policy);
///
/// let allocation = allocator.allocate(&[WorkRequest::new("Biopsy", 100)], 1, 7.0);
/// assert_eq!(allocation.workers[0].assigned("Biopsy"), 80);
/// assert_eq!(allocation.outstanding["Biopsy"], 20);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    policy: AllocationPolicy,
}

impl Allocator {
    /// Creates an allocator for a policy.
    pub fn new(policy: AllocationPolicy) -> Self {
        Self { policy }
    }

    /// Allocates `requests` across `worker_count` workers with
    /// `shift_hours` each.
    ///
    /// Returns an empty allocation for empty requests or zero workers.
    /// Never fails: whatever does not fit is reported as outstanding.
    pub fn allocate(
        &self,
        requests: &[WorkRequest],
        worker_count: usize,
        shift_hours: f64,
    ) -> Allocation {
        if requests.is_empty() || worker_count < 1 {
            return Allocation::default();
        }

        let policy = &self.policy;
        let rates = &policy.rates;
        let requested = RequestedCounts::from_requests(requests);
        for name in requested.duplicates() {
            warn!(category = %name, "duplicate request ignored");
        }

        let mut outstanding: OutstandingMap =
            requests.iter().map(|r| (r.name.clone(), 0)).collect();
        let mut roster = Roster::build(worker_count, shift_hours, policy, &requested);

        let mut flagship_left = None;
        if let Some(flagship) = policy.flagship.as_deref() {
            let count = requested.get(flagship);
            if count > 0 {
                flagship_left = Some((
                    flagship,
                    roster.claim_dedicated(flagship, count, rates, &policy.filler_label),
                ));
            }
        }

        let remaining = |category: &str| match flagship_left {
            Some((flagship, left)) if flagship == category => left,
            _ => requested.get(category),
        };

        let tail_category = policy.tail_category();
        for category in policy.category_order(requested.names()) {
            if Some(category) == tail_category {
                continue;
            }
            let count = remaining(category);
            if count == 0 {
                continue;
            }

            let left = roster.place(category, count, rates);
            if left > 0 {
                debug!(category, left, "greedy pass left cases outstanding");
                *outstanding.entry(category.to_string()).or_insert(0) += left;
            }
        }

        if let Some(category) = tail_category {
            let count = remaining(category);
            if count > 0 {
                let left = roster.place_in_tail(category, count, rates);
                if left > 0 {
                    debug!(category, left, "tail pass left cases outstanding");
                    *outstanding.entry(category.to_string()).or_insert(0) += left;
                }
            }
        }

        let workers = roster.into_workers();
        info!(
            workers = workers.len(),
            categories = requested.len(),
            outstanding = outstanding.values().map(|&c| u64::from(c)).sum::<u64>(),
            "allocation complete"
        );

        Allocation {
            workers,
            outstanding,
        }
    }

    /// Allocates from a request.
    pub fn schedule(&self, request: &ScheduleRequest) -> Allocation {
        self.allocate(&request.tasks, request.worker_count, request.shift_hours)
    }

    /// Summarizes a request against an outstanding map, using this
    /// allocator's rates.
    pub fn summarize(
        &self,
        request: &ScheduleRequest,
        outstanding: &OutstandingMap,
    ) -> WorkloadSummary {
        WorkloadSummary::calculate(
            &request.tasks,
            request.worker_count,
            request.shift_hours,
            outstanding,
            &self.policy.rates,
        )
    }

    /// Allocates from a request and attaches the workload summary.
    pub fn schedule_and_summarize(&self, request: &ScheduleRequest) -> ScheduleOutcome {
        let allocation = self.schedule(request);
        let summary = self.summarize(request, &allocation.outstanding);
        ScheduleOutcome {
            employees: allocation.workers,
            outstanding: allocation.outstanding,
            summary,
        }
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(AllocationPolicy::pathology())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        FixedDutyReservation, PartialShiftReservation, RateTable, TailWindow,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const PATHOLOGY_CATEGORIES: [&str; 17] = [
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
    ];

    fn single_category_allocator() -> Allocator {
        Allocator::new(
            AllocationPolicy::new()
                .with_rates(RateTable::new().with_rate("CategoryX", 80.0))
                .with_priority_order(["CategoryX"]),
        )
    }

    fn reqs(pairs: &[(&str, u32)]) -> Vec<WorkRequest> {
        pairs
            .iter()
            .map(|&(name, count)| WorkRequest::new(name, count))
            .collect()
    }

    fn assert_conserved(allocation: &Allocation, requests: &[WorkRequest]) {
        let requested = RequestedCounts::from_requests(requests);
        for name in requested.names() {
            assert_eq!(
                allocation.assigned(name) + allocation.outstanding[name],
                requested.get(name),
                "conservation for {name}"
            );
        }
    }

    #[test]
    fn test_single_worker_exact_fit() {
        let allocation = single_category_allocator().allocate(&reqs(&[("CategoryX", 80)]), 1, 7.0);

        assert_eq!(allocation.workers.len(), 1);
        let w = &allocation.workers[0];
        assert_eq!(w.id, 1);
        assert_eq!(w.tasks.len(), 80);
        assert_eq!(w.assigned("CategoryX"), 80);
        assert!((w.hours - 7.0).abs() < 1e-9);
        assert_eq!(allocation.outstanding["CategoryX"], 0);
    }

    #[test]
    fn test_single_worker_overflow() {
        let allocation =
            single_category_allocator().allocate(&reqs(&[("CategoryX", 100)]), 1, 7.0);

        assert_eq!(allocation.workers[0].assigned("CategoryX"), 80);
        assert_eq!(allocation.outstanding["CategoryX"], 20);
        assert_eq!(allocation.total_outstanding(), 20);
    }

    #[test]
    fn test_empty_inputs() {
        let allocator = Allocator::default();
        assert!(allocator.allocate(&[], 3, 7.0).is_empty());
        assert!(allocator
            .allocate(&reqs(&[("Priority GI", 4)]), 0, 7.0)
            .is_empty());
    }

    #[test]
    fn test_outstanding_has_every_requested_category() {
        let allocation =
            Allocator::default().allocate(&reqs(&[("Routine GI", 0), ("Priority GI", 1)]), 6, 7.0);
        assert_eq!(allocation.outstanding.len(), 2);
        assert_eq!(allocation.outstanding["Routine GI"], 0);
        assert_eq!(allocation.outstanding["Priority GI"], 0);
    }

    #[test]
    fn test_full_pathology_day() {
        let requests = reqs(&[
            ("Priority Small", 100),
            ("Priority Breast", 4),
            ("Routine Small", 150),
            ("Priority Small - Mid-day", 60),
            ("Routine GI", 10),
            ("Mystery", 3),
        ]);
        let allocation = Allocator::default().allocate(&requests, 6, 7.0);

        // Dedicated worker saturated by the flagship.
        let w1 = allocation.worker(1).unwrap();
        assert_eq!(w1.assigned("Priority Small"), 80);
        assert_eq!(w1.total_cases(), 80);
        assert_eq!(w1.hours, 7.0);

        let w2 = allocation.worker(2).unwrap();
        assert_eq!(w2.assigned("Priority Small"), 20);
        assert_eq!(w2.assigned("Priority Breast"), 3);
        assert_eq!(w2.assigned("Routine Small"), 12);

        // Autopsy cover.
        let w3 = allocation.worker(3).unwrap();
        assert!(w3.tasks.is_empty());
        assert!(w3.case_counts.is_empty());
        assert_eq!(w3.hours, 7.0);

        let w4 = allocation.worker(4).unwrap();
        assert_eq!(w4.assigned("Priority Breast"), 1);
        assert_eq!(w4.assigned("Routine Small"), 29);
        assert_eq!(w4.assigned("Priority Small - Mid-day"), 34);

        let w5 = allocation.worker(5).unwrap();
        assert_eq!(w5.assigned("Routine Small"), 45);
        assert_eq!(w5.assigned("Priority Small - Mid-day"), 26);

        let w6 = allocation.worker(6).unwrap();
        assert_eq!(w6.assigned("Routine Small"), 45);
        assert_eq!(w6.total_cases(), 45);

        assert_eq!(allocation.outstanding["Priority Small"], 0);
        assert_eq!(allocation.outstanding["Priority Breast"], 0);
        assert_eq!(allocation.outstanding["Priority Small - Mid-day"], 0);
        assert_eq!(allocation.outstanding["Routine Small"], 19);
        assert_eq!(allocation.outstanding["Routine GI"], 10);
        assert_eq!(allocation.outstanding["Mystery"], 3);
        assert_conserved(&allocation, &requests);
    }

    #[test]
    fn test_reservations_and_dedicated_filler() {
        let requests = reqs(&[
            ("Priority Small", 40),
            ("Routine Breast", 30),
            ("Priority Small - Mid-day", 50),
        ]);
        let shift = 7.0;
        let allocation = Allocator::default().allocate(&requests, 6, shift);

        // Dedicated worker: 40 cases plus a visible filler for the rest.
        let w1 = allocation.worker(1).unwrap();
        assert_eq!(w1.assigned("Priority Small"), 40);
        assert_eq!(w1.tasks.len(), 41);
        assert_eq!(w1.tasks[40].name, "Reserved");
        assert!((w1.hours_on("Reserved") - 3.5).abs() < 1e-9);
        assert_eq!(w1.hours, shift);
        assert!(!w1.case_counts.contains_key("Reserved"));
        assert_eq!(w1.assigned("Routine Breast"), 0);

        let w2 = allocation.worker(2).unwrap();
        assert_eq!(w2.assigned("Routine Breast"), 5);

        let w3 = allocation.worker(3).unwrap();
        assert!(w3.tasks.is_empty());
        assert_eq!(w3.hours, shift);

        // Partial workers: ordinary work stays in the 4 h head.
        for id in 4..=6 {
            let w = allocation.worker(id).unwrap();
            assert_eq!(w.assigned("Routine Breast"), 2, "worker {id}");
            assert!(w.hours_on("Routine Breast") <= 4.0 + 1e-9);
            assert!(w.hours <= shift + 1e-9);
        }
        assert_eq!(allocation.worker(4).unwrap().assigned("Priority Small - Mid-day"), 34);
        assert_eq!(allocation.worker(5).unwrap().assigned("Priority Small - Mid-day"), 16);
        let w5 = allocation.worker(5).unwrap();
        assert!((w5.hours - (4.0 + 16.0 * 7.0 / 80.0)).abs() < 1e-9);

        assert_eq!(allocation.outstanding["Routine Breast"], 19);
        assert_eq!(allocation.outstanding["Priority Small - Mid-day"], 0);
        assert_conserved(&allocation, &requests);
    }

    #[test]
    fn test_tail_pass_credits_flagship_overflow() {
        let requests = reqs(&[("Priority Small", 130), ("Priority Small - Mid-day", 40)]);
        let allocation = Allocator::default().allocate(&requests, 5, 7.0);

        // Worker 3 ran Priority Small into its tail (50 × 0.0875 = 4.375 h),
        // so the mid-day block starts at 4.375 h, not 4 h.
        let w3 = allocation.worker(3).unwrap();
        assert_eq!(w3.assigned("Priority Small"), 50);
        assert_eq!(w3.assigned("Priority Small - Mid-day"), 30);
        assert!((w3.hours - 7.0).abs() < 1e-9);

        let w4 = allocation.worker(4).unwrap();
        assert_eq!(w4.assigned("Priority Small - Mid-day"), 10);
        assert!((w4.hours - 4.875).abs() < 1e-9);

        let w5 = allocation.worker(5).unwrap();
        assert!(w5.tasks.is_empty());
        assert_eq!(w5.hours, 0.0);

        assert_eq!(allocation.total_outstanding(), 0);
        assert_conserved(&allocation, &requests);
    }

    #[test]
    fn test_tail_category_never_in_greedy_pass() {
        // Without partial workers the tail category cannot be placed at all.
        let policy = AllocationPolicy::pathology().with_partial_shift(
            PartialShiftReservation::new("Priority Small - Mid-day", 0, TailWindow::Hours(3.0)),
        );
        let requests = reqs(&[("Priority Small - Mid-day", 10)]);
        let allocation = Allocator::new(policy).allocate(&requests, 4, 7.0);

        assert_eq!(allocation.assigned("Priority Small - Mid-day"), 0);
        assert_eq!(allocation.outstanding["Priority Small - Mid-day"], 10);
    }

    #[test]
    fn test_half_shift_tail() {
        let policy = AllocationPolicy::pathology().with_partial_shift(
            PartialShiftReservation::new("Priority Small - Mid-day", 3, TailWindow::HalfShift)
                .with_open_category("Priority Small"),
        );
        let requests = reqs(&[("Routine GI", 20), ("Priority Small - Mid-day", 200)]);
        let allocation = Allocator::new(policy).allocate(&requests, 5, 8.0);

        // No flagship demand: worker 1 stays ordinary.
        assert_eq!(allocation.worker(1).unwrap().assigned("Routine GI"), 5);
        assert!(allocation.worker(2).unwrap().tasks.is_empty());
        for id in 3..=5 {
            let w = allocation.worker(id).unwrap();
            assert_eq!(w.assigned("Routine GI"), 2, "worker {id}");
            assert_eq!(w.assigned("Priority Small - Mid-day"), 45, "worker {id}");
            assert!((w.hours - 7.9375).abs() < 1e-9);
        }
        assert_eq!(allocation.outstanding["Routine GI"], 9);
        assert_eq!(allocation.outstanding["Priority Small - Mid-day"], 65);
    }

    #[test]
    fn test_priority_before_routine() {
        let allocator = Allocator::new(AllocationPolicy::pathology().without_reservations());
        let requests = reqs(&[("Routine Breast", 5), ("Priority Breast", 8)]);
        let allocation = allocator.allocate(&requests, 1, 7.0);

        let w = &allocation.workers[0];
        assert_eq!(w.assigned("Priority Breast"), 5);
        assert_eq!(w.assigned("Routine Breast"), 0);
        assert!(w.tasks.iter().all(|t| t.name == "Priority Breast"));
        assert_eq!(allocation.outstanding["Priority Breast"], 3);
        assert_eq!(allocation.outstanding["Routine Breast"], 5);
    }

    #[test]
    fn test_unknown_category_is_allocated_last() {
        let allocator = Allocator::new(AllocationPolicy::pathology().without_reservations());
        let requests = reqs(&[("Mystery", 2), ("Non Tumour Bones", 5)]);
        let allocation = allocator.allocate(&requests, 1, 7.0);

        let w = &allocation.workers[0];
        assert_eq!(w.tasks[0].name, "Non Tumour Bones");
        assert_eq!(w.assigned("Non Tumour Bones"), 5);
        // 3.5 h left at 7 h per unknown item.
        assert_eq!(w.assigned("Mystery"), 0);
        assert_eq!(allocation.outstanding["Mystery"], 2);
        assert_conserved(&allocation, &requests);
    }

    #[test]
    fn test_duplicate_request_first_wins() {
        let allocation = single_category_allocator().allocate(
            &reqs(&[("CategoryX", 10), ("CategoryX", 500)]),
            1,
            7.0,
        );
        assert_eq!(allocation.assigned("CategoryX"), 10);
        assert_eq!(allocation.outstanding["CategoryX"], 0);
    }

    #[test]
    fn test_floor_capacity_at_boundary() {
        let allocator = Allocator::new(
            AllocationPolicy::new()
                .with_rates(
                    RateTable::new()
                        .with_rate("Slow A", 3.0)
                        .with_rate("Slow B", 3.0),
                )
                .with_priority_order(["Slow A", "Slow B"]),
        );
        let allocation = allocator.allocate(&reqs(&[("Slow A", 1), ("Slow B", 10)]), 1, 14.0);

        // floor(11.666666666666666 × 3 / 7) = 5, one more than
        // 11.666666666666666 / (7 / 3) would give.
        let w = &allocation.workers[0];
        assert_eq!(w.assigned("Slow B"), 5);
        assert!((w.hours - 14.0).abs() < 1e-9);
        assert_eq!(allocation.outstanding["Slow B"], 5);
    }

    #[test]
    fn test_fixed_duty_block_size() {
        let policy = AllocationPolicy::pathology()
            .with_fixed_duty(FixedDutyReservation::new("Autopsy", 2));
        let requests = reqs(&[("Routine Small", 1000)]);
        let allocation = Allocator::new(policy).allocate(&requests, 7, 7.0);

        for id in [3, 4] {
            let w = allocation.worker(id).unwrap();
            assert!(w.tasks.is_empty(), "worker {id}");
            assert_eq!(w.hours, 7.0);
        }
        assert_eq!(allocation.worker(1).unwrap().assigned("Routine Small"), 80);
        assert_eq!(allocation.worker(5).unwrap().assigned("Routine Small"), 45);
    }

    #[test]
    fn test_result_wire_format() {
        let allocation = single_category_allocator().allocate(&reqs(&[("CategoryX", 2)]), 2, 7.0);
        let json = serde_json::to_value(&allocation).unwrap();
        assert_eq!(json["workers"][0]["case_counts"]["CategoryX"], 2);
        assert_eq!(json["workers"][1]["tasks"].as_array().unwrap().len(), 0);
        assert_eq!(json["outstanding"]["CategoryX"], 0);
    }

    #[test]
    fn test_schedule_and_summarize() {
        let request = ScheduleRequest::new(reqs(&[("CategoryX", 100)]), 1, 7.0);
        let outcome = single_category_allocator().schedule_and_summarize(&request);

        assert_eq!(outcome.employees.len(), 1);
        assert_eq!(outcome.employees[0].assigned("CategoryX"), 80);
        assert_eq!(outcome.outstanding["CategoryX"], 20);
        assert_eq!(outcome.summary.total_outstanding, 20);
        assert!((outcome.summary.overtime - 1.75).abs() < 1e-10);
        assert!((outcome.summary.total_hours - 8.75).abs() < 1e-10);
    }

    #[test]
    fn test_schedule_and_summarize_empty() {
        let request = ScheduleRequest::new(Vec::new(), 3, 7.0);
        let outcome = Allocator::default().schedule_and_summarize(&request);
        assert!(outcome.employees.is_empty());
        assert!(outcome.outstanding.is_empty());
        assert_eq!(outcome.summary.total_requested_items, 0);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["employees"].as_array().unwrap().len(), 0);
        assert_eq!(json["summary"]["estimatedDays"], 0);
    }

    #[test]
    fn test_allocator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Allocator>();

        let allocator = std::sync::Arc::new(Allocator::default());
        let handles: Vec<_> = (1..=4)
            .map(|workers| {
                let allocator = std::sync::Arc::clone(&allocator);
                std::thread::spawn(move || {
                    allocator
                        .allocate(&reqs(&[("Routine Small", 500)]), workers, 7.0)
                        .total_outstanding()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap() <= 500);
        }
    }

    fn random_requests(rng: &mut StdRng) -> Vec<WorkRequest> {
        let mut requests = Vec::new();
        for name in PATHOLOGY_CATEGORIES {
            if rng.random_bool(0.6) {
                requests.push(WorkRequest::new(name, rng.random_range(0..150)));
            }
        }
        if rng.random_bool(0.3) {
            requests.push(WorkRequest::new("Unlisted", rng.random_range(0..5)));
        }
        requests
    }

    #[test]
    fn test_randomized_conservation_and_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let allocator = Allocator::default();

        for _ in 0..300 {
            let requests = random_requests(&mut rng);
            let workers = rng.random_range(1..12);
            let shift = f64::from(rng.random_range(1..=24u32));
            let allocation = allocator.allocate(&requests, workers, shift);
            if requests.is_empty() {
                assert!(allocation.is_empty());
                continue;
            }

            assert_eq!(allocation.workers.len(), workers);
            assert_conserved(&allocation, &requests);
            for w in &allocation.workers {
                assert!(w.hours <= shift + 1e-9, "worker {} at {}", w.id, w.hours);
                let tallied: u32 = w.case_counts.values().sum();
                let cases = w.tasks.iter().filter(|t| t.name != "Reserved").count();
                assert_eq!(tallied as usize, cases);
            }
        }
    }

    // Holds for unreserved rosters only: with reservations, growing the
    // roster moves the reserved blocks and can strand dedicated capacity.
    #[test]
    fn test_randomized_more_workers_never_more_outstanding() {
        let mut rng = StdRng::seed_from_u64(11);
        let allocator = Allocator::new(AllocationPolicy::pathology().without_reservations());

        for _ in 0..200 {
            let requests = random_requests(&mut rng);
            let shift = f64::from(rng.random_range(1..=24u32));
            let mut previous = u64::MAX;
            for workers in 1..8 {
                let total = allocator
                    .allocate(&requests, workers, shift)
                    .total_outstanding();
                assert!(total <= previous, "{workers} workers: {total} > {previous}");
                previous = total;
            }
        }
    }

    #[test]
    fn test_reserved_roster_can_leave_more_outstanding() {
        // At 4 workers no slot is ordinary, so nobody is dedicated. At 5
        // worker 1 becomes dedicated and its filler strands 8.425 h.
        let requests = reqs(&[
            ("Priority Small", 18),
            ("Priority GI", 86),
            ("NICU Placentas", 34),
            ("Routine Small", 27),
            ("Non Tumour Bones", 171),
        ]);
        let allocator = Allocator::default();

        let four = allocator.allocate(&requests, 4, 10.0);
        let five = allocator.allocate(&requests, 5, 10.0);
        assert_eq!(four.total_outstanding(), 298);
        assert_eq!(five.total_outstanding(), 303);

        assert_eq!(four.worker(2).unwrap().assigned("Priority Small"), 18);
        let w1 = five.worker(1).unwrap();
        assert_eq!(w1.assigned("Priority Small"), 18);
        assert_eq!(w1.total_cases(), 18);
        assert_conserved(&four, &requests);
        assert_conserved(&five, &requests);
    }

    #[test]
    fn test_flagship_that_is_also_tail_category_is_placed_once() {
        let policy = AllocationPolicy::pathology().with_flagship("Priority Small - Mid-day");
        let requests = reqs(&[("Priority Small - Mid-day", 100)]);
        let allocation = Allocator::new(policy).allocate(&requests, 6, 7.0);

        assert_eq!(allocation.worker(1).unwrap().assigned("Priority Small - Mid-day"), 80);
        let w4 = allocation.worker(4).unwrap();
        assert_eq!(w4.assigned("Priority Small - Mid-day"), 20);
        assert!((w4.hours - 5.75).abs() < 1e-9);
        assert_eq!(allocation.assigned("Priority Small - Mid-day"), 100);
        assert_eq!(allocation.outstanding["Priority Small - Mid-day"], 0);
        assert_conserved(&allocation, &requests);
    }

    #[test]
    fn test_total_outstanding_beyond_u32() {
        let requests = reqs(&[("A", 3_000_000_000), ("B", 3_000_000_000)]);
        let allocation = Allocator::new(AllocationPolicy::new()).allocate(&requests, 1, 7.0);

        assert_eq!(allocation.assigned("A"), 1);
        assert_eq!(allocation.outstanding["A"], 2_999_999_999);
        assert_eq!(allocation.outstanding["B"], 3_000_000_000);
        assert_eq!(allocation.total_outstanding(), 5_999_999_999);
        assert_conserved(&allocation, &requests);
    }

    #[test]
    fn test_item_hours_independent_of_shift() {
        let allocator = Allocator::default();
        let requests = reqs(&[("Priority Breast", 2), ("Routine Small", 10)]);
        let short = allocator.allocate(&requests, 6, 7.0);
        let long = allocator.allocate(&requests, 6, 11.0);

        for name in ["Priority Breast", "Routine Small"] {
            let hours = |a: &Allocation| {
                a.workers
                    .iter()
                    .flat_map(|w| w.tasks.iter())
                    .find(|t| t.name == name)
                    .map(|t| t.hours)
                    .unwrap()
            };
            assert_eq!(hours(&short).to_bits(), hours(&long).to_bits(), "{name}");
        }
    }
}
