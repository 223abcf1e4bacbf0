//! Case allocation and workload metrics.
//!
//! Provides the greedy shift-capacity allocator and the workload summary
//! derived from its outstanding counts.
//!
//! # Algorithm
//!
//! `Allocator` runs a multi-pass, priority-ordered, capacity-bounded greedy
//! assignment with reservation carve-outs. It is not optimal; it
//! reproduces the bench's fixed assignment rules.
//!
//! # Summary
//!
//! `WorkloadSummary` computes total hours, estimated days to clear the
//! caseload and the overtime needed for outstanding items.

mod allocator;
mod request;
mod roster;
mod summary;

pub use allocator::{Allocation, Allocator, OutstandingMap};
pub use request::{ScheduleOutcome, ScheduleRequest};
pub use summary::WorkloadSummary;
