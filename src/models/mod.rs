//! Allocation domain models.
//!
//! Provides the data types for describing a day's caseload and the
//! resulting per-worker allocation.
//!
//! # Domain Mappings
//!
//! | u-caseload | Grossing room | Generic |
//! |------------|---------------|---------|
//! | WorkCategory | Specimen type | Job class |
//! | WorkRequest | Cases received | Demand |
//! | Worker | Pathologists' assistant | Resource |
//! | AllocationPolicy | Bench rules | Configuration |

mod category;
mod policy;
mod request;
mod worker;

pub use category::{RateTable, WorkCategory, DEFAULT_RATE, REFERENCE_SHIFT_HOURS};
pub use policy::{AllocationPolicy, FixedDutyReservation, PartialShiftReservation, TailWindow};
pub use request::{RequestedCounts, WorkRequest};
pub use worker::{WorkItem, Worker, WorkerRole};
