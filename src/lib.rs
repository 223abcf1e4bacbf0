//! Shift-capacity case allocation.
//!
//! Distributes a day's categorized caseload across a roster of workers
//! with fixed shift lengths, honoring per-category throughput rates and
//! reservation rules, and reports what could not be placed.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `WorkCategory`, `RateTable`, `WorkRequest`,
//!   `Worker`, `WorkItem`, `AllocationPolicy`
//! - **`scheduler`**: `Allocator` (greedy assignment) and `WorkloadSummary`
//!   (hours, days and overtime)
//! - **`validation`**: Input integrity checks (ranges, names, policy sanity)
//! - **`error`**: Request parsing errors
//!
//! # Example
//!
//! ```
//! use u_caseload::scheduler::{Allocator, ScheduleRequest};
//!
//! let request = ScheduleRequest::from_json(
//!     r#"{ "tasks": [{ "name": "Routine GI", "count": 12 }],
//!          "availablePeople": 6, "workingHours": 7 }"#,
//! ).unwrap();
//!
//! let outcome = Allocator::default().schedule_and_summarize(&request);
//! assert_eq!(outcome.employees.len(), 6);
//! assert_eq!(outcome.outstanding["Routine GI"], 0);
//! ```

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
