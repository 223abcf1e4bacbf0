//! Request and response payloads.
//!
//! `ScheduleRequest` mirrors the JSON body the web client posts:
//! `{ "tasks": [...], "availablePeople": 4, "workingHours": 7 }`. The
//! client sends form values, so the two numbers may arrive as strings.

use serde::{Deserialize, Deserializer, Serialize};

use super::{OutstandingMap, WorkloadSummary};
use crate::error::{RequestError, RequestResult};
use crate::models::{WorkRequest, Worker};
use crate::validation::validate_input;

/// Input container for one allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Requested work, one entry per category.
    #[serde(default)]
    pub tasks: Vec<WorkRequest>,
    /// Roster size.
    #[serde(
        rename = "availablePeople",
        default = "default_worker_count",
        deserialize_with = "number_or_text"
    )]
    pub worker_count: usize,
    /// Shift length (hours).
    #[serde(
        rename = "workingHours",
        default = "default_shift_hours",
        deserialize_with = "number_or_text"
    )]
    pub shift_hours: f64,
}

fn default_worker_count() -> usize {
    1
}

fn default_shift_hours() -> f64 {
    7.0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

fn number_or_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {text:?}"))),
    }
}

impl ScheduleRequest {
    /// Creates a new request.
    pub fn new(tasks: Vec<WorkRequest>, worker_count: usize, shift_hours: f64) -> Self {
        Self {
            tasks,
            worker_count,
            shift_hours,
        }
    }

    /// Adds a work request.
    pub fn with_task(mut self, name: impl Into<String>, count: u32) -> Self {
        self.tasks.push(WorkRequest::new(name, count));
        self
    }

    /// Parses and validates a JSON request body.
    pub fn from_json(body: &str) -> RequestResult<Self> {
        let request: Self = serde_json::from_str(body)?;
        request.validate()?;
        Ok(request)
    }

    /// Checks ranges before the request reaches the allocator.
    pub fn validate(&self) -> RequestResult<()> {
        validate_input(&self.tasks, self.worker_count, self.shift_hours)
            .map_err(RequestError::Invalid)
    }
}

/// Allocation plus derived summary, as returned to the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Per-worker allocations.
    pub employees: Vec<Worker>,
    /// Unplaced counts per requested category.
    pub outstanding: OutstandingMap,
    /// Aggregate workload figures.
    pub summary: WorkloadSummary,
}
