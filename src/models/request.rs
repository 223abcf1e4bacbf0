//! Work requests.
//!
//! A request is a (category, count) pair submitted by the caller. Requests
//! are looked up by category name, at most one per name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A caller-submitted demand for `count` items of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRequest {
    /// Category name.
    pub name: String,
    /// Number of items requested.
    pub count: u32,
}

impl WorkRequest {
    /// Creates a new request.
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Category → requested count, built once per allocation.
///
/// The first request for a name wins; later duplicates are recorded so
/// callers can report them. Request order is preserved.
#[derive(Debug, Clone, Default)]
pub struct RequestedCounts {
    order: Vec<String>,
    counts: HashMap<String, u32>,
    duplicates: Vec<String>,
}

impl RequestedCounts {
    /// Indexes a request list.
    pub fn from_requests(requests: &[WorkRequest]) -> Self {
        let mut indexed = Self::default();
        for request in requests {
            if indexed.counts.contains_key(&request.name) {
                indexed.duplicates.push(request.name.clone());
                continue;
            }
            indexed.order.push(request.name.clone());
            indexed.counts.insert(request.name.clone(), request.count);
        }
        indexed
    }

    /// Requested count for a category (0 if not requested).
    pub fn get(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Distinct category names in request order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Names of requests shadowed by an earlier request for the same category.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no categories were requested.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
