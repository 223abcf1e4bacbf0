//! Request error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while turning a client payload into a request.
///
/// The allocator itself never fails; these errors stop a request before
/// it gets there.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid request: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub type RequestResult<T> = Result<T, RequestError>;
