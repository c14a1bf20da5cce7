//! Error types for the pmax client.
//!
//! One unified error type with explicit variants for transport, decoding,
//! server responses, job polling, iterator paging, and input validation.

use std::fmt;
use thiserror::Error;

use crate::resources::job::JobStatus;

/// The unified error type for pmax operations.
///
/// Every failure mode in the library maps onto exactly one of these
/// categories so callers can match on the cases they care about.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, request timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response body could not be parsed into the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Unisphere answered with a non-2xx status.
    #[error("server error: {0}")]
    Api(#[from] ApiError),

    /// Asynchronous job submission or polling failed.
    #[error("job error: {0}")]
    Job(#[from] JobError),

    /// Paginated iterator retrieval failed.
    #[error("iterator error: {0}")]
    Iterator(#[from] IteratorError),

    /// Input validation errors (invalid endpoint, array id, arguments).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out before a status code was obtained.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP transport failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Response-body decoding errors.
///
/// Never defaulted away: a body that does not match the expected resource
/// shape is surfaced to the caller, not replaced with an empty value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not valid JSON for the expected type.
    #[error("invalid {resource} body: {message}")]
    Body { resource: &'static str, message: String },
}

/// A non-2xx response from Unisphere.
///
/// Carries the HTTP status and the server-provided message when the error
/// body could be parsed.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if any.
    pub message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// True for 404-class responses.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Job submission and polling errors.
#[derive(Debug, Error)]
pub enum JobError {
    /// The polled job does not exist on the array.
    #[error("job {job_id} not found")]
    NotFound { job_id: String },

    /// The job reached terminal FAILED status.
    ///
    /// The wrapped result text is the server's failure description. The
    /// mutation may have partially applied; callers must not assume
    /// rollback.
    #[error("job {job_id} failed: {result}")]
    Failed { job_id: String, result: String },

    /// The wait deadline elapsed before the job reached a terminal status.
    ///
    /// The mutation is indeterminate: it may still complete server-side.
    #[error("timed out waiting on job {job_id}, last status {last_status}")]
    Timeout {
        job_id: String,
        last_status: JobStatus,
    },
}

/// Iterator paging errors.
#[derive(Debug, Error)]
pub enum IteratorError {
    /// A page was requested beyond the iterator's element count.
    #[error("page start {from} is beyond iterator count {count}")]
    RangeOutOfBounds { from: u32, count: u32 },

    /// Draining retrieved a different number of elements than the iterator
    /// declared. Indicates server/client desync; never silently corrected.
    #[error("expected {expected} ids but got {actual} ids")]
    CountMismatch { expected: u32, actual: u32 },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid Unisphere endpoint URL.
    #[error("invalid endpoint URL '{value}': {reason}")]
    EndpointUrl { value: String, reason: String },

    /// Invalid Symmetrix array identifier.
    #[error("invalid array id '{value}': {reason}")]
    SymId { value: String, reason: String },

    /// The array is not in the configured allowed list.
    #[error("the requested array ({sym_id}) is ignored via allowed arrays")]
    ArrayNotAllowed { sym_id: String },

    /// Generic invalid argument.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_with_message() {
        let err = ApiError::new(404, Some("Job not found: 123".to_string()));
        assert_eq!(err.to_string(), "HTTP 404: Job not found: 123");
        assert!(err.is_not_found());
    }

    #[test]
    fn api_error_display_without_message() {
        let err = ApiError::new(503, None);
        assert_eq!(err.to_string(), "HTTP 503");
        assert!(!err.is_not_found());
    }

    #[test]
    fn job_timeout_carries_last_status() {
        let err = Error::from(JobError::Timeout {
            job_id: "J42".to_string(),
            last_status: JobStatus::Running,
        });
        let text = err.to_string();
        assert!(text.contains("J42"));
        assert!(text.contains("RUNNING"));
    }

    #[test]
    fn count_mismatch_display() {
        let err = IteratorError::CountMismatch {
            expected: 30,
            actual: 25,
        };
        assert_eq!(err.to_string(), "expected 30 ids but got 25 ids");
    }
}
