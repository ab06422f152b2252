use std::fmt;

use crate::error::ApiError;

/// Message used when a lookup reports success but hands back no row.
pub const MISSING_PAYLOAD: &str = "resource should exist but could not be loaded";

/// `p_resultado` / `p_mensaje` pair of a failed call.
///
/// `code` is `None` when the failure was detected by this service rather than the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: Option<i64>,
    pub message: String,
}

impl StoreError {
    pub fn new(code: i64, message: String) -> Self {
        Self {
            code: Some(code),
            message,
        }
    }

    pub fn local(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// One stored procedure call, decoded.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    NotFound(StoreError),
    Conflict(StoreError),
    Validation(StoreError),
    Infra(StoreError),
}

impl<T> Outcome<T> {
    /// Store error carried by any non-success variant.
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::NotFound(e)
            | Outcome::Conflict(e)
            | Outcome::Validation(e)
            | Outcome::Infra(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::NotFound(e) => Err(ApiError::NotFound(e)),
            Outcome::Conflict(e) => Err(ApiError::Conflict(e)),
            Outcome::Validation(e) => Err(ApiError::Validation(e)),
            Outcome::Infra(e) => Err(ApiError::Internal(e)),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::NotFound(e) => Outcome::NotFound(e),
            Outcome::Conflict(e) => Outcome::Conflict(e),
            Outcome::Validation(e) => Outcome::Validation(e),
            Outcome::Infra(e) => Outcome::Infra(e),
        }
    }
}

impl<T> Outcome<Option<T>> {
    /// Turns "success without a row" into an infrastructure failure.
    pub fn required(self) -> Outcome<T> {
        self.required_or(MISSING_PAYLOAD)
    }

    pub fn required_or(self, message: impl Into<String>) -> Outcome<T> {
        match self {
            Outcome::Success(Some(value)) => Outcome::Success(value),
            Outcome::Success(None) => Outcome::Infra(StoreError::local(message)),
            Outcome::NotFound(e) => Outcome::NotFound(e),
            Outcome::Conflict(e) => Outcome::Conflict(e),
            Outcome::Validation(e) => Outcome::Validation(e),
            Outcome::Infra(e) => Outcome::Infra(e),
        }
    }
}
