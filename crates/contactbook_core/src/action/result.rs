//! Uniform outcome envelope returned by every action.

use serde::Serialize;

/// Generic fallback message for failures of an unrecognized kind.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Failure class of an action outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionFailure {
    /// Input rejected before any store access.
    Validation,
    /// Target record does not exist.
    NotFound,
    /// Store uniqueness constraint violated.
    Conflict,
    /// Any other store-level fault.
    Persistence,
    /// Failure that matches no recognized kind.
    Unknown,
}

/// Discriminated action outcome.
///
/// Serializes as `{ "success": true, "data": ... }` or
/// `{ "success": false, "error": "..." }`; absent keys are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult<T> {
    /// Whether the action completed its mutation.
    pub success: bool,
    /// Result payload; `None` for successful actions without a payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure class, kept out of the wire shape.
    #[serde(skip)]
    pub failure: Option<ActionFailure>,
}

impl<T> ActionResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            failure: None,
        }
    }

    pub fn failure(kind: ActionFailure, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            failure: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Converts into a plain `Result` carrying the failure class and message.
    pub fn into_result(self) -> Result<Option<T>, (ActionFailure, String)> {
        if self.success {
            return Ok(self.data);
        }
        Err((
            self.failure.unwrap_or(ActionFailure::Unknown),
            self.error
                .unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string()),
        ))
    }
}

impl ActionResult<()> {
    /// Success without a payload; serializes as `{ "success": true }`.
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            failure: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionFailure, ActionResult};

    #[test]
    fn into_result_exposes_failure_kind() {
        let result: ActionResult<u8> = ActionResult::failure(ActionFailure::Conflict, "taken");
        assert_eq!(
            result.into_result(),
            Err((ActionFailure::Conflict, "taken".to_string()))
        );
    }

    #[test]
    fn done_carries_no_payload() {
        let result = ActionResult::done();
        assert!(result.is_success());
        assert_eq!(result.into_result(), Ok(None));
    }
}
