//! Maps signup endpoint responses to outcomes.

use serde::Deserialize;

use crate::error::{ServerFailure, SignupError};

/// Marker the endpoint puts in `message` when it refuses a password.
const PASSWORD_NOT_ALLOWED_MARKER: &str = "not allowed";

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Classifies a signup response.
///
/// Success depends only on the status being 2xx; the body is ignored. Failures
/// are checked in order: 401/403, 400 with a "not allowed" message, then every
/// other status (500 included) falls back to a generic server error. A body
/// that is not valid JSON never fails classification, it only disables the
/// password-rejection rule.
pub fn classify_response(status: u16, body: &str) -> Result<(), SignupError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    match status {
        401 | 403 => Err(SignupError::Unauthenticated { status }),
        400 if password_not_allowed(body) => Err(SignupError::PasswordRejected),
        _ => Err(SignupError::Server(ServerFailure::Status(status))),
    }
}

fn password_not_allowed(body: &str) -> bool {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .is_some_and(|message| message.contains(PASSWORD_NOT_ALLOWED_MARKER))
}
