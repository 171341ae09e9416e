//! Error types for signup submission and configuration.

use thiserror::Error;

const MSG_UNAUTHENTICATED: &str = "Not authenticated to access this resource.";
const MSG_PASSWORD_REJECTED: &str =
    "Sorry, the entered password is not allowed, please try a different one.";
const MSG_GENERIC: &str = "Something went wrong, please try again.";

/// Failure of a signup attempt, as shown to the user.
///
/// `Display` yields the exact user-facing message. Variants carry the
/// underlying cause for logging only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    /// The endpoint answered 401 or 403.
    #[error("{}", MSG_UNAUTHENTICATED)]
    Unauthenticated { status: u16 },
    /// The endpoint answered 400 and flagged the password as not allowed.
    #[error("{}", MSG_PASSWORD_REJECTED)]
    PasswordRejected,
    /// Any other failure, including transport faults.
    #[error("{}", MSG_GENERIC)]
    Server(ServerFailure),
}

impl SignupError {
    /// The user-facing message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            SignupError::Unauthenticated { .. } => MSG_UNAUTHENTICATED,
            SignupError::PasswordRejected => MSG_PASSWORD_REJECTED,
            SignupError::Server(_) => MSG_GENERIC,
        }
    }
}

/// Cause behind a [`SignupError::Server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFailure {
    /// Non-2xx status that matched no specific rule (500 included).
    Status(u16),
    /// The request never produced a usable response.
    Transport(TransportError),
}

impl From<TransportError> for SignupError {
    fn from(err: TransportError) -> Self {
        SignupError::Server(ServerFailure::Transport(err))
    }
}

/// Failure to obtain an HTTP response from the signup endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Unable to reach the server: {0}")]
    Network(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Failed to read response: {0}")]
    MalformedResponse(String),
    #[error("Failed to build request: {0}")]
    Request(String),
}

/// Invalid or missing signup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid API base URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("Invalid timeout '{0}': expected a positive number of milliseconds")]
    InvalidTimeout(String),
    #[error("Failed to initialize HTTP client: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_message() {
        assert_eq!(
            SignupError::Unauthenticated { status: 401 }.to_string(),
            "Not authenticated to access this resource."
        );
        assert_eq!(
            SignupError::PasswordRejected.to_string(),
            "Sorry, the entered password is not allowed, please try a different one."
        );
        assert_eq!(
            SignupError::Server(ServerFailure::Status(500)).to_string(),
            "Something went wrong, please try again."
        );
    }

    #[test]
    fn test_transport_error_maps_to_generic_message() {
        let err: SignupError = TransportError::Timeout.into();
        assert_eq!(err.message(), "Something went wrong, please try again.");
        assert_eq!(
            err,
            SignupError::Server(ServerFailure::Transport(TransportError::Timeout))
        );
    }

    #[test]
    fn test_message_matches_display() {
        let errors = [
            SignupError::Unauthenticated { status: 403 },
            SignupError::PasswordRejected,
            SignupError::Server(ServerFailure::Status(418)),
            TransportError::Network("refused".to_string()).into(),
        ];
        for err in errors {
            assert_eq!(err.message(), err.to_string());
        }
    }
}
