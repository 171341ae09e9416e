//! Account signup controller
//!
//! This library validates a signup password against a fixed set of rules,
//! submits the credentials to a remote signup endpoint and turns the response
//! into a user-facing outcome.
//!
//! # Features
//!
//! - `http` (default): Enables [`HttpSignupClient`], a `reqwest` transport
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! Read by [`SignupConfig::from_env`]:
//!
//! - `SIGNUP_API_BASE_URL`: versioned API base, e.g. `https://api.example.com/v1`
//! - `SIGNUP_API_TOKEN`: bearer credential sent with every request
//! - `SIGNUP_TIMEOUT_MS`: request timeout (default: `10000`)
//!
//! # Example
//!
//! ```rust,no_run
//! use signup_flow::{HttpSignupClient, SignupConfig, SignupController, SubmitOutcome};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpSignupClient::new(SignupConfig::from_env()?)?;
//! let controller = SignupController::new(client);
//! let created = controller.account_created();
//!
//! controller.set_username("alice");
//! controller.set_password("Abcdefghi1");
//! println!("Unmet rules: {:?}", controller.unmet_rules());
//!
//! match controller.submit().await {
//!     SubmitOutcome::Created => println!("Welcome, {}", created.await?.username),
//!     SubmitOutcome::Failed(err) => println!("{}", err),
//!     SubmitOutcome::Blocked(reason) => println!("Cannot submit yet: {:?}", reason),
//! }
//! # Ok(())
//! # }
//! ```

// Internal modules
mod classify;
mod config;
mod controller;
mod error;
mod rules;
mod transport;

// Public API
pub use classify::classify_response;
pub use config::{DEFAULT_TIMEOUT_MS, SignupConfig};
pub use controller::{
    AccountCreated, BlockReason, FormSnapshot, SignupController, SubmissionStatus, SubmitOutcome,
};
pub use error::{ConfigError, ServerFailure, SignupError, TransportError};
pub use rules::{PASSWORD_RULES, PasswordRule, RuleEngine, ValidationResult};
pub use transport::{SignupResponse, SignupTransport};

#[cfg(feature = "http")]
pub use transport::HttpSignupClient;
