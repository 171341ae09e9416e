//! Signup form controller - owns the form state and drives submission.
//!
//! The controller validates the password locally, sends at most one signup
//! request at a time and turns the response into an outcome. Observers get a
//! [`FormSnapshot`] after every change through [`SignupController::subscribe`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{oneshot, watch};

use crate::classify::classify_response;
use crate::error::SignupError;
use crate::rules::RuleEngine;
use crate::transport::SignupTransport;

/// Lifecycle of the signup form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    /// Terminal: the account exists.
    Succeeded,
}

/// Why `submit` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    InFlight,
    AlreadyCreated,
    MissingUsername,
    InvalidPassword,
}

/// Result of one call to [`SignupController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent.
    Blocked(BlockReason),
    Created,
    Failed(SignupError),
}

/// Signal delivered to the owner once the account has been created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreated {
    pub username: String,
}

/// Read model of the form, published on every change.
#[derive(Debug)]
pub struct FormSnapshot {
    pub username: String,
    pub password: SecretString,
    pub status: SubmissionStatus,
    pub last_error: Option<SignupError>,
    pub unmet_rules: Vec<&'static str>,
    pub can_submit: bool,
}

impl FormSnapshot {
    pub fn last_error_message(&self) -> Option<&'static str> {
        self.last_error.as_ref().map(SignupError::message)
    }
}

struct FormState {
    username: String,
    password: SecretString,
    status: SubmissionStatus,
    last_error: Option<SignupError>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: SecretString::new(String::new().into()),
            status: SubmissionStatus::Idle,
            last_error: None,
        }
    }
}

pub struct SignupController<T> {
    rules: RuleEngine,
    transport: T,
    state: Mutex<FormState>,
    changes: watch::Sender<FormSnapshot>,
    account_created: Mutex<Option<oneshot::Sender<AccountCreated>>>,
}

impl<T: SignupTransport> SignupController<T> {
    /// Creates a controller with the default password rules.
    pub fn new(transport: T) -> Self {
        Self::with_rules(RuleEngine::default(), transport)
    }

    pub fn with_rules(rules: RuleEngine, transport: T) -> Self {
        let state = FormState::default();
        let (changes, _) = watch::channel(snapshot_of(&rules, &state));
        Self {
            rules,
            transport,
            state: Mutex::new(state),
            changes,
            account_created: Mutex::new(None),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    pub fn set_username(&self, value: impl Into<String>) {
        self.lock_state().username = value.into();
        self.publish();
    }

    pub fn set_password(&self, value: impl Into<String>) {
        let value: String = value.into();
        self.lock_state().password = SecretString::new(value.into_boxed_str());
        self.publish();
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock_state().status
    }

    pub fn last_error(&self) -> Option<SignupError> {
        self.lock_state().last_error.clone()
    }

    /// Descriptions of the rules the current password does not meet.
    pub fn unmet_rules(&self) -> Vec<&'static str> {
        self.rules.evaluate(self.lock_state().password.expose_secret())
    }

    /// Returns `true` if [`submit`](Self::submit) would send a request.
    pub fn can_submit(&self) -> bool {
        block_reason(&self.rules, &self.lock_state()).is_none()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        snapshot_of(&self.rules, &self.lock_state())
    }

    /// Subscribes to form changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.changes.subscribe()
    }

    /// Registers the receiver of the account-created signal.
    ///
    /// The signal fires once, on the first 2xx response. Registering again
    /// replaces the previous receiver, which then observes a closed channel.
    /// Registering after the account was created yields a closed receiver.
    pub fn account_created(&self) -> oneshot::Receiver<AccountCreated> {
        let (tx, rx) = oneshot::channel();
        if self.status() != SubmissionStatus::Succeeded {
            *self
                .account_created
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(tx);
        }
        rx
    }

    /// Submits the form.
    ///
    /// Returns [`SubmitOutcome::Blocked`] without touching any state if the
    /// form cannot be submitted, including while another submission is in
    /// flight. Otherwise sends one request and leaves the form either
    /// `Succeeded` or back at `Idle` with `last_error` set.
    ///
    /// Dropping the returned future while the request is outstanding leaves
    /// the form in `Submitting`.
    pub async fn submit(&self) -> SubmitOutcome {
        let (username, password) = {
            let mut state = self.lock_state();
            if let Some(reason) = block_reason(&self.rules, &state) {
                #[cfg(feature = "tracing")]
                tracing::debug!("Signup submission blocked: {:?}", reason);
                return SubmitOutcome::Blocked(reason);
            }
            state.last_error = None;
            state.status = SubmissionStatus::Submitting;
            (
                state.username.clone(),
                SecretString::new(state.password.expose_secret().into()),
            )
        };
        self.publish();

        #[cfg(feature = "tracing")]
        tracing::info!("Signup submission started");

        let result = match self.transport.register(&username, &password).await {
            Ok(response) => {
                let classified = classify_response(response.status, &response.body);
                #[cfg(feature = "tracing")]
                {
                    if classified.is_err() {
                        tracing::warn!("Signup rejected with status {}", response.status);
                    }
                }
                classified
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Signup request failed: {}", err);
                Err(SignupError::from(err))
            }
        };

        let outcome = {
            let mut state = self.lock_state();
            match result {
                Ok(()) => {
                    state.status = SubmissionStatus::Succeeded;
                    state.last_error = None;
                    SubmitOutcome::Created
                }
                Err(err) => {
                    state.status = SubmissionStatus::Idle;
                    state.last_error = Some(err.clone());
                    SubmitOutcome::Failed(err)
                }
            }
        };
        self.publish();

        if outcome == SubmitOutcome::Created {
            #[cfg(feature = "tracing")]
            tracing::info!("Account created");

            let sender = self
                .account_created
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            if let Some(tx) = sender {
                // The owner may have dropped its receiver; the state still records success.
                let _ = tx.send(AccountCreated { username });
            }
        }

        outcome
    }

    fn lock_state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.changes.send_replace(snapshot);
    }
}

fn block_reason(rules: &RuleEngine, state: &FormState) -> Option<BlockReason> {
    match state.status {
        SubmissionStatus::Submitting => Some(BlockReason::InFlight),
        SubmissionStatus::Succeeded => Some(BlockReason::AlreadyCreated),
        SubmissionStatus::Idle if state.username.trim().is_empty() => {
            Some(BlockReason::MissingUsername)
        }
        SubmissionStatus::Idle if !rules.is_valid(state.password.expose_secret()) => {
            Some(BlockReason::InvalidPassword)
        }
        SubmissionStatus::Idle => None,
    }
}

fn snapshot_of(rules: &RuleEngine, state: &FormState) -> FormSnapshot {
    FormSnapshot {
        username: state.username.clone(),
        password: SecretString::new(state.password.expose_secret().into()),
        status: state.status,
        last_error: state.last_error.clone(),
        unmet_rules: rules.evaluate(state.password.expose_secret()),
        can_submit: block_reason(rules, state).is_none(),
    }
}
