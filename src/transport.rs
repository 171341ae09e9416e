//! Transport to the remote signup endpoint.
//!
//! [`SignupTransport`] is the seam the controller talks to. The default
//! implementation, [`HttpSignupClient`], posts JSON with `reqwest`.

use std::future::Future;

use secrecy::SecretString;

use crate::error::TransportError;

/// Raw HTTP outcome of a signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupResponse {
    pub status: u16,
    /// Response body. Left empty for 2xx responses, which are never read.
    pub body: String,
}

impl SignupResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends credentials to the signup endpoint.
///
/// Implementations return `Err` only when no HTTP response was obtained.
/// Every status code, including 4xx and 5xx, is an `Ok` response.
pub trait SignupTransport {
    fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<SignupResponse, TransportError>> + Send;
}

#[cfg(feature = "http")]
pub use http::HttpSignupClient;

#[cfg(feature = "http")]
mod http {
    use reqwest::Client;
    use reqwest::header::{CONTENT_TYPE, HeaderValue};
    use secrecy::{ExposeSecret, SecretString};
    use serde::Serialize;

    #[cfg(feature = "tracing")]
    use tracing::Instrument;

    use super::{SignupResponse, SignupTransport};
    use crate::config::SignupConfig;
    use crate::error::{ConfigError, TransportError};

    const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    #[derive(Serialize)]
    struct SignupBody<'a> {
        username: &'a str,
        password: &'a str,
    }

    /// `reqwest` client bound to one signup endpoint and credential.
    #[derive(Debug)]
    pub struct HttpSignupClient {
        client: Client,
        url: String,
        credential: SecretString,
    }

    impl HttpSignupClient {
        /// Builds a client from `config`. The config's timeout applies to the
        /// whole request, body included.
        ///
        /// # Errors
        ///
        /// Returns [`ConfigError::Client`] if the HTTP client cannot be built.
        pub fn new(config: SignupConfig) -> Result<Self, ConfigError> {
            let client = Client::builder()
                .user_agent(USER_AGENT)
                .timeout(config.timeout())
                .build()
                .map_err(|err| ConfigError::Client(err.to_string()))?;

            Ok(Self {
                client,
                url: config.signup_url(),
                credential: SecretString::new(config.credential().expose_secret().into()),
            })
        }

        pub fn url(&self) -> &str {
            &self.url
        }
    }

    impl SignupTransport for HttpSignupClient {
        async fn register(
            &self,
            username: &str,
            password: &SecretString,
        ) -> Result<SignupResponse, TransportError> {
            let body = SignupBody {
                username,
                password: password.expose_secret(),
            };

            let send = self
                .client
                .post(&self.url)
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .bearer_auth(self.credential.expose_secret())
                .json(&body)
                .send();

            #[cfg(feature = "tracing")]
            let send = send.instrument(tracing::info_span!(
                "signup.register",
                http.method = "POST",
                url = %self.url
            ));

            let response = send.await.map_err(map_request_error)?;
            let status = response.status();

            if status.is_success() {
                return Ok(SignupResponse::new(status.as_u16(), String::new()));
            }

            let body = response
                .text()
                .await
                .map_err(|err| match map_request_error(err) {
                    TransportError::Network(message) => TransportError::MalformedResponse(message),
                    other => other,
                })?;

            Ok(SignupResponse::new(status.as_u16(), body))
        }
    }

    /// Maps `reqwest` failures into transport errors with timeout detection.
    fn map_request_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Request(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }

}
