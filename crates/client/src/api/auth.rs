//! Authentication flows
//!
//! Credential checking, the login -> optional second factor -> token
//! retrieval sequence, and token validation. These carry their own failure
//! policy: an auth rejection during login is a verdict on the credentials,
//! while not-found and connection failures are unexpected and re-raised.

use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use faraday_domain::{FaradayError, LoginOutcome, Result};

use crate::transport::{Invocation, Resource, TransportError};

use super::client::FaradayClient;

impl FaradayClient {
    /// Check credentials against the login endpoint.
    ///
    /// Stores nothing on the session; use [`FaradayClient::get_token`] to
    /// establish a token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, user: &str, password: &str) -> Result<LoginOutcome> {
        let body = json!({ "email": user, "password": password });
        match self
            .transport
            .invoke(Invocation::new(Resource::Login, "auth").body(body))
            .await
        {
            Ok(response) if response.status == 202 => Ok(LoginOutcome::SecondFactorRequired),
            Ok(_) => Ok(LoginOutcome::Authenticated),
            Err(TransportError::Auth { .. }) => Ok(LoginOutcome::Rejected),
            Err(err) => Err(Self::translate(err)),
        }
    }

    /// Obtain an API token, driving the login -> optional second factor ->
    /// token retrieval sequence and storing the result on the session.
    ///
    /// Idempotent: when a token is already held it is returned immediately,
    /// without contacting the server.
    #[instrument(skip(self, password, second_factor))]
    pub async fn get_token(
        &mut self,
        user: &str,
        password: &str,
        second_factor: Option<&str>,
    ) -> Result<String> {
        if let Some(token) = &self.session.token {
            debug!("token already present, skipping login");
            return Ok(token.clone());
        }

        let login_body = json!({ "email": user, "password": password });
        match self
            .transport
            .invoke(Invocation::new(Resource::Login, "auth").body(login_body))
            .await
        {
            Ok(_) => {}
            Err(TransportError::Auth { .. }) => {
                return Err(FaradayError::InvalidCredentials(
                    "login rejected by the server".to_string(),
                ))
            }
            Err(err) => return Err(Self::translate(err)),
        }

        if let Some(secret) = second_factor {
            let second_factor_body = json!({ "secret": secret });
            match self
                .transport
                .invoke(Invocation::new(Resource::Login, "second_factor").body(second_factor_body))
                .await
            {
                Ok(_) => {}
                Err(TransportError::Auth { .. }) => {
                    return Err(FaradayError::InvalidSecondFactor(
                        "second factor rejected by the server".to_string(),
                    ))
                }
                Err(err) => return Err(Self::translate(err)),
            }
        }

        let response = match self
            .transport
            .invoke(Invocation::new(Resource::Login, "get_token"))
            .await
        {
            Ok(response) => response,
            Err(TransportError::Auth { .. }) => {
                return Err(FaradayError::InvalidCredentials(
                    "token request rejected by the server".to_string(),
                ))
            }
            Err(err) => return Err(Self::translate(err)),
        };

        let token = token_from_body(response.body);
        info!("API token obtained");
        self.session.token = Some(token.clone());
        Ok(token)
    }

    /// Ask the server whether the configured token is still accepted.
    ///
    /// A connection failure surfaces as the regular connection error of the
    /// taxonomy, like every other operation.
    pub async fn is_token_valid(&self) -> Result<bool> {
        self.ensure_token()?;
        match self
            .transport
            .invoke(Invocation::new(Resource::Login, "validate"))
            .await
        {
            Ok(_) => Ok(true),
            Err(TransportError::Auth { .. }) => Ok(false),
            Err(err) => Err(Self::translate(err)),
        }
    }
}

/// The token endpoint answers with a JSON string; any other shape falls
/// back to its compact rendering.
fn token_from_body(body: Value) -> String {
    match body {
        Value::String(token) => token,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_from_body_unwraps_json_strings() {
        assert_eq!(token_from_body(json!("sekret")), "sekret");
        assert_eq!(token_from_body(json!({"token": "x"})), "{\"token\":\"x\"}");
    }
}
