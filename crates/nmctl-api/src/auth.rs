// Username/password authentication
//
// The only call that runs without a bearer token. Netmaker answers with
// `{"Response": {"AuthToken": "..."}}`; the token becomes the bearer
// credential for every subsequent request.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::{NetmakerClient, Response};
use crate::error::Error;
use crate::models::AuthResponse;

impl NetmakerClient {
    /// Exchange username/password for an API token.
    ///
    /// `POST /api/users/adm/authenticate`
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, Error> {
        debug!(username, "authenticating");

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self
            .request(Method::POST, "/users/adm/authenticate", Some(&body))
            .await?;

        let Response::Json(value) = resp else {
            return Err(no_token());
        };

        let parsed: AuthResponse = serde_json::from_value(value).map_err(|_| no_token())?;
        let token = parsed
            .response
            .and_then(|r| r.auth_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(no_token)?;

        debug!("authentication successful");
        Ok(SecretString::from(token))
    }
}

fn no_token() -> Error {
    Error::Authentication {
        message: "No token in response".into(),
    }
}
