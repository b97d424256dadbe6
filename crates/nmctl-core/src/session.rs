// ── Session setup ──
//
// Turns validated connection settings into an authenticated client.
// Password credentials cost one extra round-trip before the first read.

use secrecy::SecretString;
use tracing::debug;

use nmctl_api::NetmakerClient;

use crate::error::CoreError;
use crate::params::{Connection, Credentials};

/// Build a bearer-authenticated client for `connection`.
pub async fn connect(connection: &Connection) -> Result<NetmakerClient, CoreError> {
    let token = obtain_token(connection).await?;
    let client = NetmakerClient::with_token(&connection.base_url, &token, &connection.transport)?;
    Ok(client)
}

async fn obtain_token(connection: &Connection) -> Result<SecretString, CoreError> {
    match &connection.credentials {
        Credentials::MasterKey(key) => {
            debug!(base_url = %connection.base_url, "using master key");
            Ok(key.clone())
        }
        Credentials::Password { username, password } => {
            let anon =
                NetmakerClient::unauthenticated(&connection.base_url, &connection.transport)?;
            let token = anon.authenticate(username, password).await?;
            debug!(base_url = %connection.base_url, username, "authenticated");
            Ok(token)
        }
    }
}
