// External client (WireGuard device) endpoints
//
// Netmaker has no get-by-id route for external clients, so lookups list
// the whole network and scan for the client ID.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::client::NetmakerClient;
use crate::error::Error;
use crate::models::Resource;

impl NetmakerClient {
    /// `GET /api/extclients/{networkId}`
    pub async fn list_extclients(&self, network_id: &str) -> Result<Vec<Resource>, Error> {
        self.get(&format!("/extclients/{network_id}"))
            .await?
            .into_resources("external client")
    }

    /// Find an external client by `clientid` within a network.
    pub async fn get_extclient(
        &self,
        network_id: &str,
        client_id: &str,
    ) -> Result<Option<Resource>, Error> {
        let clients = self.list_extclients(network_id).await?;
        Ok(clients
            .into_iter()
            .find(|c| c.get("clientid").and_then(Value::as_str) == Some(client_id)))
    }

    /// `POST /api/extclients/{networkId}/{gatewayId}`
    pub async fn create_extclient<B>(
        &self,
        network_id: &str,
        gateway_id: &str,
        client: &B,
    ) -> Result<Option<Resource>, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.request(
            Method::POST,
            &format!("/extclients/{network_id}/{gateway_id}"),
            Some(client),
        )
        .await?
        .into_resource("external client")
    }

    /// `PUT /api/extclients/{networkId}/{clientId}`
    pub async fn update_extclient<B>(
        &self,
        network_id: &str,
        client_id: &str,
        client: &B,
    ) -> Result<Option<Resource>, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.request(
            Method::PUT,
            &format!("/extclients/{network_id}/{client_id}"),
            Some(client),
        )
        .await?
        .into_resource("external client")
    }

    /// `DELETE /api/extclients/{networkId}/{clientId}`
    pub async fn delete_extclient(&self, network_id: &str, client_id: &str) -> Result<(), Error> {
        self.delete(&format!("/extclients/{network_id}/{client_id}"))
            .await?;
        Ok(())
    }
}
