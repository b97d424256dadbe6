use reqwest::Method;
use serde::Serialize;

use crate::client::NetmakerClient;
use crate::error::Error;
use crate::models::Resource;

impl NetmakerClient {
    /// `GET /api/networks/{id}`; `None` if the network does not exist.
    pub async fn get_network(&self, network_id: &str) -> Result<Option<Resource>, Error> {
        self.get(&format!("/networks/{network_id}"))
            .await?
            .into_resource("network")
    }

    /// `POST /api/networks`
    pub async fn create_network<B>(&self, network: &B) -> Result<Option<Resource>, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.request(Method::POST, "/networks", Some(network))
            .await?
            .into_resource("network")
    }

    /// `PUT /api/networks/{id}`
    pub async fn update_network<B>(
        &self,
        network_id: &str,
        network: &B,
    ) -> Result<Option<Resource>, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.request(
            Method::PUT,
            &format!("/networks/{network_id}"),
            Some(network),
        )
        .await?
        .into_resource("network")
    }

    /// `DELETE /api/networks/{id}`. Deleting a missing network succeeds.
    pub async fn delete_network(&self, network_id: &str) -> Result<(), Error> {
        self.delete(&format!("/networks/{network_id}")).await?;
        Ok(())
    }
}
