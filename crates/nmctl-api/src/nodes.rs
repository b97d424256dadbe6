use crate::client::NetmakerClient;
use crate::error::Error;
use crate::models::Resource;

impl NetmakerClient {
    /// `GET /api/nodes/{networkId}`, in server order.
    pub async fn list_nodes(&self, network_id: &str) -> Result<Vec<Resource>, Error> {
        self.get(&format!("/nodes/{network_id}"))
            .await?
            .into_resources("node")
    }
}
