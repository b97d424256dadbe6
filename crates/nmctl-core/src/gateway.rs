// ── Ingress gateway discovery ──
//
// Used only when an external client is created with
// `ingress_gateway_id: auto`. The first flagged node in server order wins;
// no extra ordering is applied, so the choice is only as stable as the
// server's node listing.

use serde_json::Value;
use tracing::debug;

use nmctl_api::{NetmakerClient, Resource};

use crate::compare::is_truthy;
use crate::error::CoreError;

/// Node fields Netmaker has used for the ingress-gateway flag.
const GATEWAY_FLAGS: [&str; 2] = ["isingressgateway", "is_gw"];

/// List the network's nodes and return the first ingress gateway's ID.
pub async fn find_ingress_gateway(
    client: &NetmakerClient,
    network: &str,
) -> Result<String, CoreError> {
    let nodes = client.list_nodes(network).await?;
    debug!(network, count = nodes.len(), "scanning nodes for ingress gateway");
    first_ingress_gateway(&nodes, network)
}

/// Pick the first node flagged as ingress gateway.
pub fn first_ingress_gateway(nodes: &[Resource], network: &str) -> Result<String, CoreError> {
    if nodes.is_empty() {
        return Err(CoreError::NoNodes {
            network: network.to_owned(),
        });
    }

    let gateway = nodes
        .iter()
        .find(|node| GATEWAY_FLAGS.iter().any(|flag| is_truthy(node.get(*flag))))
        .ok_or_else(|| CoreError::NoIngressGateway {
            network: network.to_owned(),
        })?;

    match gateway.get("id").and_then(Value::as_str) {
        Some(id) => {
            debug!(network, gateway = id, "selected ingress gateway");
            Ok(id.to_owned())
        }
        None => Err(CoreError::UnexpectedResponse {
            message: format!("ingress gateway node in network '{network}' has no id"),
        }),
    }
}
