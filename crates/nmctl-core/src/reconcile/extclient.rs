use tracing::{debug, info, warn};

use crate::compare::{extclients_equal, merge_update};
use crate::desired::{DesiredState, ExtClientSpec, GatewaySelection, ResourceType};
use crate::error::CoreError;
use crate::gateway::find_ingress_gateway;

use super::{Action, ReconcileResult, Reconciler, plan};

impl Reconciler<'_> {
    /// Converge external client `spec.clientid` in `network` toward `state`.
    ///
    /// Creation is scoped to `(network, gateway)`; update and delete to
    /// `(network, clientid)`. The gateway is only resolved when a client
    /// is actually created.
    pub async fn reconcile_extclient(
        &self,
        network: &str,
        gateway: &GatewaySelection,
        spec: &ExtClientSpec,
        state: DesiredState,
    ) -> Result<ReconcileResult, CoreError> {
        let name = spec.clientid.as_str();
        let desired = spec.to_fields();

        let existing = self.client.get_extclient(network, name).await?;
        let in_sync = existing
            .as_ref()
            .is_some_and(|current| extclients_equal(current, &desired));
        let action = plan(state, existing.is_some(), in_sync);
        debug!(network, client = name, %state, %action, "planned extclient reconciliation");

        if self.dry_run && action.is_change() {
            warn!(network, client = name, %action, "check mode, not applying");
            let result = ReconcileResult::new(ResourceType::Extclient, name, action, true, None);
            return Ok(result);
        }

        let resource = match (action, existing) {
            (Action::Keep, current) => current,
            (Action::Update, Some(current)) => {
                let payload = merge_update(&current, &desired);
                self.client.update_extclient(network, name, &payload).await?
            }
            (Action::Create, _) => {
                let gateway_id = match gateway {
                    GatewaySelection::Auto => find_ingress_gateway(self.client, network).await?,
                    GatewaySelection::Node(id) => id.clone(),
                };
                self.client
                    .create_extclient(network, &gateway_id, &desired)
                    .await?
            }
            (Action::Delete, _) => {
                self.client.delete_extclient(network, name).await?;
                None
            }
            // plan() only yields Update for an existing client.
            (Action::Update | Action::Absent, _) => None,
        };

        if action.is_change() {
            info!(network, client = name, %action, "external client reconciled");
        }

        Ok(ReconcileResult::new(
            ResourceType::Extclient,
            name,
            action,
            self.dry_run,
            resource,
        ))
    }
}
