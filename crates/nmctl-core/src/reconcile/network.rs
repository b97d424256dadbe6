use tracing::{debug, info, warn};

use crate::compare::{merge_update, networks_equal};
use crate::desired::{DesiredState, NetworkSpec, ResourceType};
use crate::error::CoreError;

use super::{Action, ReconcileResult, Reconciler, plan};

impl Reconciler<'_> {
    /// Converge network `spec.netid` toward `state`.
    pub async fn reconcile_network(
        &self,
        spec: &NetworkSpec,
        state: DesiredState,
    ) -> Result<ReconcileResult, CoreError> {
        let name = spec.netid.as_str();
        let desired = spec.to_fields();

        let existing = self.client.get_network(name).await?;
        let in_sync = existing
            .as_ref()
            .is_some_and(|current| networks_equal(current, &desired));
        let action = plan(state, existing.is_some(), in_sync);
        debug!(network = name, %state, %action, "planned network reconciliation");

        if self.dry_run && action.is_change() {
            warn!(network = name, %action, "check mode, not applying");
            let result = ReconcileResult::new(ResourceType::Network, name, action, true, None);
            return Ok(result);
        }

        let resource = match (action, existing) {
            (Action::Keep, current) => current,
            (Action::Update, Some(current)) => {
                let payload = merge_update(&current, &desired);
                self.client.update_network(name, &payload).await?
            }
            (Action::Create, _) => self.client.create_network(&desired).await?,
            (Action::Delete, _) => {
                self.client.delete_network(name).await?;
                None
            }
            // plan() only yields Update for an existing network.
            (Action::Update | Action::Absent, _) => None,
        };

        if action.is_change() {
            info!(network = name, %action, "network reconciled");
        }

        Ok(ReconcileResult::new(
            ResourceType::Network,
            name,
            action,
            self.dry_run,
            resource,
        ))
    }
}
