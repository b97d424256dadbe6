// ── Reconcilers ──
//
// read → compare → create/update/delete → report. Each call issues its
// round-trips strictly in sequence and at most one mutating request; in
// dry-run mode the mutating request is skipped but the reported outcome is
// the same.

mod extclient;
mod network;

use serde::Serialize;
use strum::Display;

use nmctl_api::{NetmakerClient, Resource};

use crate::desired::{DesiredState, ResourceType};
use crate::error::CoreError;
use crate::params::Target;

/// What a reconciler decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    /// Present and already in the desired configuration.
    Keep,
    Update,
    Create,
    Delete,
    /// Absent and already gone.
    Absent,
}

impl Action {
    /// Whether carrying out this action mutates the remote system.
    pub fn is_change(self) -> bool {
        matches!(self, Self::Update | Self::Create | Self::Delete)
    }
}

/// The four-cell decision table shared by both reconcilers.
///
/// `in_sync` is ignored unless the resource exists.
pub fn plan(state: DesiredState, exists: bool, in_sync: bool) -> Action {
    match (state, exists) {
        (DesiredState::Present, true) if in_sync => Action::Keep,
        (DesiredState::Present, true) => Action::Update,
        (DesiredState::Present, false) => Action::Create,
        (DesiredState::Absent, true) => Action::Delete,
        (DesiredState::Absent, false) => Action::Absent,
    }
}

/// Outcome of one reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileResult {
    /// Whether the remote state was (or, in dry-run, would be) changed.
    pub changed: bool,
    /// The resource after reconciliation; absent after deletion or dry-run
    /// changes.
    ///
    /// Also absent when a real create or update is answered with 404 or an
    /// empty body.
    pub resource: Option<Resource>,
    pub msg: String,
}

impl ReconcileResult {
    pub(crate) fn new(
        resource_type: ResourceType,
        name: &str,
        action: Action,
        dry_run: bool,
        resource: Option<Resource>,
    ) -> Self {
        Self {
            changed: action.is_change(),
            resource,
            msg: message(resource_type, name, action, dry_run),
        }
    }
}

fn message(resource_type: ResourceType, name: &str, action: Action, dry_run: bool) -> String {
    let label = resource_type.label();
    let outcome = match action {
        Action::Keep => "already exists with desired configuration",
        Action::Absent => "does not exist",
        Action::Update => "updated",
        Action::Create => "created",
        Action::Delete => "deleted",
    };
    if dry_run && action.is_change() {
        format!("{label} '{name}' would be {outcome} (check mode)")
    } else {
        format!("{label} '{name}' {outcome}")
    }
}

/// Drives the network and external-client reconcilers against one client.
pub struct Reconciler<'a> {
    client: &'a NetmakerClient,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a NetmakerClient, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Dispatch to the reconciler for `target`.
    pub async fn reconcile(
        &self,
        target: &Target,
        state: DesiredState,
    ) -> Result<ReconcileResult, CoreError> {
        match target {
            Target::Network(spec) => self.reconcile_network(spec, state).await,
            Target::ExtClient {
                network,
                gateway,
                spec,
            } => {
                self.reconcile_extclient(network, gateway, spec, state)
                    .await
            }
        }
    }
}
