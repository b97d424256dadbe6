//! Reconciliation logic between `nmctl-api` and the `nmctl` CLI.
//!
//! Each invocation converges exactly one Netmaker resource, a network or an
//! external (WireGuard) client, toward a desired state:
//!
//! - **[`ModuleParams`]**: the flat parameter set. [`validate()`](ModuleParams::validate)
//!   checks preconditions without touching the network and yields an
//!   [`Invocation`].
//!
//! - **[`session::connect`]**: obtains a bearer token, either the master key
//!   directly or via username/password authentication.
//!
//! - **[`Reconciler`]**: read, compare, then create/update/delete. The
//!   decision table is [`plan`]; field comparison lives in [`compare`].
//!   In dry-run mode no mutating request is sent.
//!
//! - **[`gateway`]**: ingress gateway discovery for `ingress_gateway_id: auto`.

pub mod compare;
pub mod desired;
pub mod error;
pub mod gateway;
pub mod params;
pub mod reconcile;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use desired::{DesiredState, ExtClientSpec, GatewaySelection, NetworkSpec, ResourceType};
pub use error::CoreError;
pub use nmctl_api::{TlsMode, TransportConfig};
pub use params::{Connection, Credentials, Invocation, ModuleParams, Target};
pub use reconcile::{Action, ReconcileResult, Reconciler, plan};

impl Invocation {
    /// Connect, then reconcile the target once.
    ///
    /// Every error is tagged with the resource type and name.
    pub async fn execute(&self) -> Result<ReconcileResult, CoreError> {
        let resource_type = self.target.resource_type();
        let name = self.target.name();

        let client = session::connect(&self.connection)
            .await
            .map_err(|e| e.managing(resource_type, name))?;

        Reconciler::new(&client, self.check_mode)
            .reconcile(&self.target, self.state)
            .await
            .map_err(|e| e.managing(resource_type, name))
    }
}

/// Validate `params` and execute the resulting invocation.
pub async fn run(params: ModuleParams) -> Result<ReconcileResult, CoreError> {
    params.validate()?.execute().await
}
