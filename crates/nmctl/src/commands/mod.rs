//! Command dispatch: CLI args -> parameter set -> reconcile -> output.

pub mod apply;
pub mod config_cmd;
pub mod extclient;
pub mod network;

use tracing::debug;

use nmctl_core::{DesiredState, ModuleParams};

use crate::cli::{Command, GlobalOpts, StateArg};
use crate::config::ActiveProfile;
use crate::error::CliError;
use crate::output;

impl From<StateArg> for DesiredState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Present => Self::Present,
            StateArg::Absent => Self::Absent,
        }
    }
}

/// Dispatch a reconcile command.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let params = match cmd {
        Command::Network(args) => network::params(args),
        Command::Extclient(args) => extclient::params(args),
        Command::Apply(args) => apply::load(&args.file)?,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => return Ok(()),
    };
    execute(params, global).await
}

/// Fill connection settings, validate, reconcile once, and print the result.
async fn execute(mut params: ModuleParams, global: &GlobalOpts) -> Result<(), CliError> {
    let active = ActiveProfile::load(global)?;
    active.fill_connection(&mut params, global);
    debug!(profile = %active.name, ?params, "resolved parameters");

    let mut invocation = params.validate()?;
    active.tune_transport(&mut invocation, global);

    let result = invocation.execute().await?;

    let rendered =
        output::render_result(global.output, &result, output::should_color(global.color))?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
