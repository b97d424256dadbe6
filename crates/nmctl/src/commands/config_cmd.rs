//! Config subcommand handlers.

use nmctl_config::{Config, SecretKind};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, SecretArg};
use crate::config::{self, ActiveProfile};
use crate::error::CliError;
use crate::output;

impl From<SecretArg> for SecretKind {
    fn from(arg: SecretArg) -> Self {
        match arg {
            SecretArg::MasterKey => Self::MasterKey,
            SecretArg::Password => Self::Password,
        }
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Show => {
            let cfg = nmctl_config::load_config()?;
            output::print_output(&format_config_redacted(&cfg)?, global.quiet);
            Ok(())
        }
        ConfigCommand::SetSecret { kind } => set_secret(kind.into(), global),
    }
}

/// Serialize config as TOML with plaintext secrets masked.
fn format_config_redacted(cfg: &Config) -> Result<String, CliError> {
    let mut shown = cfg.clone();
    for profile in shown.profiles.values_mut() {
        *profile = profile.redacted();
    }
    Ok(toml::to_string_pretty(&shown)?)
}

fn set_secret(kind: SecretKind, global: &GlobalOpts) -> Result<(), CliError> {
    let active = ActiveProfile::load(global)?;
    let label = match kind {
        SecretKind::MasterKey => "Master key",
        SecretKind::Password => "Password",
    };

    let secret = rpassword::prompt_password(format!("{label} for profile '{}': ", active.name))
        .map_err(|e| CliError::Validation {
            field: "interactive".into(),
            reason: format!("prompt failed: {e}"),
        })?;
    if secret.is_empty() {
        return Err(CliError::Validation {
            field: kind.to_string(),
            reason: "secret cannot be empty".into(),
        });
    }

    nmctl_config::store_secret(&active.name, kind, &secret)?;
    output::print_output(
        &format!("Stored {kind} for profile '{}' in the system keyring", active.name),
        global.quiet,
    );
    Ok(())
}
