//! CLI configuration: thin wrapper around `nmctl_config`.
//!
//! Fills the connection half of a parameter set from flags, then the
//! parameter file (if any), then the active profile.

use std::io::IsTerminal;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use nmctl_core::params::DEFAULT_USERNAME;
use nmctl_core::{Invocation, ModuleParams, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use nmctl_config::{Config, Profile, config_path};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The loaded config plus the profile selected for this run.
pub struct ActiveProfile {
    pub config: Config,
    pub name: String,
    pub profile: Profile,
}

impl ActiveProfile {
    pub fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let config = nmctl_config::load_config()?;
        let name = active_profile_name(global, &config);
        let profile = match config.profile(&name, global.profile.is_some()) {
            Ok(profile) => profile,
            Err(nmctl_config::ConfigError::UnknownProfile { profile }) => {
                let mut available: Vec<_> = config.profiles.keys().cloned().collect();
                available.sort();
                return Err(CliError::ProfileNotFound {
                    name: profile,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                    path: config_path().display().to_string(),
                });
            }
            Err(other) => return Err(other.into()),
        };
        profile.parsed_base_url()?;
        Ok(Self {
            config,
            name,
            profile,
        })
    }

    /// Fill unset connection parameters. Flags win over values already in
    /// `params`, which win over the profile.
    ///
    /// The credential kind comes from the highest layer that sets any
    /// credential. A lower layer's master key never replaces a password
    /// (or username) given above it.
    pub fn fill_connection(&self, params: &mut ModuleParams, global: &GlobalOpts) {
        let profile = &self.profile;
        let auth = self.auth_kind(params, global);

        params.base_url = first(global.base_url.as_deref(), params.base_url.as_deref())
            .or_else(|| profile.base_url.clone());
        params.username = first(global.username.as_deref(), params.username.as_deref())
            .or_else(|| profile.username.clone());

        match auth {
            AuthKind::MasterKey(key) => {
                params.master_key = Some(key);
                params.password = None;
            }
            AuthKind::Password => {
                params.master_key = None;
                let username = login_name(params).to_owned();
                params.password = first(global.password.as_deref(), params.password.as_deref())
                    .or_else(|| nmctl_config::resolve_password(profile, &self.name).map(expose))
                    .or_else(|| prompt_password(&username));
            }
        }

        if global.insecure {
            params.validate_certs = Some(false);
        } else if params.validate_certs.is_none() {
            params.validate_certs = profile.validate_certs;
        }

        params.check_mode |= global.check;
    }

    fn auth_kind(&self, params: &ModuleParams, global: &GlobalOpts) -> AuthKind {
        let flags = layer_auth(
            global.master_key.as_deref(),
            global.password.as_deref(),
            global.username.as_deref(),
        );
        let file = layer_auth(
            params.master_key.as_deref(),
            params.password.as_deref(),
            params.username.as_deref(),
        );
        if let Some(auth) = flags.or(file) {
            return auth;
        }
        match nmctl_config::resolve_master_key(&self.profile, &self.name) {
            Some(key) => AuthKind::MasterKey(expose(key)),
            None => AuthKind::Password,
        }
    }

    /// Apply transport settings that have no parameter equivalent.
    pub fn tune_transport(&self, invocation: &mut Invocation, global: &GlobalOpts) {
        let transport = &mut invocation.connection.transport;

        let secs = global
            .timeout
            .or(self.profile.timeout)
            .unwrap_or(self.config.defaults.timeout);
        transport.timeout = Duration::from_secs(secs);

        if transport.tls == TlsMode::System {
            if let Some(ref ca) = self.profile.ca_cert {
                transport.tls = TlsMode::CustomCa(ca.clone());
            }
        }
    }
}

/// How this run authenticates.
#[derive(Debug, PartialEq, Eq)]
enum AuthKind {
    MasterKey(String),
    Password,
}

/// The credential kind one layer asks for, if it sets any credential.
/// Within a layer the master key wins.
fn layer_auth(
    master_key: Option<&str>,
    password: Option<&str>,
    username: Option<&str>,
) -> Option<AuthKind> {
    if let Some(key) = first(master_key, None) {
        return Some(AuthKind::MasterKey(key));
    }
    if first(password, username).is_some() {
        return Some(AuthKind::Password);
    }
    None
}

fn first(flag: Option<&str>, current: Option<&str>) -> Option<String> {
    flag.filter(|v| !v.is_empty())
        .or_else(|| current.filter(|v| !v.is_empty()))
        .map(str::to_owned)
}

fn expose(secret: SecretString) -> String {
    secret.expose_secret().to_owned()
}

/// Ask for the password when stdin is a terminal.
fn prompt_password(username: &str) -> Option<String> {
    if !std::io::stdin().is_terminal() {
        return None;
    }
    rpassword::prompt_password(format!("Password for {username}: "))
        .ok()
        .filter(|pw| !pw.is_empty())
}

/// The account a password belongs to, defaulting like `validate()` does.
fn login_name(params: &ModuleParams) -> &str {
    params
        .username
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_USERNAME)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use nmctl_core::Credentials;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["nmctl"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["network", "net1"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn active(profile: Profile) -> ActiveProfile {
        ActiveProfile {
            config: Config::default(),
            name: "nmctl-test-no-such-profile".into(),
            profile,
        }
    }

    #[test]
    fn flags_override_file_and_profile() {
        let active = active(Profile {
            base_url: Some("https://profile.example.com".into()),
            master_key: Some("profile-key".into()),
            validate_certs: Some(true),
            ..Profile::default()
        });
        let mut params = ModuleParams {
            base_url: Some("https://file.example.com".into()),
            ..ModuleParams::default()
        };
        let global = global(&[
            "--base-url",
            "https://flag.example.com",
            "--insecure",
            "--check",
        ]);

        active.fill_connection(&mut params, &global);

        assert_eq!(params.base_url.as_deref(), Some("https://flag.example.com"));
        assert_eq!(params.validate_certs, Some(false));
        assert!(params.check_mode);
    }

    #[test]
    fn profile_fills_gaps() {
        let active = active(Profile {
            base_url: Some("https://profile.example.com".into()),
            master_key: Some("profile-key".into()),
            validate_certs: Some(false),
            ..Profile::default()
        });
        let mut params = ModuleParams::default();
        active.fill_connection(&mut params, &global(&[]));

        assert_eq!(params.base_url.as_deref(), Some("https://profile.example.com"));
        assert_eq!(params.master_key.as_deref(), Some("profile-key"));
        assert_eq!(params.validate_certs, Some(false));
        assert!(params.password.is_none());
        assert!(!params.check_mode);
    }

    fn network(params: ModuleParams) -> ModuleParams {
        ModuleParams {
            resource_type: Some(nmctl_core::ResourceType::Network),
            name: Some("net1".into()),
            ..params
        }
    }

    fn profile_with_master_key() -> ActiveProfile {
        active(Profile {
            base_url: Some("https://nm.example.com".into()),
            master_key: Some("profile-key".into()),
            password: Some("profile-password".into()),
            ..Profile::default()
        })
    }

    #[test]
    fn file_password_beats_profile_master_key() {
        let active = profile_with_master_key();
        let mut params = network(ModuleParams {
            password: Some("file-password".into()),
            ..ModuleParams::default()
        });
        active.fill_connection(&mut params, &global(&[]));

        assert!(params.master_key.is_none());
        let invocation = params.validate().unwrap();
        let Credentials::Password { username, password } = invocation.connection.credentials else {
            panic!("expected password credentials");
        };
        assert_eq!(username, DEFAULT_USERNAME);
        assert_eq!(password.expose_secret(), "file-password");
    }

    #[test]
    fn password_flag_beats_file_master_key() {
        let active = active(Profile::default());
        let mut params = network(ModuleParams {
            base_url: Some("https://nm.example.com".into()),
            master_key: Some("file-key".into()),
            ..ModuleParams::default()
        });
        let global = global(&["--username", "admin", "--password", "flag-password"]);
        active.fill_connection(&mut params, &global);

        let invocation = params.validate().unwrap();
        let Credentials::Password { username, password } = invocation.connection.credentials else {
            panic!("expected password credentials");
        };
        assert_eq!(username, "admin");
        assert_eq!(password.expose_secret(), "flag-password");
    }

    #[test]
    fn username_flag_selects_profile_password() {
        let active = profile_with_master_key();
        let mut params = network(ModuleParams::default());
        active.fill_connection(&mut params, &global(&["--username", "admin"]));

        assert!(params.master_key.is_none());
        assert_eq!(params.username.as_deref(), Some("admin"));
        assert_eq!(params.password.as_deref(), Some("profile-password"));
    }

    #[test]
    fn master_key_flag_beats_file_password() {
        let active = active(Profile::default());
        let mut params = network(ModuleParams {
            password: Some("file-password".into()),
            ..ModuleParams::default()
        });
        active.fill_connection(&mut params, &global(&["--master-key", "flag-key"]));

        assert_eq!(params.master_key.as_deref(), Some("flag-key"));
        assert!(params.password.is_none());
    }

    #[test]
    fn layer_auth_picks_the_kind_a_layer_sets() {
        assert_eq!(
            layer_auth(Some("k"), Some("pw"), None),
            Some(AuthKind::MasterKey("k".into()))
        );
        assert_eq!(
            layer_auth(Some(""), Some("pw"), None),
            Some(AuthKind::Password)
        );
        assert_eq!(
            layer_auth(None, None, Some("admin")),
            Some(AuthKind::Password)
        );
        assert_eq!(layer_auth(None, Some(""), None), None);
    }

    #[test]
    fn login_name_defaults_for_the_prompt() {
        assert_eq!(login_name(&ModuleParams::default()), DEFAULT_USERNAME);
        let params = ModuleParams {
            username: Some("admin".into()),
            ..ModuleParams::default()
        };
        assert_eq!(login_name(&params), "admin");
    }

    #[test]
    fn timeout_and_ca_cert_tune_transport() {
        let active = active(Profile {
            base_url: Some("https://nm.example.com".into()),
            master_key: Some("k".into()),
            ca_cert: Some("/etc/ssl/nm.pem".into()),
            timeout: Some(5),
            ..Profile::default()
        });
        let mut params = ModuleParams {
            resource_type: Some(nmctl_core::ResourceType::Network),
            name: Some("net1".into()),
            ..ModuleParams::default()
        };
        let global = global(&["--timeout", "12"]);
        active.fill_connection(&mut params, &global);
        let mut invocation = params.validate().unwrap();
        active.tune_transport(&mut invocation, &global);

        let transport = &invocation.connection.transport;
        assert_eq!(transport.timeout, Duration::from_secs(12));
        assert_eq!(transport.tls, TlsMode::CustomCa("/etc/ssl/nm.pem".into()));
    }
}
