//! Configuration for the nmctl CLI.
//!
//! TOML profiles and credential resolution (env + keyring + plaintext).
//! The CLI layers its flag overrides on top of what is resolved here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Keyring service name all secrets are stored under.
pub const KEYRING_SERVICE: &str = "nmctl";

/// Environment variable consulted for the password before the keyring.
pub const PASSWORD_ENV: &str = "NMCTL_PASSWORD";

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' is not defined")]
    UnknownProfile { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile, returning an empty one for the implicit default.
    ///
    /// An explicitly requested profile that is not defined is an error.
    pub fn profile(&self, name: &str, explicit: bool) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if explicit => Err(ConfigError::UnknownProfile {
                profile: name.into(),
            }),
            None => Ok(Profile::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named Netmaker server profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API server base URL (e.g., "https://api.netmaker.example.com").
    pub base_url: Option<String>,

    /// Master key (plaintext, prefer keyring or env var).
    pub master_key: Option<String>,

    /// Environment variable name containing the master key.
    pub master_key_env: Option<String>,

    /// Username for password authentication.
    pub username: Option<String>,

    /// Password (plaintext, prefer keyring).
    pub password: Option<String>,

    /// Set to `false` to accept invalid TLS certificates.
    pub validate_certs: Option<bool>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

impl Profile {
    /// Parse and validate `base_url`, if set.
    pub fn parsed_base_url(&self) -> Result<Option<url::Url>, ConfigError> {
        self.base_url
            .as_deref()
            .map(|raw| {
                raw.parse().map_err(|_| ConfigError::Validation {
                    field: "base_url".into(),
                    reason: format!("invalid URL: {raw}"),
                })
            })
            .transpose()
    }

    /// Copy with plaintext secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| REDACTED.to_owned());
        Self {
            master_key: mask(&self.master_key),
            password: mask(&self.password),
            ..self.clone()
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "netmaker", "nmctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("nmctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` (missing file is fine), then `NMCTL_` env.
///
/// Nested keys use a double underscore:
/// `NMCTL_PROFILES__HOME__BASE_URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NMCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write it to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

// ── Credential resolution ───────────────────────────────────────────

/// Which secret a keyring entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SecretKind {
    MasterKey,
    Password,
}

fn keyring_entry(profile_name: &str, kind: SecretKind) -> Result<keyring::Entry, ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{kind}"))?;
    Ok(entry)
}

fn from_keyring(profile_name: &str, kind: SecretKind) -> Option<SecretString> {
    keyring_entry(profile_name, kind)
        .ok()?
        .get_password()
        .ok()
        .map(SecretString::from)
}

/// Store a secret for `profile_name` in the system keyring.
pub fn store_secret(profile_name: &str, kind: SecretKind, secret: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name, kind)?.set_password(secret)?;
    Ok(())
}

/// Resolve the master key: `master_key_env` → keyring → plaintext.
pub fn resolve_master_key(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's master_key_env → env var lookup
    if let Some(ref env_name) = profile.master_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Some(secret) = from_keyring(profile_name, SecretKind::MasterKey) {
        return Some(secret);
    }

    // 3. Plaintext in config
    profile.master_key.clone().map(SecretString::from)
}

/// Resolve the password: `NMCTL_PASSWORD` → keyring → plaintext.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(pw));
    }

    // 2. Keyring
    if let Some(secret) = from_keyring(profile_name, SecretKind::Password) {
        return Some(secret);
    }

    // 3. Plaintext in config
    profile.password.clone().map(SecretString::from)
}
