//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help
//! text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use nmctl_config::ConfigError;
use nmctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(nmctl::connection_failed),
        help(
            "Check that the Netmaker API is reachable at {url}.\n\
             For self-signed certificates use --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed { url: String, message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(nmctl::auth_failed),
        help(
            "Verify the master key or username/password.\n\
             Store a secret with: nmctl config set-secret master-key --profile <name>"
        )
    )]
    AuthFailed { message: String },

    // ── Gateway resolution ───────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(nmctl::no_ingress_gateway),
        help(
            "Promote a node in network '{network}' to ingress gateway,\n\
             or pass an explicit node with --ingress-gateway-id."
        )
    )]
    GatewayNotFound { network: String, message: String },

    // ── Parameters ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(nmctl::invalid_parameters),
        help("Run with --help to see the accepted flags.")
    )]
    InvalidParameters { message: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nmctl::validation))]
    Validation { field: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(nmctl::api_error))]
    Api { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(nmctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Config file: {path}"
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(code(nmctl::config))]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter file: {0}")]
    #[diagnostic(code(nmctl::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter file: {0}")]
    #[diagnostic(code(nmctl::yaml), help("Check the YAML file contents and try again."))]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to render output: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::GatewayNotFound { .. } => exit_code::NOT_FOUND,
            Self::InvalidParameters { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::Json(_)
            | Self::Yaml(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        // Keep the full message, including the resource tag.
        let message = err.to_string();
        match err.root() {
            CoreError::ConnectionFailed { url, .. } => Self::ConnectionFailed {
                url: url.clone(),
                message,
            },
            CoreError::AuthenticationFailed { .. } => Self::AuthFailed { message },
            CoreError::NoNodes { network } | CoreError::NoIngressGateway { network } => {
                Self::GatewayNotFound {
                    network: network.clone(),
                    message,
                }
            }
            CoreError::ValidationFailed { .. } => Self::InvalidParameters { message },
            CoreError::Api { .. }
            | CoreError::UnexpectedResponse { .. }
            | CoreError::Managing { .. } => Self::Api { message },
        }
    }
}
