//! Clap derive structures for the `nmctl` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nmctl -- declarative reconciler for Netmaker networks and external clients
#[derive(Debug, Parser)]
#[command(
    name = "nmctl",
    version,
    about = "Reconcile Netmaker networks and WireGuard external clients",
    long_about = "Converge one Netmaker resource toward a desired state per invocation.\n\n\
        Each run reads the resource, compares the requested fields, and creates,\n\
        updates, or deletes it only when needed. Use --check to see what would change.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "NMCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API server base URL (overrides profile)
    #[arg(long, short = 'b', env = "NMCTL_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Master key, used directly as the bearer token
    #[arg(long, env = "NMCTL_MASTER_KEY", global = true, hide_env_values = true)]
    pub master_key: Option<String>,

    /// Username for password authentication
    #[arg(long, short = 'u', env = "NMCTL_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for password authentication
    #[arg(long, env = "NMCTL_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Accept invalid TLS certificates (validate_certs = false)
    #[arg(long, short = 'k', env = "NMCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "NMCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Report what would change without changing anything
    #[arg(long, alias = "dry-run", global = true)]
    pub check: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NMCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Status line plus resource table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Result message only (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Desired state of the resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    /// Create or update the resource
    #[default]
    Present,
    /// Delete the resource if it exists
    Absent,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile a network
    #[command(alias = "net", alias = "n")]
    Network(NetworkArgs),

    /// Reconcile an external (WireGuard) client
    #[command(alias = "ext", alias = "client")]
    Extclient(ExtclientArgs),

    /// Reconcile the resource described by a JSON or YAML parameter file
    Apply(ApplyArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NETWORK
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Unset flags leave the corresponding remote field alone.
#[derive(Debug, Args)]
pub struct NetworkArgs {
    /// Network ID (netid)
    pub name: String,

    /// Desired state
    #[arg(long, short = 's', value_enum, default_value_t = StateArg::Present)]
    pub state: StateArg,

    /// IPv4 address range (CIDR)
    #[arg(long)]
    pub addressrange: Option<String>,

    /// IPv6 address range (CIDR)
    #[arg(long)]
    pub addressrange6: Option<String>,

    /// Default DNS server handed to external clients
    #[arg(long)]
    pub defaultextclientdns: Option<String>,

    /// Default WireGuard interface name
    #[arg(long)]
    pub defaultinterface: Option<String>,

    /// Default post-down command
    #[arg(long, allow_hyphen_values = true)]
    pub defaultpostdown: Option<String>,

    /// Default post-up command
    #[arg(long, allow_hyphen_values = true)]
    pub defaultpostup: Option<String>,

    /// Default persistent keepalive in seconds
    #[arg(long)]
    pub defaultkeepalive: Option<u32>,

    /// Default interface MTU
    #[arg(long)]
    pub defaultmtu: Option<u32>,

    /// Whether the network is local-only
    #[arg(long, value_name = "BOOL")]
    pub islocal: Option<bool>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EXTERNAL CLIENT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Unset flags leave the corresponding remote field alone.
#[derive(Debug, Args)]
pub struct ExtclientArgs {
    /// Client ID (clientid)
    pub name: String,

    /// Network the client belongs to
    #[arg(long, short = 'n')]
    pub network: String,

    /// Desired state
    #[arg(long, short = 's', value_enum, default_value_t = StateArg::Present)]
    pub state: StateArg,

    /// Ingress gateway node ID, or "auto" to pick the first one
    #[arg(long, alias = "gateway", default_value = "auto")]
    pub ingress_gateway_id: String,

    /// DNS server for the client
    #[arg(long)]
    pub dns: Option<String>,

    /// Extra allowed IPs (comma-separated; pass "" for an empty list)
    #[arg(long, value_delimiter = ',')]
    pub extraallowedips: Option<Vec<String>>,

    /// Whether the client is enabled
    #[arg(long, value_name = "BOOL")]
    pub enabled: Option<bool>,

    /// Post-up command
    #[arg(long, allow_hyphen_values = true)]
    pub postup: Option<String>,

    /// Post-down command
    #[arg(long, allow_hyphen_values = true)]
    pub postdown: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APPLY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Parameter file (.json, .yaml or .yml)
    pub file: PathBuf,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the loaded configuration (secrets redacted)
    Show,

    /// Store a secret in the system keyring
    SetSecret {
        /// Which secret to store
        #[arg(value_enum)]
        kind: SecretArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SecretArg {
    /// Master key
    MasterKey,
    /// Password for username authentication
    Password,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
