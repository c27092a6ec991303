//! Clap derive structures for the `copylanconfig` CLI.
//!
//! Kept free of crate-internal imports: `build.rs` includes this file
//! directly to render the man page.

use clap::{Args, Parser, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// copylanconfig -- copy LAN VLANs and static routes between ION elements
#[derive(Debug, Parser)]
#[command(
    name = "copylanconfig",
    version,
    about = "Copy LAN VLAN interfaces and static routes from one SD-WAN element to another",
    long_about = "Reads the LAN VLAN interfaces and static routes of a source element and\n\
        creates or updates their counterparts on a destination element, matching\n\
        interfaces by name and routes by destination prefix.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Source element name
    #[arg(
        short = 'S',
        long = "src_element",
        alias = "src-element",
        value_name = "NAME"
    )]
    pub src_element: String,

    /// Destination element name
    #[arg(
        short = 'D',
        long = "dst_element",
        alias = "dst-element",
        value_name = "NAME"
    )]
    pub dst_element: String,

    /// Parent interface carrying the VLANs (e.g. "5")
    #[arg(
        short = 'P',
        long = "parent_interface",
        alias = "parent-interface",
        value_name = "NAME"
    )]
    pub parent_interface: String,

    #[command(flatten)]
    pub run: RunOpts,

    #[command(flatten)]
    pub global: GlobalOpts,
}

// ── Run Options ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RunOpts {
    /// Copy interfaces only; leave static routes untouched
    #[arg(long)]
    pub skip_routes: bool,

    /// Show what would change without writing anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Exit non-zero when any interface or route failed to apply
    #[arg(long)]
    pub strict: bool,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "COPYLAN_PROFILE")]
    pub profile: Option<String>,

    /// Service account client id (overrides profile)
    #[arg(long, env = "PRISMASASE_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Service account client secret (overrides profile)
    #[arg(long, env = "PRISMASASE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Tenant service group id (overrides profile)
    #[arg(long, env = "PRISMASASE_TSG_ID")]
    pub tsg_id: Option<String>,

    /// Controller API URL (overrides profile)
    #[arg(long, env = "COPYLAN_API_URL")]
    pub api_url: Option<String>,

    /// OAuth2 token service URL (overrides profile)
    #[arg(long, env = "COPYLAN_AUTH_URL")]
    pub auth_url: Option<String>,

    /// Controller region (sent as x-panw-region)
    #[arg(long, env = "COPYLAN_REGION")]
    pub region: Option<String>,

    /// Output format [default: `defaults.output` from config, else table]
    #[arg(long, short = 'o', env = "COPYLAN_OUTPUT")]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: `defaults.color` from config, else auto]
    #[arg(long)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "COPYLAN_INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds (default 30)
    #[arg(long, env = "COPYLAN_TIMEOUT")]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one outcome per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}
