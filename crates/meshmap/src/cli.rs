//! Clap derive structures for the `meshmap` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use meshmap_core::{Bounds, DeviceFilter};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// meshmap -- inspect Meshtastic map backends from the command line
#[derive(Debug, Parser)]
#[command(
    name = "meshmap",
    version,
    about = "Inspect Meshtastic map backends from the command line",
    long_about = "Fetches device records from a Meshtastic map backend, normalizes the\n\
        current, raw-position and legacy record schemas into one view, and\n\
        reports liveness, positions, tracks and telemetry.",
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
    /// Backend profile to use
    #[arg(long, short = 'p', env = "MESHMAP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "MESHMAP_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Main API base serving /devices (overrides profile)
    #[arg(long, env = "MESHMAP_MAIN_URL", global = true)]
    pub main_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MESHMAP_OUTPUT",
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "MESHMAP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "MESHMAP_TIMEOUT", global = true)]
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
    /// Plain text, one value per line (scripting)
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List normalized devices
    #[command(alias = "ls", alias = "d")]
    Devices(DevicesArgs),

    /// Show one device with its track and telemetry
    Device {
        /// Node id (as listed by `meshmap devices`)
        node_id: String,
    },

    /// Show the GPS track of a node
    Track {
        /// Node id
        node_id: String,
    },

    /// Show the raw metrics payload of a node
    Metrics(MetricsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("status").multiple(false))]
pub struct DevicesArgs {
    /// Only devices that reported within the active threshold
    #[arg(long, group = "status")]
    pub online: bool,

    /// Only active devices (same window as --online)
    #[arg(long, group = "status")]
    pub active: bool,

    /// Only devices that reported within the recently-active threshold
    #[arg(long, group = "status")]
    pub recent: bool,

    /// Only devices reporting through an MQTT gateway
    #[arg(long, group = "status")]
    pub mqtt: bool,

    /// Only devices inside "south,west,north,east"
    #[arg(long, group = "status", allow_hyphen_values = true)]
    pub bounds: Option<Bounds>,
}

impl DevicesArgs {
    pub fn filter(&self) -> DeviceFilter {
        if self.online {
            DeviceFilter::Online
        } else if self.active {
            DeviceFilter::Active
        } else if self.recent {
            DeviceFilter::RecentlyActive
        } else if self.mqtt {
            DeviceFilter::Mqtt
        } else if let Some(ref bounds) = self.bounds {
            DeviceFilter::InBounds(bounds.clone())
        } else {
            DeviceFilter::All
        }
    }
}

// ── Metrics ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Node id
    pub node_id: String,

    /// Show environment metrics instead of device metrics
    #[arg(long, short = 'e')]
    pub environment: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with one profile
    Init {
        /// API base URL for the profile
        #[arg(long)]
        base_url: String,

        /// Main API base serving /devices, when different from the base URL
        #[arg(long)]
        main_url: Option<String>,

        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Overwrite an existing profile of the same name
        #[arg(long)]
        force: bool,
    },

    /// Display current configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
