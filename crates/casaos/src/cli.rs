//! Clap derive structures for the `casaos` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// casaos -- read-only application inventory for CasaOS devices
#[derive(Debug, Parser)]
#[command(
    name = "casaos",
    version,
    about = "List applications installed on a CasaOS device",
    long_about = "Queries the CasaOS app grid and prints every managed application.\n\n\
        Credentials come from flags, then the active profile, then the\n\
        CASAOS_HOST / CASAOS_USERNAME / CASAOS_PASSWORD environment variables.",
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
    /// Device profile to use
    #[arg(long, short = 'p', env = "CASAOS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device URL, e.g. http://casaos.local (falls back to CASAOS_HOST)
    #[arg(long, short = 'H', global = true)]
    pub host: Option<String>,

    /// Username (falls back to CASAOS_USERNAME)
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Password (falls back to CASAOS_PASSWORD)
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CASAOS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "CASAOS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "CASAOS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

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
    /// Plain text, one store id per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect installed applications
    #[command(alias = "app", alias = "a")]
    Apps(AppsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct AppsArgs {
    #[command(subcommand)]
    pub command: Option<AppsCommand>,
}

#[derive(Debug, Subcommand)]
pub enum AppsCommand {
    /// List every application (default)
    #[command(alias = "ls")]
    List,

    /// Show one application by store id
    Get {
        /// The application's store_app_id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
