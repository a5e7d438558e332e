//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// tdbstats - Statistics for temporal transactional databases
///
/// Reads a temporal transactional database from a file, an http(s) URL or a
/// JSON table and reports transaction sizes, item frequencies, periods and
/// transactions per timestamp.
#[derive(Parser, Debug)]
#[command(
    name = "tdbstats",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TDBSTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every scalar statistic of a database
    Summary(SummaryArgs),

    /// Show how often each item occurs, most frequent first
    Items(ItemsArgs),

    /// Show how many transactions have each length
    Lengths(DistributionArgs),

    /// Show how many transactions fall on each timestamp
    Timestamps(DistributionArgs),

    /// Write the three distributions as tab-separated files
    Export(ExportArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

impl Commands {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Summary(_) => "summary",
            Commands::Items(_) => "items",
            Commands::Lengths(_) => "lengths",
            Commands::Timestamps(_) => "timestamps",
            Commands::Export(_) => "export",
            Commands::Config(_) => "config",
            Commands::Completions(_) => "completions",
        }
    }
}

/// Where the database comes from and how to read it
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// File path or http(s) URL of the database
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Field separator (defaults to a tab)
    #[arg(short, long)]
    pub separator: Option<String>,

    /// Treat SOURCE as a JSON table with `ts` and `Transactions`/`Patterns` columns
    #[arg(long)]
    pub table: bool,

    /// Request timeout in seconds for URL sources
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// How per-timestamp transaction counts are keyed
    #[arg(long, value_enum)]
    pub keying: Option<Keying>,

    /// What happens to table rows that share a timestamp
    #[arg(long, value_enum)]
    pub collision: Option<Collision>,
}

/// Arguments for the summary command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the items command
#[derive(Args, Debug)]
pub struct ItemsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only show the N most frequent items
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Also write the full mapping to a file
    #[arg(long = "save-to", value_name = "PATH")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the lengths and timestamps commands
#[derive(Args, Debug)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Also write the mapping to a file
    #[arg(long = "save-to", value_name = "PATH")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory to write into (defaults to the configured export directory)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize a default configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Write the user config instead of the project config (.tdbstats.toml)
    #[arg(long)]
    pub user: bool,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl OutputFormat {
    /// Parse the names used in config files and `TDBSTATS_OUTPUT_FORMAT`
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Timestamp keying for per-timestamp counts
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Keying {
    /// Key by the parsed timestamp
    Parsed,
    /// Key the lookup by the first character of the line
    LeadingCharacter,
}

/// Collision policy for table rows sharing a timestamp
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Collision {
    /// Keep every row as its own record
    KeepAll,
    /// A later row replaces the items of an earlier one
    LastWins,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<Keying> for tdbstats_core::TimestampKeying {
    fn from(keying: Keying) -> Self {
        match keying {
            Keying::Parsed => tdbstats_core::TimestampKeying::Parsed,
            Keying::LeadingCharacter => tdbstats_core::TimestampKeying::LeadingCharacter,
        }
    }
}

impl From<Collision> for tdbstats_core::CollisionPolicy {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::KeepAll => tdbstats_core::CollisionPolicy::KeepAll,
            Collision::LastWins => tdbstats_core::CollisionPolicy::LastWins,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
