//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod context;
pub mod generate;
pub mod init;
pub mod ou;
pub mod status;

pub use context::CommandContext;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// oubridge - export Google Workspace organizational units as an Active
/// Directory provisioning script
#[derive(Parser, Debug)]
#[command(name = "oubridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "OUBRIDGE_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "OUBRIDGE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override OAuth client credentials file location
    #[arg(long, global = true, env = "OUBRIDGE_CREDENTIALS", hide_env = true)]
    pub credentials: Option<String>,

    /// Override Workspace customer id (defaults to my_customer)
    #[arg(long, global = true, env = "OUBRIDGE_CUSTOMER", hide_env = true)]
    pub customer: Option<String>,

    /// Custom API host for development/testing
    #[arg(long, global = true, env = "OUBRIDGE_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "OUBRIDGE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authorize against Google Workspace and store the token
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Inspect organizational units
    #[command(subcommand)]
    Ou(OuCommands),

    /// Generate the Active Directory OU provisioning script
    Generate {
        /// Root DN to anchor generated OUs under (prompted when omitted)
        #[arg(long)]
        root_dn: Option<String>,

        /// Script output path (defaults to createOrgUnits.ps1)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Organizational unit subcommands
#[derive(Subcommand, Debug)]
pub enum OuCommands {
    /// List all organizational units in the tenant
    List,
}

/// Global CLI options passed to all command handlers.
///
/// Consolidates the global flags so handler signatures stay small; precedence
/// is CLI flag > environment variable > config file > default.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format override from flag or environment; `None` falls back
    /// to the config file preference, then the default
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.oubridge/config.yaml)
    pub config: Option<String>,

    /// Credentials file override (defaults to ~/.oubridge/credentials.json)
    pub credentials: Option<String>,

    /// Customer id override
    pub customer: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            credentials: cli.credentials.clone(),
            customer: cli.customer.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get credentials path as `Option<&str>`
    pub fn credentials_ref(&self) -> Option<&str> {
        self.credentials.as_deref()
    }

    /// Get customer override as `Option<&str>`
    pub fn customer_ref(&self) -> Option<&str> {
        self.customer.as_deref()
    }

    /// Get API host override as `Option<&str>`
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}
