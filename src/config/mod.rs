pub mod cli;
pub mod toml_config;
pub mod vendor;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mint-konnector")]
#[command(about = "Fetch mint-energie invoices and describe them for bill storage")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "konnector.toml")]
    pub config: String,

    /// Override output.path from the config
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Load and validate the configuration without touching the network
    #[arg(long)]
    pub dry_run: bool,
}
