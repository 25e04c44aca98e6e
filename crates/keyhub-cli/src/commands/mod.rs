//! CLI command definitions and dispatch.

pub mod license;
pub mod migrate;
pub mod password;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use keyhub_core::config::AppConfig;
use keyhub_core::error::AppError;
use keyhub_database::store::{LicenseStore, open_store};

use crate::output::OutputFormat;

/// KeyHub: license key issuance and activation
#[derive(Debug, Parser)]
#[command(name = "keyhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay (`config/{env}.toml`)
    #[arg(short, long, env = "KEYHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the KeyHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Generate license keys
    Gen(license::GenArgs),
    /// List recently created licenses
    List(license::ListArgs),
    /// Show a single license
    Show(license::ShowArgs),
    /// Show license counts
    Stats,
    /// Hash an admin password for `admin.password_hash`
    HashPassword(password::HashPasswordArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self).await,
            Commands::Migrate(args) => migrate::execute(args, self).await,
            Commands::Gen(args) => license::generate(args, self).await,
            Commands::List(args) => license::list(args, self).await,
            Commands::Show(args) => license::show(args, self).await,
            Commands::Stats => license::stats(self).await,
            Commands::HashPassword(args) => password::execute(args),
        }
    }

    /// Load configuration from the file, overlay, and environment
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load(&self.config, &self.env)
    }
}

/// Helper: open the configured store, applying migrations
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn LicenseStore>, AppError> {
    tracing::debug!(backend = ?config.storage.backend, "Opening license store");
    open_store(config.storage.backend, &config.database, true).await
}
