//! License issuance and inspection commands.

use std::sync::Arc;

use clap::Args;

use keyhub_core::error::AppError;
use keyhub_service::{IssuanceService, LicenseQueryService, UuidKeyGenerator};

use super::Cli;
use crate::output::{self, LicenseRow, OutputFormat};

/// Arguments for the gen command
#[derive(Debug, Args)]
pub struct GenArgs {
    /// Number of keys to generate (1-100)
    #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,

    /// Validity in days (-1 for unlimited)
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    pub days: i32,

    /// Note stored with each key
    #[arg(short = 'm', long, default_value = "")]
    pub note: String,
}

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Number of records to show (defaults to `admin.list_limit`)
    #[arg(short, long)]
    pub limit: Option<u32>,
}

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// License key
    pub key: String,
}

/// Generate keys and print them
pub async fn generate(args: &GenArgs, cli: &Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;
    let store = super::connect_store(&config).await?;
    let issuance = IssuanceService::new(store, Arc::new(UuidKeyGenerator::new()));

    let keys = issuance.issue_keys(args.count, args.days, &args.note).await?;

    match cli.format {
        OutputFormat::Table => {
            for key in &keys {
                println!("{key}");
            }
        }
        OutputFormat::Json => output::print_json(&keys),
    }
    Ok(())
}

/// List the most recent licenses
pub async fn list(args: &ListArgs, cli: &Cli) -> Result<(), AppError> {
    let query = query_service(cli).await?;
    let records = query.recent(args.limit).await?;
    let rows: Vec<LicenseRow> = records.iter().map(LicenseRow::from).collect();
    output::print_list(&rows, cli.format);
    Ok(())
}

/// Show one license in full
pub async fn show(args: &ShowArgs, cli: &Cli) -> Result<(), AppError> {
    let query = query_service(cli).await?;
    let record = query.get(&args.key).await?;

    match cli.format {
        OutputFormat::Table => {
            println!("License {}:", record.key);
            output::print_kv("State", record.state.as_str());
            output::print_kv("Validity", &output::validity_label(record.valid_days.days()));
            output::print_kv("Note", &record.note);
            output::print_kv("Created", &record.created_at.to_rfc3339());
            output::print_kv("Machine", record.machine_id.as_deref().unwrap_or("-"));
            if let Some(at) = record.activated_at {
                output::print_kv("Activated", &at.to_rfc3339());
            }
            if let Some(at) = record.expires_at() {
                output::print_kv("Expires", &at.to_rfc3339());
            }
        }
        OutputFormat::Json => output::print_json(&record),
    }
    Ok(())
}

/// Show counts by state
pub async fn stats(cli: &Cli) -> Result<(), AppError> {
    let query = query_service(cli).await?;
    let stats = query.stats().await?;

    match cli.format {
        OutputFormat::Table => {
            println!("Licenses:");
            output::print_kv("Total", &stats.total.to_string());
            output::print_kv("Activated", &stats.activated.to_string());
            output::print_kv("Unactivated", &stats.unactivated.to_string());
        }
        OutputFormat::Json => output::print_json(&stats),
    }
    Ok(())
}

async fn query_service(cli: &Cli) -> Result<LicenseQueryService, AppError> {
    let config = cli.load_config()?;
    let store = super::connect_store(&config).await?;
    Ok(LicenseQueryService::new(store, config.admin.list_limit))
}
