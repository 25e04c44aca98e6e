//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use keyhub_entity::license::LicenseRecord;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One license as a table row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct LicenseRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "State")]
    pub state: String,
    #[tabled(rename = "Validity")]
    pub validity: String,
    #[tabled(rename = "Note")]
    pub note: String,
    #[tabled(rename = "Machine")]
    pub machine_id: String,
    #[tabled(rename = "Created")]
    pub created_at: String,
}

impl From<&LicenseRecord> for LicenseRow {
    fn from(record: &LicenseRecord) -> Self {
        Self {
            key: record.key.to_string(),
            state: record.state.to_string(),
            validity: validity_label(record.valid_days.days()),
            note: record.note.clone(),
            machine_id: record.machine_id.clone().unwrap_or_else(|| "-".to_string()),
            created_at: record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// `"unlimited"` or `"N days"`.
pub fn validity_label(days: i32) -> String {
    if days == -1 {
        "unlimited".to_string()
    } else {
        format!("{days} days")
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => print_error(&format!("Failed to serialize output: {e}")),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<16} {}", format!("{key}:"), value);
}
