//! Admin password hashing command.

use clap::Args;

use keyhub_core::error::AppError;
use keyhub_service::hash_password;

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Password to hash (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Print an Argon2 hash suitable for `admin.password_hash`
pub fn execute(args: &HashPasswordArgs) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Admin password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    if password.is_empty() {
        return Err(AppError::validation("Password must not be empty"));
    }

    println!("{}", hash_password(&password)?);
    Ok(())
}
