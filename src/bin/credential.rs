//! Gazette credential helper
//!
//! Stores and checks the SMTP password in the operating system keychain, so
//! the watcher itself never reads a password from disk or the environment.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gazette_watch::models::Config;
use gazette_watch::services::{KeyringSecrets, SMTP_SECRET_KEY, SecretStore};

#[derive(Parser, Debug)]
#[command(
    name = "gazette-credential",
    version,
    about = "Manages the SMTP password in the system credential store"
)]
struct Cli {
    /// Path to the TOML configuration file (read for the keyring service name)
    #[arg(short, long, default_value = "gazette.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prompt for the SMTP password and store it
    Set,

    /// Check whether a password is stored
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let service = Config::load(&cli.config)
        .map(|config| config.email.keyring_service)
        .unwrap_or_else(|_| Config::default().email.keyring_service);

    match cli.command {
        Command::Set => set_password(&service),
        Command::Check => check_password(&service),
    }
}

fn set_password(service: &str) -> ExitCode {
    let prompt = format!("Enter SMTP password for '{}': ", service);
    let password = match rpassword::prompt_password(prompt) {
        Ok(password) => password,
        Err(error) => {
            eprintln!("Could not read password from the prompt: {}", error);
            return ExitCode::from(1);
        }
    };

    if password.is_empty() {
        eprintln!("ERROR: No password was provided.");
        return ExitCode::from(1);
    }

    let entry = match keyring::Entry::new(service, SMTP_SECRET_KEY) {
        Ok(entry) => entry,
        Err(error) => {
            eprintln!("Could not open the credential store: {}", error);
            return ExitCode::from(1);
        }
    };

    match entry.set_password(&password) {
        Ok(()) => {
            println!(
                "SUCCESS: Password for '{}' was set in the system credential store.",
                service
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Failed to store the password: {}", error);
            ExitCode::from(1)
        }
    }
}

fn check_password(service: &str) -> ExitCode {
    println!("Attempting to get password from keyring...");
    match KeyringSecrets.get_secret(service, SMTP_SECRET_KEY) {
        Ok(Some(_)) => {
            println!("SUCCESS: Keyring call completed and retrieved a password.");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("FAILURE: Keyring call completed, but no password was found.");
            ExitCode::from(1)
        }
        Err(error) => {
            eprintln!("FAILURE: Keyring call failed with an exception: {}", error);
            ExitCode::from(2)
        }
    }
}
