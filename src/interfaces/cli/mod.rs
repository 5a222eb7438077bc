//! CLI interface module
//!
//! This module provides command-line interface functionality for ginywow.

pub mod commands;

use crate::cli::{Commands, ConfigCommands, NewsletterCommands, ShortUrlCommands};
use crate::storage::StorageFactory;
use commands::{config_generate, list_short_urls, list_subscriptions, unsubscribe_email};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::GinywowError> for CliError {
    fn from(err: crate::errors::GinywowError) -> Self {
        if err.is_client_error() {
            CliError::CommandError(err.message().to_string())
        } else {
            CliError::StorageError(err.to_string())
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is dispatched by the caller and never reaches here.
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // Generate doesn't need DB connection
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    let storage = StorageFactory::create()
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;

    match cmd {
        Commands::Newsletter { action } => match action {
            NewsletterCommands::List => list_subscriptions(storage).await,
            NewsletterCommands::Unsubscribe { email } => unsubscribe_email(storage, email).await,
        },
        Commands::ShortUrl { action } => match action {
            ShortUrlCommands::List { limit } => list_short_urls(storage, limit).await,
        },
        Commands::Config { .. } => unreachable!("handled above"),
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a management command".to_string(),
        )),
    }
}
