//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for ginywow using clap's derive macros.

use clap::{Parser, Subcommand};

/// GinyWow - backend for the GinyWow tool site
#[derive(Parser)]
#[command(name = "ginywow")]
#[command(version)]
#[command(about = "Backend for the GinyWow tool site", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Manage newsletter subscriptions
    Newsletter {
        #[command(subcommand)]
        action: NewsletterCommands,
    },

    /// Manage short URLs
    #[command(name = "short-url")]
    ShortUrl {
        #[command(subcommand)]
        action: ShortUrlCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum NewsletterCommands {
    /// List active subscriptions
    List,

    /// Deactivate a subscription
    Unsubscribe {
        /// Subscriber email
        email: String,
    },
}

#[derive(Subcommand)]
pub enum ShortUrlCommands {
    /// List short URLs, newest first
    List {
        /// Maximum number of rows
        #[arg(long, default_value_t = 100)]
        limit: u64,
    },
}
