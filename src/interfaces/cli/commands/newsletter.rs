//! Newsletter subscription commands

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::services::NewsletterService;
use crate::storage::SeaOrmStorage;
use crate::validation::UnsubscribeInput;

pub async fn list_subscriptions(storage: Arc<SeaOrmStorage>) -> Result<(), CliError> {
    let service = NewsletterService::new(storage);
    let subscriptions = service.list_active().await?;

    if subscriptions.is_empty() {
        println!("{} No active subscriptions", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Active subscriptions:".bold().green());
    println!();
    for sub in &subscriptions {
        println!(
            "  {} {} {}",
            sub.email.cyan(),
            format!("(since {})", sub.subscription_date.format("%Y-%m-%d %H:%M:%S UTC"))
                .dimmed(),
            sub.source
                .as_deref()
                .map(|s| format!("[{}]", s).yellow().to_string())
                .unwrap_or_default()
        );
    }
    println!();
    println!(
        "{} Total {} active subscriptions",
        "ℹ".bold().blue(),
        subscriptions.len().to_string().green()
    );
    Ok(())
}

pub async fn unsubscribe_email(storage: Arc<SeaOrmStorage>, email: String) -> Result<(), CliError> {
    let service = NewsletterService::new(storage);
    let subscription = service
        .unsubscribe(&UnsubscribeInput { email: Some(email) })
        .await?;

    println!(
        "{} Unsubscribed {}",
        "✓".bold().green(),
        subscription.email.cyan()
    );
    Ok(())
}
