//! Short URL commands

use colored::Colorize;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::services::ShortUrlService;
use crate::storage::SeaOrmStorage;

pub async fn list_short_urls(storage: Arc<SeaOrmStorage>, limit: u64) -> Result<(), CliError> {
    let total = storage.count_short_urls().await?;
    let service = ShortUrlService::new(storage);
    let urls = service.list(limit).await?;

    if urls.is_empty() {
        println!("{} No short URLs found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Short URL list:".bold().green());
    println!();
    for url in &urls {
        let mut info_parts = vec![
            format!(
                "{} -> {}",
                url.short_code.cyan(),
                url.original_url.blue().underline()
            ),
            format!("[{}]", url.url_type).yellow().to_string(),
        ];

        if url.click_count > 0 {
            info_parts.push(
                format!("(clicks: {})", url.click_count)
                    .dimmed()
                    .cyan()
                    .to_string(),
            );
        }

        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!(
        "{} Showing {} of {} short URLs",
        "ℹ".bold().blue(),
        urls.len().to_string().green(),
        total.to_string().green()
    );
    Ok(())
}
