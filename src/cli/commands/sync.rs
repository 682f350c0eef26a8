use super::sync_service;
use crate::config::Config;

pub async fn cmd_sync(config: &Config) -> anyhow::Result<()> {
    let (_, service) = sync_service(config).await?;

    let stats = service.sync_all().await?;

    println!();
    println!(
        "Sync complete. {} shows checked, {} new episodes found.",
        stats.shows, stats.inserted
    );
    if stats.failed_shows > 0 {
        println!("⚠ {} shows failed; see logs.", stats.failed_shows);
    }

    Ok(())
}
